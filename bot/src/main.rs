mod config;
mod scheduler;
mod worker;

use anyhow::{bail, Result};
use config::Config;
use log::{error, info, warn};
use playai::{Client, Wallet};
use std::sync::Arc;
use tokio::task::JoinSet;
use worker::Worker;

#[tokio::main]
async fn main() -> Result<()> {
    common::setup_env();
    info!("PlayAI auto-vote bot starting");

    let config = Arc::new(Config::from_env()?);

    let mut workers = JoinSet::new();
    for (i, key) in config.private_keys.iter().enumerate() {
        let index = i + 1;
        let wallet = Wallet::new(key)?;
        let client = Client::new(wallet, index, config.relay_for(i))?;
        let worker = Worker::new(index, client);

        let config = Arc::clone(&config);
        let stagger = config.start_stagger * i as u32;
        workers.spawn(async move {
            tokio::time::sleep(stagger).await;
            info!("Starting loop for wallet {index}");
            scheduler::run_forever(worker, &config).await;
        });
    }

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            warn!("Bot stopped by user.");
            Ok(())
        }
        _ = supervise(&mut workers) => {
            bail!("all wallet loops have stopped unexpectedly")
        }
    }
}

/// Worker loops never return, so any completed task is a crash. Crashes
/// are logged without taking the process or the sibling loops down.
async fn supervise(workers: &mut JoinSet<()>) {
    while let Some(result) = workers.join_next().await {
        if let Err(e) = result {
            error!("Wallet loop crashed: {e}");
        }
    }
}
