use log::{error, info, warn};
use playai::{Client, Mission, Outcome};
use rand::seq::SliceRandom;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

const SHORT_TASK_DELAY: Duration = Duration::from_secs(2);
const LONG_TASK_DELAY: Duration = Duration::from_secs(3);
const MISSION_DELAY: Duration = Duration::from_secs(2);
const VOTE_DELAY: Duration = Duration::from_secs(2);
const VOTE_JITTER_MS: u64 = 1000;
const CHAT_DELAY: Duration = Duration::from_secs(5);

const MAX_CHATS_PER_CYCLE: i64 = 3;
const CHAT_MESSAGES: [&str; 3] = [
    "show my portfolio balance",
    "what is my current balance?",
    "help me understand my wallet status",
];

pub(crate) struct Worker {
    pub(crate) index: usize,
    pub(crate) client: Client,
}

impl Worker {
    pub(crate) fn new(index: usize, client: Client) -> Self {
        Self { index, client }
    }

    /// One full pass through the ordered task list. Login is the only
    /// fatal step: everything after it is best-effort, and the cycle
    /// counts as successful whenever login succeeded.
    pub(crate) async fn run_once(&mut self) -> bool {
        let index = self.index;
        info!(
            "[Wallet {index}] Starting bot run for address: {}",
            self.client.address()
        );

        if !self.client.login().await {
            return false;
        }
        sleep(SHORT_TASK_DELAY).await;

        if let Err(e) = self.report_user_info().await {
            error!("[Wallet {index}] Failed to get user info: {e}");
        }
        sleep(SHORT_TASK_DELAY).await;

        if let Err(e) = self.check_in().await {
            error!("[Wallet {index}] Check-in failed: {e}");
        }
        sleep(LONG_TASK_DELAY).await;

        if let Err(e) = self.complete_missions().await {
            error!("[Wallet {index}] Failed to get missions: {e}");
        }
        sleep(LONG_TASK_DELAY).await;

        if let Err(e) = self.cast_votes().await {
            error!("[Wallet {index}] Failed to get vote quota: {e}");
        }
        sleep(LONG_TASK_DELAY).await;

        if let Err(e) = self.send_chats().await {
            error!("[Wallet {index}] Failed to get chat count: {e}");
        }

        info!("[Wallet {index}] All tasks for this cycle completed successfully!");
        true
    }

    async fn report_user_info(&self) -> playai::Result<()> {
        let profile = self.client.user().await?;
        info!(
            "[Wallet {}] User: {}, Referrals: {}, Wallets: {}",
            self.index,
            profile.username.as_deref().unwrap_or("N/A"),
            profile.referral_count,
            profile.wallets.len()
        );
        Ok(())
    }

    async fn check_in(&self) -> playai::Result<()> {
        let index = self.index;
        info!("[Wallet {index}] Performing daily check-in...");
        match self.client.check_in().await? {
            Outcome::Done(streak) => {
                info!(
                    "[Wallet {index}] Check-in successful! Streak: {} days",
                    streak.streak
                );
            }
            Outcome::AlreadyDone => warn!("[Wallet {index}] Already checked in today."),
        }
        Ok(())
    }

    async fn complete_missions(&self) -> playai::Result<()> {
        let index = self.index;
        let missions = self.client.missions().await?;
        let pending = pending_missions(&missions);

        if pending.is_empty() {
            info!("[Wallet {index}] No new missions to complete.");
            return Ok(());
        }

        info!("[Wallet {index}] Found {} incomplete missions.", pending.len());
        for mission in pending {
            let id = &mission.id;
            match self.client.verify_mission(id).await {
                Ok(Outcome::Done(reward)) => {
                    info!(
                        "[Wallet {index}] Mission {id} completed! Credit: {}",
                        reward.credit
                    );
                }
                Ok(Outcome::AlreadyDone) => {
                    warn!("[Wallet {index}] Mission {id} already completed or not available.");
                }
                Err(e) => error!("[Wallet {index}] Failed to complete mission {id}: {e}"),
            }
            sleep(MISSION_DELAY).await;
        }

        info!("[Wallet {index}] All available missions processed!");
        Ok(())
    }

    async fn cast_votes(&self) -> playai::Result<()> {
        let index = self.index;
        let quota = self.client.vote_quota().await?;
        info!(
            "[Wallet {index}] Vote quota - Remaining: {}/{}",
            quota.remaining, quota.total
        );

        if quota.remaining <= 0 {
            warn!("[Wallet {index}] No remaining votes available.");
            return Ok(());
        }

        let mut ids = self.client.votable_ids().await;
        if ids.is_empty() {
            error!("[Wallet {index}] No tweet IDs found to vote on.");
            return Ok(());
        }
        info!("[Wallet {index}] Fetched {} unique tweet IDs.", ids.len());

        ids.shuffle(&mut rand::thread_rng());

        let client = &self.client;
        let remaining = quota.remaining as usize;
        let successful = vote_until_quota(&ids, remaining, |id, done| {
            let id = id.to_string();
            async move {
                info!("[Wallet {index}] Voting on tweet {id}... [{done}/{remaining}]");
                match client.vote(&id).await {
                    Ok(Outcome::Done(_)) => {
                        info!(
                            "[Wallet {index}] Vote successful! Progress: {}/{remaining}",
                            done + 1
                        );
                        true
                    }
                    Ok(Outcome::AlreadyDone) => {
                        warn!("[Wallet {index}] Already voted on tweet {id}.");
                        false
                    }
                    Err(e) => {
                        error!("[Wallet {index}] Failed to vote on {id}: {e}");
                        false
                    }
                }
            }
        })
        .await;

        info!("[Wallet {index}] Voting process finished. Total successful votes: {successful}");
        Ok(())
    }

    async fn send_chats(&self) -> playai::Result<()> {
        let index = self.index;
        let usage = self.client.chat_usage().await?;
        info!(
            "[Wallet {index}] Chat quota - Used: {}/{}",
            usage.count, usage.total
        );

        let batch = chat_batch(usage.count, usage.total);
        if batch.is_empty() {
            warn!("[Wallet {index}] No remaining chats available.");
            return Ok(());
        }

        for message in batch {
            info!("[Wallet {index}] Sending chat message: \"{message}\"");
            match self.client.send_chat(message).await {
                Ok(()) => info!("[Wallet {index}] Chat message sent successfully!"),
                Err(e) => error!("[Wallet {index}] Failed to send chat: {e}"),
            }
            sleep(CHAT_DELAY).await;
        }

        info!("[Wallet {index}] Completed chat interactions.");
        Ok(())
    }
}

fn pending_missions(missions: &[Mission]) -> Vec<&Mission> {
    missions.iter().filter(|mission| !mission.completed).collect()
}

/// Walks the shuffled ids until `remaining` attempts have succeeded. The
/// quota captured at the start of the cycle is the ceiling; it is not
/// re-fetched mid-loop. Every attempt, successful or not, is followed by
/// a jittered pacing delay.
async fn vote_until_quota<F, Fut>(ids: &[String], remaining: usize, mut attempt: F) -> usize
where
    F: FnMut(&str, usize) -> Fut,
    Fut: Future<Output = bool>,
{
    let mut successful = 0;
    for id in ids {
        if successful >= remaining {
            break;
        }
        if attempt(id, successful).await {
            successful += 1;
        }
        vote_pause().await;
    }
    successful
}

async fn vote_pause() {
    let jitter = rand::thread_rng().gen_range(0..=VOTE_JITTER_MS);
    sleep(VOTE_DELAY + Duration::from_millis(jitter)).await;
}

/// Messages for one cycle: at most three, cycling the canned rotation.
fn chat_batch(count: i64, total: i64) -> Vec<&'static str> {
    let remaining = total - count;
    if remaining <= 0 {
        return Vec::new();
    }
    let sends = remaining.min(MAX_CHATS_PER_CYCLE) as usize;
    (0..sends).map(|i| CHAT_MESSAGES[i % CHAT_MESSAGES.len()]).collect()
}
