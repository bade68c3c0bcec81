//! Client library for the PlayAI hub service: wallet-challenge
//! authentication, daily streaks, missions, tweet voting and chat.
mod client;
mod error;
mod schema;
mod sign;

pub use client::{Client, Outcome};
pub use error::Error;
pub use schema::{
    AuthChallenge, ChatUsage, MiningQuota, Mission, MissionReward, Profile, Streak, VoteQuota,
};
pub use sign::Wallet;

pub type Result<T> = std::result::Result<T, Error>;
