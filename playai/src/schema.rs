use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug)]
pub struct AuthChallenge {
    pub message: String,
    pub nonce: String,
}

#[derive(Deserialize, Debug)]
pub struct AuthSession {
    pub jwt: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub referral_count: i64,
    #[serde(default)]
    pub wallets: Vec<Value>,
}

#[derive(Deserialize, Debug)]
pub struct Streak {
    pub streak: i64,
}

#[derive(Deserialize, Debug)]
pub struct Mission {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize, Debug)]
pub struct MissionReward {
    pub credit: f64,
}

#[derive(Deserialize, Debug)]
pub struct VoteQuota {
    pub remaining: i64,
    pub total: i64,
}

#[derive(Deserialize, Debug)]
pub struct Tweet {
    #[serde(default, deserialize_with = "optional_id_string")]
    pub id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct TweetPage {
    #[serde(default)]
    pub result: Vec<Tweet>,
}

#[derive(Deserialize, Debug)]
pub struct ChatUsage {
    pub count: i64,
    pub total: i64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MiningQuota {
    #[serde(default)]
    pub reset_at: Option<DateTime<Utc>>,
}

// The service is loose about id types; accept both strings and numbers.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("unexpected id: {other}"))),
    }
}

fn optional_id_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mission_id_accepts_numbers_and_strings() {
        let mission: Mission = serde_json::from_str(r#"{"id": 7, "completed": false}"#).unwrap();
        assert_eq!(mission.id, "7");
        assert!(!mission.completed);

        let mission: Mission = serde_json::from_str(r#"{"id": "abc", "completed": true}"#).unwrap();
        assert_eq!(mission.id, "abc");
        assert!(mission.completed);
    }

    #[test]
    fn tweet_without_id_becomes_none() {
        let page: TweetPage =
            serde_json::from_str(r#"{"result": [{"id": "t1"}, {}, {"id": ""}]}"#).unwrap();
        let ids: Vec<_> = page.result.into_iter().filter_map(|t| t.id).collect();
        assert_eq!(ids, vec!["t1"]);
    }

    #[test]
    fn mining_quota_reset_at_is_optional() {
        let quota: MiningQuota =
            serde_json::from_str(r#"{"resetAt": "2026-08-06T12:00:00Z"}"#).unwrap();
        assert!(quota.reset_at.is_some());

        let quota: MiningQuota = serde_json::from_str("{}").unwrap();
        assert!(quota.reset_at.is_none());
    }
}
