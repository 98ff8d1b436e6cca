//! Requesting principal supplied by the triggering client.

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque account identity used to look up attention entries.
pub type AccountId = String;

/// Account attached to a trigger message.
///
/// Never constructed by the engine itself; only decoded from trigger payloads
/// or built by hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Accepts `_account_id` (remote wire name) or `id`, as string or integer.
    #[serde(
        default,
        rename = "_account_id",
        alias = "id",
        deserialize_with = "deserialize_account_id"
    )]
    pub id: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Account {
    pub fn with_id(id: impl Into<AccountId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Returns the trimmed id, or `None` when the account cannot be matched.
    pub fn relevance_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

fn deserialize_account_id<'de, D>(deserializer: D) -> Result<Option<AccountId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}
