//! Wire decoding for the remote change list.

use crate::host::FetchError;
use crate::model::change::{AttentionEntry, ChangeSummary};
use crate::model::state::TimestampMs;
use chrono::NaiveDateTime;
use log::warn;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Anti-XSSI guard the remote prepends to every JSON response.
pub const XSSI_PREFIX: &str = ")]}'";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, Deserialize)]
struct ChangeInfoWire {
    id: String,
    #[serde(default)]
    project: Option<String>,
    #[serde(default, rename = "_number")]
    number: Option<u64>,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    attention_set: BTreeMap<String, AttentionSetInfoWire>,
}

#[derive(Debug, Deserialize)]
struct AttentionSetInfoWire {
    #[serde(default)]
    last_update: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    reason_account: Option<AccountInfoWire>,
}

#[derive(Debug, Deserialize)]
struct AccountInfoWire {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl AccountInfoWire {
    fn label(self) -> Option<String> {
        self.display_name.or(self.name)
    }
}

/// Decodes a change-list response body.
///
/// Strips the anti-XSSI prefix; an empty or `null` body is an empty list.
/// Attention entries with missing or unparseable timestamps are dropped.
pub fn parse_change_list(body: &str) -> Result<Vec<ChangeSummary>, FetchError> {
    let trimmed = body.trim_start();
    let json = trimmed.strip_prefix(XSSI_PREFIX).unwrap_or(trimmed).trim();
    if json.is_empty() {
        return Ok(Vec::new());
    }

    let changes: Option<Vec<ChangeInfoWire>> =
        serde_json::from_str(json).map_err(|err| FetchError::Decode(err.to_string()))?;
    Ok(changes
        .unwrap_or_default()
        .into_iter()
        .map(into_summary)
        .collect())
}

/// Parses a remote `YYYY-MM-DD HH:MM:SS[.fffffffff]` UTC timestamp.
pub fn parse_timestamp_ms(value: &str) -> Option<TimestampMs> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .ok()
        .map(|datetime| datetime.and_utc().timestamp_millis())
}

fn into_summary(wire: ChangeInfoWire) -> ChangeSummary {
    let mut summary = ChangeSummary::new(wire.id, wire.subject);
    summary.project = wire.project;
    summary.number = wire.number;

    for (account_id, info) in wire.attention_set {
        let Some(updated_at_ms) = info.last_update.as_deref().and_then(parse_timestamp_ms) else {
            warn!(
                "event=change_decode module=transport status=skip reason=bad_last_update change={} account={}",
                summary.id, account_id
            );
            continue;
        };
        let mut entry = AttentionEntry::new(info.reason.unwrap_or_default(), updated_at_ms);
        entry.added_by = info.reason_account.and_then(AccountInfoWire::label);
        summary.attention_entries.insert(account_id, entry);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::{parse_change_list, parse_timestamp_ms};
    use crate::host::FetchError;

    const BODY: &str = r#")]}'
[
  {
    "id": "core~12~I8f0c",
    "project": "core",
    "_number": 12,
    "subject": "Fix flaky test",
    "attention_set": {
      "1000096": {
        "account": {"_account_id": 1000096},
        "last_update": "2024-03-01 10:00:00.000000000",
        "reason": "Reviewer was added",
        "reason_account": {"_account_id": 1000001, "name": "Alice"}
      },
      "1000097": {
        "account": {"_account_id": 1000097},
        "last_update": "not a date",
        "reason": "broken"
      }
    }
  },
  {"id": "core~13~I9a1d", "subject": "Docs"}
]"#;

    #[test]
    fn decodes_changes_and_attention_entries() {
        let changes = parse_change_list(BODY).unwrap();
        assert_eq!(changes.len(), 2);

        let first = &changes[0];
        assert_eq!(first.number, Some(12));
        assert_eq!(first.project.as_deref(), Some("core"));
        let entry = first.attention_entry_for("1000096").expect("entry for 1000096");
        assert_eq!(entry.reason_text, "Reviewer was added");
        assert_eq!(entry.added_by.as_deref(), Some("Alice"));
        assert_eq!(entry.updated_at_ms, 1_709_287_200_000);
        assert!(first.attention_entry_for("1000097").is_none());

        assert!(changes[1].attention_entries.is_empty());
    }

    #[test]
    fn empty_and_null_bodies_are_empty_lists() {
        assert!(parse_change_list("").unwrap().is_empty());
        assert!(parse_change_list(")]}'\nnull").unwrap().is_empty());
        assert!(parse_change_list(")]}'\n[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = parse_change_list(")]}'\n[{").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn parses_timestamps_with_and_without_fraction() {
        assert_eq!(parse_timestamp_ms("1970-01-01 00:00:01"), Some(1000));
        assert_eq!(
            parse_timestamp_ms("1970-01-01 00:00:01.250000000"),
            Some(1250)
        );
        assert_eq!(parse_timestamp_ms("yesterday"), None);
    }
}
