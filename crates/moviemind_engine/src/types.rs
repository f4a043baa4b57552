use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RequestId = u64;
pub type RefreshId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    /// Service identifier rendered as text; numeric ids keep their digits.
    pub id: String,
    pub user_input: String,
    pub timestamp: DateTime<Utc>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RecommendCompleted {
        request_id: RequestId,
        result: Result<Vec<Recommendation>, ApiError>,
    },
    HistoryCompleted {
        refresh_id: RefreshId,
        result: Result<Vec<HistoryRecord>, ApiError>,
    },
    TimerElapsed {
        request_id: RequestId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
}

impl FailureKind {
    /// True when the service could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, FailureKind::Network | FailureKind::Timeout)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed body"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] ApiError),
}

#[derive(Serialize)]
pub(crate) struct RecommendRequest<'a> {
    pub preference: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Deserialize)]
pub(crate) struct WireHistoryRecord {
    id: WireId,
    user_input: String,
    timestamp: String,
    #[serde(default)]
    recommendations: Vec<Recommendation>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(serde_json::Number),
    Text(String),
}

impl TryFrom<WireHistoryRecord> for HistoryRecord {
    type Error = ApiError;

    fn try_from(wire: WireHistoryRecord) -> Result<Self, Self::Error> {
        let timestamp = parse_timestamp(&wire.timestamp).ok_or_else(|| {
            ApiError::new(
                FailureKind::MalformedBody,
                format!("unrecognized timestamp {:?}", wire.timestamp),
            )
        })?;
        let id = match wire.id {
            WireId::Number(n) => n.to_string(),
            WireId::Text(s) => s,
        };
        Ok(Self {
            id,
            user_input: wire.user_input,
            timestamp,
            recommendations: wire.recommendations,
        })
    }
}

/// Accepts RFC 3339, or a naive ISO-8601 date-time taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn parses_offset_and_naive_timestamps() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2026-03-01T18:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-01T19:00:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-01T18:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-01 18:00:00"), Some(expected));

        let fractional = parse_timestamp("2026-03-01T18:00:00.123456").unwrap();
        assert_eq!(fractional.nanosecond(), 123_456_000);
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn numeric_and_text_ids_become_strings() {
        let numeric: WireHistoryRecord = serde_json::from_str(
            r#"{"id": 17, "user_input": "noir", "timestamp": "2026-03-01T18:00:00"}"#,
        )
        .unwrap();
        let text: WireHistoryRecord = serde_json::from_str(
            r#"{"id": "h1", "user_input": "noir", "timestamp": "2026-03-01T18:00:00"}"#,
        )
        .unwrap();

        assert_eq!(HistoryRecord::try_from(numeric).unwrap().id, "17");
        assert_eq!(HistoryRecord::try_from(text).unwrap().id, "h1");
    }

    #[test]
    fn transport_kinds() {
        assert!(FailureKind::Network.is_transport());
        assert!(FailureKind::Timeout.is_transport());
        assert!(!FailureKind::HttpStatus(500).is_transport());
        assert!(!FailureKind::MalformedBody.is_transport());
    }
}
