//! Log record codec.
//!
//! Each action is one line of the form `YYYYMMDDThhmmss,<code>` where the
//! code is `1` for start and `0` for stop. Timestamps are local wall-clock
//! time with second precision and sort lexicographically.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Pattern used for the timestamp field of a log line.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Shortest line that can hold a full timestamp.
const MIN_LINE_LEN: usize = 15;

/// Field separator between timestamp and action code.
const FIELD_SEPARATOR: char = ',';

/// The kind of action recorded in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Start,
    Stop,
}

impl ActionKind {
    /// Numeric code written to the log.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Start => "1",
            Self::Stop => "0",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::Stop => "stop",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ActionKind {
    type Err = UnknownActionCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Start),
            "0" => Ok(Self::Stop),
            other => Err(UnknownActionCode(other.to_string())),
        }
    }
}

/// Error type for unrecognized action codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action code: {0:?}")]
pub struct UnknownActionCode(String);

/// One decoded log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRecord {
    /// Local wall-clock time of the action.
    pub timestamp: NaiveDateTime,
    /// Whether work started or stopped.
    pub kind: ActionKind,
}

impl ActionRecord {
    pub const fn new(timestamp: NaiveDateTime, kind: ActionKind) -> Self {
        Self { timestamp, kind }
    }

    /// Encodes the record as a single log line, including the trailing newline.
    ///
    /// See [`encode`] for the supported year range.
    #[must_use]
    pub fn encode(&self) -> String {
        encode(self.timestamp, self.kind)
    }
}

/// Encodes an action as one log line, including the trailing newline.
///
/// Only years 0 through 9999 fit the fixed-width timestamp. Other years are
/// written with a sign and more digits, and [`decode`] will not read them back.
#[must_use]
pub fn encode(timestamp: NaiveDateTime, kind: ActionKind) -> String {
    format!(
        "{}{FIELD_SEPARATOR}{}\n",
        timestamp.format(LOG_TIMESTAMP_FORMAT),
        kind.code()
    )
}

/// Decodes one log line.
///
/// Returns `None` for anything that is not a complete record: short or
/// truncated lines, wrong field count, unparseable timestamps and unknown
/// action codes. A half-written last line must never abort a scan.
#[must_use]
pub fn decode(line: &str) -> Option<ActionRecord> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.len() < MIN_LINE_LEN {
        return None;
    }

    let mut fields = line.split(FIELD_SEPARATOR);
    let (Some(timestamp), Some(code), None) = (fields.next(), fields.next(), fields.next()) else {
        return None;
    };

    let timestamp = NaiveDateTime::parse_from_str(timestamp.trim(), LOG_TIMESTAMP_FORMAT).ok()?;
    let kind = code.parse().ok()?;

    Some(ActionRecord { timestamp, kind })
}

/// Records decoded from a whole log, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedLog {
    pub records: Vec<ActionRecord>,
    /// Non-blank lines that could not be decoded.
    pub malformed: usize,
}

/// Decodes every line of a log, skipping blank and malformed lines.
pub fn decode_log(text: &str) -> DecodedLog {
    let mut decoded = DecodedLog::default();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode(line) {
            Some(record) => decoded.records.push(record),
            None => {
                tracing::debug!(line_number = index + 1, line, "skipping malformed log line");
                decoded.malformed += 1;
            }
        }
    }

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 12)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_encode_uses_compact_timestamp_and_code() {
        assert_eq!(encode(ts(9, 5, 7), ActionKind::Start), "20250312T090507,1\n");
        assert_eq!(encode(ts(17, 30, 0), ActionKind::Stop), "20250312T173000,0\n");
    }

    #[test]
    fn test_decode_reverses_encode() {
        for kind in [ActionKind::Start, ActionKind::Stop] {
            for timestamp in [ts(0, 0, 0), ts(12, 34, 56), ts(23, 59, 59)] {
                let line = encode(timestamp, kind);
                assert_eq!(decode(&line), Some(ActionRecord::new(timestamp, kind)));
            }
        }
    }

    #[test]
    fn test_decode_accepts_crlf_and_padded_code() {
        let record = decode("20250312T090000, 1 \r\n").unwrap();
        assert_eq!(record, ActionRecord::new(ts(9, 0, 0), ActionKind::Start));
    }

    #[test]
    fn test_round_trip_covers_four_digit_years() {
        for year in [0, 1, 9999] {
            let timestamp = NaiveDate::from_ymd_opt(year, 12, 31)
                .unwrap()
                .and_hms_opt(23, 59, 59)
                .unwrap();
            let line = encode(timestamp, ActionKind::Start);
            assert_eq!(line.len(), MIN_LINE_LEN + 3);
            assert_eq!(decode(&line), Some(ActionRecord::new(timestamp, ActionKind::Start)));
        }
    }

    #[test]
    fn test_five_digit_year_is_written_with_a_sign() {
        let timestamp = NaiveDate::from_ymd_opt(10_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let line = encode(timestamp, ActionKind::Stop);
        assert!(line.starts_with('+'));
        assert_ne!(decode(&line), Some(ActionRecord::new(timestamp, ActionKind::Stop)));
    }

    #[test]
    fn test_decode_rejects_short_lines() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("20250312T0900"), None);
        assert_eq!(decode("20250312T09000"), None);
    }

    #[test]
    fn test_decode_rejects_wrong_field_count() {
        assert_eq!(decode("20250312T090000 1"), None);
        assert_eq!(decode("20250312T090000,1,extra"), None);
    }

    #[test]
    fn test_decode_rejects_bad_timestamp() {
        assert_eq!(decode("2025-03-12 09:00:00,1"), None);
        assert_eq!(decode("20251312T090000,1"), None);
    }

    #[test]
    fn test_decode_rejects_unknown_code() {
        assert_eq!(decode("20250312T090000,2"), None);
        assert_eq!(decode("20250312T090000,START"), None);
        assert_eq!(decode("20250312T090000,"), None);
    }

    #[test]
    fn test_decode_log_counts_malformed_lines_but_not_blank_ones() {
        let text = "20250312T090000,1\n\ngarbage line here\n20250312T100000,0\n2025031";
        let decoded = decode_log(text);

        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.malformed, 2);
        assert_eq!(decoded.records[0].kind, ActionKind::Start);
        assert_eq!(decoded.records[1].kind, ActionKind::Stop);
    }

    #[test]
    fn test_action_kind_parse_errors_name_the_code() {
        let err = "7".parse::<ActionKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown action code: \"7\"");
    }

    #[test]
    fn test_action_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ActionKind::Start).unwrap();
        assert_eq!(json, "\"start\"");
    }
}
