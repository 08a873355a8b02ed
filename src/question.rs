//! Core data model.
//!
//! `RawRow` is what the TSV reader produces, `Question` is the canonical
//! record the validator emits, and `OutputQuestion` is the external shape
//! written to the partition files.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One record from the source table, pre-validation.
///
/// TSV carries no type information and no distinction between "absent" and
/// "empty": a column missing from a short row reads as `""`.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    columns: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a column, `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.columns.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.columns.insert(column.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Authored lifecycle label on a row, distinct from the derived partition
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    Prod,
    Debug,
    #[default]
    Inbox,
    Other(String),
}

impl Status {
    /// Parse a raw status cell; empty after trim defaults to `inbox`.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "" | "inbox" => Status::Inbox,
            "prod" => Status::Prod,
            "debug" => Status::Debug,
            other => Status::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Prod => "prod",
            Status::Debug => "debug",
            Status::Inbox => "inbox",
            Status::Other(s) => s,
        }
    }

    /// Whether the row is ready for one of the shipped partitions.
    pub fn is_ready(&self) -> bool {
        matches!(self, Status::Prod | Status::Debug)
    }
}

/// Per-row validation error codes.
///
/// All codes are non-fatal and accumulative: one row can carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MissingId,
    MissingText,
    MissingAnswer,
    NormalizedAnswerEmpty,
    InvalidIdFormat,
    DupId,
    DupTextAnswer,
    StatusNotReady,
}

impl ErrorCode {
    /// Wire form of the code, as written to JSON and the report.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingId => "missing_id",
            ErrorCode::MissingText => "missing_text",
            ErrorCode::MissingAnswer => "missing_answer",
            ErrorCode::NormalizedAnswerEmpty => "normalized_answer_empty",
            ErrorCode::InvalidIdFormat => "invalid_id_format",
            ErrorCode::DupId => "dup_id",
            ErrorCode::DupTextAnswer => "dup_text_answer",
            ErrorCode::StatusNotReady => "status_not_ready",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical, validated, normalized question record.
///
/// Optional fields hold `None` when the source cell was empty after trim;
/// empty strings never survive past the validator boundary. Ids are
/// canonical strings end-to-end, even when they look numeric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Question {
    pub id: String,
    /// The prompt shown to players.
    pub text: String,
    /// Raw primary typing target.
    pub answer: String,
    /// `normalize(answer)`; feeds duplicate and validity checks only.
    pub normalized_answer: String,
    /// Accepted answer variants beyond the primary answer.
    pub aliases: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub romaji: Option<String>,
    /// The `type` column of the source table.
    pub kind: Option<String>,
    pub source: Option<String>,
    pub explanation: Option<String>,
    pub answer_display: Option<String>,
    pub reading: Option<String>,
    pub status: Status,
    /// Original position in the input sequence; tie-break only, never
    /// exposed externally.
    pub index: usize,
    /// Derived selection weight, attached right after validation.
    pub weight: f64,
}

/// Externally-visible question shape written to the partition files.
///
/// Build-time bookkeeping (`index`, `status`, `tags`, `source`, `weight`)
/// is projected away. `answer` doubles as the typing target internally but
/// must present as display text externally, so `answer` and
/// `answer_display` both carry the display form here while
/// `answer_variants` keeps the raw typing targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputQuestion {
    pub id: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub question: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romaji_typing: Option<String>,

    /// `[primary answer, ...aliases]`.
    pub answer_variants: Vec<String>,

    pub answer_display: String,

    pub answer: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Present on rejected records only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorCode>,
}
