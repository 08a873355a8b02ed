//! Row validation and run-scoped duplicate tracking.
//!
//! Duplicate detection is order-sensitive: the first occurrence of an id or
//! (text, answer) pair is accepted and later ones are flagged, so rows must
//! be validated in their original input order within one run.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::normalize::normalize;
use crate::question::{ErrorCode, Question, RawRow, Status};

/// Safe-identifier pattern for question ids.
static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9_-]+$").expect("id pattern compiles"));

/// Separator for the combined (text, answer) duplicate key; TSV cells can
/// never contain a NUL, so the key is unambiguous.
const PAIR_SEPARATOR: char = '\0';

/// Result of validating a single row.
#[derive(Debug, Clone)]
pub struct Validation {
    pub ok: bool,
    pub errors: Vec<ErrorCode>,
    /// Returned for rejected rows too, so the partitioner can route and
    /// report them.
    pub question: Question,
}

/// Stateful row validator.
///
/// Carries the ids and (text, answer) pairs seen so far in the current
/// run. The orchestrator calls [`Validator::reset`] once per build;
/// independent runs (and tests) must reset between each other.
#[derive(Debug, Default)]
pub struct Validator {
    seen_ids: HashSet<String>,
    seen_text_answer: HashSet<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all duplicate-tracking state.
    pub fn reset(&mut self) {
        self.seen_ids.clear();
        self.seen_text_answer.clear();
    }

    /// Validate one row, collecting every applicable error code rather
    /// than stopping at the first.
    pub fn validate(&mut self, row: &RawRow, index: usize) -> Validation {
        let mut errors = Vec::new();

        let id = row.get("id").trim().to_string();
        let text = row.get("text").trim().to_string();
        let answer = row.get("answer").trim().to_string();

        if id.is_empty() {
            errors.push(ErrorCode::MissingId);
        }
        if text.is_empty() {
            errors.push(ErrorCode::MissingText);
        }
        if answer.is_empty() {
            errors.push(ErrorCode::MissingAnswer);
        }

        // Only reported when the answer was present but normalized away;
        // an absent answer is already covered by missing_answer.
        let normalized_answer = normalize(&answer);
        if !answer.is_empty() && normalized_answer.is_empty() {
            errors.push(ErrorCode::NormalizedAnswerEmpty);
        }

        if !id.is_empty() && !ID_PATTERN.is_match(&id) {
            errors.push(ErrorCode::InvalidIdFormat);
        }

        // First occurrence wins: insert unconditionally so later
        // duplicates are flagged while the first stays accepted.
        if !id.is_empty() {
            if self.seen_ids.contains(&id) {
                errors.push(ErrorCode::DupId);
            }
            self.seen_ids.insert(id.clone());
        }

        if !text.is_empty() && !answer.is_empty() {
            let key = format!("{text}{PAIR_SEPARATOR}{answer}");
            if self.seen_text_answer.contains(&key) {
                errors.push(ErrorCode::DupTextAnswer);
            }
            self.seen_text_answer.insert(key);
        }

        let question = Question {
            id,
            text,
            answer,
            normalized_answer,
            aliases: split_pipe(row.get("aliases")),
            tags: split_pipe(row.get("tags")),
            romaji: optional(row.get("romaji")),
            kind: optional(row.get("type")),
            source: optional(row.get("source")),
            explanation: optional(row.get("explanation")),
            answer_display: optional(row.get("answer_display")),
            reading: optional(row.get("reading")),
            status: Status::from_raw(row.get("status")),
            index,
            weight: 0.0,
        };

        if !errors.is_empty() {
            debug!(row = index, ?errors, "row failed validation");
        }

        Validation {
            ok: errors.is_empty(),
            errors,
            question,
        }
    }
}

/// Split a pipe-delimited cell, trimming parts and dropping empty ones;
/// `None` when nothing remains.
fn split_pipe(raw: &str) -> Option<Vec<String>> {
    let parts: Vec<String> = raw
        .split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts)
    }
}

/// Trimmed cell value, `None` when empty after trim.
fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
