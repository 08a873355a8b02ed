//! Build orchestration: validation, weighting, partitioning and output
//! formatting.
//!
//! The orchestrator is pure: it consumes an in-memory row sequence and
//! produces an in-memory [`BuildOutput`]. All file I/O lives in the
//! command layer.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use tracing::info;

use crate::question::{ErrorCode, OutputQuestion, Question, RawRow, Status};
use crate::report::Report;
use crate::validator::Validator;
use crate::weight::compute_weight;

/// The partition a row was routed to. Every row lands in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Prod,
    Debug,
    Rejected,
}

/// One fully classified build run.
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub prod: Vec<OutputQuestion>,
    pub debug: Vec<OutputQuestion>,
    pub rejected: Vec<OutputQuestion>,
    pub report: Report,
}

/// Run the full pipeline over an ordered row sequence.
///
/// Rows are validated in input order (duplicate detection depends on it),
/// weighted, classified into exactly one partition, sorted and projected
/// into the external output shape. No row ever aborts the build; all
/// malformations travel as error codes on the rejected partition.
pub fn build(rows: &[RawRow]) -> BuildOutput {
    let mut validator = Validator::new();
    validator.reset();

    let mut prod: Vec<(Question, Vec<ErrorCode>)> = Vec::new();
    let mut debug: Vec<(Question, Vec<ErrorCode>)> = Vec::new();
    let mut rejected: Vec<(Question, Vec<ErrorCode>)> = Vec::new();
    let mut report = Report {
        total: rows.len(),
        ..Report::default()
    };

    for (index, row) in rows.iter().enumerate() {
        let mut validation = validator.validate(row, index);
        validation.question.weight = compute_weight(&validation.question);

        let (partition, errors) = classify(&validation.question.status, validation.errors);
        match partition {
            Partition::Prod => prod.push((validation.question, errors)),
            Partition::Debug => debug.push((validation.question, errors)),
            Partition::Rejected => {
                report.track_errors(&errors);
                rejected.push((validation.question, errors));
            }
        }
    }

    sort_partition(&mut prod);
    sort_partition(&mut debug);
    sort_partition(&mut rejected);

    report.prod = prod.len();
    report.debug = debug.len();
    report.rejected = rejected.len();
    info!(
        total = report.total,
        prod = report.prod,
        debug = report.debug,
        rejected = report.rejected,
        "rows classified"
    );

    BuildOutput {
        prod: format_partition(prod),
        debug: format_partition(debug),
        rejected: format_partition(rejected),
        report,
    }
}

/// Classification decision for one row; the first matching rule wins.
fn classify(status: &Status, mut errors: Vec<ErrorCode>) -> (Partition, Vec<ErrorCode>) {
    if !errors.is_empty() {
        // Keep the validation errors and additionally flag rows that were
        // not ready for either shipped partition anyway.
        if !status.is_ready() {
            errors.push(ErrorCode::StatusNotReady);
        }
        return (Partition::Rejected, errors);
    }
    match status {
        Status::Prod => (Partition::Prod, errors),
        Status::Debug => (Partition::Debug, errors),
        _ => {
            errors.push(ErrorCode::StatusNotReady);
            (Partition::Rejected, errors)
        }
    }
}

/// Total order within a partition: natural id order, then original input
/// position for a stable tie-break.
fn sort_partition(items: &mut [(Question, Vec<ErrorCode>)]) {
    items.sort_by(|(a, _), (b, _)| {
        natural_cmp(&a.id, &b.id).then_with(|| a.index.cmp(&b.index))
    });
}

fn format_partition(items: Vec<(Question, Vec<ErrorCode>)>) -> Vec<OutputQuestion> {
    items
        .iter()
        .map(|(question, errors)| format_output(question, errors))
        .collect()
}

/// Project a question into the external output shape.
fn format_output(question: &Question, errors: &[ErrorCode]) -> OutputQuestion {
    let mut answer_variants = vec![question.answer.clone()];
    if let Some(aliases) = &question.aliases {
        answer_variants.extend(aliases.iter().cloned());
    }

    // The display form falls back to the raw answer when no explicit
    // display text was authored.
    let display = question
        .answer_display
        .clone()
        .unwrap_or_else(|| question.answer.clone());

    OutputQuestion {
        id: question.id.clone(),
        kind: question.kind.clone(),
        question: question.text.clone(),
        romaji_typing: question.romaji.clone(),
        answer_variants,
        answer_display: display.clone(),
        answer: display,
        reading: question.reading.clone(),
        explanation: question.explanation.clone(),
        errors: errors.to_vec(),
    }
}

/// Numeric-aware, case-insensitive string comparison.
///
/// Digit runs compare by value, so `"2" < "10"` and `"q00002" <
/// "q00010"`; everything else compares lowercased character by character.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();
    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let run_a = take_digit_run(&mut ca);
                let run_b = take_digit_run(&mut cb);
                let value_a = run_a.trim_start_matches('0');
                let value_b = run_b.trim_start_matches('0');
                let ord = value_a
                    .len()
                    .cmp(&value_b.len())
                    .then_with(|| value_a.cmp(value_b));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.to_lowercase().cmp(y.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                ca.next();
                cb.next();
            }
        }
    }
}

fn take_digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[(&str, &str)]) -> RawRow {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_natural_ordering() {
        assert_eq!(natural_cmp("2", "10"), Ordering::Less);
        assert_eq!(natural_cmp("10", "2"), Ordering::Greater);
        assert_eq!(natural_cmp("q00002", "q00010"), Ordering::Less);
        assert_eq!(natural_cmp("a", "b"), Ordering::Less);
        assert_eq!(natural_cmp("A", "a"), Ordering::Equal);
        assert_eq!(natural_cmp("2", "02"), Ordering::Equal);
        assert_eq!(natural_cmp("q2x", "q2y"), Ordering::Less);
        assert_eq!(natural_cmp("q10", "q9a"), Ordering::Greater);
    }

    #[test]
    fn test_classify_rules() {
        let (partition, errors) = classify(&Status::Prod, Vec::new());
        assert_eq!(partition, Partition::Prod);
        assert!(errors.is_empty());

        let (partition, _) = classify(&Status::Debug, Vec::new());
        assert_eq!(partition, Partition::Debug);

        let (partition, errors) = classify(&Status::Inbox, Vec::new());
        assert_eq!(partition, Partition::Rejected);
        assert_eq!(errors, vec![ErrorCode::StatusNotReady]);

        // Errors route out even when the status says prod.
        let (partition, errors) = classify(&Status::Prod, vec![ErrorCode::DupId]);
        assert_eq!(partition, Partition::Rejected);
        assert_eq!(errors, vec![ErrorCode::DupId]);

        // Not-ready status is appended after the validation errors.
        let (partition, errors) = classify(&Status::Inbox, vec![ErrorCode::MissingText]);
        assert_eq!(partition, Partition::Rejected);
        assert_eq!(errors, vec![ErrorCode::MissingText, ErrorCode::StatusNotReady]);
    }

    #[test]
    fn test_format_output_projection() {
        let rows = [row(&[
            ("id", "1"),
            ("text", "capital?"),
            ("answer", "tokyo"),
            ("aliases", "toukyou|toukyo"),
            ("answer_display", "東京"),
            ("tags", "geo"),
            ("source", "import"),
            ("status", "prod"),
        ])];
        let output = build(&rows);
        assert_eq!(output.prod.len(), 1);

        let question = &output.prod[0];
        assert_eq!(
            question.answer_variants,
            ["tokyo", "toukyou", "toukyo"]
        );
        assert_eq!(question.answer, "東京");
        assert_eq!(question.answer_display, "東京");
        assert!(question.errors.is_empty());

        // Build-time bookkeeping never reaches the serialized shape.
        let value = serde_json::to_value(question).unwrap();
        let object = value.as_object().unwrap();
        for key in ["status", "tags", "source", "weight", "_index", "index"] {
            assert!(!object.contains_key(key), "unexpected key {key}");
        }
    }

    #[test]
    fn test_display_falls_back_to_raw_answer() {
        let rows = [row(&[
            ("id", "1"),
            ("text", "1+1?"),
            ("answer", "2"),
            ("status", "prod"),
        ])];
        let output = build(&rows);
        assert_eq!(output.prod[0].answer, "2");
        assert_eq!(output.prod[0].answer_display, "2");
        assert_eq!(output.prod[0].answer_variants, ["2"]);
    }

    #[test]
    fn test_partition_exclusivity() {
        let rows = [
            row(&[("id", "1"), ("text", "Q1"), ("answer", "A1"), ("status", "prod")]),
            row(&[("id", "2"), ("text", "Q2"), ("answer", "A2"), ("status", "debug")]),
            row(&[("id", "3"), ("text", "Q3"), ("answer", "A3")]),
            row(&[("id", ""), ("text", "Q4"), ("answer", "A4"), ("status", "prod")]),
        ];
        let output = build(&rows);
        assert_eq!(output.prod.len(), 1);
        assert_eq!(output.debug.len(), 1);
        assert_eq!(output.rejected.len(), 2);
        assert_eq!(
            output.report.total,
            output.prod.len() + output.debug.len() + output.rejected.len()
        );
    }

    #[test]
    fn test_numeric_aware_sort_and_stable_tie_break() {
        let rows = [
            row(&[("id", "10"), ("text", "Q10"), ("answer", "A10"), ("status", "prod")]),
            row(&[("id", "2"), ("text", "Q2"), ("answer", "A2"), ("status", "prod")]),
            // Same id twice: both rejected rows tie on id and keep input
            // order.
            row(&[("id", "x"), ("text", "Qx1"), ("answer", "Ax1")]),
            row(&[("id", "x"), ("text", "Qx2"), ("answer", "Ax2")]),
        ];
        let output = build(&rows);

        let prod_ids: Vec<&str> = output.prod.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(prod_ids, ["2", "10"]);

        assert_eq!(output.rejected[0].question, "Qx1");
        assert_eq!(output.rejected[1].question, "Qx2");
        assert!(output.rejected[1].errors.contains(&ErrorCode::DupId));
    }

    #[test]
    fn test_report_histogram_counts_multiplicity() {
        let rows = [
            row(&[("id", "1"), ("text", "Q"), ("answer", "A"), ("status", "prod")]),
            // dup of both id and (text, answer), status not ready
            row(&[("id", "1"), ("text", "Q"), ("answer", "A")]),
        ];
        let output = build(&rows);
        let report = &output.report;
        assert_eq!(report.prod, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.error_counts.get("dup_id"), Some(&1));
        assert_eq!(report.error_counts.get("dup_text_answer"), Some(&1));
        assert_eq!(report.error_counts.get("status_not_ready"), Some(&1));

        let histogram_total: usize = report.error_counts.values().sum();
        let rejected_errors: usize = output.rejected.iter().map(|q| q.errors.len()).sum();
        assert_eq!(histogram_total, rejected_errors);
    }

    #[test]
    fn test_runs_are_isolated() {
        let rows = [row(&[("id", "1"), ("text", "Q"), ("answer", "A"), ("status", "prod")])];
        // The same input twice: the second run must not see the first
        // run's ids.
        assert_eq!(build(&rows).prod.len(), 1);
        assert_eq!(build(&rows).prod.len(), 1);
    }
}
