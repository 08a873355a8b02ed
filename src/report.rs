//! Build summary report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::question::ErrorCode;

/// Aggregated counts for one build run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub total: usize,
    pub prod: usize,
    pub debug: usize,
    pub rejected: usize,
    /// Error-code occurrences across all rejected rows, keyed by wire
    /// code. A `BTreeMap` keeps the histogram in lexicographic order.
    pub error_counts: BTreeMap<String, usize>,
}

impl Report {
    /// Count every code on a rejected row (a row may carry several).
    pub fn track_errors(&mut self, errors: &[ErrorCode]) {
        for code in errors {
            *self.error_counts.entry(code.as_str().to_string()).or_insert(0) += 1;
        }
    }

    /// Render the tab-separated report: partition counts, a blank line,
    /// the `errors` header, then one `<code>\t<count>` line per distinct
    /// code.
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("total\t{}", self.total),
            format!("prod\t{}", self.prod),
            format!("debug\t{}", self.debug),
            format!("ng\t{}", self.rejected),
            String::new(),
            "errors".to_string(),
        ];
        for (code, count) in &self.error_counts {
            lines.push(format!("{code}\t{count}"));
        }
        lines.join("\n") + "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_track_counts_multiplicity() {
        let mut report = Report::default();
        report.track_errors(&[ErrorCode::MissingId, ErrorCode::MissingText]);
        report.track_errors(&[ErrorCode::MissingId]);
        assert_eq!(report.error_counts.get("missing_id"), Some(&2));
        assert_eq!(report.error_counts.get("missing_text"), Some(&1));
    }

    #[test]
    fn test_render_format() {
        let mut report = Report {
            total: 3,
            prod: 1,
            debug: 0,
            rejected: 2,
            ..Report::default()
        };
        report.track_errors(&[ErrorCode::StatusNotReady]);
        report.track_errors(&[ErrorCode::DupId, ErrorCode::StatusNotReady]);

        assert_eq!(
            report.render(),
            "total\t3\nprod\t1\ndebug\t0\nng\t2\n\nerrors\ndup_id\t1\nstatus_not_ready\t2\n"
        );
    }

    #[test]
    fn test_histogram_sorted_by_code() {
        let mut report = Report::default();
        report.track_errors(&[ErrorCode::StatusNotReady, ErrorCode::DupId, ErrorCode::MissingText]);
        let codes: Vec<&str> = report.error_counts.keys().map(String::as_str).collect();
        assert_eq!(codes, ["dup_id", "missing_text", "status_not_ready"]);
    }
}
