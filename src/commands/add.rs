//! Add command: interactive append of a new question row.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input};

use crate::config::Config;
use crate::normalize::normalize;

/// Column order used when the table does not exist yet.
const DEFAULT_HEADER: &[&str] = &[
    "id", "text", "answer", "aliases", "romaji", "type", "tags", "weight", "status", "source",
    "explanation", "answer_display", "reading",
];

/// Options for the add command.
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Question table to append to; falls back to the configured input.
    pub file: Option<PathBuf>,
}

/// Execute the add command.
pub fn execute_add(options: AddOptions, config: Config) -> Result<()> {
    let path = options.file.unwrap_or_else(|| config.input.clone());

    println!(
        "{} Add a new question to {}",
        style("→").cyan(),
        path.display()
    );

    let id = next_id(&existing_ids(&path)?);
    println!("  Generated id: {}", style(&id).cyan());

    let text: String = Input::new()
        .with_prompt("Question (text)")
        .validate_with(require_nonempty)
        .interact_text()?;
    let answer: String = Input::new()
        .with_prompt("Answer")
        .validate_with(require_nonempty)
        .interact_text()?;
    let aliases: String = Input::new()
        .with_prompt("Aliases (pipe | separated)")
        .allow_empty(true)
        .interact_text()?;

    println!("  Normalized answer: \"{}\"", normalize(&answer));

    println!();
    println!("  id: {id}");
    println!("  text: {}", text.trim());
    println!("  answer: {}", answer.trim());
    if !aliases.trim().is_empty() {
        println!("  aliases: {}", aliases.trim());
    }

    if !Confirm::new().with_prompt("Save?").default(true).interact()? {
        println!("Cancelled.");
        return Ok(());
    }

    append_row(&path, &id, text.trim(), answer.trim(), aliases.trim())?;
    println!("{} Saved to {}", style("✓").green(), path.display());

    Ok(())
}

fn require_nonempty(input: &String) -> std::result::Result<(), &'static str> {
    if input.trim().is_empty() {
        Err("a value is required")
    } else {
        Ok(())
    }
}

/// Ids already present in the table (first column, header skipped).
fn existing_ids(path: &Path) -> Result<HashSet<String>> {
    let mut ids = HashSet::new();
    if !path.exists() {
        return Ok(ids);
    }
    let content = fs::read_to_string(path)?;
    for line in content.lines().skip(1) {
        if let Some(id) = line.split('\t').next() {
            let id = id.trim();
            if !id.is_empty() {
                ids.insert(id.to_string());
            }
        }
    }
    Ok(ids)
}

/// Next id in the `qNNNNN` series used by authored rows.
fn next_id(existing: &HashSet<String>) -> String {
    let mut max = 0u32;
    for id in existing {
        if let Some(num) = id
            .strip_prefix('q')
            .filter(|rest| rest.chars().all(|c| c.is_ascii_digit()))
            .and_then(|rest| rest.parse::<u32>().ok())
        {
            max = max.max(num);
        }
    }
    format!("q{:05}", max + 1)
}

/// Append one row, matching the file's header order; a missing or empty
/// file gets the default header first.
fn append_row(path: &Path, id: &str, text: &str, answer: &str, aliases: &str) -> Result<()> {
    let mut content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let header: Vec<String> = match content.lines().next().filter(|line| !line.trim().is_empty()) {
        Some(line) => line.split('\t').map(str::to_string).collect(),
        None => {
            content = DEFAULT_HEADER.join("\t");
            DEFAULT_HEADER.iter().map(|s| s.to_string()).collect()
        }
    };

    let row: Vec<&str> = header
        .iter()
        .map(|column| match column.trim() {
            "id" => id,
            "text" => text,
            "answer" => answer,
            "aliases" => aliases,
            "status" => "inbox",
            "source" => "cli",
            _ => "",
        })
        .collect();

    if !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&row.join("\t"));
    content.push('\n');
    fs::write(path, content)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_sequence() {
        let mut ids = HashSet::new();
        assert_eq!(next_id(&ids), "q00001");

        ids.insert("q00001".to_string());
        ids.insert("q01023".to_string());
        ids.insert("custom-id".to_string());
        assert_eq!(next_id(&ids), "q01024");
    }

    #[test]
    fn test_append_row_matches_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.tsv");
        fs::write(&path, "id\ttext\tanswer\tstatus\tsource\n").unwrap();

        append_row(&path, "q00001", "Q?", "A", "").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let last = content.lines().last().unwrap();
        assert_eq!(last, "q00001\tQ?\tA\tinbox\tcli");
    }

    #[test]
    fn test_append_row_creates_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.tsv");

        append_row(&path, "q00001", "Q?", "A", "a|b").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), DEFAULT_HEADER.join("\t"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("q00001\tQ?\tA\ta|b\t"));
        assert!(row.contains("\tinbox\tcli\t"));
    }

    #[test]
    fn test_existing_ids_skips_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.tsv");
        fs::write(&path, "id\ttext\n1\tQ1\n2\tQ2\n\n").unwrap();

        let ids = existing_ids(&path).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("1"));
        assert!(!ids.contains("id"));
    }
}
