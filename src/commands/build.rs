//! Build command: question table in, partition files and report out.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;
use tracing::info;

use crate::build::{build, BuildOutput};
use crate::config::{Config, OutputFiles};
use crate::error::QgenError;
use crate::tsv::read_tsv;

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Source question table; falls back to the configured input.
    pub input: Option<PathBuf>,
    /// Output directory; falls back to the configured one.
    pub out_dir: Option<PathBuf>,
}

/// Execute the build command.
pub fn execute_build(options: BuildOptions, config: Config) -> Result<()> {
    let input = options.input.unwrap_or_else(|| config.input.clone());
    let out_dir = options.out_dir.unwrap_or_else(|| config.out_dir.clone());

    println!(
        "{} Building questions from {}...",
        style("→").cyan(),
        input.display()
    );

    let rows = match read_tsv(&input) {
        Ok(rows) => rows,
        Err(QgenError::InputNotFound(path)) => {
            eprintln!(
                "{} Input file not found: {}",
                style("✗").red(),
                path.display()
            );
            eprintln!("  Point --input (or `input` in .qgen.config.json) at the question table");
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    let output = build(&rows);
    write_output(&output, &out_dir, &config.output)?;
    info!(out_dir = %out_dir.display(), "build output written");

    println!(
        "{} Output written to {}",
        style("✓").green(),
        out_dir.display()
    );
    println!("  Total: {}", output.report.total);
    println!("  Prod: {}", output.report.prod);
    println!("  Debug: {}", output.report.debug);
    println!("  Rejected: {}", output.report.rejected);
    if !output.report.error_counts.is_empty() {
        println!("  Errors:");
        for (code, count) in &output.report.error_counts {
            println!("    {code}: {count}");
        }
    }

    Ok(())
}

/// Write the three partition files and the report.
///
/// Every payload is serialized before anything touches the disk, then
/// each file is staged as a `.tmp` sibling and renamed in only after all
/// writes succeeded, so a failed run never leaves partial output behind.
fn write_output(output: &BuildOutput, out_dir: &Path, files: &OutputFiles) -> Result<()> {
    let payloads = [
        (files.prod.as_str(), to_json(&output.prod)?),
        (files.debug.as_str(), to_json(&output.debug)?),
        (files.rejected.as_str(), to_json(&output.rejected)?),
        (files.report.as_str(), output.report.render()),
    ];

    fs::create_dir_all(out_dir)?;

    let mut staged = Vec::new();
    for (name, payload) in &payloads {
        let tmp = out_dir.join(format!("{name}.tmp"));
        fs::write(&tmp, payload)?;
        staged.push((tmp, out_dir.join(name)));
    }
    for (tmp, target) in staged {
        fs::rename(tmp, target)?;
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)? + "\n")
}
