//! Checklist command: render the curator review page.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::checklist;
use crate::config::Config;
use crate::error::QgenError;

/// Options for the checklist command.
#[derive(Debug, Clone, Default)]
pub struct ChecklistOptions {
    /// Prod partition JSON; falls back to the configured build output.
    pub data: Option<PathBuf>,
    /// Handlebars template path.
    pub template: Option<PathBuf>,
    /// Generated page location.
    pub output: Option<PathBuf>,
}

/// Execute the checklist command.
pub fn execute_checklist(options: ChecklistOptions, config: Config) -> Result<()> {
    let data = options
        .data
        .unwrap_or_else(|| config.out_dir.join(&config.output.prod));
    let template = options
        .template
        .unwrap_or_else(|| config.checklist.template.clone());
    let output = options
        .output
        .unwrap_or_else(|| config.checklist.output.clone());

    match checklist::generate(&data, &template, &output) {
        Ok(count) => {
            println!(
                "{} Checklist generated: {} ({} questions)",
                style("✓").green(),
                output.display(),
                count
            );
            Ok(())
        }
        Err(QgenError::InputNotFound(path)) => {
            eprintln!("{} File not found: {}", style("✗").red(), path.display());
            eprintln!("  Run `qgen build` first to produce the prod partition");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
