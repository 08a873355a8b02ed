//! Project configuration loading and defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = ".qgen.config.json";

/// Main qgen configuration, read from `.qgen.config.json`.
///
/// Every field has a default, so a missing or partial config file is
/// fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source question table.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory the partition files and report are written to.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Output file names inside `out_dir`.
    #[serde(default)]
    pub output: OutputFiles,

    /// Checklist generation settings.
    #[serde(default)]
    pub checklist: ChecklistConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            out_dir: default_out_dir(),
            output: OutputFiles::default(),
            checklist: ChecklistConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from the default location or fall back to defaults.
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_default()
    }
}

/// Output file names for the three partitions and the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFiles {
    #[serde(default = "default_prod_file")]
    pub prod: String,

    #[serde(default = "default_debug_file")]
    pub debug: String,

    #[serde(default = "default_rejected_file")]
    pub rejected: String,

    #[serde(default = "default_report_file")]
    pub report: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            prod: default_prod_file(),
            debug: default_debug_file(),
            rejected: default_rejected_file(),
            report: default_report_file(),
        }
    }
}

/// Checklist generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistConfig {
    /// Handlebars template for the review page.
    #[serde(default = "default_template")]
    pub template: PathBuf,

    /// Generated page location.
    #[serde(default = "default_checklist_output")]
    pub output: PathBuf,
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            output: default_checklist_output(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("questions_edit.tsv")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_prod_file() -> String {
    "questions_prod.json".to_string()
}

fn default_debug_file() -> String {
    "questions_debug.json".to_string()
}

fn default_rejected_file() -> String {
    "questions_rejected.json".to_string()
}

fn default_report_file() -> String {
    "report.txt".to_string()
}

fn default_template() -> PathBuf {
    PathBuf::from("templates/checklist.html")
}

fn default_checklist_output() -> PathBuf {
    PathBuf::from("docs/index.html")
}
