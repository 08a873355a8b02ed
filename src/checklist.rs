//! Review checklist generation.
//!
//! Renders the prod partition into a static HTML page curators use to
//! mark statuses and attach notes. Review state lives in the page's local
//! storage; nothing flows back into the pipeline.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use chrono::Local;
use handlebars::{html_escape, Handlebars};
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::error::{QgenError, Result};
use crate::question::OutputQuestion;

/// Romaji spellings a typist can write more than one way. Order matters:
/// earlier alternatives take precedence at the same position.
static AMBIGUOUS_ROMAJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "si|shi|tu|tsu|ti|chi|hu|fu|zi|ji|sya|sha|syu|shu|syo|sho|tya|cha|tyu|chu|tyo|cho|ja|jya|ju|jyu|jo|jyo|n",
    )
    .expect("romaji pattern compiles")
});

/// One rendered table row. The `*_html` fields are pre-escaped and carry
/// highlight markup, so the template inserts them with triple-stash.
#[derive(Debug, Serialize)]
struct ChecklistRow {
    id: String,
    row_class: &'static str,
    question: String,
    answer: String,
    romaji_html: String,
    variants_html: String,
    has_variants: bool,
}

/// Render the checklist page from a prod partition file.
///
/// Returns the number of questions on the page.
pub fn generate(data: &Path, template: &Path, output: &Path) -> Result<usize> {
    if !data.exists() {
        return Err(QgenError::InputNotFound(data.to_path_buf()));
    }
    if !template.exists() {
        return Err(QgenError::InputNotFound(template.to_path_buf()));
    }

    let questions: Vec<OutputQuestion> = serde_json::from_str(&fs::read_to_string(data)?)?;
    let rows: Vec<ChecklistRow> = questions.iter().map(checklist_row).collect();

    let mut registry = Handlebars::new();
    registry.register_template_string("checklist", fs::read_to_string(template)?)?;
    let page = registry.render(
        "checklist",
        &json!({
            "rows": rows,
            "total_count": questions.len(),
            "generated_date": Local::now().format("%Y-%m-%d %H:%M").to_string(),
        }),
    )?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output, page)?;

    info!(questions = questions.len(), output = %output.display(), "checklist generated");
    Ok(questions.len())
}

fn checklist_row(question: &OutputQuestion) -> ChecklistRow {
    let has_variants = question.answer_variants.len() > 1;
    let variants_text = question.answer_variants.join(", ");

    ChecklistRow {
        id: question.id.clone(),
        row_class: if has_variants { "has-variants" } else { "" },
        question: question.question.clone(),
        answer: question.answer_display.clone(),
        romaji_html: highlight_romaji(question.romaji_typing.as_deref().unwrap_or("")),
        variants_html: highlight_romaji(&variants_text),
        has_variants,
    }
}

/// Escape a text fragment and wrap ambiguous romaji spellings in
/// highlight spans. Escaping happens per piece, before the markup is
/// injected.
fn highlight_romaji(text: &str) -> String {
    let mut out = String::new();
    let mut last = 0;
    for found in AMBIGUOUS_ROMAJI.find_iter(text) {
        out.push_str(&html_escape(&text[last..found.start()]));
        out.push_str("<span class=\"highlight-variant\">");
        out.push_str(&html_escape(found.as_str()));
        out.push_str("</span>");
        last = found.end();
    }
    out.push_str(&html_escape(&text[last..]));
    out
}
