//! `tl blocks`: list the time-log blocks of a file.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tl_store::{BlockSpan, DocumentStore, FsStore, block_body, decode_block};

use crate::Config;

/// Formats one line per block: index, fence lines (1-based), and a summary.
pub fn format_blocks(document: &str, spans: &[BlockSpan]) -> String {
    let mut output = String::new();

    if spans.is_empty() {
        writeln!(output, "No time-log blocks found.").unwrap();
        return output;
    }

    for (index, span) in spans.iter().enumerate() {
        let summary = block_body(document, *span).map_or_else(
            || "(unreadable)".to_string(),
            |body| match decode_block(&body) {
                Ok(block) => {
                    let doc = &block.document;
                    let count = doc.entry_count();
                    let noun = if count == 1 { "entry" } else { "entries" };
                    format!(
                        "{}  {} to {}  {count} {noun}",
                        doc.project, doc.period.from, doc.period.to
                    )
                }
                Err(e) => format!("(invalid: {e})"),
            },
        );
        writeln!(
            output,
            "#{index}  lines {}-{}  {summary}",
            span.line_start + 1,
            span.line_end + 1
        )
        .unwrap();
    }
    output
}

pub fn run(config: &Config, file: &Path) -> Result<()> {
    let store = FsStore::new(config.block_language.clone());
    let document = store
        .read(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let spans = store.spans(&document);
    tracing::debug!(blocks = spans.len(), "located blocks");
    print!("{}", format_blocks(&document, &spans));
    Ok(())
}
