//! Replacing a block body inside a host document.

use thiserror::Error;

use crate::locate::BlockSpan;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpliceError {
    #[error("block lines {start}..{end} do not fit a document of {lines} lines")]
    OutOfRange {
        start: usize,
        end: usize,
        lines: usize,
    },
}

/// Replaces the body of the block at `span` with `new_body`.
///
/// Lines up to and including the opening fence and from the closing fence
/// on are kept byte for byte. The body is trimmed of surrounding whitespace
/// before insertion. In a CRLF document the inserted lines get a `'\r'` as
/// well, so line endings stay uniform.
pub fn update_block(document: &str, span: BlockSpan, new_body: &str) -> Result<String, SpliceError> {
    let lines: Vec<&str> = document.split('\n').collect();
    if span.line_start >= span.line_end || span.line_end >= lines.len() {
        return Err(SpliceError::OutOfRange {
            start: span.line_start,
            end: span.line_end,
            lines: lines.len(),
        });
    }

    let crlf = lines[span.line_start].ends_with('\r');
    let body = new_body.trim();

    let mut out: Vec<String> = lines[..=span.line_start]
        .iter()
        .map(|l| (*l).to_string())
        .collect();
    if !body.is_empty() {
        out.extend(body.lines().map(|line| {
            if crlf {
                format!("{line}\r")
            } else {
                line.to_string()
            }
        }));
    }
    out.extend(lines[span.line_end..].iter().map(|l| (*l).to_string()));

    Ok(out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::{block_body, locate_blocks};

    const DOC: &str = "# Title\n\n```time-log\nproject: old\n```\n\ntrailing text\n";

    fn span(doc: &str) -> BlockSpan {
        locate_blocks(doc, "time-log")[0]
    }

    #[test]
    fn replaces_only_the_body() {
        let out = update_block(DOC, span(DOC), "\nproject: new\nperiod: x\n\n").unwrap();
        assert_eq!(
            out,
            "# Title\n\n```time-log\nproject: new\nperiod: x\n```\n\ntrailing text\n"
        );
    }

    #[test]
    fn second_update_with_same_body_is_identity() {
        let once = update_block(DOC, span(DOC), "project: new").unwrap();
        let twice = update_block(&once, span(&once), "project: new").unwrap();
        assert_eq!(once, twice);
        assert_eq!(block_body(&twice, span(&twice)).unwrap(), "project: new");
    }

    #[test]
    fn empty_body_leaves_bare_fences() {
        let out = update_block(DOC, span(DOC), "   ").unwrap();
        assert_eq!(out, "# Title\n\n```time-log\n```\n\ntrailing text\n");
    }

    #[test]
    fn keeps_crlf_line_endings() {
        let doc = "a\r\n```time-log\r\nold\r\n```\r\nb";
        let out = update_block(doc, span(doc), "x: 1\ny: 2\n").unwrap();
        assert_eq!(out, "a\r\n```time-log\r\nx: 1\r\ny: 2\r\n```\r\nb");
    }

    #[test]
    fn out_of_range_span_is_an_error() {
        let bad = BlockSpan {
            line_start: 3,
            line_end: 99,
        };
        assert_eq!(
            update_block(DOC, bad, "x"),
            Err(SpliceError::OutOfRange {
                start: 3,
                end: 99,
                lines: 8
            })
        );
        let inverted = BlockSpan {
            line_start: 4,
            line_end: 2,
        };
        assert!(update_block(DOC, inverted, "x").is_err());
    }
}
