//! Finding fenced time-log blocks in a Markdown document.
//!
//! Line numbers are zero-based indexes into the document split on `'\n'`.
//! A trailing `'\r'` is ignored when recognizing fences, so CRLF documents
//! locate the same way as LF ones.

/// Line range of a fenced block: the opening and closing fence lines.
///
/// The block body is the lines strictly between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSpan {
    pub line_start: usize,
    pub line_end: usize,
}

impl BlockSpan {
    /// Indexes of the body lines.
    pub const fn body_lines(&self) -> std::ops::Range<usize> {
        self.line_start + 1..self.line_end
    }
}

#[derive(Debug, Clone, Copy)]
struct Fence {
    marker: char,
    len: usize,
}

/// Parses an opening fence, returning it and its info string.
fn opening_fence(line: &str) -> Option<(Fence, &str)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    if len < 3 {
        return None;
    }
    let info = trimmed[len..].trim();
    // Backtick fences may not carry backticks in the info string.
    if marker == '`' && info.contains('`') {
        return None;
    }
    Some((Fence { marker, len }, info))
}

fn closes(fence: Fence, line: &str) -> bool {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return false;
    }
    let len = trimmed.chars().take_while(|c| *c == fence.marker).count();
    len >= fence.len && trimmed[len..].trim().is_empty()
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Returns the spans of all fenced blocks tagged `language`, in order.
///
/// Fences of other languages are skipped whole, so a fence nested inside
/// them is not reported. An unterminated fence yields no span.
pub fn locate_blocks(document: &str, language: &str) -> Vec<BlockSpan> {
    let mut spans = Vec::new();
    let mut open: Option<(usize, Fence, bool)> = None;

    for (index, raw) in document.split('\n').enumerate() {
        let line = strip_cr(raw);
        match open {
            Some((start, fence, wanted)) => {
                if closes(fence, line) {
                    if wanted {
                        spans.push(BlockSpan {
                            line_start: start,
                            line_end: index,
                        });
                    }
                    open = None;
                }
            }
            None => {
                if let Some((fence, info)) = opening_fence(line) {
                    let tag = info.split_whitespace().next().unwrap_or_default();
                    open = Some((index, fence, tag == language));
                }
            }
        }
    }

    spans
}

/// Text of a block's body, lines joined with `'\n'`.
///
/// Returns `None` if the span does not fit the document.
pub fn block_body(document: &str, span: BlockSpan) -> Option<String> {
    let lines: Vec<&str> = document.split('\n').collect();
    if span.line_start >= span.line_end || span.line_end >= lines.len() {
        return None;
    }
    let body: Vec<&str> = lines[span.body_lines()].iter().map(|l| strip_cr(l)).collect();
    Some(body.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Notes

```time-log
project: A
```

```rust
let x = 1;
```

~~~~ time-log extra
project: B
~~~~

````markdown
```time-log
project: nested
```
````
";

    #[test]
    fn finds_tagged_blocks_in_order() {
        let spans = locate_blocks(DOC, "time-log");
        assert_eq!(
            spans,
            vec![
                BlockSpan {
                    line_start: 2,
                    line_end: 4
                },
                BlockSpan {
                    line_start: 10,
                    line_end: 12
                },
            ]
        );
        assert_eq!(block_body(DOC, spans[0]).unwrap(), "project: A");
        assert_eq!(block_body(DOC, spans[1]).unwrap(), "project: B");
    }

    #[test]
    fn other_languages_are_separate() {
        assert_eq!(locate_blocks(DOC, "rust").len(), 1);
        assert_eq!(locate_blocks(DOC, "markdown").len(), 1);
        assert!(locate_blocks(DOC, "python").is_empty());
    }

    #[test]
    fn unterminated_fence_is_skipped() {
        let doc = "```time-log\nproject: A\n";
        assert!(locate_blocks(doc, "time-log").is_empty());
    }

    #[test]
    fn shorter_fence_does_not_close() {
        let doc = "````time-log\n```\nproject: A\n````\n";
        let spans = locate_blocks(doc, "time-log");
        assert_eq!(spans.len(), 1);
        assert_eq!(block_body(doc, spans[0]).unwrap(), "```\nproject: A");
    }

    #[test]
    fn crlf_documents() {
        let doc = "intro\r\n```time-log\r\nproject: A\r\nperiod: x\r\n```\r\n";
        let spans = locate_blocks(doc, "time-log");
        assert_eq!(
            spans,
            vec![BlockSpan {
                line_start: 1,
                line_end: 4
            }]
        );
        assert_eq!(block_body(doc, spans[0]).unwrap(), "project: A\nperiod: x");
    }

    #[test]
    fn empty_body() {
        let doc = "```time-log\n```";
        let spans = locate_blocks(doc, "time-log");
        assert_eq!(block_body(doc, spans[0]).unwrap(), "");
    }

    #[test]
    fn span_outside_document_has_no_body() {
        let span = BlockSpan {
            line_start: 0,
            line_end: 10,
        };
        assert_eq!(block_body("a\nb", span), None);
    }

    #[test]
    fn deeply_indented_fence_is_not_a_fence() {
        assert!(locate_blocks("    ```time-log\n    x\n    ```\n", "time-log").is_empty());
    }
}
