//! Block detection.
//!
//! A block is a region delimited by an opening marker that may declare a
//! type and a closing marker:
//! ```text
//!     <!-- bower:css -->
//!     ...generated references...
//!     <!-- endbower -->
//! ```

use regex::Regex;
use std::ops::Range;

/// Names of the capture groups a block pattern must define.
pub const BLOCK_GROUPS: [&str; 5] = ["open", "indent", "kind", "body", "close"];

/// One block found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch {
    /// Byte range of the whole block, markers included.
    pub span: Range<usize>,
    /// The opening marker, including its leading indentation.
    pub open: String,
    /// Whitespace preceding the opening marker.
    pub indent: String,
    /// Declared block type, `None` when the marker omits it.
    pub kind: Option<String>,
    /// Current content between the markers.
    pub body: String,
    /// The closing marker.
    pub close: String,
}

/// Strategy for locating blocks in a text.
///
/// Implementations must return disjoint matches in ascending order of
/// position.
pub trait BlockScanner: Send + Sync {
    fn scan(&self, text: &str) -> Vec<BlockMatch>;
}

/// Scanner driven by a single regex with the [`BLOCK_GROUPS`] named groups.
#[derive(Debug, Clone)]
pub struct RegexScanner {
    pattern: Regex,
}

impl RegexScanner {
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl BlockScanner for RegexScanner {
    fn scan(&self, text: &str) -> Vec<BlockMatch> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let group = |name: &str| caps.name(name).map_or("", |m| m.as_str()).to_string();
                let kind = group("kind");

                Some(BlockMatch {
                    span: whole.range(),
                    open: group("open"),
                    indent: group("indent"),
                    kind: (!kind.is_empty()).then_some(kind),
                    body: group("body"),
                    close: group("close"),
                })
            })
            .collect()
    }
}

/// Line ending convention of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Infer the convention from the first line break in `text`.
    ///
    /// Text without any line break is treated as `\n`.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(idx) if text[..idx].ends_with('\r') => Self::CrLf,
            _ => Self::Lf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// The text outside every block, with a line break where a block was cut out.
///
/// The separator keeps a reference before a block from fusing with the
/// text after it.
pub(crate) fn outside_blocks(text: &str, blocks: &[BlockMatch]) -> String {
    let mut rest = String::with_capacity(text.len());
    let mut cursor = 0;
    for block in blocks {
        rest.push_str(&text[cursor..block.span.start]);
        rest.push('\n');
        cursor = block.span.end;
    }
    rest.push_str(&text[cursor..]);
    rest
}
