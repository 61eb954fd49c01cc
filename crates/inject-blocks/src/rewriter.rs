//! Block rewriting.
//!
//! Every block found in a file is replaced by its opening marker, one
//! reference line per dependency of the block's type, and its closing
//! marker:
//! ```text
//!   <!-- bower:js -->
//!   <script src="bower_components/a/a.js"></script>
//!   <script src="bower_components/b/b.js"></script>
//!   <!-- endbower -->
//! ```
//! Reference lines take the indentation of the opening marker and the
//! file's line ending. Text outside blocks is left untouched.

use inject_fs::NormalizedPath;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::dependencies::SortedDependencies;
use crate::file_type::FileType;
use crate::resolver::PathResolver;
use crate::scanner::{BlockMatch, LineEnding, outside_blocks};
use crate::tracker::DuplicateTracker;

/// Block type assumed when a marker does not declare one.
pub const DEFAULT_BLOCK_TYPE: &str = "js";

/// One reference written into a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    pub block_type: String,
    /// Absolute path of the dependency file.
    pub dependency: NormalizedPath,
    /// The path as written into the file.
    pub reference: String,
}

/// Result of rewriting one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// Whether `content` differs from the input.
    pub changed: bool,
    /// Block type of every block, in order of appearance.
    pub blocks: Vec<String>,
    /// Dependency list looked up for each block type.
    pub dependencies: BTreeMap<String, Vec<NormalizedPath>>,
    /// References written, in order.
    pub injected: Vec<Injected>,
}

/// Rewrites the blocks of consumer files.
#[derive(Debug, Clone)]
pub struct BlockRewriter {
    resolver: PathResolver,
    dependencies: SortedDependencies,
    fallback_type: String,
}

impl BlockRewriter {
    pub fn new(dependencies: SortedDependencies, resolver: PathResolver) -> Self {
        Self {
            resolver,
            dependencies,
            fallback_type: DEFAULT_BLOCK_TYPE.to_string(),
        }
    }

    /// Use `block_type` for markers that do not declare a type.
    pub fn with_fallback_type(mut self, block_type: impl Into<String>) -> Self {
        self.fallback_type = block_type.into();
        self
    }

    pub fn dependencies(&self) -> &SortedDependencies {
        &self.dependencies
    }

    /// Rewrite every block of `text`, the content of the file at `file`.
    ///
    /// `file` must be absolute; reference paths are computed relative to
    /// its directory.
    pub fn rewrite(&self, file: &NormalizedPath, text: &str, file_type: &FileType) -> Rewrite {
        let matches = file_type.scan(text);
        let line_ending = LineEnding::detect(text);
        let outside = outside_blocks(text, &matches);
        let mut tracker = DuplicateTracker::new();

        let mut rewrite = Rewrite {
            content: String::with_capacity(text.len()),
            changed: false,
            blocks: Vec::with_capacity(matches.len()),
            dependencies: BTreeMap::new(),
            injected: Vec::new(),
        };

        let mut cursor = 0;
        for block in &matches {
            rewrite.content.push_str(&text[cursor..block.span.start]);
            let rendered = self.render_block(
                file,
                block,
                file_type,
                line_ending,
                &outside,
                &mut tracker,
                &mut rewrite,
            );
            rewrite.content.push_str(&rendered);
            cursor = block.span.end;
        }
        rewrite.content.push_str(&text[cursor..]);

        rewrite.changed = rewrite.content != text;
        debug!(
            file = %file,
            blocks = rewrite.blocks.len(),
            injected = rewrite.injected.len(),
            changed = rewrite.changed,
            "Rewrote blocks"
        );
        rewrite
    }

    #[allow(clippy::too_many_arguments)]
    fn render_block(
        &self,
        file: &NormalizedPath,
        block: &BlockMatch,
        file_type: &FileType,
        line_ending: LineEnding,
        outside: &str,
        tracker: &mut DuplicateTracker,
        rewrite: &mut Rewrite,
    ) -> String {
        let block_type = block.kind.as_deref().unwrap_or(&self.fallback_type);
        let dependencies = self.dependencies.get(block_type);

        rewrite.blocks.push(block_type.to_string());
        rewrite
            .dependencies
            .insert(block_type.to_string(), dependencies.to_vec());

        if let Some(detect) = file_type.detect_pattern(block_type) {
            tracker.prescan(block_type, outside, detect);
        }
        tracker.begin_block();

        if !dependencies.is_empty() && !file_type.has_renderer(block_type) {
            warn!(
                file = %file,
                file_type = file_type.name(),
                block_type,
                "No renderer for block type; block left empty"
            );
        }

        let indent: String = block.indent.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        let prefix = format!("{}{}", line_ending.as_str(), indent);

        let mut out = block.open.clone();
        for dependency in dependencies {
            let reference = self.resolver.resolve(file, dependency);
            if tracker.already_referenced(&reference) {
                debug!(file = %file, reference = %reference, "Skipping existing reference");
                continue;
            }
            let Some(line) = file_type.render(block_type, &reference) else {
                continue;
            };

            tracker.mark_injected(&reference);
            out.push_str(&prefix);
            out.push_str(&line);
            rewrite.injected.push(Injected {
                block_type: block_type.to_string(),
                dependency: dependency.clone(),
                reference,
            });
        }
        out.push_str(&prefix);
        out.push_str(&block.close);
        out
    }
}
