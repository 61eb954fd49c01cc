//! File and in-memory injection.

use inject_blocks::{FileType, Rewrite};
use inject_fs::{NormalizedPath, RobustnessConfig, io};
use serde::Serialize;
use tracing::{debug, info};

use crate::context::InjectionContext;
use crate::error::{Error, Result};
use crate::events::{EventSink, FileUpdated, PathInjected};

/// Options for an injection run
#[derive(Debug, Clone, Copy, Default)]
pub struct InjectOptions {
    /// If true, compute every rewrite without writing or emitting events.
    pub dry_run: bool,
    /// Retry policy for writes
    pub robustness: RobustnessConfig,
}

/// A file whose content changed (or would change, in a dry run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: NormalizedPath,
    pub blocks: Vec<String>,
    /// Number of references written
    pub injected: usize,
    #[serde(skip)]
    pub original: String,
    #[serde(skip)]
    pub content: String,
}

/// Outcome of [`Injector::inject_files`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InjectionReport {
    pub dry_run: bool,
    pub updated: Vec<FileChange>,
    pub unchanged: Vec<NormalizedPath>,
}

impl InjectionReport {
    pub fn has_changes(&self) -> bool {
        !self.updated.is_empty()
    }
}

/// Applies an [`InjectionContext`] to consumer files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Injector {
    options: InjectOptions,
}

impl Injector {
    pub fn new(options: InjectOptions) -> Self {
        Self { options }
    }

    /// Rewrite every source file of `ctx`, one after another.
    ///
    /// A file is written only when its content changes. Package metadata is
    /// resolved for every injected reference on every run, so a file that is
    /// already up to date still fails on an unknown package. The first
    /// failure stops the run; files already processed keep their new content.
    pub fn inject_files(
        &self,
        ctx: &InjectionContext,
        sink: &mut dyn EventSink,
    ) -> Result<InjectionReport> {
        let mut report = InjectionReport {
            dry_run: self.options.dry_run,
            ..Default::default()
        };

        for path in ctx.sources() {
            match self
                .inject_file(ctx, path, sink)
                .map_err(|e| Error::in_file(path, e))?
            {
                Some(change) => report.updated.push(change),
                None => report.unchanged.push(path.clone()),
            }
        }

        info!(
            updated = report.updated.len(),
            unchanged = report.unchanged.len(),
            dry_run = report.dry_run,
            "Injection finished"
        );
        Ok(report)
    }

    /// Rewrite `content` as if it were the file at `path`, without
    /// touching the filesystem.
    ///
    /// `file_type` is a file type key such as `html` or `scss`.
    pub fn inject_str(
        &self,
        ctx: &InjectionContext,
        path: &NormalizedPath,
        content: &str,
        file_type: &str,
        sink: &mut dyn EventSink,
    ) -> Result<String> {
        let path = ctx.absolutize(path);
        let file_type = ctx.file_type(file_type)?;
        let rewrite = ctx.rewriter().rewrite(&path, content, file_type);
        let (injected, updated) = collect_events(ctx, &path, &rewrite)?;

        if rewrite.changed && !self.options.dry_run {
            emit(sink, &injected, &updated);
        }
        Ok(rewrite.content)
    }

    fn inject_file(
        &self,
        ctx: &InjectionContext,
        path: &NormalizedPath,
        sink: &mut dyn EventSink,
    ) -> Result<Option<FileChange>> {
        let original = io::read_text(path)?;
        let file_type: &FileType = ctx.file_type_for(path)?;
        let rewrite = ctx.rewriter().rewrite(path, &original, file_type);
        let (injected, updated) = collect_events(ctx, path, &rewrite)?;

        if !rewrite.changed {
            debug!(file = %path, "Content unchanged; not writing");
            return Ok(None);
        }

        if self.options.dry_run {
            debug!(file = %path, "Dry run; not writing");
        } else {
            io::write_text(path, &rewrite.content, self.options.robustness)?;
            info!(file = %path, injected = injected.len(), "Updated file");
            emit(sink, &injected, &updated);
        }

        Ok(Some(FileChange {
            path: path.clone(),
            blocks: rewrite.blocks,
            injected: injected.len(),
            original,
            content: rewrite.content,
        }))
    }
}

/// Build the events of one rewrite, resolving package metadata for every
/// injected reference.
fn collect_events(
    ctx: &InjectionContext,
    file: &NormalizedPath,
    rewrite: &Rewrite,
) -> Result<(Vec<PathInjected>, FileUpdated)> {
    let injected = rewrite
        .injected
        .iter()
        .map(|item| {
            Ok(PathInjected {
                block: item.block_type.clone(),
                file: file.clone(),
                dependency: item.dependency.clone(),
                reference: item.reference.clone(),
                package: ctx.package_for(&item.dependency)?.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let updated = FileUpdated {
        file: file.clone(),
        dependencies: rewrite.dependencies.clone(),
        blocks: rewrite.blocks.clone(),
    };
    Ok((injected, updated))
}

fn emit(sink: &mut dyn EventSink, injected: &[PathInjected], updated: &FileUpdated) {
    for event in injected {
        sink.path_injected(event);
    }
    sink.file_updated(updated);
}
