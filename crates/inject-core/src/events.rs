//! Notifications raised while files are rewritten.
//!
//! For every changed file the injector reports each injected reference
//! through [`EventSink::path_injected`], in injection order, followed by
//! one [`EventSink::file_updated`]. Unchanged files raise nothing.

use inject_fs::NormalizedPath;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A consumer file received new content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileUpdated {
    pub file: NormalizedPath,
    /// Dependency list used for each block type found in the file
    pub dependencies: BTreeMap<String, Vec<NormalizedPath>>,
    /// Block type of every block, in order of appearance
    pub blocks: Vec<String>,
}

/// One reference was written into a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathInjected {
    pub block: String,
    pub file: NormalizedPath,
    /// Absolute path of the dependency
    pub dependency: NormalizedPath,
    /// Path as written into the file
    pub reference: String,
    /// Metadata of the package the dependency belongs to
    pub package: Value,
}

/// Receiver of injection events.
pub trait EventSink {
    fn file_updated(&mut self, event: &FileUpdated);
    fn path_injected(&mut self, event: &PathInjected);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn file_updated(&mut self, _event: &FileUpdated) {}
    fn path_injected(&mut self, _event: &PathInjected) {}
}

/// A recorded event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Event {
    FileUpdated(FileUpdated),
    PathInjected(PathInjected),
}

/// Keeps every event in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<Event>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_updates(&self) -> impl Iterator<Item = &FileUpdated> {
        self.events.iter().filter_map(|event| match event {
            Event::FileUpdated(e) => Some(e),
            Event::PathInjected(_) => None,
        })
    }

    pub fn injections(&self) -> impl Iterator<Item = &PathInjected> {
        self.events.iter().filter_map(|event| match event {
            Event::PathInjected(e) => Some(e),
            Event::FileUpdated(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for RecordingSink {
    fn file_updated(&mut self, event: &FileUpdated) {
        self.events.push(Event::FileUpdated(event.clone()));
    }

    fn path_injected(&mut self, event: &PathInjected) {
        self.events.push(Event::PathInjected(event.clone()));
    }
}

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn file_updated(&mut self, event: &FileUpdated) {
        info!(file = %event.file, blocks = ?event.blocks, "File updated");
    }

    fn path_injected(&mut self, event: &PathInjected) {
        debug!(
            file = %event.file,
            block = %event.block,
            reference = %event.reference,
            "Path injected"
        );
    }
}

/// Forwards every event to both sinks, first `A` then `B`.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn file_updated(&mut self, event: &FileUpdated) {
        self.0.file_updated(event);
        self.1.file_updated(event);
    }

    fn path_injected(&mut self, event: &PathInjected) {
        self.0.path_injected(event);
        self.1.path_injected(event);
    }
}
