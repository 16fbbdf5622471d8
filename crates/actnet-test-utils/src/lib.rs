//! Testing utilities for the actnet workspace
//!
//! Shared fixtures: sample datasets, a temporary data directory and an
//! in-memory source.

#![allow(missing_docs)]

use actnet_service::{ActnetConfig, DatasetSource, GraphOptions, NetworkService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const ACTIVITY_FILE: &str = "activity-properties.csv";
pub const ADJACENCY_FILE: &str = "adjacency-matrix.csv";

/// Three dated activities in mixed header and date styles
pub const SAMPLE_ACTIVITIES: &str = "\
Node ID,Start Date,End Date
1,2020-01-01,2020-01-10
2,20/1/2020,25/1/2020
3,2020-2-1,3/2/2020
";

/// `1 -> 2 -> 3`
pub const SAMPLE_ADJACENCY: &str = "\
0,1,0
0,0,1
0,0,0
";

/// Data directory on disk, removed on drop
pub struct DatasetFixture {
    dir: TempDir,
    graph: GraphOptions,
}

impl DatasetFixture {
    /// Empty directory
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("create temp data dir"),
            graph: GraphOptions::default(),
        }
    }

    /// Directory holding both sample files
    pub fn sample() -> Self {
        Self::empty()
            .with_activities(SAMPLE_ACTIVITIES)
            .with_adjacency(SAMPLE_ADJACENCY)
    }

    pub fn with_activities(self, content: &str) -> Self {
        self.write(ACTIVITY_FILE, content.as_bytes());
        self
    }

    pub fn with_adjacency(self, content: &str) -> Self {
        self.write(ADJACENCY_FILE, content.as_bytes());
        self
    }

    pub fn with_graph(mut self, graph: GraphOptions) -> Self {
        self.graph = graph;
        self
    }

    /// Write raw bytes, e.g. content that is not UTF-8
    pub fn write(&self, name: &str, content: &[u8]) {
        std::fs::write(self.dir.path().join(name), content).expect("write fixture file");
    }

    pub fn remove(&self, name: &str) {
        std::fs::remove_file(self.dir.path().join(name)).expect("remove fixture file");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn config(&self) -> ActnetConfig {
        ActnetConfig::default()
            .with_data_dir(self.dir.path())
            .with_graph(self.graph)
    }

    pub fn service(&self) -> NetworkService {
        NetworkService::new(&self.config()).expect("fixture config is valid")
    }
}

/// Files held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(name.to_string(), content.into());
        self
    }

    pub fn sample() -> Self {
        Self::new()
            .with_file(ACTIVITY_FILE, SAMPLE_ACTIVITIES)
            .with_file(ADJACENCY_FILE, SAMPLE_ADJACENCY)
    }

    pub fn service(self, config: &ActnetConfig) -> NetworkService {
        NetworkService::with_source(Arc::new(self), config).expect("config is valid")
    }
}

#[async_trait]
impl DatasetSource for MemorySource {
    async fn exists(&self, name: &str) -> io::Result<bool> {
        Ok(self.files.contains_key(name))
    }

    async fn read(&self, name: &str) -> io::Result<String> {
        let bytes = self
            .files
            .get(name)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))?;
        String::from_utf8(bytes.clone())
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    fn location(&self, name: &str) -> PathBuf {
        PathBuf::from("memory").join(name)
    }
}
