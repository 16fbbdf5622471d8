//! The three dataset operations
//!
//! Each call reads fresh input, parses it completely and either returns the
//! success body or a `DatasetError`. Nothing is cached between calls.

use crate::config::{ActnetConfig, ConfigError, DatasetConfig};
use crate::response::{ActivitiesResponse, AdjacencyResponse, ServiceReply};
use crate::source::{DatasetSource, FsSource};
use actnet_core::{DatasetError, DatasetKind, Operation};
use actnet_graph::{CombinedGraph, CompositionFailure, GraphBuilder};
use actnet_parsers::{ActivityParser, AdjacencyParser, DatasetParser, ParseOutcome, Rejection};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Activity network operations over a dataset source
#[derive(Clone)]
pub struct NetworkService {
    source: Arc<dyn DatasetSource>,
    dataset: DatasetConfig,
    delimiter: u8,
    builder: GraphBuilder,
}

impl std::fmt::Debug for NetworkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkService")
            .field("dataset", &self.dataset)
            .field("options", &self.builder.options())
            .finish_non_exhaustive()
    }
}

impl NetworkService {
    /// Create a service reading from the configured data directory
    pub fn new(config: &ActnetConfig) -> Result<Self, ConfigError> {
        let source = Arc::new(FsSource::new(config.dataset.data_dir.clone()));
        Self::with_source(source, config)
    }

    /// Create a service over another source
    pub fn with_source(
        source: Arc<dyn DatasetSource>,
        config: &ActnetConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            source,
            delimiter: config.dataset.delimiter_byte()?,
            dataset: config.dataset.clone(),
            builder: GraphBuilder::with_options(config.graph),
        })
    }

    /// Where a dataset is read from
    #[must_use]
    pub fn location(&self, dataset: DatasetKind) -> PathBuf {
        self.source.location(self.dataset.file_name(dataset))
    }

    /// `GetActivities`
    pub async fn activities(&self) -> Result<ActivitiesResponse, DatasetError> {
        let content = self.load(DatasetKind::Activities).await?;
        let outcome = self.parse(&ActivityParser::with_delimiter(self.delimiter), &content)?;
        let data = outcome
            .into_validated()
            .map_err(|r| self.rejected(DatasetKind::Activities, Operation::Activities, r))?;
        Ok(ActivitiesResponse::new(data))
    }

    /// `GetAdjacency`
    pub async fn adjacency(&self) -> Result<AdjacencyResponse, DatasetError> {
        let content = self.load(DatasetKind::Adjacency).await?;
        let outcome = self.parse(&AdjacencyParser::with_delimiter(self.delimiter), &content)?;
        let matrix = outcome
            .into_validated()
            .map_err(|r| self.rejected(DatasetKind::Adjacency, Operation::Adjacency, r))?;
        Ok(AdjacencyResponse::new(matrix))
    }

    /// `GetCombinedGraph`
    ///
    /// Both files are checked for presence before either is read; every
    /// absent file is named in one failure.
    pub async fn combined_graph(&self) -> Result<CombinedGraph, DatasetError> {
        let (has_activities, has_adjacency) = tokio::try_join!(
            self.present(DatasetKind::Activities),
            self.present(DatasetKind::Adjacency)
        )?;
        let missing: Vec<(DatasetKind, PathBuf)> = [
            (DatasetKind::Activities, has_activities),
            (DatasetKind::Adjacency, has_adjacency),
        ]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(dataset, _)| (dataset, self.location(dataset)))
        .collect();
        if !missing.is_empty() {
            return Err(DatasetError::FilesMissing { missing });
        }

        let (activities, matrix) = tokio::try_join!(
            self.load(DatasetKind::Activities),
            self.load(DatasetKind::Adjacency)
        )?;
        let activities = self.parse(&ActivityParser::with_delimiter(self.delimiter), &activities)?;
        let matrix = self.parse(&AdjacencyParser::with_delimiter(self.delimiter), &matrix)?;

        self.builder
            .compose(activities, matrix)
            .map_err(|failure| match failure {
                CompositionFailure::NoActivities => DatasetError::NoActivities {
                    path: self.location(DatasetKind::Activities),
                },
                CompositionFailure::NoAdjacencyRows => DatasetError::NoAdjacencyRows {
                    path: self.location(DatasetKind::Adjacency),
                },
                CompositionFailure::Invalid(issues) => {
                    DatasetError::invalid(Operation::CombinedGraph, issues)
                }
            })
    }

    /// Run an operation and render its reply
    pub async fn run(&self, operation: Operation) -> ServiceReply {
        let reply = match operation {
            Operation::Activities => ServiceReply::from_result(&self.activities().await),
            Operation::Adjacency => ServiceReply::from_result(&self.adjacency().await),
            Operation::CombinedGraph => ServiceReply::from_result(&self.combined_graph().await),
        };

        match reply.code {
            None => tracing::info!(?operation, "operation succeeded"),
            Some(code) => tracing::warn!(
                ?operation,
                %code,
                status = reply.status,
                "operation failed"
            ),
        }
        reply
    }

    async fn present(&self, dataset: DatasetKind) -> Result<bool, DatasetError> {
        self.source
            .exists(self.dataset.file_name(dataset))
            .await
            .map_err(|err| DatasetError::io_error(self.location(dataset), err))
    }

    async fn load(&self, dataset: DatasetKind) -> Result<String, DatasetError> {
        self.source
            .read(self.dataset.file_name(dataset))
            .await
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => DatasetError::NotFound {
                    dataset,
                    path: self.location(dataset),
                },
                _ => DatasetError::io_error(self.location(dataset), err),
            })
    }

    fn parse<P: DatasetParser>(
        &self,
        parser: &P,
        content: &str,
    ) -> Result<ParseOutcome<P::Output>, DatasetError> {
        parser.parse(content).map_err(|err| {
            DatasetError::io_error(
                self.location(P::KIND),
                io::Error::new(io::ErrorKind::InvalidData, err),
            )
        })
    }

    fn rejected(&self, dataset: DatasetKind, operation: Operation, rejection: Rejection) -> DatasetError {
        match rejection {
            Rejection::Empty => DatasetError::Empty {
                dataset,
                path: self.location(dataset),
            },
            Rejection::Invalid(issues) => DatasetError::invalid(operation, issues),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actnet_core::{Activity, Code};
    use actnet_parsers::ParseError;
    use pretty_assertions::assert_eq;

    struct Rejecting;

    impl DatasetParser for Rejecting {
        type Output = Vec<Activity>;
        const KIND: DatasetKind = DatasetKind::Activities;

        fn parse(&self, _content: &str) -> Result<ParseOutcome<Self::Output>, ParseError> {
            Err(ParseError::InvalidDelimiter('§'))
        }
    }

    #[test]
    fn reader_failures_are_io_errors() {
        let service = NetworkService::new(&ActnetConfig::default()).unwrap();
        let err = service.parse(&Rejecting, "nodeId\n").unwrap_err();

        assert_eq!(err.code(), Code::Io);
        assert_eq!(err.http_status(), 500);
        let DatasetError::Io { path, source } = &err else {
            panic!("expected an I/O failure, got {err:?}");
        };
        assert_eq!(path, &service.location(DatasetKind::Activities));
        assert_eq!(source.kind(), io::ErrorKind::InvalidData);
    }
}
