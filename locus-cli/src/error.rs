//! Error types emitted by the Locus CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use locus_data::{ImportError, SchemaError, StoreError};
use thiserror::Error;

/// Errors emitted by the Locus CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// Neither an addresses nor a stops file was supplied to `import`.
    #[error("nothing to import (set --{addresses}, --{stops}, {addresses_env} or {stops_env})")]
    NothingToImport {
        addresses: &'static str,
        stops: &'static str,
        addresses_env: &'static str,
        stops_env: &'static str,
    },
    /// The field delimiter is not a single ASCII character.
    #[error("delimiter {value:?} must be a single ASCII character")]
    InvalidDelimiter { value: char },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// Opening, writing to or querying the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Creating the store schema failed.
    #[error("failed to initialise {path:?}")]
    Initialise {
        path: Utf8PathBuf,
        #[source]
        source: SchemaError,
    },
    /// Importing a delimited file failed.
    #[error("failed to import {field}")]
    Import {
        field: &'static str,
        #[source]
        source: ImportError,
    },
    /// Serialising a location for output failed.
    #[error("failed to serialise location")]
    SerialiseLocation(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output")]
    WriteOutput(#[source] std::io::Error),
}
