//! Import command implementation for the Locus CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use locus_data::{ImportOptions, LocationStore};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ADDRESSES, ARG_DELIMITER, ARG_STOPS, CliError, ENV_ADDRESSES, ENV_STOPS, write_line,
};

/// CLI arguments for the `import` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "import",
    long_about = "Append every row of the given delimited files to the \
                 addresses and stops tables. Paths can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Bulk-load addresses and stops from delimited files"
)]
#[ortho_config(prefix = "LOCUS")]
pub(crate) struct ImportArgs {
    /// Path to a file of addresses (`id`, `latitude`, `longitude`).
    #[arg(long = ARG_ADDRESSES, value_name = "path")]
    #[serde(default)]
    pub(crate) addresses: Option<Utf8PathBuf>,
    /// Path to a file of stops (`id`, `latitude`, `longitude`).
    #[arg(long = ARG_STOPS, value_name = "path")]
    #[serde(default)]
    pub(crate) stops: Option<Utf8PathBuf>,
    /// Field delimiter, a single ASCII character (defaults to ',').
    #[arg(long = ARG_DELIMITER, value_name = "char")]
    #[serde(default)]
    pub(crate) delimiter: Option<char>,
}

impl ImportArgs {
    fn into_config(self) -> Result<ImportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ImportConfig::try_from(merged)
    }
}

/// Resolved `import` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportConfig {
    pub(crate) addresses: Option<Utf8PathBuf>,
    pub(crate) stops: Option<Utf8PathBuf>,
    pub(crate) options: ImportOptions,
}

impl ImportConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        if let Some(path) = &self.addresses {
            Self::require_existing(path, ARG_ADDRESSES)?;
        }
        if let Some(path) = &self.stops {
            Self::require_existing(path, ARG_STOPS)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        if path.is_file() {
            Ok(())
        } else {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
    }
}

impl TryFrom<ImportArgs> for ImportConfig {
    type Error = CliError;

    fn try_from(args: ImportArgs) -> Result<Self, Self::Error> {
        if args.addresses.is_none() && args.stops.is_none() {
            return Err(CliError::NothingToImport {
                addresses: ARG_ADDRESSES,
                stops: ARG_STOPS,
                addresses_env: ENV_ADDRESSES,
                stops_env: ENV_STOPS,
            });
        }
        let options = match args.delimiter {
            None => ImportOptions::default(),
            Some(value) if value.is_ascii() => {
                let byte = u8::try_from(value).map_err(|_| CliError::InvalidDelimiter { value })?;
                ImportOptions::default().with_delimiter(byte)
            }
            Some(value) => return Err(CliError::InvalidDelimiter { value }),
        };
        Ok(Self {
            addresses: args.addresses,
            stops: args.stops,
            options,
        })
    }
}

pub(crate) fn run_import(
    store: &mut LocationStore,
    args: ImportArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_import_config(args)?;
    if let Some(path) = &config.addresses {
        let imported = store
            .import_addresses_with(path, config.options)
            .map_err(|source| CliError::Import {
                field: ARG_ADDRESSES,
                source,
            })?;
        write_line(writer, &format!("imported {imported} addresses from {path}"))?;
    }
    if let Some(path) = &config.stops {
        let imported = store
            .import_stops_with(path, config.options)
            .map_err(|source| CliError::Import {
                field: ARG_STOPS,
                source,
            })?;
        write_line(writer, &format!("imported {imported} stops from {path}"))?;
    }
    Ok(())
}

pub(crate) fn resolve_import_config(args: ImportArgs) -> Result<ImportConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}
