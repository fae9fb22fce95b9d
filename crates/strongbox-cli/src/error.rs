use std::path::PathBuf;

use miette::Diagnostic;
use strongbox_config::error::ConfigError;
use strongbox_db::DbError;
use strongbox_graph::GraphError;
use strongbox_utils::error::PathError;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error("Error while {action}")]
    #[diagnostic(code(strongbox::io), help("Check file permissions and disk space"))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid coordinates chain in {path}")]
    #[diagnostic(
        code(strongbox::invalid_chain),
        help("Expected a JSON array of tagged coordinates, most general first")
    )]
    InvalidChain {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Coordinates chain in {0} is empty")]
    #[diagnostic(code(strongbox::empty_chain))]
    EmptyChain(PathBuf),

    #[error(transparent)]
    #[diagnostic(code(strongbox::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(strongbox::toml), help("Check your configuration syntax"))]
    TomlError(#[from] toml::ser::Error),
}

pub type CliResult<T> = std::result::Result<T, CliError>;

/// Trait for adding context to IO errors.
pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> CliResult<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> CliResult<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| CliError::IoError {
            action: context(),
            source: err,
        })
    }
}
