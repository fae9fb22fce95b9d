use miette::Diagnostic;
use strongbox_utils::error::{FileSystemError, PathError};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(strongbox_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(strongbox_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Failed to parse TOML: {0}")]
    #[diagnostic(code(strongbox_config::toml))]
    Toml(#[from] toml_edit::TomlError),

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(strongbox_config::already_exists),
        help("Remove the existing config file or set STRONGBOX_CONFIG to a different location")
    )]
    ConfigAlreadyExists,

    #[error("max_hierarchy_depth {depth} exceeds the limit of {max}")]
    #[diagnostic(
        code(strongbox_config::invalid_depth),
        help("Artifact hierarchies are shallow; a depth of 5 covers every supported layout")
    )]
    InvalidDepth { depth: usize, max: usize },

    #[error("`{0}` must not be empty")]
    #[diagnostic(code(strongbox_config::empty_path))]
    EmptyPath(&'static str),

    #[error("Invalid log level: {0}")]
    #[diagnostic(
        code(strongbox_config::invalid_log_level),
        help("Use one of: error, warn, info, debug, trace")
    )]
    InvalidLogLevel(String),

    #[error("Encountered unexpected TOML item: {0}")]
    #[diagnostic(code(strongbox_config::unexpected_toml_item))]
    UnexpectedTomlItem(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(strongbox_config::io))]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FileSystem(#[from] FileSystemError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
