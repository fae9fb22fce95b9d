//! Error types for strongbox-utils.

use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum PathError {
    #[error("Path is empty")]
    #[diagnostic(code(strongbox_utils::empty_path))]
    Empty,

    #[error("Environment variable `{var}` referenced by `{input}` is not set")]
    #[diagnostic(
        code(strongbox_utils::missing_env_var),
        help("Export the variable or spell the path out")
    )]
    MissingEnvVar { var: String, input: String },

    #[error("Unclosed `${{` in `{0}`")]
    #[diagnostic(code(strongbox_utils::unclosed_variable))]
    UnclosedVariable(String),

    #[error("Failed to read the current directory")]
    #[diagnostic(code(strongbox_utils::current_dir))]
    CurrentDir(#[source] io::Error),
}

#[derive(Error, Diagnostic, Debug)]
pub enum FileSystemError {
    #[error("Failed to {action} `{}`", .path.display())]
    #[diagnostic(
        code(strongbox_utils::io),
        help("Check file permissions and disk space")
    )]
    Io {
        path: PathBuf,
        action: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("`{}` exists and is not a directory", .0.display())]
    #[diagnostic(code(strongbox_utils::not_a_directory))]
    NotADirectory(PathBuf),
}

impl FileSystemError {
    pub(crate) fn io(path: &std::path::Path, action: &'static str, source: io::Error) -> Self {
        FileSystemError::Io {
            path: path.to_path_buf(),
            action,
            source,
        }
    }
}

pub type PathResult<T> = std::result::Result<T, PathError>;
pub type FileSystemResult<T> = std::result::Result<T, FileSystemError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_io_error_keeps_source() {
        let err = FileSystemError::io(
            std::path::Path::new("/srv/graph.json"),
            "rename",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );

        assert_eq!(err.to_string(), "Failed to rename `/srv/graph.json`");
        assert_eq!(err.source().unwrap().to_string(), "denied");
    }
}
