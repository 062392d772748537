use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("template directive is invalid; check colon escaping: {0}")]
    InvalidDirective(String),
    #[error("Invalid rename pattern: {pattern}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Invalid glob pattern: {pattern}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("Failed to render template {}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: handlebars::RenderError,
    },
    #[error("{action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error running {binary}")]
    Exec {
        binary: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { action, path, source }
    }
}
