use std::path::PathBuf;

/// Failure while generating the OpenAPI document.
#[derive(Debug)]
pub enum DocsError {
    /// A source pattern is not valid glob syntax.
    Pattern { pattern: String, message: String },
    /// A source pattern matched no file (only with strict sources).
    NoMatch { pattern: String },
    /// A matched file could not be read.
    Read { path: PathBuf, source: std::io::Error },
    /// An annotation block is not a valid YAML mapping.
    Annotation {
        path: PathBuf,
        line: usize,
        message: String,
    },
    /// A configuration override has the wrong shape.
    Config(apidoc_core::ConfigError),
}

impl std::fmt::Display for DocsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocsError::Pattern { pattern, message } => {
                write!(f, "Invalid source pattern '{pattern}': {message}")
            }
            DocsError::NoMatch { pattern } => {
                write!(f, "Source pattern '{pattern}' matched no files")
            }
            DocsError::Read { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
            DocsError::Annotation {
                path,
                line,
                message,
            } => write!(
                f,
                "Invalid OpenAPI annotation at {}:{line}: {message}",
                path.display()
            ),
            DocsError::Config(err) => write!(f, "Invalid OpenAPI configuration: {err}"),
        }
    }
}

impl std::error::Error for DocsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocsError::Read { source, .. } => Some(source),
            DocsError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<apidoc_core::ConfigError> for DocsError {
    fn from(err: apidoc_core::ConfigError) -> Self {
        DocsError::Config(err)
    }
}
