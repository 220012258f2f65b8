use std::io;
use std::path::PathBuf;




/**
 * Error to represent a failed nightly run: an unwritable script file, an
 * external command that could not be started, a template that cannot be
 * rendered, or a bad configuration matrix.
 */
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("template placeholder `{0}` has no value in the render context")]
    MissingPlaceholder(String),

    #[error("malformed template at byte {0}: unmatched brace")]
    MalformedTemplate(usize),

    #[error("invalid matrix file {path:?}: {message}")]
    Matrix { path: PathBuf, message: String },

    #[error("no configuration named `{0}`")]
    UnknownConfiguration(String),
}

pub type Result<T> = std::result::Result<T, Error>;




// ============================================================================
impl Error {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}
