use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogscopeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed record on line {line}: {source}")]
    Load {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported field type `{kind}` for field `{field}`")]
    UnsupportedFieldType { field: String, kind: String },

    #[error("Form error: {0}")]
    Form(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, LogscopeError>;
