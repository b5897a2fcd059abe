use thiserror::Error;

#[derive(Debug, Error)]
pub enum UriError {
    #[error("malformed uri `{uri}`: {source}")]
    Malformed {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("uri `{uri}` has no host component")]
    MissingHost { uri: String },

    #[error("path of `{uri}` is not valid UTF-8 once percent-decoded")]
    InvalidPathEncoding { uri: String },
}

impl UriError {
    pub fn malformed(uri: impl Into<String>, source: url::ParseError) -> Self {
        Self::Malformed {
            uri: uri.into(),
            source,
        }
    }

    pub fn missing_host(uri: impl Into<String>) -> Self {
        Self::MissingHost { uri: uri.into() }
    }

    pub fn invalid_path_encoding(uri: impl Into<String>) -> Self {
        Self::InvalidPathEncoding { uri: uri.into() }
    }
}
