use std::path::PathBuf;
use thiserror::Error;

use crate::extract::descriptor::DescriptorError;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request for {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("cannot resolve {href:?} against {base}")]
    Url {
        base: String,
        href: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot build http client")]
    Client(#[source] reqwest::Error),

    #[error("writing output failed")]
    Output(#[source] std::io::Error),

    #[error("link {href:?} has no identifier segment")]
    NoIdentifier { href: String },

    #[error("{page}: no element matching {selector:?}")]
    MissingElement { page: String, selector: &'static str },

    #[error("{page} row {row}: expected at least 4 cells, found {found}")]
    MissingCells { page: String, row: usize, found: usize },

    #[error("{page} row {row}: opcode {text:?} is not a hex byte")]
    InvalidOpcode { page: String, row: usize, text: String },

    #[error("{page} row {row}: {source}")]
    Descriptor {
        page: String,
        row: usize,
        #[source]
        source: DescriptorError,
    },
}

impl ScrapeError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| ScrapeError::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
