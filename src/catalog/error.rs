use thiserror::Error;

use crate::model::{BookError, CollectionId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown collection: {0}")]
    UnknownCollection(CollectionId),
    #[error("no book titled {title:?} in collection {collection}")]
    BookNotFound {
        collection: CollectionId,
        title: String,
    },
    #[error("containment cycle through collection {0}")]
    CycleInContainment(CollectionId),
    #[error("invalid catalog document: {0}")]
    Document(String),
    #[error("invalid book in catalog: {0}")]
    Book(#[from] BookError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
