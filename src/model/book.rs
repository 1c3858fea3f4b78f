use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::model::{Collection, CollectionId, Element};

#[derive(Debug, Error)]
pub enum BookError {
    #[error("malformed book representation: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("book representation has no `{0}` field")]
    MissingField(&'static str),
    #[error("book field `{0}` must be a string")]
    InvalidField(&'static str),
}

/// The fields a book exposes in its text representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
}

impl BookField {
    pub const EXPOSED: [BookField; 2] = [BookField::Title, BookField::Author];

    pub fn name(self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Author => "author",
        }
    }

    fn read(self, book: &Book) -> &str {
        match self {
            BookField::Title => &book.title,
            BookField::Author => &book.author,
        }
    }
}

/// Builds a JSON object holding only `fields`, in the given order.
pub fn represent(book: &Book, fields: &[BookField]) -> Value {
    let mut object = Map::new();
    for field in fields {
        object.insert(field.name().to_string(), Value::from(field.read(book)));
    }
    Value::Object(object)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
    author: String,
    parent: Option<CollectionId>,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            parent: None,
        }
    }

    /// Parses `{"title": ..., "author": ...}`. Extra keys are ignored and the
    /// parent collection is never restored.
    pub fn from_representation(text: &str) -> Result<Self, BookError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, BookError> {
        let object = value
            .as_object()
            .ok_or(BookError::MissingField(BookField::Title.name()))?;
        let title = required_field(object, BookField::Title)?;
        let author = required_field(object, BookField::Author)?;
        Ok(Self::new(title, author))
    }

    pub fn to_value(&self) -> Value {
        represent(self, &BookField::EXPOSED)
    }

    pub fn string_representation(&self) -> String {
        self.to_value().to_string()
    }

    /// Collections holding this book, nearest first and root last.
    ///
    /// Returns `Ok(None)` when the book is not in any collection.
    pub fn containing_collections<'c>(
        &self,
        catalog: &'c Catalog,
    ) -> Result<Option<Vec<&'c Collection>>, CatalogError> {
        catalog.ancestors(self.parent)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}

fn required_field(object: &Map<String, Value>, field: BookField) -> Result<String, BookError> {
    match object.get(field.name()) {
        None | Some(Value::Null) => Err(BookError::MissingField(field.name())),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(BookError::InvalidField(field.name())),
    }
}

impl Element for Book {
    fn parent_collection(&self) -> Option<CollectionId> {
        self.parent
    }

    fn set_parent_collection(&mut self, parent: Option<CollectionId>) {
        self.parent = parent;
    }
}

impl FromStr for Book {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_representation(s)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.string_representation())
    }
}
