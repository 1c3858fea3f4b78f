use std::fmt;
use uuid::Uuid;

use crate::model::{Book, Element};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(Uuid);

impl CollectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CollectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named folder of books and nested collections.
///
/// Sub-collections are referenced by id; the owning [`Catalog`](crate::Catalog)
/// keeps the actual values.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    id: CollectionId,
    name: String,
    parent: Option<CollectionId>,
    pub(crate) books: Vec<Book>,
    pub(crate) children: Vec<CollectionId>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CollectionId::new(),
            name: name.into(),
            parent: None,
            books: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> CollectionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn children(&self) -> &[CollectionId] {
        &self.children
    }

    pub fn find_book(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.title() == title)
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.children.is_empty()
    }
}

impl Element for Collection {
    fn parent_collection(&self) -> Option<CollectionId> {
        self.parent
    }

    fn set_parent_collection(&mut self, parent: Option<CollectionId>) {
        self.parent = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collection_is_root_and_empty() {
        let collection = Collection::new("Computer Science");
        assert_eq!(collection.name(), "Computer Science");
        assert!(collection.parent_collection().is_none());
        assert!(collection.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Collection::new("A");
        let b = Collection::new("A");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_find_book() {
        let mut collection = Collection::new("Operating Systems");
        collection
            .books
            .push(Book::new("The Linux Kernel", "Linus Torvalds et al."));
        assert_eq!(
            collection.find_book("The Linux Kernel").map(Book::author),
            Some("Linus Torvalds et al.")
        );
        assert!(collection.find_book("Minix").is_none());
    }
}
