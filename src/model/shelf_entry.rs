use serde::Serialize;

/// One row of a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShelfEntry {
    pub title: String,
    pub author: String,
    pub location: String,
}

impl ShelfEntry {
    pub fn new(title: String, author: String, location: String) -> Self {
        Self {
            title,
            author,
            location,
        }
    }
}
