pub mod book;
pub mod collection;
pub mod element;
pub mod shelf_entry;

pub use book::*;
pub use collection::*;
pub use element::*;
pub use shelf_entry::*;
