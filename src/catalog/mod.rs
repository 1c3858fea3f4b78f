pub mod error;
pub mod store;

pub use error::CatalogError;

use log::{debug, warn};
use std::collections::{HashMap, HashSet};

use crate::model::{Book, Collection, CollectionId, Element, ShelfEntry};

const PATH_SEPARATOR: &str = " / ";

/// Owns every collection of a library and the containment between them.
///
/// Books live inside their collection; collections refer to their parent and
/// children by [`CollectionId`]. Mutations made through the catalog keep the
/// tree acyclic.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    collections: HashMap<CollectionId, Collection>,
    roots: Vec<CollectionId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn roots(&self) -> &[CollectionId] {
        &self.roots
    }

    pub fn collection(&self, id: CollectionId) -> Option<&Collection> {
        self.collections.get(&id)
    }

    /// Mutable access to a collection.
    ///
    /// Setting the parent through [`Element`] here bypasses the catalog's
    /// cycle checks; [`Catalog::ancestors`] still reports such cycles.
    pub fn collection_mut(&mut self, id: CollectionId) -> Option<&mut Collection> {
        self.collections.get_mut(&id)
    }

    fn get(&self, id: CollectionId) -> Result<&Collection, CatalogError> {
        self.collections
            .get(&id)
            .ok_or(CatalogError::UnknownCollection(id))
    }

    fn get_mut(&mut self, id: CollectionId) -> Result<&mut Collection, CatalogError> {
        self.collections
            .get_mut(&id)
            .ok_or(CatalogError::UnknownCollection(id))
    }

    /// Every collection, depth first, roots in insertion order.
    pub fn collections(&self) -> Vec<&Collection> {
        let mut ordered = Vec::with_capacity(self.collections.len());
        let mut stack: Vec<CollectionId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(collection) = self.collections.get(&id) {
                ordered.push(collection);
                stack.extend(collection.children.iter().rev().copied());
            }
        }
        ordered
    }

    pub fn create_collection(
        &mut self,
        name: impl Into<String>,
        parent: Option<CollectionId>,
    ) -> Result<CollectionId, CatalogError> {
        let mut collection = Collection::new(name);
        let id = collection.id();
        match parent {
            Some(parent_id) => {
                self.get_mut(parent_id)?.children.push(id);
                collection.set_parent_collection(Some(parent_id));
            }
            None => self.roots.push(id),
        }
        debug!("created collection {:?} ({})", collection.name(), id);
        self.collections.insert(id, collection);
        Ok(id)
    }

    pub fn add_book(
        &mut self,
        collection: CollectionId,
        mut book: Book,
    ) -> Result<(), CatalogError> {
        let target = self.get_mut(collection)?;
        book.set_parent_collection(Some(collection));
        debug!("added {:?} to collection {:?}", book.title(), target.name());
        target.books.push(book);
        Ok(())
    }

    /// Takes the first book titled `title` out of `collection`. The returned
    /// book is no longer contained anywhere.
    pub fn remove_book(
        &mut self,
        collection: CollectionId,
        title: &str,
    ) -> Result<Book, CatalogError> {
        let target = self.get_mut(collection)?;
        let position = target
            .books
            .iter()
            .position(|book| book.title() == title)
            .ok_or_else(|| CatalogError::BookNotFound {
                collection,
                title: title.to_string(),
            })?;
        let mut book = target.books.remove(position);
        book.set_parent_collection(None);
        debug!("removed {:?} from collection {:?}", title, target.name());
        Ok(book)
    }

    /// Re-parents a collection. Moving a collection under itself or one of its
    /// descendants fails with [`CatalogError::CycleInContainment`].
    pub fn move_collection(
        &mut self,
        id: CollectionId,
        new_parent: Option<CollectionId>,
    ) -> Result<(), CatalogError> {
        let old_parent = self.get(id)?.parent_collection();
        if let Some(parent_id) = new_parent {
            let chain = self.ancestors(Some(parent_id))?.unwrap_or_default();
            if chain.iter().any(|ancestor| ancestor.id() == id) {
                warn!("refusing to move collection {} under its own subtree", id);
                return Err(CatalogError::CycleInContainment(id));
            }
        }

        self.detach(id, old_parent);
        match new_parent {
            Some(parent_id) => self.get_mut(parent_id)?.children.push(id),
            None => self.roots.push(id),
        }
        self.get_mut(id)?.set_parent_collection(new_parent);
        debug!("moved collection {} from {:?} to {:?}", id, old_parent, new_parent);
        Ok(())
    }

    /// Removes a collection along with everything nested in it. The returned
    /// collection keeps its books but no longer lists any children.
    pub fn remove_collection(&mut self, id: CollectionId) -> Result<Collection, CatalogError> {
        let parent = self.get(id)?.parent_collection();
        self.detach(id, parent);

        let mut removed = self
            .collections
            .remove(&id)
            .ok_or(CatalogError::UnknownCollection(id))?;
        let mut stack = std::mem::take(&mut removed.children);
        while let Some(child) = stack.pop() {
            if let Some(collection) = self.collections.remove(&child) {
                stack.extend(collection.children);
            }
        }
        removed.set_parent_collection(None);
        debug!("removed collection {:?} ({})", removed.name(), id);
        Ok(removed)
    }

    fn detach(&mut self, id: CollectionId, parent: Option<CollectionId>) {
        match parent {
            Some(parent_id) => {
                if let Some(parent) = self.collections.get_mut(&parent_id) {
                    parent.children.retain(|child| *child != id);
                }
            }
            None => self.roots.retain(|root| *root != id),
        }
    }

    /// Follows parent links from `start` up to a root collection.
    ///
    /// `None` in means `None` out: the element is not contained anywhere.
    /// Otherwise the chain is ordered nearest first.
    pub fn ancestors(
        &self,
        start: Option<CollectionId>,
    ) -> Result<Option<Vec<&Collection>>, CatalogError> {
        let mut current = match start {
            Some(id) => id,
            None => return Ok(None),
        };
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        loop {
            if !visited.insert(current) {
                warn!("containment cycle detected at collection {}", current);
                return Err(CatalogError::CycleInContainment(current));
            }
            let collection = self.get(current)?;
            chain.push(collection);
            match collection.parent_collection() {
                Some(parent) => current = parent,
                None => return Ok(Some(chain)),
            }
        }
    }

    /// Collections holding the given collection, nearest first.
    pub fn containing_collections_of(
        &self,
        id: CollectionId,
    ) -> Result<Option<Vec<&Collection>>, CatalogError> {
        self.ancestors(self.get(id)?.parent_collection())
    }

    pub fn find_title(&self, title: &str) -> Vec<&Book> {
        self.collections()
            .into_iter()
            .flat_map(|collection| collection.books.iter())
            .filter(|book| book.title() == title)
            .collect()
    }

    /// Names of the collections holding `element`, root first, e.g.
    /// `Computer Science / Operating Systems`. Empty when not contained.
    pub fn path_of(&self, element: &impl Element) -> Result<String, CatalogError> {
        let chain = self
            .ancestors(element.parent_collection())?
            .unwrap_or_default();
        let names: Vec<&str> = chain.iter().rev().map(|collection| collection.name()).collect();
        Ok(names.join(PATH_SEPARATOR))
    }

    pub fn listing(&self) -> Result<Vec<ShelfEntry>, CatalogError> {
        let mut entries = Vec::new();
        for collection in self.collections() {
            for book in &collection.books {
                entries.push(ShelfEntry::new(
                    book.title().to_string(),
                    book.author().to_string(),
                    self.path_of(book)?,
                ));
            }
        }
        Ok(entries)
    }
}
