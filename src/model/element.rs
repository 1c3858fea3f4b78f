use crate::model::CollectionId;

/// Something that can sit inside a collection.
pub trait Element {
    fn parent_collection(&self) -> Option<CollectionId>;
    fn set_parent_collection(&mut self, parent: Option<CollectionId>);

    fn is_contained(&self) -> bool {
        self.parent_collection().is_some()
    }
}
