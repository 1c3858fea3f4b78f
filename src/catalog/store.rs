use log::info;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{Catalog, CatalogError};
use crate::model::{Book, Collection, CollectionId, Element};

const COLLECTIONS_KEY: &str = "collections";
const BOOKS_KEY: &str = "books";
const NAME_KEY: &str = "name";
const PARENT_KEY: &str = "parent";

impl Catalog {
    /// The whole catalog as a flat document:
    /// `{"collections":[{"name":..,"parent":null|index,"books":[..]}]}`.
    ///
    /// Collections are listed depth first, so a parent index always points at
    /// an earlier entry. Nesting depth of the tree does not change the
    /// nesting of the document.
    pub fn to_value(&self) -> Value {
        let ordered = self.collections();
        let positions: HashMap<CollectionId, usize> = ordered
            .iter()
            .enumerate()
            .map(|(position, collection)| (collection.id(), position))
            .collect();
        let entries: Vec<Value> = ordered
            .iter()
            .map(|collection| collection_value(collection, &positions))
            .collect();

        let mut object = Map::new();
        object.insert(COLLECTIONS_KEY.to_string(), Value::Array(entries));
        Value::Object(object)
    }

    pub fn to_representation(&self) -> String {
        self.to_value().to_string()
    }

    pub fn from_representation(text: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Rebuilds a catalog from its document. Collections get fresh ids and
    /// every book's parent points at the collection it was listed under.
    pub fn from_value(value: &Value) -> Result<Self, CatalogError> {
        let object = value
            .as_object()
            .ok_or_else(|| CatalogError::Document("catalog must be a JSON object".to_string()))?;
        let entries = object
            .get(COLLECTIONS_KEY)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                CatalogError::Document(format!("catalog has no `{}` array", COLLECTIONS_KEY))
            })?;

        let mut catalog = Catalog::new();
        let mut ids: Vec<CollectionId> = Vec::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            let id = catalog.insert_entry(entry, position, &ids)?;
            ids.push(id);
        }
        Ok(catalog)
    }

    /// `inserted` holds the ids of every entry before `position`.
    fn insert_entry(
        &mut self,
        entry: &Value,
        position: usize,
        inserted: &[CollectionId],
    ) -> Result<CollectionId, CatalogError> {
        let object = entry
            .as_object()
            .ok_or_else(|| CatalogError::Document("collection must be a JSON object".to_string()))?;
        let name = object
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| CatalogError::Document(format!("collection has no `{}`", NAME_KEY)))?;

        let parent = match object.get(PARENT_KEY) {
            None | Some(Value::Null) => None,
            Some(value) => {
                let index = value.as_u64().ok_or_else(|| {
                    CatalogError::Document(format!(
                        "collection {} has a `{}` that is not an index",
                        position, PARENT_KEY
                    ))
                })?;
                let parent_id = usize::try_from(index)
                    .ok()
                    .and_then(|index| inserted.get(index))
                    .ok_or_else(|| {
                        CatalogError::Document(format!(
                            "collection {} refers to parent {} which is not listed before it",
                            position, index
                        ))
                    })?;
                Some(*parent_id)
            }
        };

        let id = self.create_collection(name, parent)?;
        for book in optional_array(object, BOOKS_KEY)? {
            self.add_book(id, Book::from_value(book)?)?;
        }
        Ok(id)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(&self.to_value())?)?;
        info!("saved {} collections to {}", self.len(), path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let catalog = Self::from_representation(&fs::read_to_string(path)?)?;
        info!("loaded {} collections from {}", catalog.len(), path.display());
        Ok(catalog)
    }
}

fn collection_value(collection: &Collection, positions: &HashMap<CollectionId, usize>) -> Value {
    let parent = collection
        .parent_collection()
        .and_then(|id| positions.get(&id))
        .map_or(Value::Null, |position| Value::from(*position));
    let books: Vec<Value> = collection.books.iter().map(Book::to_value).collect();

    let mut object = Map::new();
    object.insert(NAME_KEY.to_string(), Value::from(collection.name()));
    object.insert(PARENT_KEY.to_string(), parent);
    object.insert(BOOKS_KEY.to_string(), Value::Array(books));
    Value::Object(object)
}

fn optional_array<'v>(
    object: &'v Map<String, Value>,
    key: &str,
) -> Result<&'v [Value], CatalogError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(CatalogError::Document(format!("`{}` must be an array", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookError;
    use uuid::Uuid;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        let cs = catalog.create_collection("Computer Science", None).unwrap();
        let os = catalog.create_collection("Operating Systems", Some(cs)).unwrap();
        catalog
            .add_book(os, Book::new("The Linux Kernel", "Linus Torvalds et al."))
            .unwrap();
        catalog.create_collection("Poetry", None).unwrap();
        catalog
    }

    #[test]
    fn test_to_representation() {
        let expected = [
            r#"{"collections":["#,
            r#"{"name":"Computer Science","parent":null,"books":[]},"#,
            r#"{"name":"Operating Systems","parent":0,"books":[{"title":"The Linux Kernel","author":"Linus Torvalds et al."}]},"#,
            r#"{"name":"Poetry","parent":null,"books":[]}"#,
            r#"]}"#,
        ]
        .concat();
        assert_eq!(sample_catalog().to_representation(), expected);
    }

    #[test]
    fn test_round_trip_restores_parents() {
        let original = sample_catalog();
        let restored = Catalog::from_representation(&original.to_representation()).unwrap();

        assert_eq!(restored.len(), 3);
        assert_eq!(restored.to_representation(), original.to_representation());

        let found = restored.find_title("The Linux Kernel");
        let names: Vec<&str> = found[0]
            .containing_collections(&restored)
            .unwrap()
            .unwrap()
            .iter()
            .map(|collection| collection.name())
            .collect();
        assert_eq!(names, vec!["Operating Systems", "Computer Science"]);
    }

    #[test]
    fn test_books_and_parent_are_optional() {
        let catalog =
            Catalog::from_representation(r#"{"collections":[{"name":"Empty"}]}"#).unwrap();
        let roots = catalog.roots();
        assert_eq!(roots.len(), 1);
        let root = catalog.collection(roots[0]).unwrap();
        assert_eq!(root.name(), "Empty");
        assert!(root.is_empty());
        assert!(root.parent_collection().is_none());
    }

    #[test]
    fn test_deep_nesting_round_trips() {
        let mut catalog = Catalog::new();
        let mut parent = None;
        for depth in 0..200 {
            let name = format!("Level {}", depth);
            parent = Some(catalog.create_collection(name, parent).unwrap());
        }
        let deepest = parent.unwrap();
        catalog.add_book(deepest, Book::new("Bottom", "Nobody")).unwrap();

        let restored = Catalog::from_representation(&catalog.to_representation()).unwrap();
        assert_eq!(restored.len(), 200);
        assert_eq!(restored.to_representation(), catalog.to_representation());

        let found = restored.find_title("Bottom");
        let chain = found[0].containing_collections(&restored).unwrap().unwrap();
        assert_eq!(chain.len(), 200);
        assert_eq!(chain[0].name(), "Level 199");
        assert_eq!(chain[199].name(), "Level 0");
    }

    #[test]
    fn test_parent_must_be_listed_earlier() {
        let err = Catalog::from_representation(
            r#"{"collections":[{"name":"A","parent":1},{"name":"B"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Document(_)));

        let err = Catalog::from_representation(r#"{"collections":[{"name":"A","parent":0}]}"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Document(_)));
    }

    #[test]
    fn test_parent_must_be_an_index() {
        let err = Catalog::from_representation(
            r#"{"collections":[{"name":"A"},{"name":"B","parent":"A"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Document(_)));
    }

    #[test]
    fn test_missing_collections_array() {
        let err = Catalog::from_representation(r#"{"books":[]}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Document(_)));
    }

    #[test]
    fn test_missing_collection_name() {
        let err =
            Catalog::from_representation(r#"{"collections":[{"books":[]}]}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Document(_)));
    }

    #[test]
    fn test_books_must_be_array() {
        let err = Catalog::from_representation(r#"{"collections":[{"name":"A","books":{}}]}"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Document(_)));
    }

    #[test]
    fn test_invalid_book_in_document() {
        let err = Catalog::from_representation(
            r#"{"collections":[{"name":"A","books":[{"title":"T"}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Book(BookError::MissingField("author"))
        ));
    }

    #[test]
    fn test_malformed_document() {
        let err = Catalog::from_representation("{collections").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", Uuid::new_v4()));
        let original = sample_catalog();
        original.save(&path).unwrap();

        let loaded = Catalog::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded.to_representation(), original.to_representation());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", Uuid::new_v4()));
        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
