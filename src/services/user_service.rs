// ==================== USERS DATA ACCESS ====================
// Uma única coleção `users` sem schema: cada operação é uma chamada ao MongoDB

use crate::{
    database::MongoDB,
    models::{fields_to_bson, parse_user_id, strip_id, UserDocument, UserFields},
    utils::AppError,
};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::ReturnDocument,
    Collection,
};

pub const USERS_COLLECTION: &str = "users";

/// Store primitives behind the HTTP handlers.
///
/// `Ok(None)` means no document has the given id; any `Err` is a store failure.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, fields: UserFields) -> Result<UserDocument, AppError>;

    async fn find_all(&self) -> Result<Vec<UserDocument>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<UserDocument>, AppError>;

    /// Merges `fields` into the document and returns it after the update.
    async fn update_by_id(
        &self,
        id: &str,
        fields: UserFields,
    ) -> Result<Option<UserDocument>, AppError>;

    async fn delete_by_id(&self, id: &str) -> Result<Option<UserDocument>, AppError>;
}

pub struct MongoUserStore {
    collection: Collection<Document>,
}

impl MongoUserStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            collection: db.collection::<Document>(USERS_COLLECTION),
        }
    }
}

/// Builds the update for `find_one_and_update`.
///
/// `$`-prefixed keys are passed through as update operators; plain fields are
/// merged into `$set`. Returns `None` when there is nothing to apply.
fn update_document(changes: Document) -> Option<Document> {
    let mut update = Document::new();
    let mut set = Document::new();

    for (key, value) in changes {
        if key.starts_with('$') {
            update.insert(key, value);
        } else {
            set.insert(key, value);
        }
    }

    if !set.is_empty() {
        match update.get_mut("$set") {
            Some(Bson::Document(existing)) => existing.extend(set),
            _ => {
                update.insert("$set", set);
            }
        }
    }

    (!update.is_empty()).then_some(update)
}

fn with_inserted_id(mut document: Document, inserted_id: Bson) -> UserDocument {
    document.insert("_id", inserted_id);
    UserDocument::from_bson(document)
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn create(&self, fields: UserFields) -> Result<UserDocument, AppError> {
        let document = fields_to_bson(strip_id(fields))?;

        let result = self.collection.insert_one(&document).await?;

        Ok(with_inserted_id(document, result.inserted_id))
    }

    async fn find_all(&self) -> Result<Vec<UserDocument>, AppError> {
        let mut cursor = self.collection.find(doc! {}).await?;

        let mut users = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            users.push(UserDocument::from_bson(document));
        }

        Ok(users)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserDocument>, AppError> {
        let object_id = parse_user_id(id)?;

        let found = self.collection.find_one(doc! { "_id": object_id }).await?;

        Ok(found.map(UserDocument::from_bson))
    }

    async fn update_by_id(
        &self,
        id: &str,
        fields: UserFields,
    ) -> Result<Option<UserDocument>, AppError> {
        let object_id = parse_user_id(id)?;
        let changes = fields_to_bson(strip_id(fields))?;

        // MongoDB rejects an empty update, nothing to change means a plain read
        let Some(update) = update_document(changes) else {
            let found = self.collection.find_one(doc! { "_id": object_id }).await?;
            return Ok(found.map(UserDocument::from_bson));
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": object_id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated.map(UserDocument::from_bson))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<UserDocument>, AppError> {
        let object_id = parse_user_id(id)?;

        let deleted = self
            .collection
            .find_one_and_delete(doc! { "_id": object_id })
            .await?;

        Ok(deleted.map(UserDocument::from_bson))
    }
}

#[cfg(test)]
pub mod memory {
    //! In-process `UserStore` used by the handler tests.

    use super::*;
    use mongodb::bson::oid::ObjectId;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryUserStore {
        users: RwLock<Vec<UserDocument>>,
    }

    #[async_trait]
    impl UserStore for InMemoryUserStore {
        async fn create(&self, fields: UserFields) -> Result<UserDocument, AppError> {
            let user = UserDocument {
                id: ObjectId::new().to_hex(),
                fields: strip_id(fields),
            };
            self.users.write().await.push(user.clone());
            Ok(user)
        }

        async fn find_all(&self) -> Result<Vec<UserDocument>, AppError> {
            Ok(self.users.read().await.clone())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<UserDocument>, AppError> {
            parse_user_id(id)?;
            Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
        }

        async fn update_by_id(
            &self,
            id: &str,
            fields: UserFields,
        ) -> Result<Option<UserDocument>, AppError> {
            parse_user_id(id)?;
            let mut users = self.users.write().await;
            Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
                user.fields.extend(strip_id(fields));
                user.clone()
            }))
        }

        async fn delete_by_id(&self, id: &str) -> Result<Option<UserDocument>, AppError> {
            parse_user_id(id)?;
            let mut users = self.users.write().await;
            let position = users.iter().position(|u| u.id == id);
            Ok(position.map(|idx| users.remove(idx)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn test_update_document_wraps_fields_in_set() {
        let update = update_document(doc! { "name": "X", "age": 3 }).unwrap();
        assert_eq!(update, doc! { "$set": { "name": "X", "age": 3 } });
    }

    #[test]
    fn test_update_document_keeps_operators() {
        let update = update_document(doc! {
            "$unset": { "email": "" },
            "$set": { "a": 1 },
            "b": 2
        })
        .unwrap();

        assert_eq!(
            update,
            doc! { "$unset": { "email": "" }, "$set": { "a": 1, "b": 2 } }
        );
    }

    #[test]
    fn test_empty_update_is_none() {
        assert!(update_document(Document::new()).is_none());
    }

    #[test]
    fn test_inserted_id_is_written_back() {
        let oid = ObjectId::new();
        let user = with_inserted_id(doc! { "a": 1 }, Bson::ObjectId(oid));

        assert_eq!(user.id, oid.to_hex());
        assert_eq!(user.fields.get("a"), Some(&json!(1)));
    }

    fn fields(value: serde_json::Value) -> UserFields {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongo_store_lifecycle() {
        let db = MongoDB::new(crate::config::DATABASE_URL)
            .await
            .expect("MongoDB must be running");
        let store = MongoUserStore::new(&db);

        let created = store
            .create(fields(json!({ "a": 1, "_id": "ignored" })))
            .await
            .unwrap();
        assert_ne!(created.id, "ignored");

        let updated = store
            .update_by_id(&created.id, fields(json!({ "b": 2 })))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.fields.get("a"), Some(&json!(1)));
        assert_eq!(updated.fields.get("b"), Some(&json!(2)));

        let unchanged = store
            .update_by_id(&created.id, UserFields::new())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged, updated);

        assert!(store.delete_by_id(&created.id).await.unwrap().is_some());
        assert!(store.find_by_id(&created.id).await.unwrap().is_none());
        assert!(matches!(
            store.find_by_id("bogus").await,
            Err(AppError::InvalidId(_))
        ));
    }
}
