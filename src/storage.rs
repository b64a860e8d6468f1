use anyhow::Context;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Client, Collection};

use crate::config::AppConfig;
use crate::users::{NewUser, UserPatch, UserRecord};

/// Document-store contract the session runs against. Updates and deletes
/// report how many documents they touched so concurrent modification by
/// another session surfaces as a zero count instead of an error.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<UserRecord>>;
    async fn insert(&self, user: NewUser) -> anyhow::Result<ObjectId>;
    async fn update(&self, id: ObjectId, patch: UserPatch) -> anyhow::Result<u64>;
    async fn delete(&self, id: ObjectId) -> anyhow::Result<u64>;
    async fn count(&self) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    pub fn new(client: &Client, config: &AppConfig) -> Self {
        Self {
            collection: client
                .database(&config.db_name)
                .collection(&config.collection_name),
        }
    }
}

#[async_trait]
impl UserStore for MongoStore {
    async fn list(&self) -> anyhow::Result<Vec<UserRecord>> {
        let documents: Vec<Document> = self
            .collection
            .find(doc! {})
            .await
            .context("find users")?
            .try_collect()
            .await
            .context("read user cursor")?;
        documents
            .into_iter()
            .map(UserRecord::from_document)
            .collect()
    }

    async fn insert(&self, user: NewUser) -> anyhow::Result<ObjectId> {
        let result = self
            .collection
            .insert_one(user.into_document())
            .await
            .context("insert user")?;
        result
            .inserted_id
            .as_object_id()
            .context("inserted id is not an ObjectId")
    }

    async fn update(&self, id: ObjectId, patch: UserPatch) -> anyhow::Result<u64> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": patch.into_set_document() })
            .await
            .context("update user")?;
        Ok(result.modified_count)
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<u64> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .context("delete user")?;
        Ok(result.deleted_count)
    }

    async fn count(&self) -> anyhow::Result<u64> {
        self.collection
            .count_documents(doc! {})
            .await
            .context("count users")
    }
}
