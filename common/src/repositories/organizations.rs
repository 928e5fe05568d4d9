use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::{Member, Organization};

pub const COLLECTION_NAME: &str = "organizations";

/// The `{comments, isDeleted}` projection returned by the comments read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsProjection {
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(rename = "isDeleted", default)]
    pub is_deleted: bool,
}

/// One organization with its members re-ordered by follower count,
/// as produced by the `$group` stage of the ranking pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMembers {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Every organization document, unfiltered.
    async fn list_all(&self) -> Result<Vec<Organization>, StoreError>;

    /// Case-insensitive exact-name match. Names are not unique, so the
    /// result is a set, not a single record.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Organization>, StoreError>;

    /// Members of the named organization sorted by followers descending,
    /// regrouped per matching document. The name match here is
    /// case-SENSITIVE, unlike every other lookup; the mismatch is
    /// inherited behavior and deliberately kept.
    async fn members_by_followers(&self, name: &str) -> Result<Vec<RankedMembers>, StoreError>;

    /// Comments of the named organization, only while it is not
    /// soft-deleted. Missing or soft-deleted organizations yield an
    /// empty result, never an error.
    async fn visible_comments(&self, name: &str) -> Result<Vec<CommentsProjection>, StoreError>;

    /// Appends a comment to the first case-insensitive name match.
    /// On no match a new bare document holding only that comment is
    /// upserted.
    async fn append_comment(&self, name: &str, comment: &str) -> Result<(), StoreError>;

    /// Marks the first case-insensitive name match as deleted, with the
    /// same upsert-on-miss semantics as [`append_comment`].
    ///
    /// [`append_comment`]: OrganizationRepository::append_comment
    async fn soft_delete(&self, name: &str) -> Result<(), StoreError>;

    /// Persists a caller-supplied full document. No duplicate-name check.
    async fn insert(&self, org: Organization) -> Result<(), StoreError>;
}

pub struct OrganizationRepositoryImpl {
    collection: Collection<Organization>,
}

impl OrganizationRepositoryImpl {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }
}

/// Anchored, case-insensitive exact match on `name`. The input is
/// regex-escaped so names containing metacharacters match literally.
fn name_filter(name: &str) -> Document {
    doc! {
        "name": {
            "$regex": format!("^{}$", regex::escape(name)),
            "$options": "i",
        }
    }
}

/// unwind -> match -> sort -> group. Stage order matters: matching after
/// the unwind keeps parity with the original pipeline, and the `$match`
/// uses the raw name (case-sensitive).
fn ranking_pipeline(name: &str) -> Vec<Document> {
    vec![
        doc! { "$unwind": "$members" },
        doc! { "$match": { "name": name } },
        doc! { "$sort": { "members.followers": -1 } },
        doc! { "$group": {
            "_id": "$_id",
            "members": { "$push": "$members" },
        } },
    ]
}

#[async_trait]
impl OrganizationRepository for OrganizationRepositoryImpl {
    async fn list_all(&self) -> Result<Vec<Organization>, StoreError> {
        let orgs = self.collection.find(doc! {}).await?.try_collect().await?;
        Ok(orgs)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Organization>, StoreError> {
        let orgs = self
            .collection
            .find(name_filter(name))
            .await?
            .try_collect()
            .await?;
        Ok(orgs)
    }

    async fn members_by_followers(&self, name: &str) -> Result<Vec<RankedMembers>, StoreError> {
        let ranked = self
            .collection
            .aggregate(ranking_pipeline(name))
            .with_type::<RankedMembers>()
            .await?
            .try_collect()
            .await?;
        Ok(ranked)
    }

    async fn visible_comments(&self, name: &str) -> Result<Vec<CommentsProjection>, StoreError> {
        let filter = doc! {
            "$and": [
                name_filter(name),
                { "isDeleted": false },
            ]
        };
        let projected = self
            .collection
            .clone_with_type::<CommentsProjection>()
            .find(filter)
            .projection(doc! { "_id": 0, "comments": 1, "isDeleted": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(projected)
    }

    async fn append_comment(&self, name: &str, comment: &str) -> Result<(), StoreError> {
        self.collection
            .find_one_and_update(
                name_filter(name),
                doc! { "$push": { "comments": comment } },
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn soft_delete(&self, name: &str) -> Result<(), StoreError> {
        self.collection
            .find_one_and_update(name_filter(name), doc! { "$set": { "isDeleted": true } })
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn insert(&self, org: Organization) -> Result<(), StoreError> {
        self.collection.insert_one(org).await?;
        Ok(())
    }
}
