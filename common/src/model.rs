use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// An organization document with embedded members and comments.
///
/// Every field except `_id` is default-tolerant: the comment-mutation
/// routes upsert bare documents that carry only the pushed field, and
/// those documents must still deserialize when listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(rename = "isDeleted", default)]
    pub is_deleted: bool,
}

/// A member embedded in an organization document.
///
/// Members have no identity of their own; they are created and destroyed
/// only as part of writing the parent document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub followers: i64,
    #[serde(default)]
    pub following: i64,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub active: bool,
}
