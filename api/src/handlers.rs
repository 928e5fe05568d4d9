use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::model::Organization;
use common::repositories::{CommentsProjection, RankedMembers};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub comments: String,
}

pub async fn list_organizations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Organization>>, ApiError> {
    Ok(Json(state.orgs.list_all().await?))
}

pub async fn get_organization(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Organization>>, ApiError> {
    let orgs = state.orgs.find_by_name(&name).await?;
    if orgs.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(orgs))
}

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<RankedMembers>>, ApiError> {
    // Empty when nothing matches; the member listing never 404s.
    Ok(Json(state.orgs.members_by_followers(&name).await?))
}

pub async fn get_comments(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<CommentsProjection>>, ApiError> {
    // Soft-deleted and unknown organizations both read as empty.
    Ok(Json(state.orgs.visible_comments(&name).await?))
}

pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(body): Json<AddCommentRequest>,
) -> Result<&'static str, ApiError> {
    state.orgs.append_comment(&name, &body.comments).await?;
    Ok("Comments added!")
}

pub async fn delete_comments(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<&'static str, ApiError> {
    state.orgs.soft_delete(&name).await?;
    Ok("Comments deleted!")
}

pub async fn add_organization(
    State(state): State<Arc<AppState>>,
    Json(org): Json<Organization>,
) -> Response {
    match state.orgs.insert(org).await {
        Ok(()) => Json(serde_json::json!({ "Organization": "Successfully added" })).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to add organization");
            (StatusCode::BAD_REQUEST, "Adding new organization failed").into_response()
        }
    }
}
