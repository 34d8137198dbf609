//! Board feed and submission endpoints.

use axum::{
    Router,
    extract::{Multipart, Path, State},
    routing::get,
};
use corkboard_common::{AppError, AppResult};
use corkboard_core::{CreatePostInput, UploadedImage};
use corkboard_db::entities::post;
use serde::Serialize;

use crate::{middleware::AppState, response::ApiResponse};

/// Post response.
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub name: String,
    pub batch: i32,
    pub message: String,
    pub image_url: Option<String>,
    pub facebook_url: String,
    pub is_pinned: bool,
    pub created_at: String,
}

impl From<post::Model> for PostResponse {
    fn from(post: post::Model) -> Self {
        Self {
            id: post.id,
            name: post.name,
            batch: post.batch,
            message: post.message,
            image_url: post.image_url,
            facebook_url: post.facebook_url,
            is_pinned: post.is_pinned,
            created_at: post.created_at.to_rfc3339(),
        }
    }
}

/// Get the board feed: pinned posts first, then newest first.
async fn list_posts(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state.post_service.list().await?;
    Ok(ApiResponse::ok(
        posts.into_iter().map(PostResponse::from).collect(),
    ))
}

/// Get a single post.
async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.get(&id).await?;
    Ok(ApiResponse::ok(post.into()))
}

/// Submit a new post via multipart form.
async fn create_post(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<PostResponse>> {
    let mut name: Option<String> = None;
    let mut batch: Option<i32> = None;
    let mut message: Option<String> = None;
    let mut facebook_url: Option<String> = None;
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "batch" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                batch = Some(
                    text.trim()
                        .parse()
                        .map_err(|_| AppError::BadRequest("Invalid batch".to_string()))?,
                );
            }
            "message" => {
                message = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "facebookUrl" => {
                facebook_url = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "image" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec();
                if !data.is_empty() {
                    image = Some(UploadedImage {
                        file_name,
                        content_type,
                        data,
                    });
                }
            }
            _ => {}
        }
    }

    let input = CreatePostInput {
        name: name.ok_or_else(|| AppError::BadRequest("Name is required".to_string()))?,
        batch: batch.ok_or_else(|| AppError::BadRequest("Batch is required".to_string()))?,
        message: message.ok_or_else(|| AppError::BadRequest("Message is required".to_string()))?,
        facebook_url: facebook_url
            .ok_or_else(|| AppError::BadRequest("Facebook URL is required".to_string()))?,
    };

    let post = state.post_service.create(input, image).await?;
    Ok(ApiResponse::ok(post.into()))
}

/// Create the posts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{id}", get(get_post))
}
