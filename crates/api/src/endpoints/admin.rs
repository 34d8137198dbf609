//! Admin dashboard endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::{delete, get, post},
};
use corkboard_common::{AppError, AppResult};
use corkboard_core::BoardAnalytics;
use corkboard_db::entities::system_log::{self, LogLevel};
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::posts::PostResponse,
    extractors::AdminUser,
    middleware::AppState,
    response::ApiResponse,
};

const DEFAULT_LOG_LIMIT: u64 = 100;
const EXPORT_LOG_LIMIT: u64 = 1000;

/// List all posts newest first for the moderation table.
async fn list_posts(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state.post_service.list_recent().await?;
    Ok(ApiResponse::ok(
        posts.into_iter().map(PostResponse::from).collect(),
    ))
}

/// Pin a post.
async fn pin_post(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.moderation_service.set_pinned(&id, true).await?;
    Ok(ApiResponse::ok(post.into()))
}

/// Unpin a post.
async fn unpin_post(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.moderation_service.set_pinned(&id, false).await?;
    Ok(ApiResponse::ok(post.into()))
}

/// Deletion response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub ok: bool,
}

/// Delete a post.
async fn delete_post(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<DeleteResponse>> {
    state.moderation_service.delete(&id).await?;
    Ok(ApiResponse::ok(DeleteResponse { ok: true }))
}

/// Log listing query.
#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub level: Option<String>,
    pub limit: Option<u64>,
}

/// Log entry response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntryResponse {
    pub id: String,
    pub level: String,
    pub message: String,
    pub metadata: serde_json::Value,
    pub created_at: String,
}

impl From<system_log::Model> for LogEntryResponse {
    fn from(entry: system_log::Model) -> Self {
        Self {
            id: entry.id,
            level: entry.level.as_str().to_string(),
            message: entry.message,
            metadata: entry.metadata,
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

fn parse_level(level: &str) -> AppResult<LogLevel> {
    match level {
        "info" => Ok(LogLevel::Info),
        "warn" => Ok(LogLevel::Warn),
        "error" => Ok(LogLevel::Error),
        other => Err(AppError::BadRequest(format!("Unknown log level: {other}"))),
    }
}

/// List audit log entries, newest first.
async fn list_logs(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> AppResult<ApiResponse<Vec<LogEntryResponse>>> {
    let level = query.level.as_deref().map(parse_level).transpose()?;
    let limit = query.limit.unwrap_or(DEFAULT_LOG_LIMIT).min(EXPORT_LOG_LIMIT);

    let entries = state.audit.recent(level, limit).await?;
    Ok(ApiResponse::ok(
        entries.into_iter().map(LogEntryResponse::from).collect(),
    ))
}

fn csv_escape(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Export audit log entries as CSV.
async fn export_logs(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let entries = state.audit.recent(None, EXPORT_LOG_LIMIT).await?;

    let mut csv = String::from("id,level,message,metadata,created_at\n");
    for entry in entries {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            csv_escape(&entry.id),
            entry.level.as_str(),
            csv_escape(&entry.message),
            csv_escape(&entry.metadata.to_string()),
            entry.created_at.to_rfc3339(),
        ));
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"system-logs.csv\"",
            ),
        ],
        csv,
    ))
}

/// Get the dashboard analytics summary.
async fn analytics(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<BoardAnalytics>> {
    let summary = state.analytics_service.summary().await?;
    Ok(ApiResponse::ok(summary))
}

/// Create the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{id}/pin", post(pin_post))
        .route("/posts/{id}/unpin", post(unpin_post))
        .route("/posts/{id}", delete(delete_post))
        .route("/logs", get(list_logs))
        .route("/logs/export", get(export_logs))
        .route("/analytics", get(analytics))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_escape_plain() {
        assert_eq!(csv_escape("hello"), "hello");
    }

    #[test]
    fn test_csv_escape_comma() {
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
    }

    #[test]
    fn test_csv_escape_quotes() {
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_parse_level() {
        assert!(parse_level("info").is_ok());
        assert!(parse_level("warn").is_ok());
        assert!(parse_level("error").is_ok());
        assert!(parse_level("debug").is_err());
    }
}
