//! Threaded comment collaborator.
//!
//! The debate and reply flows only see the [`CommentService`] trait.
//! [`LocalCommentService`] keeps threads in memory and can mirror every
//! created comment to a JSON Lines file for local runs.

use crate::run::create_run_id;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Identity the service assigned to a new comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedComment {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait CommentService: Send + Sync {
    /// Create a comment, threaded under `parent_id` when given.
    async fn create(
        &self,
        post_id: &str,
        author_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> Result<CreatedComment>;

    /// Up to `limit` comments on a post, oldest first.
    async fn list(&self, post_id: &str, limit: usize) -> Result<Vec<Comment>>;
}

#[derive(Debug, Default)]
pub struct LocalCommentService {
    comments: RwLock<Vec<Comment>>,
    log_path: Option<PathBuf>,
}

impl LocalCommentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also append each created comment to `path` as one JSON line.
    pub fn with_log(path: impl Into<PathBuf>) -> Self {
        Self {
            comments: RwLock::new(Vec::new()),
            log_path: Some(path.into()),
        }
    }

    /// Insert an existing comment, e.g. one left by a human reader.
    pub fn seed(&self, comment: Comment) {
        self.comments.write().push(comment);
    }

    pub fn all(&self) -> Vec<Comment> {
        self.comments.read().clone()
    }

    async fn append_log(&self, comment: &Comment) -> Result<()> {
        let Some(path) = &self.log_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Comments(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let mut line = serde_json::to_string(comment)?;
        line.push('\n');
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| AppError::Comments(format!("Failed to open {}: {}", path.display(), e)))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| AppError::Comments(format!("Failed to write {}: {}", path.display(), e)))
    }
}

#[async_trait]
impl CommentService for LocalCommentService {
    async fn create(
        &self,
        post_id: &str,
        author_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> Result<CreatedComment> {
        if let Some(parent) = parent_id {
            let known = self
                .comments
                .read()
                .iter()
                .any(|c| c.id == parent && c.post_id == post_id);
            if !known {
                return Err(AppError::Comments(format!(
                    "Parent comment {} not found on post {}",
                    parent, post_id
                )));
            }
        }

        let comment = Comment {
            id: create_run_id("comment"),
            post_id: post_id.to_string(),
            author_id: author_id.to_string(),
            content: content.to_string(),
            parent_id: parent_id.map(str::to_string),
            created_at: Utc::now(),
        };
        self.append_log(&comment).await?;

        let created = CreatedComment {
            id: comment.id.clone(),
            created_at: comment.created_at,
        };
        self.comments.write().push(comment);
        Ok(created)
    }

    async fn list(&self, post_id: &str, limit: usize) -> Result<Vec<Comment>> {
        Ok(self
            .comments
            .read()
            .iter()
            .filter(|c| c.post_id == post_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
