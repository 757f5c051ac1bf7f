//! Mock implementations for testing.
//!
//! This module provides mock collaborators (LLM client, comment service,
//! research collector, dossier store) that can be used across different test
//! files without duplication.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use symposium::agents::AgentProfile;
use symposium::comments::{Comment, CommentService, CreatedComment};
use symposium::llm::LLMClient;
use symposium::research::{
    ArtifactFiles, CollectOptions, DossierStore, RawResearchResult, ResearchCollector,
    ValidatedDossier,
};
use symposium::types::{AppError, Result};

/// Mock LLM client for testing with scripted responses.
///
/// Each call pops the next scripted reply. When the script is exhausted the
/// fallback reply is returned, or an error if there is none. Every prompt is
/// recorded for later inspection.
///
/// # Examples
///
/// ```ignore
/// // Always returns the same text
/// let client = MockLLMClient::new("{\"text\": \"hello\"}");
///
/// // Returns replies in order
/// let client = MockLLMClient::scripted(vec![Ok(first), Err(AppError::LLM("down".into()))]);
///
/// // Always fails
/// let client = MockLLMClient::failing();
/// ```
pub struct MockLLMClient {
    script: Mutex<VecDeque<Result<String>>>,
    fallback: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockLLMClient {
    /// Create a mock client that always returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(response.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock client that replays `replies` in order, then fails.
    pub fn scripted(replies: Vec<Result<String>>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            fallback: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self::scripted(vec![])
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        if let Some(next) = self.script.lock().pop_front() {
            return next;
        }
        self.fallback
            .clone()
            .ok_or_else(|| AppError::LLM("Mock LLM failure".to_string()))
    }

    async fn generate_with_system(&self, _system: &str, prompt: &str) -> Result<String> {
        self.generate(prompt).await
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// A `create` call as the mock saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedCall {
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub parent_id: Option<String>,
}

/// Recording comment service.
///
/// Assigns ids `c1, c2, ...`. Can be told to fail starting at a given
/// 1-based `create` call.
#[derive(Default)]
pub struct MockCommentService {
    created: Mutex<Vec<CreatedCall>>,
    listed: Mutex<Vec<Comment>>,
    fail_from_call: Option<usize>,
}

impl MockCommentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `create` from the `n`th call on.
    pub fn failing_from(n: usize) -> Self {
        Self {
            fail_from_call: Some(n),
            ..Self::default()
        }
    }

    /// Comments returned by `list`.
    pub fn with_listed(comments: Vec<Comment>) -> Self {
        Self {
            listed: Mutex::new(comments),
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<CreatedCall> {
        self.created.lock().clone()
    }
}

#[async_trait]
impl CommentService for MockCommentService {
    async fn create(
        &self,
        post_id: &str,
        author_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> Result<CreatedComment> {
        let mut created = self.created.lock();
        let call = created.len() + 1;
        if self.fail_from_call.is_some_and(|n| call >= n) {
            return Err(AppError::Comments("Mock comment service failure".to_string()));
        }
        created.push(CreatedCall {
            post_id: post_id.to_string(),
            author_id: author_id.to_string(),
            content: content.to_string(),
            parent_id: parent_id.map(str::to_string),
        });
        Ok(CreatedComment {
            id: format!("c{}", call),
            created_at: Utc::now(),
        })
    }

    async fn list(&self, post_id: &str, limit: usize) -> Result<Vec<Comment>> {
        Ok(self
            .listed
            .lock()
            .iter()
            .filter(|c| c.post_id == post_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Research collector replaying scripted results; the last one repeats.
pub struct MockResearchCollector {
    script: Mutex<VecDeque<Result<RawResearchResult>>>,
    last: Mutex<Option<RawResearchResult>>,
    calls: AtomicUsize,
}

impl MockResearchCollector {
    pub fn new(result: RawResearchResult) -> Self {
        Self::scripted(vec![Ok(result)])
    }

    pub fn scripted(results: Vec<Result<RawResearchResult>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResearchCollector for MockResearchCollector {
    async fn collect(
        &self,
        _agent: &AgentProfile,
        _options: &CollectOptions,
    ) -> Result<RawResearchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop_front();
        match next {
            Some(Ok(raw)) => {
                *self.last.lock() = Some(raw.clone());
                Ok(raw)
            }
            Some(Err(e)) => Err(e),
            None => self
                .last
                .lock()
                .clone()
                .ok_or_else(|| AppError::LLM("Mock collector exhausted".to_string())),
        }
    }
}

/// In-memory dossier store keyed by a synthetic path.
#[derive(Default)]
pub struct MockDossierStore {
    dossiers: Mutex<HashMap<PathBuf, ValidatedDossier>>,
    fail_persist: bool,
}

impl MockDossierStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_persist: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.dossiers.lock().len()
    }
}

#[async_trait]
impl DossierStore for MockDossierStore {
    async fn persist(&self, dossier: &ValidatedDossier) -> Result<ArtifactFiles> {
        if self.fail_persist {
            return Err(AppError::Storage("Mock store failure".to_string()));
        }
        let dossier_path = format!("mem/{}.json", dossier.id);
        self.dossiers
            .lock()
            .insert(PathBuf::from(&dossier_path), dossier.clone());
        Ok(ArtifactFiles {
            dossier_path,
            summary_path: format!("mem/{}.md", dossier.id),
        })
    }

    async fn read(&self, path: &Path) -> Result<Option<ValidatedDossier>> {
        Ok(self.dossiers.lock().get(path).cloned())
    }
}
