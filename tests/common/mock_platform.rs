//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use auto_update::error::{Error, Result};
use auto_update::platform::PlatformService;
use auto_update::types::{Comment, Commit, PullRequest, Repository};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `get_commit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCommitCall {
    pub repository: Repository,
    pub sha: String,
}

/// Call record for `list_issue_comments`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCommentsCall {
    pub pr_number: u64,
    pub since: DateTime<Utc>,
}

/// Call record for `create_issue_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentCall {
    pub pr_number: u64,
    pub body: String,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Stored comments per PR, filtered by `since` on the last update like the real API
/// - Call tracking for verification
/// - Configurable responses per PR / commit
/// - Error injection for failure path testing
pub struct MockPlatformService {
    repository: Repository,
    next_comment_id: AtomicU64,
    pulls: Mutex<Vec<PullRequest>>,
    pr_details: Mutex<HashMap<u64, PullRequest>>,
    commits: Mutex<HashMap<String, Commit>>,
    comments: Mutex<HashMap<u64, Vec<Comment>>>,
    // Call tracking
    list_pulls_calls: Mutex<Vec<String>>,
    get_pr_calls: Mutex<Vec<u64>>,
    get_commit_calls: Mutex<Vec<GetCommitCall>>,
    list_comments_calls: Mutex<Vec<ListCommentsCall>>,
    create_comment_calls: Mutex<Vec<CreateCommentCall>>,
    update_branch_calls: Mutex<Vec<u64>>,
    // Error injection
    error_on_list_pulls: Mutex<Option<String>>,
    error_on_get_pr: Mutex<Option<String>>,
    error_on_get_commit: Mutex<Option<String>>,
    error_on_list_comments: Mutex<Option<String>>,
    error_on_create_comment: Mutex<Option<String>>,
    error_on_update_branch: Mutex<HashMap<u64, String>>,
}

impl MockPlatformService {
    /// Create a new mock scoped to `repository`
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            next_comment_id: AtomicU64::new(1000),
            pulls: Mutex::new(Vec::new()),
            pr_details: Mutex::new(HashMap::new()),
            commits: Mutex::new(HashMap::new()),
            comments: Mutex::new(HashMap::new()),
            list_pulls_calls: Mutex::new(Vec::new()),
            get_pr_calls: Mutex::new(Vec::new()),
            get_commit_calls: Mutex::new(Vec::new()),
            list_comments_calls: Mutex::new(Vec::new()),
            create_comment_calls: Mutex::new(Vec::new()),
            update_branch_calls: Mutex::new(Vec::new()),
            error_on_list_pulls: Mutex::new(None),
            error_on_get_pr: Mutex::new(None),
            error_on_get_commit: Mutex::new(None),
            error_on_list_comments: Mutex::new(None),
            error_on_create_comment: Mutex::new(None),
            error_on_update_branch: Mutex::new(HashMap::new()),
        }
    }

    // === Error injection methods ===

    /// Make `list_open_pull_requests` return an error
    pub fn fail_list_pulls(&self, msg: &str) {
        *self.error_on_list_pulls.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_pull_request` return an error
    pub fn fail_get_pr(&self, msg: &str) {
        *self.error_on_get_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_commit` return an error
    pub fn fail_get_commit(&self, msg: &str) {
        *self.error_on_get_commit.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_issue_comments` return an error
    pub fn fail_list_comments(&self, msg: &str) {
        *self.error_on_list_comments.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_issue_comment` return an error
    pub fn fail_create_comment(&self, msg: &str) {
        *self.error_on_create_comment.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `update_branch` fail for a specific PR
    pub fn fail_update_branch(&self, pr_number: u64, msg: &str) {
        self.error_on_update_branch
            .lock()
            .unwrap()
            .insert(pr_number, msg.to_string());
    }

    // === Response setup ===

    /// Add an open PR to the listing (listing order = insertion order)
    pub fn add_pull(&self, pr: PullRequest) {
        self.pulls.lock().unwrap().push(pr);
    }

    /// Set the response for `get_pull_request`
    pub fn set_pr_details(&self, pr: PullRequest) {
        self.pr_details.lock().unwrap().insert(pr.number, pr);
    }

    /// Set the response for `get_commit` for a SHA
    pub fn set_commit(&self, commit: Commit) {
        self.commits
            .lock()
            .unwrap()
            .insert(commit.sha.clone(), commit);
    }

    /// Seed an existing comment on a PR
    pub fn add_comment(&self, pr_number: u64, body: &str, created_at: DateTime<Utc>) -> Comment {
        let id = self.next_comment_id.fetch_add(1, Ordering::SeqCst);
        let comment = Comment {
            id,
            body: body.to_string(),
            html_url: format!(
                "https://github.com/{}/pull/{pr_number}#issuecomment-{id}",
                self.repository
            ),
            created_at,
            updated_at: created_at,
        };
        self.comments
            .lock()
            .unwrap()
            .entry(pr_number)
            .or_default()
            .push(comment.clone());
        comment
    }

    /// Mark a stored comment as edited at `updated_at`
    pub fn edit_comment(&self, pr_number: u64, comment_id: u64, updated_at: DateTime<Utc>) {
        let mut comments = self.comments.lock().unwrap();
        let comment = comments
            .get_mut(&pr_number)
            .and_then(|list| list.iter_mut().find(|c| c.id == comment_id))
            .expect("edit_comment: no such comment");
        comment.updated_at = updated_at;
    }

    // === Call verification methods ===

    /// Get all bases `list_open_pull_requests` was called with
    pub fn get_list_pulls_calls(&self) -> Vec<String> {
        self.list_pulls_calls.lock().unwrap().clone()
    }

    /// Get all `get_pull_request` calls
    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    /// Get all `get_commit` calls
    pub fn get_commit_calls(&self) -> Vec<GetCommitCall> {
        self.get_commit_calls.lock().unwrap().clone()
    }

    /// Get all `list_issue_comments` calls
    pub fn get_list_comments_calls(&self) -> Vec<ListCommentsCall> {
        self.list_comments_calls.lock().unwrap().clone()
    }

    /// Get all `create_issue_comment` calls
    pub fn get_create_comment_calls(&self) -> Vec<CreateCommentCall> {
        self.create_comment_calls.lock().unwrap().clone()
    }

    /// Get all PR numbers `update_branch` was called for, in call order
    pub fn get_update_branch_calls(&self) -> Vec<u64> {
        self.update_branch_calls.lock().unwrap().clone()
    }

    /// All comments currently stored on a PR
    pub fn comments_on(&self, pr_number: u64) -> Vec<Comment> {
        self.comments
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default()
    }

    /// Assert that `update_branch` was called for a specific PR
    pub fn assert_update_called(&self, pr_number: u64) {
        let calls = self.get_update_branch_calls();
        assert!(
            calls.contains(&pr_number),
            "Expected update_branch({pr_number}) but got: {calls:?}"
        );
    }

    /// Assert that `update_branch` was NOT called for a specific PR
    pub fn assert_update_not_called(&self, pr_number: u64) {
        let calls = self.get_update_branch_calls();
        assert!(
            !calls.contains(&pr_number),
            "Expected update_branch({pr_number}) NOT to be called but it was: {calls:?}"
        );
    }

    /// Get count of `create_issue_comment` calls
    pub fn comment_call_count(&self) -> usize {
        self.create_comment_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_pull_requests(&self, base: &str) -> Result<Vec<PullRequest>> {
        self.list_pulls_calls.lock().unwrap().push(base.to_string());

        // Check for injected error
        if let Some(msg) = self.error_on_list_pulls.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let pulls = self.pulls.lock().unwrap();
        Ok(pulls.iter().filter(|pr| pr.base_ref == base).cloned().collect())
    }

    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest> {
        self.get_pr_calls.lock().unwrap().push(pr_number);

        if let Some(msg) = self.error_on_get_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let details = self.pr_details.lock().unwrap();
        details.get(&pr_number).cloned().ok_or_else(|| {
            Error::Platform(format!(
                "get_pull_request: no response configured for PR #{pr_number}"
            ))
        })
    }

    async fn get_commit(&self, repository: &Repository, sha: &str) -> Result<Commit> {
        self.get_commit_calls.lock().unwrap().push(GetCommitCall {
            repository: repository.clone(),
            sha: sha.to_string(),
        });

        if let Some(msg) = self.error_on_get_commit.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let commits = self.commits.lock().unwrap();
        commits.get(sha).cloned().ok_or_else(|| {
            Error::Platform(format!("get_commit: no response configured for {sha}"))
        })
    }

    async fn list_issue_comments(
        &self,
        pr_number: u64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Comment>> {
        self.list_comments_calls
            .lock()
            .unwrap()
            .push(ListCommentsCall { pr_number, since });

        if let Some(msg) = self.error_on_list_comments.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self
            .comments_on(pr_number)
            .into_iter()
            .filter(|c| c.updated_at >= since)
            .collect())
    }

    async fn create_issue_comment(&self, pr_number: u64, body: &str) -> Result<Comment> {
        self.create_comment_calls
            .lock()
            .unwrap()
            .push(CreateCommentCall {
                pr_number,
                body: body.to_string(),
            });

        if let Some(msg) = self.error_on_create_comment.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self.add_comment(pr_number, body, Utc::now()))
    }

    async fn update_branch(&self, pr_number: u64) -> Result<()> {
        self.update_branch_calls.lock().unwrap().push(pr_number);

        if let Some(msg) = self.error_on_update_branch.lock().unwrap().get(&pr_number) {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(())
    }

    fn repository(&self) -> &Repository {
        &self.repository
    }
}
