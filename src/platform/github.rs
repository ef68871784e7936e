//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{Comment, Commit, Committer, PullRequest, Repository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::debug;

/// Largest page size the REST API accepts
const PER_PAGE: u8 = 100;

// REST payloads for the endpoints octocrab has no typed handler for

#[derive(Deserialize)]
struct CommitPayload {
    sha: String,
    commit: GitCommitPayload,
}

#[derive(Deserialize)]
struct GitCommitPayload {
    #[serde(default)]
    committer: Option<GitActorPayload>,
}

#[derive(Deserialize)]
struct GitActorPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct UpdateBranchPayload {
    #[serde(default)]
    message: Option<String>,
}

impl From<CommitPayload> for Commit {
    fn from(payload: CommitPayload) -> Self {
        // Without a date the committer is useless as a watermark
        let committer = payload.commit.committer.and_then(|actor| {
            actor.date.map(|date| Committer {
                name: actor.name.unwrap_or_default(),
                email: actor.email.unwrap_or_default(),
                date,
            })
        });

        Self {
            sha: payload.sha,
            committer,
        }
    }
}

/// Helper to convert an octocrab repository to our `Repository` type
fn repository_from_octocrab(repo: &octocrab::models::Repository) -> Option<Repository> {
    match repo.full_name.as_deref() {
        Some(full_name) => Repository::parse(full_name).ok(),
        None => repo
            .owner
            .as_ref()
            .map(|owner| Repository::new(owner.login.clone(), repo.name.clone())),
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    // A deleted fork leaves `head.repo` null
    let head_repository = pr.head.repo.as_ref().and_then(repository_from_octocrab);

    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        base_sha: pr.base.sha.clone(),
        head_ref: pr.head.ref_field.clone(),
        head_sha: pr.head.sha.clone(),
        head_repository,
        labels: pr
            .labels
            .iter()
            .flatten()
            .map(|label| label.name.clone())
            .collect(),
        is_draft: pr.draft.unwrap_or(false),
        auto_merge_enabled: pr.auto_merge.is_some(),
        mergeable: pr.mergeable,
    }
}

/// Helper to convert octocrab issue comment to our `Comment` type
fn comment_from_octocrab(c: octocrab::models::issues::Comment) -> Comment {
    Comment {
        id: c.id.0,
        body: c.body.unwrap_or_default(),
        html_url: c.html_url.to_string(),
        created_at: c.created_at,
        updated_at: c.updated_at.unwrap_or(c.created_at),
    }
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    repository: Repository,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_url` overrides the API root, e.g. `https://ghe.example.com/api/v3`
    /// for GitHub Enterprise Server.
    pub fn new(token: &str, repository: Repository, api_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(url) = api_url {
            builder = builder
                .base_uri(url.trim_end_matches('/'))
                .map_err(|e| Error::GitHubApi(format!("invalid API URL {url}: {e}")))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self { client, repository })
    }

    fn repo_route(&self, path: &str) -> String {
        format!(
            "/repos/{}/{}{path}",
            self.repository.owner, self.repository.name
        )
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_open_pull_requests(&self, base: &str) -> Result<Vec<PullRequest>> {
        debug!(base, "listing open PRs");
        let first = self
            .client
            .pulls(&self.repository.owner, &self.repository.name)
            .list()
            .base(base)
            .state(octocrab::params::State::Open)
            .per_page(PER_PAGE)
            .send()
            .await?;
        let pulls = self.client.all_pages(first).await?;

        let result: Vec<PullRequest> = pulls.iter().map(pr_from_octocrab).collect();
        debug!(base, count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest> {
        debug!(pr_number, "getting PR");
        let pr = self
            .client
            .pulls(&self.repository.owner, &self.repository.name)
            .get(pr_number)
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number, mergeable = ?result.mergeable, "got PR");
        Ok(result)
    }

    async fn get_commit(&self, repository: &Repository, sha: &str) -> Result<Commit> {
        debug!(%repository, sha, "getting commit");
        let route = format!(
            "/repos/{}/{}/commits/{sha}",
            repository.owner, repository.name
        );
        let commit: CommitPayload = self.client.get(route, None::<&()>).await?;

        let result: Commit = commit.into();
        debug!(sha, has_committer = result.committer.is_some(), "got commit");
        Ok(result)
    }

    async fn list_issue_comments(
        &self,
        pr_number: u64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Comment>> {
        debug!(pr_number, %since, "listing PR comments");
        let first = self
            .client
            .issues(&self.repository.owner, &self.repository.name)
            .list_comments(pr_number)
            .since(since)
            .per_page(PER_PAGE)
            .send()
            .await?;
        let comments = self.client.all_pages(first).await?;

        let result: Vec<Comment> = comments.into_iter().map(comment_from_octocrab).collect();
        debug!(pr_number, count = result.len(), "listed PR comments");
        Ok(result)
    }

    async fn create_issue_comment(&self, pr_number: u64, body: &str) -> Result<Comment> {
        debug!(pr_number, "creating PR comment");
        let comment = self
            .client
            .issues(&self.repository.owner, &self.repository.name)
            .create_comment(pr_number, body)
            .await?;

        debug!(pr_number, comment_id = comment.id.0, "created PR comment");
        Ok(comment_from_octocrab(comment))
    }

    async fn update_branch(&self, pr_number: u64) -> Result<()> {
        debug!(pr_number, "updating PR branch");
        let response: UpdateBranchPayload = self
            .client
            .put(
                self.repo_route(&format!("/pulls/{pr_number}/update-branch")),
                Some(&serde_json::json!({})),
            )
            .await?;

        debug!(
            pr_number,
            message = response.message.as_deref().unwrap_or_default(),
            "update-branch accepted"
        );
        Ok(())
    }

    fn repository(&self) -> &Repository {
        &self.repository
    }
}
