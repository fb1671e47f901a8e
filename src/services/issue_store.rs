use chrono::Utc;
use std::path::Path;
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::models::{parse_issues, Comment, IngestError, Issue, IssueLocation, IssueStatus, NewIssue};

/// Mock issue set bundled with the binary
const MOCK_ISSUES: &str = include_str!("../../data/mock_issues.json");

/// Errors that can occur with issue store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Issue not found: {0}")]
    NotFound(u64),

    #[error("Failed to load issues: {0}")]
    Ingest(#[from] IngestError),

    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("No issue id left above {0}")]
    IdsExhausted(u64),
}

/// In-memory issue repository.
///
/// Shared through application state rather than living in a global; seed it
/// on startup and [`clear`](IssueStore::clear) it on teardown.
pub struct IssueStore {
    issues: RwLock<Vec<Issue>>,
}

impl IssueStore {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self {
            issues: RwLock::new(issues),
        }
    }

    /// Store preloaded with the bundled mock issues
    pub fn seeded() -> Result<Self, StoreError> {
        Self::from_json(MOCK_ISSUES)
    }

    /// Store loaded from a JSON array of issue records in any supported shape
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let issues = parse_issues(json)?;
        tracing::debug!("Loaded {} issues", issues.len());
        Ok(Self::new(issues))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Borrow the full issue list without cloning it
    pub async fn read(&self) -> RwLockReadGuard<'_, Vec<Issue>> {
        self.issues.read().await
    }

    pub async fn list(&self) -> Vec<Issue> {
        self.issues.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.issues.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.issues.read().await.is_empty()
    }

    pub async fn get(&self, id: u64) -> Result<Issue, StoreError> {
        self.issues
            .read()
            .await
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Record a new report. It starts Open with no votes or comments.
    pub async fn submit(&self, new_issue: NewIssue) -> Result<Issue, StoreError> {
        let mut issues = self.issues.write().await;
        let last_id = issues.iter().map(|issue| issue.id).max().unwrap_or(0);
        let id = last_id.checked_add(1).ok_or(StoreError::IdsExhausted(last_id))?;

        let issue = Issue {
            id,
            title: new_issue.title,
            description: new_issue.description,
            category: new_issue.category,
            status: IssueStatus::Open,
            priority: new_issue.priority,
            reported_by: new_issue.reported_by,
            reported_at: Utc::now(),
            last_updated: None,
            location: IssueLocation {
                address: new_issue.address,
                coordinates: Some(new_issue.coordinates),
            },
            images: new_issue.images,
            upvotes: 0,
            comments: vec![],
        };

        issues.push(issue.clone());
        tracing::info!("Issue {} submitted at {}", id, new_issue.coordinates);

        Ok(issue)
    }

    /// Move an issue to `status`, optionally leaving an admin comment
    pub async fn update_status(
        &self,
        id: u64,
        status: IssueStatus,
        admin_comment: Option<String>,
    ) -> Result<Issue, StoreError> {
        let mut issues = self.issues.write().await;
        let issue = issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let previous = issue.status;
        let now = Utc::now();
        issue.status = status;
        issue.last_updated = Some(now);

        if let Some(text) = admin_comment.filter(|t| !t.trim().is_empty()) {
            let comment_id = issue.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            issue.comments.push(Comment {
                id: comment_id,
                author: "Admin".to_string(),
                text,
                timestamp: now,
            });
        }

        tracing::info!("Issue {} status: {} -> {}", id, previous, status);

        Ok(issue.clone())
    }

    pub async fn upvote(&self, id: u64) -> Result<Issue, StoreError> {
        let mut issues = self.issues.write().await;
        let issue = issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or(StoreError::NotFound(id))?;

        issue.upvotes = issue.upvotes.saturating_add(1);
        Ok(issue.clone())
    }

    /// Drop every issue
    pub async fn clear(&self) {
        let mut issues = self.issues.write().await;
        let count = issues.len();
        issues.clear();
        tracing::debug!("Cleared {} issues", count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, Priority};

    fn new_issue() -> NewIssue {
        NewIssue {
            title: "Fallen tree".to_string(),
            description: "Blocking the cycle lane".to_string(),
            category: "Environmental Issues".to_string(),
            priority: Priority::High,
            reported_by: "Asha".to_string(),
            address: "Sector 17".to_string(),
            coordinates: GeoPoint::new(30.7398, 76.7827).unwrap(),
            images: vec![],
        }
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store = IssueStore::seeded().unwrap();
        assert_eq!(store.len().await, 5);

        let pothole = store.get(1).await.unwrap();
        assert_eq!(pothole.title, "Pothole on Main Street");
        assert_eq!(pothole.comments.len(), 2);
        assert!(pothole.location.coordinates.is_some());
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = IssueStore::seeded().unwrap();
        assert!(matches!(store.get(99).await, Err(StoreError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_submit_assigns_next_id() {
        let store = IssueStore::seeded().unwrap();
        let issue = store.submit(new_issue()).await.unwrap();

        assert_eq!(issue.id, 6);
        assert_eq!(issue.status, IssueStatus::Open);
        assert_eq!(issue.upvotes, 0);
        assert_eq!(store.len().await, 6);
    }

    #[tokio::test]
    async fn test_submit_past_largest_id_fails() {
        let mut seed = IssueStore::seeded().unwrap().list().await;
        seed[0].id = u64::MAX;
        let store = IssueStore::new(seed);

        let err = store.submit(new_issue()).await.unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted(u64::MAX)));
        assert_eq!(store.len().await, 5);
    }

    #[tokio::test]
    async fn test_update_status_with_comment() {
        let store = IssueStore::seeded().unwrap();
        let issue = store
            .update_status(2, IssueStatus::Resolved, Some("Bulb replaced".to_string()))
            .await
            .unwrap();

        assert_eq!(issue.status, IssueStatus::Resolved);
        assert!(issue.last_updated.is_some());
        let comment = issue.comments.last().unwrap();
        assert_eq!(comment.author, "Admin");
        assert_eq!(comment.text, "Bulb replaced");

        let stored = store.get(2).await.unwrap();
        assert_eq!(stored.status, IssueStatus::Resolved);
    }

    #[tokio::test]
    async fn test_blank_admin_comment_ignored() {
        let store = IssueStore::seeded().unwrap();
        let issue = store
            .update_status(4, IssueStatus::Closed, Some("   ".to_string()))
            .await
            .unwrap();
        assert!(issue.comments.is_empty());
    }

    #[tokio::test]
    async fn test_upvote_and_clear() {
        let store = IssueStore::seeded().unwrap();
        assert_eq!(store.upvote(5).await.unwrap().upvotes, 23);

        store.clear().await;
        assert!(store.is_empty().await);
    }
}
