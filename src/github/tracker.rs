use crate::github::issues::{Comment, Issue};
use crate::github::pagination::{Page, PageSource};
use anyhow::Result;

/// Remote issue tracker operations the counter relies on.
#[allow(async_fn_in_trait)]
pub trait IssueTracker {
    async fn search_issues(&self, query: &str, page: u32, per_page: u32) -> Result<Page<Issue>>;

    async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Comment>>;
}

/// Pages of an issue search.
pub struct IssueSearch<'a, C> {
    pub client: &'a C,
    pub query: &'a str,
}

impl<C: IssueTracker> PageSource for IssueSearch<'_, C> {
    type Item = Issue;

    async fn fetch(&self, page: u32, per_page: u32) -> Result<Page<Issue>> {
        self.client.search_issues(self.query, page, per_page).await
    }
}

/// Pages of comments on one issue.
pub struct IssueComments<'a, C> {
    pub client: &'a C,
    pub owner: &'a str,
    pub repo: &'a str,
    pub issue_number: u64,
}

impl<C: IssueTracker> PageSource for IssueComments<'_, C> {
    type Item = Comment;

    async fn fetch(&self, page: u32, per_page: u32) -> Result<Page<Comment>> {
        self.client
            .list_comments(self.owner, self.repo, self.issue_number, page, per_page)
            .await
    }
}
