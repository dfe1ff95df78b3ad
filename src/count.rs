use crate::github::issues::{Comment, Issue};
use crate::github::pagination::{PER_PAGE, Pages};
use crate::github::tracker::{IssueComments, IssueTracker};
use crate::repo_url;
use anyhow::{Context, Result};

/// Length of the issue body if `username` wrote the issue.
pub fn issue_body_chars(issue: &Issue, username: &str) -> u64 {
    if issue.author_login() == Some(username) {
        issue.body_text().len() as u64
    } else {
        0
    }
}

/// Total length of the comments written by `username`.
pub fn comment_chars(comments: &[Comment], username: &str) -> u64 {
    comments
        .iter()
        .filter(|comment| comment.author_login() == Some(username))
        .map(|comment| comment.body_text().len() as u64)
        .sum()
}

/// Fetches every comment on `issue`. Issues reporting no comments are not
/// requested at all.
pub async fn fetch_all_comments<C: IssueTracker>(client: &C, issue: &Issue) -> Result<Vec<Comment>> {
    if issue.comments == 0 {
        return Ok(Vec::new());
    }

    let repo = repo_url::owner_repo_from_url(&issue.repository_url)?;
    let source = IssueComments {
        client,
        owner: &repo.owner,
        repo: &repo.repo,
        issue_number: issue.number,
    };
    Pages::new(source, PER_PAGE)
        .collect_all()
        .await
        .with_context(|| {
            format!(
                "failed to list comments on {}/{}#{}",
                repo.owner, repo.repo, issue.number
            )
        })
}

/// Characters `username` wrote on one issue, body and comments included.
///
/// Comments are counted regardless of when they were posted; only the
/// search query restricts the time window.
pub async fn count_issue_chars<C: IssueTracker>(
    client: &C,
    issue: &Issue,
    username: &str,
) -> Result<u64> {
    let comments = fetch_all_comments(client, issue).await?;
    Ok(issue_body_chars(issue, username) + comment_chars(&comments, username))
}
