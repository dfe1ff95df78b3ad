use crate::github::issues::{Comment, Issue};
use crate::github::pagination::Page;
use crate::github::tracker::IssueTracker;
use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "issue-chars";
const ACCEPT: &str = "application/vnd.github+json";

#[derive(Deserialize, Debug)]
struct SearchResponse {
    total_count: u64,
    items: Vec<Issue>,
}

/// GitHub REST client authenticated with a personal access token.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(GitHubClient {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!(%url, ?query, "GET");
        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(anyhow::anyhow!(
                "Token invalid or expired. Check GITHUB_ACCESS_TOKEN."
            ));
        }
        if !status.is_success() {
            return Err(anyhow::anyhow!("API request error: {} for {}", status, url));
        }
        Ok(response)
    }
}

fn next_page_of(response: &reqwest::Response) -> Option<u32> {
    response
        .headers()
        .get(reqwest::header::LINK)
        .and_then(|value| value.to_str().ok())
        .and_then(next_page_from_link)
}

/// Extracts the `page` query parameter of the `rel="next"` entry of a
/// `Link` header.
pub fn next_page_from_link(header: &str) -> Option<u32> {
    header.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        let is_next = params
            .split(';')
            .any(|param| param.trim() == r#"rel="next""#);
        if !is_next {
            return None;
        }
        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        let url = url::Url::parse(target).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
    })
}

impl IssueTracker for GitHubClient {
    async fn search_issues(&self, query: &str, page: u32, per_page: u32) -> Result<Page<Issue>> {
        let response = self
            .get(
                "/search/issues",
                &[
                    ("q", query.to_string()),
                    ("page", page.to_string()),
                    ("per_page", per_page.to_string()),
                ],
            )
            .await?;
        let next_page = next_page_of(&response);
        let body = response
            .json::<SearchResponse>()
            .await
            .context("Failed to parse search response")?;
        Ok(Page {
            items: body.items,
            total_count: Some(body.total_count),
            next_page,
        })
    }

    async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Comment>> {
        let path = format!("/repos/{owner}/{repo}/issues/{issue_number}/comments");
        let response = self
            .get(
                &path,
                &[("page", page.to_string()), ("per_page", per_page.to_string())],
            )
            .await?;
        let next_page = next_page_of(&response);
        let items = response
            .json::<Vec<Comment>>()
            .await
            .context("Failed to parse comments response")?;
        Ok(Page {
            items,
            total_count: None,
            next_page,
        })
    }
}
