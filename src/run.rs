use crate::cli::args::Args;
use crate::config::{self, RunConfig};
use crate::count;
use crate::credential::{self, TokenSource};
use crate::github::client::GitHubClient;
use crate::github::issues::Issue;
use crate::github::pagination::{PER_PAGE, Pages};
use crate::github::tracker::{IssueSearch, IssueTracker};
use crate::output;
use crate::query;
use anyhow::{Context, Result};
use std::fmt;

/// Progress line is printed every this many issues.
const PROGRESS_EVERY: usize = 10;

/// Where a run currently is. Any error moves the run to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Authenticated,
    Searching,
    Counting { index: usize, total: usize },
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Init => write!(f, "init"),
            Stage::Authenticated => write!(f, "authenticated"),
            Stage::Searching => write!(f, "searching"),
            Stage::Counting { index, total } => write!(f, "counting {}/{}", index + 1, total),
            Stage::Done => write!(f, "done"),
            Stage::Failed => write!(f, "failed"),
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub issues: usize,
    pub chars: u64,
}

/// Loads the token and the validated configuration. Nothing here touches
/// the network.
pub fn prepare(args: &Args, tokens: &impl TokenSource) -> Result<(RunConfig, String)> {
    tracing::info!(stage = %Stage::Init);
    let token = credential::require_token(tokens)?;
    tracing::info!(stage = %Stage::Authenticated);

    let (path, explicit) = args.config_path();
    let file_config = config::load_config_file(&path, explicit)?;
    let merged = config::update_config(&file_config, &args.overrides());
    let run_config = config::resolve_config(&merged).context("Invalid configuration")?;
    tracing::debug!(?run_config, "resolved configuration");

    Ok((run_config, token))
}

/// Fetches every issue matching `query`, printing `fetched/total` after each page.
pub async fn fetch_all_issues<C: IssueTracker>(
    client: &C,
    query: &str,
    stdout_additional: &mut Option<&mut dyn std::io::Write>,
) -> Result<Vec<Issue>> {
    let mut pages = Pages::new(IssueSearch { client, query }, PER_PAGE);
    let mut issues = Vec::new();
    while let Some(page) = pages.next_page().await {
        let page = page?;
        issues.extend(page.items);
        output::println(
            &format!("{}/{}", issues.len(), page.total_count.unwrap_or_default()),
            stdout_additional,
        )?;
    }
    Ok(issues)
}

/// Searches the configured window and counts what the user wrote.
pub async fn count_chars<C: IssueTracker>(
    client: &C,
    config: &RunConfig,
    stdout_additional: &mut Option<&mut dyn std::io::Write>,
) -> Result<Tally> {
    let query = query::build_query(
        &config.org,
        &config.username,
        config.year_month,
        config.end_year_month,
    );
    tracing::info!(stage = %Stage::Searching, %query);

    let issues = fetch_all_issues(client, &query, stdout_additional)
        .await
        .context("failed to list all issues")?;
    output::println(
        &format!("{} issue(s) found", issues.len()),
        stdout_additional,
    )?;

    let mut chars = 0;
    for (index, issue) in issues.iter().enumerate() {
        if index % PROGRESS_EVERY == 0 {
            output::println(
                &format!("{}/{}", index + 1, issues.len()),
                stdout_additional,
            )?;
        }
        let stage = Stage::Counting {
            index,
            total: issues.len(),
        };
        tracing::debug!(stage = %stage, number = issue.number, repository = %issue.repository_url);

        chars += count::count_issue_chars(client, issue, &config.username)
            .await
            .context("failed to count chars on an issue")?;
    }

    output::println(
        &format!("{} char(s) written by {}", chars, config.username),
        stdout_additional,
    )?;
    tracing::info!(stage = %Stage::Done, chars);

    Ok(Tally {
        issues: issues.len(),
        chars,
    })
}

pub async fn run(
    args: Args,
    tokens: &impl TokenSource,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> Result<Tally> {
    let result = async {
        let (run_config, token) = prepare(&args, tokens)?;
        let client = GitHubClient::new(&run_config.api_url, &token)?;
        count_chars(&client, &run_config, &mut stdout_additional).await
    }
    .await;

    if let Err(err) = &result {
        tracing::debug!(stage = %Stage::Failed, "{err:#}");
    }
    result
}
