use crate::IssueCharsWorld;
use crate::fake::FixedToken;
use cucumber::{given, then, when};
use issue_chars::github::issues::{Comment, Issue, User};
use issue_chars::run;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

const DEFAULT_REPOSITORY_URL: &str = "https://api.github.com/repos/wantedly/app";

fn user(login: &str) -> Option<User> {
    Some(User {
        login: login.to_string(),
    })
}

#[given(expr = "{string} is counted in organization {string} from {string} until {string}")]
async fn counting_window(
    world: &mut IssueCharsWorld,
    username: String,
    org: String,
    since: String,
    until: String,
) {
    world.args.username = Some(username);
    world.args.org = Some(org);
    world.args.since = Some(since);
    world.args.until = Some(until);
    world.args.config = Some(PathBuf::from("/dev/null"));
}

#[given("no access token is configured")]
async fn no_access_token(world: &mut IssueCharsWorld) {
    world.token_missing = true;
}

#[given(expr = "an issue #{int} by {string} with a body of {int} characters")]
async fn issue_with_body(world: &mut IssueCharsWorld, number: u64, author: String, len: usize) {
    world.tracker.issues.push(Issue {
        number,
        user: user(&author),
        body: Some("a".repeat(len)),
        repository_url: DEFAULT_REPOSITORY_URL.to_string(),
        comments: 0,
    });
}

fn push_comment(world: &mut IssueCharsWorld, number: u64, author: &str, len: usize) {
    world.tracker.comments.entry(number).or_default().push(Comment {
        user: user(author),
        body: Some("c".repeat(len)),
    });
    if let Some(issue) = world.tracker.issues.iter_mut().find(|i| i.number == number) {
        issue.comments += 1;
    }
}

#[given(expr = "issue #{int} has a comment by {string} of {int} characters")]
async fn issue_has_comment(world: &mut IssueCharsWorld, number: u64, author: String, len: usize) {
    push_comment(world, number, &author, len);
}

#[given(expr = "issue #{int} has {int} comments by {string} of {int} characters each")]
async fn issue_has_many_comments(
    world: &mut IssueCharsWorld,
    number: u64,
    count: usize,
    author: String,
    len: usize,
) {
    for _ in 0..count {
        push_comment(world, number, &author, len);
    }
}

#[given(expr = "issue #{int} reports {int} comments")]
async fn issue_reports_comments(world: &mut IssueCharsWorld, number: u64, comments: u64) {
    let issue = world
        .tracker
        .issues
        .iter_mut()
        .find(|i| i.number == number)
        .expect("issue must be declared first");
    issue.comments = comments;
}

#[given(expr = "issue #{int} belongs to repository URL {string}")]
async fn issue_repository_url(world: &mut IssueCharsWorld, number: u64, url: String) {
    let issue = world
        .tracker
        .issues
        .iter_mut()
        .find(|i| i.number == number)
        .expect("issue must be declared first");
    issue.repository_url = url;
}

#[given(expr = "{int} issues by {string} without comments")]
async fn many_issues(world: &mut IssueCharsWorld, count: u64, author: String) {
    let start = world.tracker.issues.len() as u64;
    world
        .tracker
        .issues
        .extend((start + 1..=start + count).map(|number| Issue {
            number,
            user: user(&author),
            body: Some("x".to_string()),
            repository_url: DEFAULT_REPOSITORY_URL.to_string(),
            comments: 0,
        }));
}

#[given(expr = "the search fails on page {int}")]
async fn search_fails(world: &mut IssueCharsWorld, page: u32) {
    world.tracker.fail_search_on_page = Some(page);
}

#[when("the characters are counted")]
async fn count(world: &mut IssueCharsWorld) {
    let token = (!world.token_missing).then(|| "test-token".to_string());
    let (config, _token) = match run::prepare(&world.args, &FixedToken(token)) {
        Ok(prepared) => prepared,
        Err(err) => {
            world.error = Some(format!("{err:#}"));
            return;
        }
    };

    let mut writer: Option<&mut dyn std::io::Write> = Some(&mut world.captured_output);
    match run::count_chars(&world.tracker, &config, &mut writer).await {
        Ok(tally) => world.tally = Some(tally),
        Err(err) => world.error = Some(format!("{err:#}")),
    }
}

#[then(expr = "the total is {int} characters")]
async fn total_is(world: &mut IssueCharsWorld, expected: u64) {
    let tally = world.tally.as_ref().expect("run should have succeeded");
    assert_eq!(tally.chars, expected);
}

#[then(expr = "{int} issues were processed")]
async fn issues_processed(world: &mut IssueCharsWorld, expected: usize) {
    let tally = world.tally.as_ref().expect("run should have succeeded");
    assert_eq!(tally.issues, expected);
}

#[then(expr = "the search was requested {int} times")]
async fn search_requested(world: &mut IssueCharsWorld, expected: usize) {
    assert_eq!(world.tracker.search_calls.load(Ordering::SeqCst), expected);
}

#[then(expr = "comments were requested {int} times")]
async fn comments_requested(world: &mut IssueCharsWorld, expected: usize) {
    assert_eq!(world.tracker.comment_calls.load(Ordering::SeqCst), expected);
}

#[then(expr = "the output contains {string}")]
async fn output_contains(world: &mut IssueCharsWorld, expected: String) {
    let output = String::from_utf8_lossy(&world.captured_output);
    assert!(
        output.lines().any(|line| line == expected),
        "expected line {expected:?} in output:\n{output}"
    );
}

#[then(expr = "the run fails with {string}")]
async fn run_fails(world: &mut IssueCharsWorld, expected: String) {
    assert!(world.tally.is_none(), "run should not produce a total");
    let error = world.error.as_deref().expect("run should have failed");
    assert!(
        error.contains(&expected),
        "expected {expected:?} in error: {error}"
    );
}
