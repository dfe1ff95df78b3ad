use cucumber::World;
use issue_chars::cli::args::Args;
use issue_chars::run::Tally;

#[derive(Debug, Default, World)]
pub struct IssueCharsWorld {
    pub args: Args,
    pub token_missing: bool,
    pub tracker: fake::FakeTracker,
    pub captured_output: Vec<u8>,
    pub tally: Option<Tally>,
    pub error: Option<String>,
}

#[tokio::main]
async fn main() {
    IssueCharsWorld::run("features").await;
}

mod steps;
