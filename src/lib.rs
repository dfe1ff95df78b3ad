pub mod cli {
    pub mod args;
}
pub mod config;
pub mod count;
pub mod credential;
pub mod github {
    pub mod client;
    pub mod issues;
    pub mod pagination;
    pub mod tracker;
}
pub mod output;
pub mod query;
pub mod repo_url;
pub mod run;
