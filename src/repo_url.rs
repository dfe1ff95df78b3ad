use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoUrlError {
    #[error("failed to parse URL {url:?}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("malformed repository URL {0:?}: expected a path of the form /repos/<owner>/<repo>")]
    MalformedPath(String),
}

/// Owner and name of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

/// Reads owner and repository name from an API repository URL such as
/// `https://api.github.com/repos/acme/widget`.
pub fn owner_repo_from_url(repository_url: &str) -> Result<RepoRef, RepoUrlError> {
    let url = url::Url::parse(repository_url).map_err(|source| RepoUrlError::Parse {
        url: repository_url.to_string(),
        source,
    })?;

    // "/repos/acme/widget" splits into ["", "repos", "acme", "widget"]
    let segments: Vec<&str> = url.path().split('/').collect();
    match segments.get(2..4) {
        Some([owner, repo]) if !owner.is_empty() && !repo.is_empty() => Ok(RepoRef {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }),
        _ => Err(RepoUrlError::MalformedPath(repository_url.to_string())),
    }
}
