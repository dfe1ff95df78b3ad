use anyhow::Result;

/// Environment variable holding the GitHub access token.
pub const GITHUB_TOKEN_KEY: &str = "GITHUB_ACCESS_TOKEN";

/// Abstract access token source
pub trait TokenSource {
    /// Where the token is expected to come from, for error messages
    fn name(&self) -> &str;
    /// Return the token. If none is configured, returns Ok(None)
    fn load(&self) -> Result<Option<String>>;
}

/// Reads the token from an environment variable.
pub struct EnvTokenSource {
    key: String,
}

impl EnvTokenSource {
    pub fn new(key: &str) -> Self {
        EnvTokenSource {
            key: key.to_string(),
        }
    }
}

impl Default for EnvTokenSource {
    fn default() -> Self {
        Self::new(GITHUB_TOKEN_KEY)
    }
}

impl TokenSource for EnvTokenSource {
    fn name(&self) -> &str {
        &self.key
    }

    fn load(&self) -> Result<Option<String>> {
        match std::env::var(&self.key) {
            Ok(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
            Ok(_) | Err(std::env::VarError::NotPresent) => Ok(None),
            Err(err @ std::env::VarError::NotUnicode(_)) => {
                Err(anyhow::anyhow!("{} is not valid unicode: {err}", self.key))
            }
        }
    }
}

/// Loads the token or fails with a message naming where it was expected.
pub fn require_token(source: &impl TokenSource) -> Result<String> {
    source
        .load()?
        .ok_or_else(|| anyhow::anyhow!("{} is missing", source.name()))
}
