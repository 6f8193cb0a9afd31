//! Fetch action definitions through the GitHub REST contents API.
//!
//! GET {api_url}/repos/{owner}/{repo}/contents/{path} with the raw media type
//! returns the file body directly. Errors come back as JSON `{ "message": ... }`.

use crate::error::FetchError;
use crate::fetch::ContentFetcher;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub api_url: String,
    /// Sent as a bearer token when present. Public repositories work without one.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct GithubFetcher {
    client: Client,
    config: GithubConfig,
}

impl GithubFetcher {
    pub fn new(config: GithubConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.api_url.trim_end_matches('/'),
            owner,
            repo,
            path
        )
    }
}

impl ContentFetcher for GithubFetcher {
    fn fetch(&self, owner: &str, repo: &str, path: &str) -> Result<String, FetchError> {
        let url = self.contents_url(owner, repo, path);
        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, RAW_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let transport = |source: reqwest::Error| FetchError::Transport {
            path: path.to_string(),
            source,
        };
        let response = request.send().map_err(transport)?;
        let status = response.status();
        let body = response.text().map_err(transport)?;

        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                message: api_message(&body),
            });
        }
        Ok(body)
    }
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Pull `message` out of a GitHub error body, or fall back to the body itself.
fn api_message(body: &str) -> String {
    match serde_json::from_str::<ApiError>(body) {
        Ok(err) => err.message,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn contents_url_trims_trailing_slash() {
        let fetcher = GithubFetcher::new(GithubConfig {
            api_url: "https://ghe.example.com/api/v3/".to_string(),
            ..GithubConfig::default()
        })
        .unwrap();
        assert_eq!(
            fetcher.contents_url("octo", "hello-world", "action.yml"),
            "https://ghe.example.com/api/v3/repos/octo/hello-world/contents/action.yml"
        );
    }

    #[test]
    fn api_message_from_json() {
        let body = r#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#;
        assert_eq!(api_message(body), "Not Found");
    }

    #[test]
    fn api_message_falls_back_to_body() {
        assert_eq!(api_message("  bad gateway \n"), "bad gateway");
    }
}
