use std::time::Duration;

use futures_util::StreamExt;
use roster_core::Page;
use roster_logging::roster_debug;
use url::Url;

use crate::decode::decode_users_page;
use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api/";
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: Url,
    pub api_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl FetchSettings {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 1024 * 1024,
        }
    }

    /// `GET {base}/users?page=..&per_page=..`. The base is treated as a directory
    /// whether or not it ends in `/`.
    pub fn users_url(&self, page: u32, per_page: u32) -> Result<Url, FetchError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut url = base
            .join("users")
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        Ok(url)
    }
}

/// Produces pages of users. May suspend on network I/O.
#[async_trait::async_trait]
pub trait UserSource: Send + Sync {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Page, FetchError>;
}

#[async_trait::async_trait]
impl<S: UserSource + ?Sized> UserSource for std::sync::Arc<S> {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Page, FetchError> {
        (**self).fetch_page(page, per_page).await
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestUserSource {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestUserSource {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl UserSource for ReqwestUserSource {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Page, FetchError> {
        let url = self.settings.users_url(page, per_page)?;
        roster_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.settings.api_key.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let page = decode_users_page(&bytes)?;
        roster_debug!(
            "page {} of {} decoded with {} users ({} bytes)",
            page.page_number,
            page.total_pages,
            page.items.len(),
            bytes.len()
        );
        Ok(page)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base: &str) -> FetchSettings {
        FetchSettings::new(Url::parse(base).unwrap(), "key")
    }

    #[test]
    fn users_url_appends_path_and_query() {
        let url = settings("https://reqres.in/api/").users_url(2, 10).unwrap();
        assert_eq!(url.as_str(), "https://reqres.in/api/users?page=2&per_page=10");

        let url = settings("https://reqres.in/api").users_url(1, 10).unwrap();
        assert_eq!(url.as_str(), "https://reqres.in/api/users?page=1&per_page=10");
    }
}
