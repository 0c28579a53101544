use crate::api::BiliApiClient;
use crate::config::ClientConfig;
use crate::http_client::{HttpClient, HttpClientError};

pub mod api;
pub mod config;
pub mod dynamic;
pub mod flex_id;
pub mod http;
pub mod http_client;

pub use api::{ApiError, ErrorKind};
pub use flex_id::FlexId;

pub type BiliApi = BiliApiClient<HttpClient>;

impl BiliApi {
    pub fn create(config: &ClientConfig) -> Result<Self, HttpClientError> {
        Ok(BiliApiClient::new(HttpClient::new(config)?))
    }

    /// Replaces or adds session cookies, e.g. after a login flow.
    pub fn set_cookies(&self, cookie_header: &str) {
        self.get_client().set_cookies(cookie_header);
    }
}
