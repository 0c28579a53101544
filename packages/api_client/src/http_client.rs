use std::panic::Location;
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;

use crate::api::BiliHttpClient;
use crate::config::ClientConfig;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Session cookies are scoped to this domain and sent to both API hosts.
const COOKIE_DOMAIN: &str = ".bilibili.com";
const COOKIE_URL: &str = "https://www.bilibili.com/";

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    cookies: Arc<Jar>,
    cookie_url: Url,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, HttpClientError> {
        let cookie_url = Url::parse(COOKIE_URL).map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
        let cookies = Arc::new(Jar::default());

        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::REFERER, header_value(&config.referer)?);
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HttpClientError::InvalidHeader(name.clone()))?;
            headers.insert(name, header_value(value)?);
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .cookie_provider(cookies.clone())
            .build()
            .map_err(HttpClientError::BuildError)?;

        let http = HttpClient {
            client,
            cookies,
            cookie_url,
        };

        if let Some(cookies) = &config.cookies {
            http.set_cookies(cookies);
        }

        Ok(http)
    }

    /// Adds cookies given in `Cookie` header form (`a=1; b=2`).
    pub fn set_cookies(&self, cookie_header: &str) {
        for pair in cookie_header.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }

            if !pair.contains('=') {
                tracing::warn!(cookie = %pair, "skipping malformed cookie");
                continue;
            }

            let cookie = format!("{}; Domain={}; Path=/", pair, COOKIE_DOMAIN);
            self.cookies.add_cookie_str(&cookie, &self.cookie_url);
        }
    }

    pub fn get_cookie(&self, name: &str) -> Option<String> {
        let header = self.cookies.cookies(&self.cookie_url)?;
        let header = header.to_str().ok()?;

        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }
}

fn header_value(value: &str) -> Result<HeaderValue, HttpClientError> {
    HeaderValue::from_str(value).map_err(|_| HttpClientError::InvalidHeader(value.to_string()))
}

impl BiliHttpClient for HttpClient {
    type Error = HttpClientError;

    fn cookie(&self, name: &str) -> Option<String> {
        self.get_cookie(name)
    }

    async fn execute(&self, caller: &'static Location<'static>, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        tracing::debug!(%caller, method = ?request.method, url = %request.url, "sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(request.url.as_str()),
            HttpMethod::Post => self.client.post(request.url.as_str()),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(form) => builder.form(&form),
            RequestBody::Multipart(file) => {
                let part = reqwest::multipart::Part::bytes(file.data).file_name(file.file_name);
                builder.multipart(reqwest::multipart::Form::new().part(file.field, part))
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

#[derive(Debug)]
pub enum HttpClientError {
    BuildError(reqwest::Error),
    InvalidHeader(String),
    InvalidUrl(String),
    RequestError(reqwest::Error),
}

impl From<reqwest::Error> for HttpClientError {
    fn from(value: reqwest::Error) -> Self {
        HttpClientError::RequestError(value)
    }
}

impl std::fmt::Display for HttpClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpClientError::BuildError(error) => write!(f, "failed to build http client: {}", error),
            HttpClientError::InvalidHeader(value) => write!(f, "invalid header: {}", value),
            HttpClientError::InvalidUrl(error) => write!(f, "invalid url: {}", error),
            HttpClientError::RequestError(error) => write!(f, "request failed: {}", error),
        }
    }
}

impl std::error::Error for HttpClientError {}

#[cfg(test)]
mod test {
    use axum::http::{HeaderMap, StatusCode, Uri};
    use axum::routing::{get, post};
    use axum::Router;

    use super::*;

    async fn echo_query(uri: Uri) -> String {
        uri.query().unwrap_or("").to_string()
    }

    async fn echo_body(body: String) -> String {
        body
    }

    async fn echo_headers(headers: HeaderMap) -> String {
        let get = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or("").to_string();
        format!("{}|{}|{}", get("user-agent"), get("referer"), get("origin"))
    }

    async fn fail() -> (StatusCode, &'static str) {
        (StatusCode::PRECONDITION_FAILED, "blocked")
    }

    async fn start_server() -> String {
        let app = Router::new()
            .route("/query", get(echo_query))
            .route("/form", post(echo_body))
            .route("/headers", get(echo_headers))
            .route("/fail", get(fail));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn client() -> HttpClient {
        HttpClient::new(&ClientConfig {
            headers: vec![("Origin".to_string(), "https://t.bilibili.com".to_string())],
            ..ClientConfig::default()
        }).unwrap()
    }

    #[tokio::test]
    async fn test_get_query_encoding() {
        let base = start_server().await;

        let mut request = HttpRequest::new(HttpMethod::Get, &format!("{}/query", base));
        request.add_param("keyword", "a b&c");
        request.add_param("uid", "1");

        let res = client().execute(Location::caller(), request).await.unwrap();
        assert_eq!(res.status, 200);
        assert_eq!(res.body, "keyword=a+b%26c&uid=1");
    }

    #[tokio::test]
    async fn test_post_form_body() {
        let base = start_server().await;

        let mut request = HttpRequest::new(HttpMethod::Post, &format!("{}/form", base));
        request.add_param("dynamic_id", "77");
        request.add_param("csrf", "tok");

        let res = client().execute(Location::caller(), request).await.unwrap();
        assert_eq!(res.body, "dynamic_id=77&csrf=tok");
    }

    #[tokio::test]
    async fn test_multipart_body() {
        let base = start_server().await;

        let mut request = HttpRequest::new(HttpMethod::Post, &format!("{}/form", base));
        request.body = RequestBody::Multipart(crate::http::FilePart {
            field: "file_up".to_string(),
            file_name: "a.png".to_string(),
            data: b"PNGDATA".to_vec(),
        });

        let res = client().execute(Location::caller(), request).await.unwrap();
        assert!(res.body.contains("name=\"file_up\""));
        assert!(res.body.contains("filename=\"a.png\""));
        assert!(res.body.contains("PNGDATA"));
    }

    #[tokio::test]
    async fn test_base_headers() {
        let base = start_server().await;

        let request = HttpRequest::new(HttpMethod::Get, &format!("{}/headers", base));
        let res = client().execute(Location::caller(), request).await.unwrap();

        let expected = format!("{}|{}|https://t.bilibili.com", crate::config::DEFAULT_USER_AGENT, crate::config::DEFAULT_REFERER);
        assert_eq!(res.body, expected);
    }

    #[tokio::test]
    async fn test_status_returned_as_data() {
        let base = start_server().await;

        let request = HttpRequest::new(HttpMethod::Get, &format!("{}/fail", base));
        let res = client().execute(Location::caller(), request).await.unwrap();
        assert_eq!(res.status, 412);
        assert_eq!(res.body, "blocked");
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let request = HttpRequest::new(HttpMethod::Get, &format!("http://{}/query", addr));
        let res = client().execute(Location::caller(), request).await;
        assert!(matches!(res, Err(HttpClientError::RequestError(_))));
    }

    #[test]
    fn test_cookie_lookup() {
        let http = HttpClient::new(&ClientConfig {
            cookies: Some("SESSDATA=abc%2C123; bili_jct=0123abcd; broken".to_string()),
            ..ClientConfig::default()
        }).unwrap();

        assert_eq!(http.cookie("bili_jct").as_deref(), Some("0123abcd"));
        assert_eq!(http.cookie("SESSDATA").as_deref(), Some("abc%2C123"));
        assert_eq!(http.cookie("DedeUserID"), None);

        http.set_cookies("DedeUserID=100");
        assert_eq!(http.cookie("DedeUserID").as_deref(), Some("100"));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let res = HttpClient::new(&ClientConfig {
            headers: vec![("bad header".to_string(), "x".to_string())],
            ..ClientConfig::default()
        });
        assert!(matches!(res, Err(HttpClientError::InvalidHeader(_))));
    }
}
