use std::collections::HashMap;
use std::future::Future;
use std::panic::Location;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::dynamic::*;
use crate::http::{FilePart, HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Cookie holding the anti-CSRF token of a logged in session.
pub const BILI_JCT: &str = "bili_jct";

const AT_SEARCH: &str = "https://api.vc.bilibili.com/dynamic_mix/v1/dynamic_mix/at_search";
const REPOST_DETAIL: &str = "https://api.vc.bilibili.com/dynamic_repost/v1/dynamic_repost/repost_detail";
const SPEC_ITEM_LIKES: &str = "https://api.vc.bilibili.com/dynamic_like/v1/dynamic_like/spec_item_likes";
const LIVE_USERS: &str = "https://api.vc.bilibili.com/dynamic_svr/v1/dynamic_svr/w_live_users";
const DYN_UPLIST: &str = "https://api.vc.bilibili.com/dynamic_svr/v1/dynamic_svr/w_dyn_uplist";
const RM_DYNAMIC: &str = "https://api.vc.bilibili.com/dynamic_svr/v1/dynamic_svr/rm_dynamic";
const DYNAMIC_DETAIL: &str = "https://api.vc.bilibili.com/dynamic_svr/v1/dynamic_svr/get_dynamic_detail";
const PORTAL: &str = "https://api.bilibili.com/x/polymer/web-dynamic/v1/portal";
const UPLOAD_BFS: &str = "https://api.bilibili.com/x/dynamic/feed/draw/upload_bfs";
const CREATE_DYNAMIC: &str = "https://api.vc.bilibili.com/dynamic_svr/v1/dynamic_svr/create";
const FEED_SPACE: &str = "https://api.bilibili.com/x/polymer/web-dynamic/v1/feed/space";

pub trait BiliHttpClient {
    type Error: std::fmt::Debug;

    /// Value of a session cookie, `None` when the session does not carry it.
    fn cookie(&self, name: &str) -> Option<String>;

    fn execute(&self, caller: &'static Location<'static>, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;
}

/// Mutates an outgoing request after its parameters are serialized.
pub trait RequestHook<C: BiliHttpClient>: Sync {
    fn apply(&self, client: &C, request: &mut HttpRequest) -> Result<(), ApiError<C::Error>>;
}

/// Adds the session's anti-CSRF token as `csrf` and `csrf_token`.
pub struct FillCsrf;

impl<C: BiliHttpClient> RequestHook<C> for FillCsrf {
    fn apply(&self, client: &C, request: &mut HttpRequest) -> Result<(), ApiError<C::Error>> {
        let token = require_cookie(client, BILI_JCT)?;
        request.add_param("csrf", token.clone());
        request.add_param("csrf_token", token);
        Ok(())
    }
}

fn require_cookie<C: BiliHttpClient>(client: &C, name: &'static str) -> Result<String, ApiError<C::Error>> {
    match client.cookie(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::NotAuthenticated { cookie: name }),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Some hosts fill `message`, some `msg`, some both.
    pub fn message(&self) -> &str {
        match &self.msg {
            Some(msg) if self.message.is_empty() => msg,
            _ => &self.message,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiResponseError {
    pub code: i64,
    pub message: String,
}

impl std::fmt::Display for ApiResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error code: {}, message: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiResponseError {
}

#[derive(Debug)]
pub enum ApiError<C> {
    NotAuthenticated { cookie: &'static str },
    SerializeError(serde_json::Error),
    ClientError(C),
    ReadError(std::io::Error),
    UnexpectedStatus(u16),
    ParseError { error: serde_json::Error, status: u16, body: String },
    DataError(serde_json::Error),
    ApiError(ApiResponseError),
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ErrorKind {
    /// Nothing was sent.
    Precondition,
    Transport,
    Decode,
    /// Envelope decoded with a nonzero code.
    Domain,
}

impl<C> ApiError<C> {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NotAuthenticated { .. } | ApiError::SerializeError(_) => ErrorKind::Precondition,
            ApiError::ClientError(_) | ApiError::ReadError(_) | ApiError::UnexpectedStatus(_) => ErrorKind::Transport,
            ApiError::ParseError { .. } | ApiError::DataError(_) => ErrorKind::Decode,
            ApiError::ApiError(_) => ErrorKind::Domain,
        }
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            ApiError::ApiError(error) => Some(error.code),
            _ => None,
        }
    }
}

impl<C: std::fmt::Debug> std::fmt::Display for ApiError<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotAuthenticated { cookie } => write!(f, "not logged in: cookie {} missing", cookie),
            ApiError::SerializeError(error) => write!(f, "failed to serialize request parameters: {}", error),
            ApiError::ClientError(error) => write!(f, "request failed: {:?}", error),
            ApiError::ReadError(error) => write!(f, "failed to read upload: {}", error),
            ApiError::UnexpectedStatus(status) => write!(f, "status code: {}", status),
            ApiError::ParseError { error, status, .. } => write!(f, "invalid response (status {}): {}", status, error),
            ApiError::DataError(error) => write!(f, "unexpected response data: {}", error),
            ApiError::ApiError(error) => write!(f, "{}", error),
        }
    }
}

impl<C: std::fmt::Debug> std::error::Error for ApiError<C> {
}

/// Decodes the `{code, message, data}` envelope and then `data` into `R`.
pub fn decode_response<R: DeserializeOwned, C>(response: HttpResponse) -> Result<R, ApiError<C>> {
    let envelope: ApiResponse<serde_json::Value> = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(error) => {
            return Err(ApiError::ParseError {
                error,
                status: response.status,
                body: response.body,
            });
        }
    };

    if envelope.code != 0 {
        return Err(ApiError::ApiError(ApiResponseError {
            code: envelope.code,
            message: envelope.message().to_string(),
        }));
    }

    let data = envelope.data.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(data).map_err(ApiError::DataError)
}

fn log_failure<R, E: std::fmt::Debug>(res: Result<R, ApiError<E>>, request: &str, caller: &'static Location<'static>) -> Result<R, ApiError<E>> {
    if let Err(error) = &res {
        tracing::error!(?error, %request, %caller, "API call failed");
    }
    res
}

#[derive(Clone)]
pub struct BiliApiClient<C: BiliHttpClient> {
    client: C,
}

impl<C: BiliHttpClient> BiliApiClient<C> {
    pub fn new(client: C) -> Self {
        BiliApiClient { client }
    }

    pub fn get_client(&self) -> &C {
        &self.client
    }

    async fn execute<P, R>(
        &self,
        caller: &'static Location<'static>,
        method: HttpMethod,
        url: &str,
        params: &P,
        hooks: &[&dyn RequestHook<C>],
    ) -> Result<R, ApiError<C::Error>>
    where
        P: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let res: Result<R, ApiError<C::Error>> = async {
            let mut request = HttpRequest::with_params(method, url, params).map_err(ApiError::<C::Error>::SerializeError)?;
            for hook in hooks {
                hook.apply(&self.client, &mut request)?;
            }

            let response = self.client.execute(caller, request).await.map_err(ApiError::ClientError)?;
            decode_response(response)
        }.await;

        log_failure(res, std::any::type_name::<P>(), caller)
    }

    /// Users matching `keyword`, grouped the way the "@" picker shows them.
    #[track_caller]
    pub fn search_dynamic_at(&self, req: SearchDynamicAtParam) -> impl Future<Output = Result<SearchDynamicAtResult, ApiError<C::Error>>> + '_ {
        let caller = Location::caller();
        async move {
            self.execute(caller, HttpMethod::Get, AT_SEARCH, &req, &[]).await
        }
    }

    #[track_caller]
    pub fn get_dynamic_repost_detail(&self, req: GetDynamicRepostDetailParam) -> impl Future<Output = Result<DynamicRepostDetail, ApiError<C::Error>>> + '_ {
        let caller = Location::caller();
        async move {
            self.execute(caller, HttpMethod::Get, REPOST_DETAIL, &req, &[]).await
        }
    }

    #[track_caller]
    pub fn get_dynamic_like_list(&self, req: GetDynamicLikeListParam) -> impl Future<Output = Result<DynamicLikeList, ApiError<C::Error>>> + '_ {
        let caller = Location::caller();
        async move {
            self.execute(caller, HttpMethod::Get, SPEC_ITEM_LIKES, &req, &[]).await
        }
    }

    /// Followed users that are live right now.
    #[track_caller]
    pub fn get_dynamic_live_user_list(&self, req: GetDynamicLiveUserListParam) -> impl Future<Output = Result<DynamicLiveUserList, ApiError<C::Error>>> + '_ {
        let caller = Location::caller();
        async move {
            self.execute(caller, HttpMethod::Get, LIVE_USERS, &req, &[]).await
        }
    }

    /// Followed users that posted new dynamics.
    #[track_caller]
    pub fn get_dynamic_up_list(&self, req: GetDynamicUpListParam) -> impl Future<Output = Result<DynamicUpList, ApiError<C::Error>>> + '_ {
        let caller = Location::caller();
        async move {
            self.execute(caller, HttpMethod::Get, DYN_UPLIST, &req, &[]).await
        }
    }

    #[track_caller]
    pub fn remove_dynamic(&self, req: RemoveDynamicParam) -> impl Future<Output = Result<(), ApiError<C::Error>>> + '_ {
        let caller = Location::caller();
        async move {
            let _: IgnoredAny = self.execute(caller, HttpMethod::Post, RM_DYNAMIC, &req, &[&FillCsrf]).await?;
            Ok(())
        }
    }

    #[track_caller]
    pub fn get_dynamic_detail(&self, req: GetDynamicDetailParam) -> impl Future<Output = Result<DynamicDetail, ApiError<C::Error>>> + '_ {
        let caller = Location::caller();
        async move {
            self.execute(caller, HttpMethod::Get, DYNAMIC_DETAIL, &req, &[]).await
        }
    }

    /// The logged in user's own portal: profile summary and recently updated follows.
    #[track_caller]
    pub fn get_dynamic_portal(&self) -> impl Future<Output = Result<DynamicPortal, ApiError<C::Error>>> + '_ {
        let caller = Location::caller();
        async move {
            self.execute(caller, HttpMethod::Get, PORTAL, &(), &[]).await
        }
    }

    /// Uploads an image for a picture dynamic. The session cookie is checked
    /// before `file` is read.
    #[track_caller]
    pub fn upload_dynamic_bfs<'a, F>(&'a self, file_name: &'a str, mut file: F, category: &'a str) -> impl Future<Output = Result<UploadedImage, ApiError<C::Error>>> + 'a
    where
        F: AsyncRead + Unpin + Send + 'a,
    {
        let caller = Location::caller();
        async move {
            let res: Result<UploadedImage, ApiError<C::Error>> = async {
                let csrf = require_cookie(&self.client, BILI_JCT)?;

                let mut data = Vec::new();
                file.read_to_end(&mut data).await.map_err(ApiError::<C::Error>::ReadError)?;

                let mut request = HttpRequest::new(HttpMethod::Post, UPLOAD_BFS)
                    .with_query(&UploadBfsQuery { category, csrf: &csrf })
                    .map_err(ApiError::<C::Error>::SerializeError)?;
                request.body = RequestBody::Multipart(FilePart {
                    field: "file_up".to_string(),
                    file_name: file_name.to_string(),
                    data,
                });

                let response = self.client.execute(caller, request).await.map_err(ApiError::ClientError)?;
                if response.status != 200 {
                    return Err(ApiError::UnexpectedStatus(response.status));
                }

                let uploaded = decode_response::<UploadBfsData, C::Error>(response)?;
                Ok(UploadedImage::from(uploaded))
            }.await;

            log_failure(res, "upload_bfs", caller)
        }
    }

    /// Publishes a dynamic. Every successful call creates a new one.
    #[track_caller]
    pub fn create_dynamic(&self, req: CreateDynamicParam) -> impl Future<Output = Result<CreateDynamicResult, ApiError<C::Error>>> + '_ {
        let caller = Location::caller();
        async move {
            self.execute(caller, HttpMethod::Post, CREATE_DYNAMIC, &req, &[&FillCsrf]).await
        }
    }

    /// A user's space feed, no login required.
    #[track_caller]
    pub fn get_user_space_dynamic(&self, req: GetUserSpaceDynamicParam) -> impl Future<Output = Result<DynamicInfo, ApiError<C::Error>>> + '_ {
        let caller = Location::caller();
        async move {
            self.execute(caller, HttpMethod::Get, FEED_SPACE, &req, &[]).await
        }
    }

    /// Same endpoint as [`Self::get_user_space_dynamic`], returning the `data`
    /// tree untyped for callers that need fields the typed schema lacks.
    #[track_caller]
    pub fn raw_get_user_space_dynamic(&self, req: HashMap<String, String>) -> impl Future<Output = Result<serde_json::Value, ApiError<C::Error>>> + '_ {
        let caller = Location::caller();
        async move {
            self.execute(caller, HttpMethod::Get, FEED_SPACE, &req, &[]).await
        }
    }
}
