//! HTTP client core.
//!
//! Translates `(method, path, query, body, auth)` into one request and
//! normalizes the response into an [`Envelope`] or an [`ApiError`].

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use eventhub_auth::TokenStore;

use crate::config::ClientConfig;
use crate::envelope::Envelope;
use crate::error::{ApiError, ApiResult, ErrorEnvelope};
use crate::query::Query;

/// Whether a call carries the stored bearer token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Auth {
    #[default]
    Required,
    None,
}

impl Auth {
    fn include(self) -> bool {
        self == Auth::Required
    }
}

/// `base + path`, plus a query string when `query` has any present value.
pub fn build_url(base: &str, path: &str, query: Option<&Query>) -> String {
    let mut url = String::with_capacity(base.len() + path.len());
    url.push_str(base);
    if !path.is_empty() {
        url.push_str(path);
    }
    if let Some(qs) = query.and_then(Query::to_query_string) {
        url.push('?');
        url.push_str(&qs);
    }
    url
}

/// Request headers for one call.
///
/// The `Authorization` value is built from the stored token and never
/// double-prefixed. A token that is not a valid header value is skipped.
pub fn build_headers(tokens: &TokenStore, include_auth: bool, include_content_type: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if include_content_type {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    if include_auth {
        if let Some(value) = tokens.authorization() {
            match HeaderValue::from_str(&value) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("stored token is not a valid header value; sending unauthenticated"),
            }
        }
    }
    headers
}

/// Decode a response body per its declared content type.
///
/// JSON that fails to parse becomes `{}`; other content types become a
/// JSON string holding the (lossy UTF-8) text.
fn decode_body(is_json: bool, bytes: &[u8]) -> Value {
    if is_json {
        serde_json::from_slice(bytes).unwrap_or_else(|err| {
            tracing::warn!("unparseable JSON response body: {err}");
            Value::Object(Map::new())
        })
    } else {
        Value::String(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Cheaply cloneable handle bound to one backend and one token slot.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(config: ClientConfig, tokens: TokenStore) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
            tokens,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Absolute URL of an API path.
    pub fn url(&self, path: &str, query: Option<&Query>) -> String {
        build_url(&self.config.api_base(), path, query)
    }

    pub fn headers(&self, include_auth: bool, include_content_type: bool) -> HeaderMap {
        build_headers(&self.tokens, include_auth, include_content_type)
    }

    /// Issue one request and return the decoded body.
    ///
    /// Non-2xx statuses become [`ApiError::Status`]. A body passed with
    /// `GET` is dropped; [`Self::delete`] never passes one.
    pub async fn send_raw(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        tracing::debug!(%method, url, auth = headers.contains_key(AUTHORIZATION), "dispatching request");

        let mut request = self.http.request(method.clone(), url).headers(headers);
        if let Some(body) = body.filter(|_| method != Method::GET) {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));
        let bytes = response.bytes().await?;
        let body = decode_body(is_json, &bytes);

        if !status.is_success() {
            let envelope = ErrorEnvelope::from_response(status, &body);
            tracing::debug!(%method, url, status = status.as_u16(), message = %envelope.message, "request rejected");
            return Err(ApiError::Status(envelope));
        }

        Ok(body)
    }

    /// [`Self::send_raw`] followed by envelope normalization.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<&Value>,
    ) -> ApiResult<Envelope<T>> {
        let body = self.send_raw(method, url, headers, body).await?;
        Ok(Envelope::from_body(body))
    }

    /// One API call, returning the decoded 2xx body before envelope typing.
    pub(crate) async fn call_raw<B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Query>,
        body: Option<&B>,
        auth: Auth,
    ) -> ApiResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(serde_json::to_value).transpose()?;
        let include_content_type = method != Method::DELETE;
        let headers = self.headers(auth.include(), include_content_type);
        let url = self.url(path, query);
        self.send_raw(method, &url, headers, body.as_ref()).await
    }

    async fn call<T, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Query>,
        body: Option<&B>,
        auth: Auth,
    ) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.call_raw(method, path, query, body, auth).await?;
        Ok(Envelope::from_body(body))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&Query>,
        auth: Auth,
    ) -> ApiResult<Envelope<T>> {
        self.call::<T, Value>(Method::GET, path, query, None, auth).await
    }

    pub async fn post<T, B>(&self, path: &str, body: Option<&B>, auth: Auth) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::POST, path, None, body, auth).await
    }

    pub async fn put<T, B>(&self, path: &str, body: Option<&B>, auth: Auth) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::PUT, path, None, body, auth).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: Option<&B>, auth: Auth) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::PATCH, path, None, body, auth).await
    }

    /// `DELETE` carries neither a body nor `Content-Type`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str, auth: Auth) -> ApiResult<Envelope<T>> {
        self.call::<T, Value>(Method::DELETE, path, None, None, auth).await
    }

    /// Unprefixed `GET {base_url}/health`. The body is returned as-is.
    pub async fn health(&self) -> ApiResult<Value> {
        let headers = self.headers(false, false);
        self.send_raw(Method::GET, &self.config.health_url(), headers, None)
            .await
    }

    /// Map a rejected status to `true` when the stored token was refused.
    pub(crate) fn is_token_rejection(err: &ApiError) -> bool {
        err.status_code() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}
