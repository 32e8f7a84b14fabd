// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

#[path = "reqwest.rs"]
pub mod implementation;

use bytes::Bytes;
use http::{Method, StatusCode};

pub use self::implementation::ApiClientCore as ApiClientCoreImpl;
use crate::error::HttpError;

/// A completed HTTP exchange. The status is reported as-is: error statuses are
/// not turned into `HttpError`s at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Reason phrase sent by the server, when it differs from the canonical one.
    pub reason: Option<String>,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            reason: None,
            body: body.into(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Status line in the usual `200 OK` form, using the server's own reason
    /// phrase if it sent a non-canonical one. Codes with no reason at all are
    /// rendered as the bare number.
    pub fn status_line(&self) -> String {
        match self.reason.as_deref().or(self.status.canonical_reason()) {
            Some(reason) => format!("{} {reason}", self.status.as_u16()),
            None => self.status.as_u16().to_string(),
        }
    }

    /// Response body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[async_trait::async_trait]
pub trait ApiClientCore {
    async fn raw_request(
        &self,
        method: Method,
        url: &str,
        body: Option<Bytes>,
        content_type: &'static str,
        headers: &[(String, String)],
    ) -> Result<ApiResponse, HttpError>;
}

#[async_trait::async_trait]
impl ApiClientCore for ApiClientCoreImpl {
    async fn raw_request(
        &self,
        method: Method,
        url: &str,
        body: Option<Bytes>,
        content_type: &'static str,
        headers: &[(String, String)],
    ) -> Result<ApiResponse, HttpError> {
        self.raw_request(method, url, body, content_type, headers).await
    }
}

pub mod test_utils {
    use super::*;

    use std::pin::Pin;

    type ResultFuture = dyn futures::Future<Output = Result<ApiResponse, HttpError>> + Send;
    type Responder = dyn (Fn(Method, String, Option<Bytes>, String, Vec<(String, String)>) -> Pin<Box<ResultFuture>>)
        + Send
        + Sync;

    /// Mock `ApiClientCore` that holds a closure that can respond to requests with fake responses, or errors.
    ///
    /// ```rust
    /// use futures::FutureExt;
    /// use bytes::Bytes;
    /// use http::{Method, StatusCode};
    ///
    /// use http_client::{ApiResponse, BaseApiClient, HttpError};
    /// use http_client::test_utils::ApiClientCoreMock;
    ///
    /// let mock = ApiClientCoreMock::from(|_method: Method,
    ///                                     url: String,
    ///                                     _body: Option<Bytes>,
    ///                                     _content_type: String,
    ///                                     _headers: Vec<(String, String)>| {
    ///     // note the `async { ... }.boxed()`!
    ///     async move {
    ///         if url.contains("coffee") {
    ///             Err(HttpError::RequestError {
    ///                 ctx: url,
    ///                 status: None,
    ///                 source: "connection refused".into(),
    ///             })
    ///         } else {
    ///             Ok(ApiResponse::new(StatusCode::IM_A_TEAPOT, "earl grey, hot"))
    ///         }
    ///     }.boxed()
    /// });
    /// let client = BaseApiClient::from(mock);
    ///
    /// // use the mocked client as desired
    /// let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
    /// rt.block_on(async {
    ///     let response = client.json_patch("example.com/tea", &"please", &[]).await.unwrap();
    ///     assert_eq!(response.status_line(), "418 I'm a teapot");
    ///     client.json_patch("example.com/coffee", &"pls", &[]).await.unwrap_err();
    /// });
    /// ```
    pub struct ApiClientCoreMock {
        responder: Box<Responder>,
    }

    #[async_trait::async_trait]
    impl ApiClientCore for ApiClientCoreMock {
        async fn raw_request(
            &self,
            method: Method,
            url: &str,
            body: Option<Bytes>,
            content_type: &'static str,
            headers: &[(String, String)],
        ) -> Result<ApiResponse, HttpError> {
            (self.responder)(
                method,
                url.into(),
                body,
                content_type.into(),
                headers.into(),
            )
            .await
        }
    }

    impl<
            F: Fn(
                    Method,
                    String,
                    Option<Bytes>,
                    String,
                    Vec<(String, String)>,
                ) -> Pin<Box<ResultFuture>>
                + Send
                + Sync
                + 'static,
        > From<F> for ApiClientCoreMock
    {
        fn from(value: F) -> Self {
            Self {
                responder: Box::new(value),
            }
        }
    }
}
