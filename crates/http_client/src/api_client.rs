// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::Method;

use crate::api_client_core::{ApiClientCore, ApiClientCoreImpl, ApiResponse};
use crate::error::HttpError;

/// Helper for talking to JSON REST APIs
#[derive(Clone)]
pub struct BaseApiClient {
    // 99% of the time this is going to be ApiClientCoreImpl, but it's overrideable for mocking purposes
    core: Arc<dyn ApiClientCore + Send + Sync>,
}

impl<Core: ApiClientCore + Send + Sync + 'static> From<Core> for BaseApiClient {
    fn from(core: Core) -> Self {
        Self {
            core: Arc::new(core),
        }
    }
}

impl BaseApiClient {
    /// Construct a new ApiClient backed by reqwest.
    pub fn new() -> Self {
        ApiClientCoreImpl::new().into()
    }

    /// Patch JSON, with extra headers. The response is returned whatever its status;
    /// only transport failures and serialization failures are errors.
    pub async fn json_patch<I: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &I,
        headers: &[(String, String)],
    ) -> Result<ApiResponse, HttpError> {
        let body = serde_json::to_vec(payload).map_err(|e| HttpError::EncodeError {
            encoding: format!("json payload for {url}"),
            source: Box::new(e),
        })?;
        self.raw_request(Method::PATCH, url, body.into(), "application/json", headers)
            .await
    }

    pub(crate) async fn raw_request(
        &self,
        method: Method,
        url: &str,
        body: Bytes,
        content_type: &'static str,
        header_iter: &[(String, String)],
    ) -> Result<ApiResponse, HttpError> {
        self.core
            .raw_request(method, url, Some(body), content_type, header_iter)
            .await
    }
}

impl Default for BaseApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BaseApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseApiClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use futures::FutureExt;
    use http::StatusCode;

    use super::*;
    use crate::test_utils::ApiClientCoreMock;

    #[derive(Debug, Default)]
    struct Seen {
        method: Option<Method>,
        url: String,
        body: Option<Bytes>,
        content_type: String,
        headers: Vec<(String, String)>,
    }

    fn recording_client(response: ApiResponse) -> (BaseApiClient, Arc<Mutex<Seen>>) {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let mock = ApiClientCoreMock::from({
            let seen = seen.clone();
            move |method: Method,
                  url: String,
                  body: Option<Bytes>,
                  content_type: String,
                  headers: Vec<(String, String)>| {
                *seen.lock().unwrap() = Seen {
                    method: Some(method),
                    url,
                    body,
                    content_type,
                    headers,
                };
                let response = response.clone();
                async move { Ok::<_, HttpError>(response) }.boxed()
            }
        });
        (BaseApiClient::from(mock), seen)
    }

    #[derive(serde::Serialize)]
    struct Payload {
        #[serde(rename = "some-field")]
        some_field: &'static str,
    }

    #[tokio::test]
    async fn json_patch_sends_patch_with_json_body_and_headers() {
        let (client, seen) = recording_client(ApiResponse::new(StatusCode::OK, "{}"));
        let headers = [("X-Thing".to_string(), "value".to_string())];

        client
            .json_patch("https://example.com/a/", &Payload { some_field: "x" }, &headers)
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.method, Some(Method::PATCH));
        assert_eq!(seen.url, "https://example.com/a/");
        assert_eq!(seen.content_type, "application/json");
        assert_eq!(seen.headers, headers.to_vec());
        assert_eq!(seen.body.as_deref(), Some(&br#"{"some-field":"x"}"#[..]));
    }

    #[tokio::test]
    async fn json_patch_passes_error_statuses_through() {
        let (client, _) = recording_client(ApiResponse::new(StatusCode::FORBIDDEN, "nope"));

        let response = client
            .json_patch("https://example.com/", &Payload { some_field: "" }, &[])
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.text(), "nope");
    }

    #[tokio::test]
    async fn json_patch_propagates_transport_errors() {
        let mock = ApiClientCoreMock::from(
            |_: Method, url: String, _: Option<Bytes>, _: String, _: Vec<(String, String)>| {
                async move {
                    Err::<ApiResponse, _>(HttpError::RequestError {
                        ctx: format!("requesting {url}"),
                        status: None,
                        source: "dns failure".into(),
                    })
                }
                .boxed()
            },
        );
        let client = BaseApiClient::from(mock);

        let err = client
            .json_patch("https://nowhere.invalid/", &Payload { some_field: "" }, &[])
            .await
            .unwrap_err();

        assert!(matches!(err, HttpError::RequestError { status: None, .. }));
        assert!(err.to_string().contains("dns failure"));
    }
}
