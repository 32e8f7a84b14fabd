// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use bytes::Bytes;
use http::Method;
use tracing::debug;

use super::ApiResponse;
use crate::error::HttpError;

#[derive(Debug, Clone)]
pub struct ApiClientCore {
    client: reqwest::Client, // cheaply cloneable (Arc<...> internally), see docs
}

impl ApiClientCore {
    /// Construct a new ApiClientCore with no default headers and reqwest's
    /// default (unbounded) timeouts.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Send a request with an optional body of the given content type, plus optional extra headers.
    /// Any status code is returned to the caller alongside the full response body.
    pub(crate) async fn raw_request(
        &self,
        method: Method,
        url: &str,
        body: Option<Bytes>,
        content_type: &'static str,
        header_iter: &[(String, String)],
    ) -> Result<ApiResponse, HttpError> {
        let mut rb = self.client.request(method.clone(), url);
        if let Some(b) = body {
            rb = rb
                .body(b)
                .header(reqwest::header::CONTENT_TYPE, content_type);
        }

        for (key, value) in header_iter {
            rb = rb.header(key, value)
        }

        debug!("http_client: requesting {method} {url}");

        let response = rb.send().await.map_err(|e| HttpError::RequestError {
            ctx: format!("requesting {url}"),
            status: None,
            source: Box::new(e),
        })?;

        let status = response.status();
        // only present when the server's phrase isn't the canonical one
        let reason = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned());
        debug!("http_client: response from {url:?}: {status} {reason:?}");

        let body = response.bytes().await.map_err(|e| HttpError::RequestError {
            ctx: format!("reading response body from {url}"),
            status: Some(status.as_u16()),
            source: Box::new(e),
        })?;

        Ok(ApiResponse {
            status,
            reason,
            body,
        })
    }
}

impl Default for ApiClientCore {
    fn default() -> Self {
        Self::new()
    }
}
