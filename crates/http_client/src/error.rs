// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("while {ctx}: {status_wrap}: {source}", status_wrap=StatusWrapper(*status))]
    RequestError {
        ctx: String,
        /// The HTTP status code of the response, if one arrived before the failure.
        status: Option<u16>,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error("encoding {encoding}: {source}")]
    EncodeError {
        encoding: String,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

struct StatusWrapper(Option<u16>);

impl std::fmt::Display for StatusWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            None => f.write_str("no status"),
            Some(status) => write!(f, "status: {status}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_display_without_status() {
        let err = HttpError::RequestError {
            ctx: "requesting https://example.com/".into(),
            status: None,
            source: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "while requesting https://example.com/: no status: connection refused"
        );
    }

    #[test]
    fn request_error_display_with_status() {
        let err = HttpError::RequestError {
            ctx: "reading response body".into(),
            status: Some(502),
            source: "unexpected eof".into(),
        };
        assert_eq!(
            err.to_string(),
            "while reading response body: status: 502: unexpected eof"
        );
    }
}
