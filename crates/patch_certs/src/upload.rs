// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::io::Write;

use tracing::{debug, warn};

use http_client::BaseApiClient;

use crate::bundle::{CertificateBundle, CertificatePaths};
use crate::error::CertsError;

pub const DEFAULT_API_URL: &str = "https://api.foundries.io";

/// Header carrying the factory access token. The API does not use `Authorization`.
pub const TOKEN_HEADER: &str = "OSF-TOKEN";

/// Everything one upload needs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UploadConfig {
    pub factory: String,
    pub token: String,
    /// Scheme and host of the API, without a trailing slash.
    pub api_url: String,
    pub certificates: CertificatePaths,
}

impl fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadConfig")
            .field("factory", &self.factory)
            .field("api_url", &self.api_url)
            .field("certificates", &self.certificates)
            .finish_non_exhaustive()
    }
}

/// Builds the factory's certificate endpoint. The factory is inserted as-is, so a
/// value containing `/` or `?` changes which resource is addressed.
pub fn certs_url(api_url: &str, factory: &str) -> String {
    format!("{api_url}/ota/factories/{factory}/certs/")
}

/// Status and body of the API's reply, whatever the status was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub status_line: String,
    pub body: String,
}

impl fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status: {}\n{}", self.status_line, self.body)
    }
}

/// Reads all three certificates, then sends them in a single PATCH.
///
/// Nothing is sent unless every certificate could be read. Error statuses from
/// the API are not errors here; they come back in the [`UploadOutcome`].
pub async fn patch_certs(
    client: &BaseApiClient,
    config: &UploadConfig,
) -> Result<UploadOutcome, CertsError> {
    let bundle = CertificateBundle::load(&config.certificates)?;

    if config.factory.contains(['/', '?', '#', '%']) {
        warn!(
            "factory {:?} contains URL syntax and will change the request path",
            config.factory
        );
    }
    let url = certs_url(&config.api_url, &config.factory);
    let headers = [(TOKEN_HEADER.to_string(), config.token.clone())];

    debug!("patching certificates for factory {:?}", config.factory);
    let response = client.json_patch(&url, &bundle, &headers).await?;
    debug!("{url} answered {}", response.status);

    Ok(UploadOutcome {
        status_line: response.status_line(),
        body: response.text(),
    })
}

/// Uploads, then writes the outcome to `stdout`.
pub async fn run<W: Write>(
    client: &BaseApiClient,
    config: &UploadConfig,
    stdout: &mut W,
) -> Result<(), CertsError> {
    let outcome = patch_certs(client, config).await?;
    writeln!(stdout, "{outcome}").map_err(CertsError::Output)?;
    stdout.flush().map_err(CertsError::Output)
}
