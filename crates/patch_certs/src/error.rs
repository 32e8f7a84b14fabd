// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::PathBuf;

use http_client::HttpError;

use crate::bundle::CertificateKind;

#[derive(Debug, thiserror::Error)]
pub enum CertsError {
    #[error("Could not read the {kind} from {path:?} (given by {flag}): {source}", flag = kind.flag())]
    ReadCertificate {
        kind: CertificateKind,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("Could not write the response: {0}")]
    Output(std::io::Error),
}
