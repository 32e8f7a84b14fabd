// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The certificates uploaded for a factory, and loading them from disk.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::CertsError;

/// Which of the three factory certificates a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateKind {
    Root,
    FleetCa,
    Server,
}

impl CertificateKind {
    /// The command line flag that names this certificate's file.
    pub fn flag(&self) -> &'static str {
        match self {
            CertificateKind::Root => "--root-cert",
            CertificateKind::FleetCa => "--fleet-ca-cert",
            CertificateKind::Server => "--server-cert",
        }
    }
}

impl fmt::Display for CertificateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateKind::Root => f.write_str("root CA certificate"),
            CertificateKind::FleetCa => f.write_str("fleet CA certificate"),
            CertificateKind::Server => f.write_str("server certificate"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificatePaths {
    pub root: PathBuf,
    pub fleet_ca: PathBuf,
    pub server: PathBuf,
}

/// Certificate text as sent to the API. Contents are opaque: nothing here
/// checks that they are PEM, or certificates at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateBundle {
    #[serde(rename = "root-crt")]
    pub root_certificate: String,
    #[serde(rename = "ca-crt")]
    pub device_ca_certificate: String,
    #[serde(rename = "tls-crt")]
    pub server_certificate: String,
}

impl CertificateBundle {
    /// Reads the root, fleet CA and server certificates, in that order.
    /// Stops at the first file that can't be read.
    pub fn load(paths: &CertificatePaths) -> Result<Self, CertsError> {
        Ok(Self {
            root_certificate: read_certificate(CertificateKind::Root, &paths.root)?,
            device_ca_certificate: read_certificate(CertificateKind::FleetCa, &paths.fleet_ca)?,
            server_certificate: read_certificate(CertificateKind::Server, &paths.server)?,
        })
    }
}

fn read_certificate(kind: CertificateKind, path: &Path) -> Result<String, CertsError> {
    let bytes = std::fs::read(path).map_err(|source| CertsError::ReadCertificate {
        kind,
        path: path.to_owned(),
        source,
    })?;
    if bytes.is_empty() {
        warn!("{kind} at {path:?} is empty");
    }
    debug!("read {} bytes of {kind} from {path:?}", bytes.len());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
