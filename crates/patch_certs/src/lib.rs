// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registers a factory's root CA, fleet CA and device gateway certificates
//! with the factory-management API.

pub mod bundle;
pub mod error;
pub mod upload;

pub use bundle::{CertificateBundle, CertificateKind, CertificatePaths};
pub use error::CertsError;
pub use upload::{certs_url, patch_certs, run, UploadConfig, UploadOutcome};
