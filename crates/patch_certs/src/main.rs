// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use http_client::BaseApiClient;
use patch_certs::upload::DEFAULT_API_URL;
use patch_certs::{CertificatePaths, UploadConfig};

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Registers a factory's certificates with the factory-management API.",
    long_about = "patch-certs reads a root CA certificate, a fleet CA certificate and a device gateway server certificate, and uploads them to a factory with a single PATCH request. The API's status and response body are printed as-is."
)]
struct Arguments {
    #[arg(long, default_value = "", help = "Factory")]
    factory: String,

    #[arg(long, default_value = "", help = "Factory access token")]
    token: String,

    #[arg(long, value_name = "PATH", default_value = "", help = "root CA cert")]
    root_cert: String,

    #[arg(long, value_name = "PATH", default_value = "", help = "fleet CA cert")]
    fleet_ca_cert: String,

    #[arg(
        long,
        value_name = "PATH",
        default_value = "",
        help = "A server/Device Gateway certificate"
    )]
    server_cert: String,

    #[arg(
        long,
        value_name = "URL",
        default_value = DEFAULT_API_URL,
        help = "Base URL of the factory-management API."
    )]
    api_url: String,

    #[arg(
        short,
        long,
        help = "Suppress non-error output and set the log level to WARN."
    )]
    quiet: bool,

    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase verbosity level, can be used multiple times."
    )]
    verbose: u8,
}

impl Arguments {
    fn build_config(&self) -> UploadConfig {
        UploadConfig {
            factory: self.factory.clone(),
            token: self.token.clone(),
            api_url: self.api_url.trim_end_matches('/').to_owned(),
            certificates: CertificatePaths {
                root: PathBuf::from(&self.root_cert),
                fleet_ca: PathBuf::from(&self.fleet_ca_cert),
                server: PathBuf::from(&self.server_cert),
            },
        }
    }
}

#[tokio::main]
async fn main() -> ! {
    let args = Arguments::parse();

    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_max_level(match (args.quiet, args.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        })
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("could not install logger: {err}");
    }

    let config = args.build_config();

    if let Err(err) = patch(&config).await {
        error!("{err:#}");
        std::process::exit(1);
    } else {
        std::process::exit(0);
    }
}

async fn patch(config: &UploadConfig) -> Result<()> {
    let client = BaseApiClient::new();
    let mut stdout = std::io::stdout();
    patch_certs::run(&client, config, &mut stdout)
        .await
        .with_context(|| format!("patching certificates for factory {:?}", config.factory))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn arguments_are_consistent() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn unset_flags_default_to_empty() {
        let config = Arguments::parse_from(["patch-certs"]).build_config();
        assert_eq!(config.factory, "");
        assert_eq!(config.token, "");
        assert_eq!(config.api_url, "https://api.foundries.io");
        assert_eq!(config.certificates, CertificatePaths::default());
    }

    #[test]
    fn flags_map_onto_config() {
        let config = Arguments::parse_from([
            "patch-certs",
            "--factory",
            "acme",
            "--token",
            "tok123",
            "--root-cert",
            "root.pem",
            "--fleet-ca-cert",
            "ca.pem",
            "--server-cert",
            "server.pem",
            "--api-url",
            "http://127.0.0.1:8000/",
        ])
        .build_config();

        assert_eq!(config.factory, "acme");
        assert_eq!(config.token, "tok123");
        assert_eq!(config.api_url, "http://127.0.0.1:8000");
        assert_eq!(config.certificates.root, PathBuf::from("root.pem"));
        assert_eq!(config.certificates.fleet_ca, PathBuf::from("ca.pem"));
        assert_eq!(config.certificates.server, PathBuf::from("server.pem"));
    }
}
