// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use tracing::warn;

/// Transport-level switches chosen once when a client is constructed.
///
/// Both flags are handed to reqwest as-is; nothing above the transport
/// inspects them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportOptions {
	/// Log every read and write on pooled connections at TRACE level.
	pub debug: bool,
	/// Accept any server certificate. Only meant for local gateways with
	/// self-signed certificates.
	pub insecure_skip_tls_verify: bool,
}

impl TransportOptions {
	pub fn new(debug: bool, insecure_skip_tls_verify: bool) -> Self {
		Self {
			debug,
			insecure_skip_tls_verify,
		}
	}
}

/// Creates a new HTTP client builder with the standard Loom User-Agent header
/// and the given transport options applied.
///
/// Use this when you need to customize the client further.
///
/// # Example
/// ```ignore
/// let client = loom_common_http::builder(&TransportOptions::default())
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder(options: &TransportOptions) -> ClientBuilder {
	if options.insecure_skip_tls_verify {
		warn!("TLS certificate verification is disabled for this HTTP client");
	}

	Client::builder()
		.user_agent(user_agent())
		.connection_verbose(options.debug)
		.danger_accept_invalid_certs(options.insecure_skip_tls_verify)
}

/// Creates a new HTTP client with the standard Loom User-Agent header.
pub fn new_client(options: &TransportOptions) -> Result<Client, reqwest::Error> {
	builder(options).build()
}

/// Returns the standard Loom User-Agent string.
///
/// Format: `loom/{os}-{arch}/{version}`
pub fn user_agent() -> String {
	format!(
		"loom/{}-{}/{}",
		std::env::consts::OS,
		std::env::consts::ARCH,
		env!("CARGO_PKG_VERSION")
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use wiremock::matchers::{header, method};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		assert!(ua.starts_with("loom/"));
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 3);
		assert_eq!(parts[0], "loom");
		assert!(parts[1].contains('-'));
	}

	#[test]
	fn default_options_are_strict() {
		let options = TransportOptions::default();
		assert!(!options.debug);
		assert!(!options.insecure_skip_tls_verify);
	}

	#[test]
	fn builds_with_every_flag_combination() {
		for debug in [false, true] {
			for insecure in [false, true] {
				let options = TransportOptions::new(debug, insecure);
				assert!(new_client(&options).is_ok());
			}
		}
	}

	#[tokio::test]
	async fn client_sends_user_agent() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(header("user-agent", user_agent().as_str()))
			.respond_with(ResponseTemplate::new(204))
			.expect(1)
			.mount(&server)
			.await;

		let client = new_client(&TransportOptions::default()).unwrap();
		let response = client.get(server.uri()).send().await.unwrap();
		assert_eq!(response.status().as_u16(), 204);
	}
}
