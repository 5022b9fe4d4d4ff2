// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use loom_common_http::TransportOptions;
use url::Url;

use crate::error::ConfigError;

pub const ENV_GATEWAY_URL: &str = "LOOM_GATEWAY_URL";
pub const ENV_GATEWAY_DEBUG: &str = "LOOM_GATEWAY_DEBUG";
pub const ENV_GATEWAY_INSECURE_SKIP_TLS_VERIFY: &str = "LOOM_GATEWAY_INSECURE_SKIP_TLS_VERIFY";

fn parse_endpoint(endpoint: &str) -> Result<String, ConfigError> {
	let invalid = |reason: String| ConfigError::InvalidEndpoint {
		endpoint: endpoint.to_string(),
		reason,
	};

	let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
	if url.scheme() != "https" && url.scheme() != "http" {
		return Err(invalid(format!("unsupported scheme {}", url.scheme())));
	}
	if url.host_str().is_none() {
		return Err(invalid("missing host".to_string()));
	}
	// API paths are appended to the raw endpoint.
	if url.query().is_some() || url.fragment().is_some() {
		return Err(invalid("query and fragment are not allowed".to_string()));
	}

	Ok(endpoint.trim_end_matches('/').to_string())
}

fn parse_flag(value: Option<String>) -> bool {
	value
		.map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
		.unwrap_or(false)
}

/// Where the gateway lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
	/// Base URL without a trailing slash; API paths are appended to it.
	pub endpoint: String,
	pub debug: bool,
	pub insecure_skip_tls_verify: bool,
}

impl GatewayConfig {
	pub fn new(endpoint: &str) -> Result<Self, ConfigError> {
		Ok(Self {
			endpoint: parse_endpoint(endpoint)?,
			debug: false,
			insecure_skip_tls_verify: false,
		})
	}

	/// Reads `LOOM_GATEWAY_URL`, `LOOM_GATEWAY_DEBUG` and
	/// `LOOM_GATEWAY_INSECURE_SKIP_TLS_VERIFY`.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
		let endpoint = lookup(ENV_GATEWAY_URL)
			.ok_or_else(|| ConfigError::MissingEnv(ENV_GATEWAY_URL.to_string()))?;

		let debug = parse_flag(lookup(ENV_GATEWAY_DEBUG));
		let insecure = parse_flag(lookup(ENV_GATEWAY_INSECURE_SKIP_TLS_VERIFY));

		Ok(Self::new(&endpoint)?
			.with_debug(debug)
			.with_insecure_skip_tls_verify(insecure))
	}

	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;
		self
	}

	pub fn with_insecure_skip_tls_verify(mut self, insecure: bool) -> Self {
		self.insecure_skip_tls_verify = insecure;
		self
	}

	pub fn transport_options(&self) -> TransportOptions {
		TransportOptions::new(self.debug, self.insecure_skip_tls_verify)
	}

	pub(crate) fn url_for(&self, path: &str) -> String {
		format!("{}{}", self.endpoint, path)
	}
}
