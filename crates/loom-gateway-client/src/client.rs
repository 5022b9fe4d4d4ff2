// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Gateway client implementation.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::{Method, StatusCode};
use tracing::{debug, debug_span, warn, Instrument, Span};

use crate::config::GatewayConfig;
use crate::error::{ConfigError, GatewayError, Operation, Result, TransportError};
use crate::transport::{HttpTransport, ReqwestTransport, TransportRequest};
use crate::types::{ClusterToken, PublicCerts};

pub const GW_CERTS_PATH: &str = "/v1/gw/certs";
pub const NATS_TOKEN_PATH: &str = "/v1/nats/token";

pub const KEY_NATS_CA: &str = "nats-ca";
pub const KEY_JWT_PUBLIC_KEY: &str = "jwt-public-key";
pub const KEY_TOKEN: &str = "token";

/// Client for the control-plane gateway.
///
/// Holds no per-call state: clone the `Arc` or share a reference across
/// tasks freely. Nothing is retried; inspect failures with
/// [`RetryableError`](loom_common_http::RetryableError) to decide.
pub struct GatewayClient {
	transport: Arc<dyn HttpTransport>,
	config: GatewayConfig,
	logger: Span,
}

impl GatewayClient {
	/// Creates a client talking to `endpoint` over a reqwest transport.
	///
	/// `logger` becomes the parent span of every request span; pass
	/// `Span::none()` to log without a parent. `debug` and
	/// `insecure_skip_tls_verify` go to the transport untouched.
	pub fn new(
		endpoint: &str,
		logger: Span,
		debug: bool,
		insecure_skip_tls_verify: bool,
	) -> std::result::Result<Self, ConfigError> {
		let config = GatewayConfig::new(endpoint)?
			.with_debug(debug)
			.with_insecure_skip_tls_verify(insecure_skip_tls_verify);
		Self::from_config(config, logger)
	}

	pub fn from_config(
		config: GatewayConfig,
		logger: Span,
	) -> std::result::Result<Self, ConfigError> {
		let transport = ReqwestTransport::new(&config.transport_options())?;
		Ok(Self::with_transport(config, logger, Arc::new(transport)))
	}

	/// Creates a client over any transport.
	pub fn with_transport(
		config: GatewayConfig,
		logger: Span,
		transport: Arc<dyn HttpTransport>,
	) -> Self {
		Self {
			transport,
			config,
			logger,
		}
	}

	pub fn endpoint(&self) -> &str {
		&self.config.endpoint
	}

	pub fn config(&self) -> &GatewayConfig {
		&self.config
	}

	/// Fetches the NATS CA certificate and the JWT verification key.
	pub async fn get_agent_certs(&self, auth_token: &str) -> Result<PublicCerts> {
		let request = TransportRequest {
			method: Method::GET,
			url: self.config.url_for(GW_CERTS_PATH),
			bearer_token: auth_token.to_string(),
			json_body: None,
		};

		let mut fields = self.call(Operation::AgentCerts, request).await?;

		let certs = PublicCerts {
			nats_ca: fields.remove(KEY_NATS_CA).unwrap_or_default(),
			jwt_public_key: fields.remove(KEY_JWT_PUBLIC_KEY).unwrap_or_default(),
		};

		if certs.jwt_public_key.is_empty() {
			warn!(parent: &self.logger, "gateway returned agent certs without a jwt public key");
			return Err(GatewayError::EmptyPublicKey);
		}

		Ok(certs)
	}

	/// Asks the gateway to issue a JWT for `cluster_id`, bound to `public_key`.
	pub async fn fetch_new_jwt_token(
		&self,
		auth_token: &str,
		cluster_id: &str,
		public_key: &str,
	) -> Result<ClusterToken> {
		let request = TransportRequest {
			method: Method::POST,
			url: self.config.url_for(NATS_TOKEN_PATH),
			bearer_token: auth_token.to_string(),
			json_body: Some(serde_json::json!({
				"clusterID": cluster_id,
				"publicKey": public_key,
			})),
		};

		let mut fields = self.call(Operation::NatsToken, request).await?;

		let token = ClusterToken::new(fields.remove(KEY_TOKEN).unwrap_or_default());
		if token.is_empty() {
			warn!(parent: &self.logger, cluster_id, "gateway returned an empty token");
			return Err(GatewayError::EmptyToken);
		}

		debug!(parent: &self.logger, cluster_id, "received new cluster token");
		Ok(token)
	}

	/// Sends `request` and decodes a 200 body as a flat string map.
	///
	/// A JSON `null` body decodes to an empty map and `null` values decode to
	/// empty strings, so the callers' presence checks report them.
	async fn call(
		&self,
		operation: Operation,
		request: TransportRequest,
	) -> Result<HashMap<String, String>> {
		let span = debug_span!(
			parent: &self.logger,
			"gateway_request",
			operation = %operation,
			method = %request.method,
			url = %request.url
		);

		async move {
			let method = request.method.clone();
			let url = request.url.clone();

			debug!("sending gateway request");

			let response = self.transport.execute(request).await.map_err(|source| {
				let source = TransportError { method, url, source };
				warn!(error = %source, "gateway request failed before a response");
				GatewayError::Transport { operation, source }
			})?;

			debug!(status = %response.status, "received gateway response");

			if response.status != StatusCode::OK {
				let status = response.status.as_u16();
				warn!(status, "gateway rejected request");
				return Err(GatewayError::Status {
					operation,
					status,
					body: response.text(),
				});
			}

			let fields: Option<HashMap<String, Option<String>>> =
				serde_json::from_slice(&response.body).map_err(|source| {
					warn!(error = %source, "failed to decode gateway response");
					GatewayError::Decode { operation, source }
				})?;

			Ok(fields
				.unwrap_or_default()
				.into_iter()
				.map(|(key, value)| (key, value.unwrap_or_default()))
				.collect())
		}
		.instrument(span)
		.await
	}
}

impl std::fmt::Debug for GatewayClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GatewayClient")
			.field("endpoint", &self.config.endpoint)
			.field("debug", &self.config.debug)
			.field("insecure_skip_tls_verify", &self.config.insecure_skip_tls_verify)
			.finish()
	}
}
