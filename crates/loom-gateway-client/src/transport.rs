// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The HTTP seam between [`GatewayClient`](crate::GatewayClient) and the network.

use std::fmt;

use async_trait::async_trait;
use loom_common_http::TransportOptions;
use reqwest::{Client, Method, StatusCode};

use crate::types::REDACTED;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A single authenticated request to the gateway.
#[derive(Clone)]
pub struct TransportRequest {
	pub method: Method,
	pub url: String,
	pub bearer_token: String,
	pub json_body: Option<serde_json::Value>,
}

impl fmt::Debug for TransportRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TransportRequest")
			.field("method", &self.method)
			.field("url", &self.url)
			.field("bearer_token", &REDACTED)
			.field("has_body", &self.json_body.is_some())
			.finish()
	}
}

/// Whatever the gateway answered, whatever the status.
#[derive(Debug, Clone)]
pub struct TransportResponse {
	pub status: StatusCode,
	pub body: Vec<u8>,
}

impl TransportResponse {
	pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}

	/// Body as text, with invalid UTF-8 replaced.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Sends requests for the gateway client.
///
/// Implementations return `Err` only when no response was obtained; any
/// HTTP status, including errors, comes back as a [`TransportResponse`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
	async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, BoxError>;
}

/// Production transport backed by a shared reqwest connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
	http_client: Client,
}

impl ReqwestTransport {
	pub fn new(options: &TransportOptions) -> Result<Self, reqwest::Error> {
		Ok(Self {
			http_client: loom_common_http::new_client(options)?,
		})
	}

	pub fn from_client(http_client: Client) -> Self {
		Self { http_client }
	}
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
	async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, BoxError> {
		let mut builder = self
			.http_client
			.request(request.method, &request.url)
			.bearer_auth(&request.bearer_token);

		if let Some(body) = &request.json_body {
			builder = builder.json(body);
		}

		let response = builder.send().await?;
		let status = response.status();
		let body = response.bytes().await?;

		Ok(TransportResponse::new(status, body.to_vec()))
	}
}
