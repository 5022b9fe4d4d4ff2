// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the gateway client.

use std::fmt;

use loom_common_http::{is_retryable_status, RetryableError};
use reqwest::Method;
use thiserror::Error;

use crate::transport::BoxError;

/// The gateway call an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	AgentCerts,
	NatsToken,
}

impl Operation {
	/// Noun used in request and status failures.
	pub fn request_name(&self) -> &'static str {
		match self {
			Operation::AgentCerts => "agent certs",
			Operation::NatsToken => "new token",
		}
	}

	/// Noun used in decode failures.
	pub fn response_name(&self) -> &'static str {
		match self {
			Operation::AgentCerts => "agent certs",
			Operation::NatsToken => "nats token",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.request_name())
	}
}

/// A request that never produced an HTTP response.
///
/// Carries the method and URL of the attempt; the original failure is
/// available through `source()`.
#[derive(Debug, Error)]
#[error("{method} \"{url}\": {source}")]
pub struct TransportError {
	pub method: Method,
	pub url: String,
	#[source]
	pub source: BoxError,
}

/// Errors returned by gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
	/// The request could not be delivered or its response could not be read.
	///
	/// The message carries only the operation; the method, URL and cause are
	/// on [`source()`](std::error::Error::source).
	#[error("failed to request {operation}")]
	Transport {
		operation: Operation,
		#[source]
		source: TransportError,
	},

	/// The gateway answered with something other than 200 OK.
	#[error("{operation} request failed with {status} - {body}")]
	Status {
		operation: Operation,
		status: u16,
		body: String,
	},

	/// The 200 body was not a JSON object of strings or nulls.
	#[error("failed to unmarshall {} response: {source}", .operation.response_name())]
	Decode {
		operation: Operation,
		#[source]
		source: serde_json::Error,
	},

	#[error("empty jwt public key received")]
	EmptyPublicKey,

	#[error("empty token received")]
	EmptyToken,
}

impl GatewayError {
	/// The operation that failed, when the failure happened on the wire.
	pub fn operation(&self) -> Option<Operation> {
		match self {
			GatewayError::Transport { operation, .. }
			| GatewayError::Status { operation, .. }
			| GatewayError::Decode { operation, .. } => Some(*operation),
			GatewayError::EmptyPublicKey | GatewayError::EmptyToken => None,
		}
	}

	/// HTTP status of a rejected request.
	pub fn status(&self) -> Option<u16> {
		match self {
			GatewayError::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}

impl RetryableError for GatewayError {
	fn is_retryable(&self) -> bool {
		match self {
			GatewayError::Transport { source, .. } => {
				match source.source.downcast_ref::<reqwest::Error>() {
					Some(e) => e.is_retryable(),
					None => true,
				}
			}
			GatewayError::Status { status, .. } => is_retryable_status(*status),
			GatewayError::Decode { .. } => false,
			GatewayError::EmptyPublicKey | GatewayError::EmptyToken => false,
		}
	}
}

/// Errors raised while building a client or loading its configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("missing environment variable: {0}")]
	MissingEnv(String),

	#[error("invalid gateway endpoint {endpoint:?}: {reason}")]
	InvalidEndpoint { endpoint: String, reason: String },

	#[error("failed to create HTTP client: {0}")]
	HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error as _;

	fn transport_error(cause: BoxError) -> GatewayError {
		GatewayError::Transport {
			operation: Operation::NatsToken,
			source: TransportError {
				method: Method::POST,
				url: "https://foo.com/v1/nats/token".to_string(),
				source: cause,
			},
		}
	}

	#[test]
	fn transport_error_keeps_cause() {
		let err = transport_error("boom".into());
		assert_eq!(err.to_string(), "failed to request new token");

		let transport = err
			.source()
			.and_then(|e| e.downcast_ref::<TransportError>())
			.unwrap();
		assert_eq!(
			transport.to_string(),
			"POST \"https://foo.com/v1/nats/token\": boom"
		);
		assert_eq!(transport.source().unwrap().to_string(), "boom");
	}

	#[test]
	fn status_message_embeds_body_verbatim() {
		let err = GatewayError::Status {
			operation: Operation::AgentCerts,
			status: 500,
			body: "\"some-error\"".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"agent certs request failed with 500 - \"some-error\""
		);
		assert_eq!(err.status(), Some(500));
	}

	#[test]
	fn decode_message_names_the_response() {
		let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
		let expected = format!("failed to unmarshall nats token response: {source}");
		let err = GatewayError::Decode {
			operation: Operation::NatsToken,
			source,
		};
		assert_eq!(err.to_string(), expected);
		assert!(err.source().is_some());
	}

	#[test]
	fn validation_errors_have_no_source() {
		assert!(GatewayError::EmptyPublicKey.source().is_none());
		assert!(GatewayError::EmptyToken.source().is_none());
		assert_eq!(GatewayError::EmptyToken.operation(), None);
	}

	#[test]
	fn infrastructure_failures_are_retryable() {
		assert!(transport_error("boom".into()).is_retryable());
		for status in [429, 500, 503] {
			let err = GatewayError::Status {
				operation: Operation::AgentCerts,
				status,
				body: String::new(),
			};
			assert!(err.is_retryable(), "status {status} should be retryable");
		}
	}

	#[test]
	fn semantic_rejections_are_not_retryable() {
		let source = serde_json::from_str::<u32>("[]").unwrap_err();
		assert!(!GatewayError::Decode {
			operation: Operation::AgentCerts,
			source,
		}
		.is_retryable());
		assert!(!GatewayError::EmptyPublicKey.is_retryable());
		assert!(!GatewayError::EmptyToken.is_retryable());
		assert!(!GatewayError::Status {
			operation: Operation::NatsToken,
			status: 403,
			body: String::new(),
		}
		.is_retryable());
	}
}
