// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the control-plane gateway.
//!
//! The gateway hands out the material an agent needs to join the NATS
//! messaging plane:
//! 1. The NATS CA certificate and the key that verifies gateway-issued JWTs
//! 2. A fresh JWT for a cluster, bound to a public key the cluster owns
//!
//! Every failure is returned to the caller as a [`GatewayError`]; nothing is
//! retried internally. Transport and decode failures keep their cause, status
//! and validation failures are plain messages.
//!
//! # Example
//!
//! ```ignore
//! use loom_gateway_client::{GatewayClient, GatewayConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::from_env()?;
//!     let client = GatewayClient::from_config(config, tracing::info_span!("gateway"))?;
//!
//!     let certs = client.get_agent_certs("platform-token").await?;
//!     let token = client
//!         .fetch_new_jwt_token("platform-token", &cluster_id, &public_key)
//!         .await?;
//!
//!     // ClusterToken is redacted in logs; expose() when handing it to NATS
//!     connect_nats(&certs.nats_ca, token.expose()).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
#[cfg(test)]
mod testing;
mod transport;
mod types;

pub use client::{
	GatewayClient, GW_CERTS_PATH, KEY_JWT_PUBLIC_KEY, KEY_NATS_CA, KEY_TOKEN, NATS_TOKEN_PATH,
};
pub use config::{
	GatewayConfig, ENV_GATEWAY_DEBUG, ENV_GATEWAY_INSECURE_SKIP_TLS_VERIFY, ENV_GATEWAY_URL,
};
pub use error::{ConfigError, GatewayError, Operation, Result, TransportError};
pub use loom_common_http::{RetryableError, TransportOptions};
pub use transport::{BoxError, HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};
pub use types::{ClusterToken, PublicCerts, REDACTED};
