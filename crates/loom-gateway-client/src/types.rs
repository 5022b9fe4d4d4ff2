// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Values returned by the gateway.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Placeholder printed instead of credential values.
pub const REDACTED: &str = "[REDACTED]";

/// Public material needed to validate a NATS connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicCerts {
	/// PEM-encoded CA certificate of the NATS servers.
	pub nats_ca: String,
	/// PEM-encoded key that verifies gateway-issued JWTs.
	pub jwt_public_key: String,
}

/// A JWT issued by the gateway for one cluster identity.
///
/// The token is a credential: `Debug` and `Display` are redacted and the
/// memory is zeroed on drop. Call [`ClusterToken::expose`] to read it.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ClusterToken(String);

impl ClusterToken {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Copies the token out; the wrapper still zeroes its own copy on drop.
	pub fn into_inner(self) -> String {
		self.0.clone()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for ClusterToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ClusterToken").field(&REDACTED).finish()
	}
}

impl fmt::Display for ClusterToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}
