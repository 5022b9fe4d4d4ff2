// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Classification of HTTP failures into transient and permanent.
//!
//! Clients built on this crate do not retry on their own. They expose this
//! trait so the caller can decide on a retry policy.

use reqwest::StatusCode;

const RETRYABLE_STATUSES: [StatusCode; 6] = [
	StatusCode::TOO_MANY_REQUESTS,
	StatusCode::REQUEST_TIMEOUT,
	StatusCode::INTERNAL_SERVER_ERROR,
	StatusCode::BAD_GATEWAY,
	StatusCode::SERVICE_UNAVAILABLE,
	StatusCode::GATEWAY_TIMEOUT,
];

pub trait RetryableError {
	fn is_retryable(&self) -> bool;
}

/// Returns true for statuses that usually clear up on their own.
pub fn is_retryable_status(status: u16) -> bool {
	RETRYABLE_STATUSES
		.iter()
		.any(|retryable| retryable.as_u16() == status)
}

impl RetryableError for reqwest::Error {
	fn is_retryable(&self) -> bool {
		if self.is_timeout() || self.is_connect() {
			return true;
		}

		if let Some(status) = self.status() {
			return is_retryable_status(status.as_u16());
		}

		false
	}
}
