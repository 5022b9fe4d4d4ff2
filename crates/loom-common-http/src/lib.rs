// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Loom.
//!
//! This crate provides:
//! - A pre-configured HTTP client with consistent User-Agent header
//! - Transport flags (verbose connection logging, TLS verification) applied
//!   uniformly by every client built here
//! - A classification trait that tells callers whether a failure is worth
//!   retrying

mod client;
mod retryable;

pub use client::{builder, new_client, user_agent, TransportOptions};
pub use retryable::{is_retryable_status, RetryableError};
