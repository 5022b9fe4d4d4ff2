// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory transport for unit tests, keyed by method and URL.

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use crate::transport::{BoxError, HttpTransport, TransportRequest, TransportResponse};

#[derive(Debug, Clone)]
enum Responder {
	Reply { status: StatusCode, body: String },
	Fail(String),
}

#[derive(Default)]
pub struct MockTransport {
	responders: Mutex<HashMap<(Method, String), Responder>>,
	requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Answers `method url` with `status` and a raw body.
	pub fn respond(&self, method: Method, url: &str, status: u16, body: impl Into<String>) {
		let status = StatusCode::from_u16(status).expect("valid status code");
		self.responders.lock().unwrap().insert(
			(method, url.to_string()),
			Responder::Reply {
				status,
				body: body.into(),
			},
		);
	}

	/// Answers `method url` with `status` and `value` encoded as JSON.
	pub fn respond_json<T: serde::Serialize>(
		&self,
		method: Method,
		url: &str,
		status: u16,
		value: &T,
	) {
		let body = serde_json::to_string(value).expect("serializable response");
		self.respond(method, url, status, body);
	}

	/// Fails `method url` before any response, with a connection-refused error.
	pub fn fail(&self, method: Method, url: &str, message: &str) {
		self.responders
			.lock()
			.unwrap()
			.insert((method, url.to_string()), Responder::Fail(message.to_string()));
	}

	pub fn requests(&self) -> Vec<TransportRequest> {
		self.requests.lock().unwrap().clone()
	}
}

#[async_trait]
impl HttpTransport for MockTransport {
	async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, BoxError> {
		let key = (request.method.clone(), request.url.clone());
		self.requests.lock().unwrap().push(request);

		let responder = self.responders.lock().unwrap().get(&key).cloned();
		match responder {
			Some(Responder::Reply { status, body }) => Ok(TransportResponse::new(status, body)),
			Some(Responder::Fail(message)) => {
				Err(io::Error::new(io::ErrorKind::ConnectionRefused, message).into())
			}
			None => Err(format!("no responder found for {} {}", key.0, key.1).into()),
		}
	}
}
