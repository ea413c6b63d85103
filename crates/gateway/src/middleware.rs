// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::future::{Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::{
	Error,
	dev::{Service, ServiceRequest, ServiceResponse, Transform},
};
use tracing::{Instrument, error, info, warn};

/// Request logging middleware for actix-web
///
/// Wraps each request in an `http_request` span and records status and
/// latency once the handler finishes.
pub struct LoggingMiddleware;

impl<S, B> Transform<S, ServiceRequest> for LoggingMiddleware
where
	S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
	S::Future: 'static,
	B: 'static,
{
	type Response = ServiceResponse<B>;
	type Error = Error;
	type InitError = ();
	type Transform = LoggingMiddlewareInner<S>;
	type Future = Ready<Result<Self::Transform, Self::InitError>>;

	fn new_transform(&self, service: S) -> Self::Future {
		ready(Ok(LoggingMiddlewareInner {
			service: Rc::new(service),
		}))
	}
}

pub struct LoggingMiddlewareInner<S> {
	service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for LoggingMiddlewareInner<S>
where
	S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
	S::Future: 'static,
	B: 'static,
{
	type Response = ServiceResponse<B>;
	type Error = Error;
	type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

	fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.service.poll_ready(cx)
	}

	fn call(&self, req: ServiceRequest) -> Self::Future {
		let service = self.service.clone();
		let span = tracing::info_span!(
			target: "http",
			"http_request",
			method = %req.method(),
			path = %req.path()
		);

		Box::pin(
			async move {
				let start = Instant::now();
				let res = service.call(req).await;
				let duration_ms = start.elapsed().as_millis();

				match &res {
					Ok(response) if response.status().is_server_error() => {
						warn!(
							target: "http",
							status = response.status().as_u16(),
							duration_ms = duration_ms,
							"Request completed with server error"
						);
					}
					Ok(response) => {
						info!(
							target: "http",
							status = response.status().as_u16(),
							duration_ms = duration_ms,
							"Request completed"
						);
					}
					Err(e) => {
						error!(target: "http", error = %e, duration_ms = duration_ms, "Request failed");
					}
				}

				res
			}
			.instrument(span),
		)
	}
}
