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

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use lobby_registry::MatchRegistry;
use tracing::info;

use crate::{
	config::GatewayRuntimeConfig, handlers::GatewayError, middleware::LoggingMiddleware,
	routes::configure_routes,
};

/// Gateway server state shared by all workers
#[derive(Clone)]
pub struct GatewayState {
	pub registry: Arc<MatchRegistry>,
}

/// Gateway server
pub struct GatewayServer {
	state: GatewayState,
	config: GatewayRuntimeConfig,
}

impl GatewayServer {
	pub fn new(registry: Arc<MatchRegistry>, config: GatewayRuntimeConfig) -> Self {
		Self {
			state: GatewayState { registry },
			config,
		}
	}

	/// Start the HTTP server and run until it stops
	pub async fn serve(self) -> Result<()> {
		let state = web::Data::new(self.state);
		let max_body_bytes = self.config.max_body_bytes;

		info!(
			target: "server",
			addr = %self.config.bind_addr,
			workers = self.config.workers,
			max_body_bytes = max_body_bytes,
			"Starting HTTP server"
		);

		HttpServer::new(move || {
			let json_config = web::JsonConfig::default()
				.limit(max_body_bytes)
				.error_handler(|err, _req| GatewayError::Validation(err.to_string()).into());

			App::new()
				.app_data(state.clone())
				.app_data(json_config)
				.wrap(LoggingMiddleware)
				.configure(configure_routes)
		})
		.workers(self.config.workers)
		.bind(self.config.bind_addr)
		.with_context(|| format!("Failed to bind {}", self.config.bind_addr))?
		.run()
		.await
		.context("HTTP server error")?;

		info!(target: "server", "HTTP server stopped");
		Ok(())
	}
}
