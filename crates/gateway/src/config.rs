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

use std::{env, net::SocketAddr};

use anyhow::{Context, Result};

/// Log directory and file prefix for this service
pub const LOG_COMPONENT_NAME: &str = "gateway";

// Server configuration constants
/// Default HTTP server bind address (can be overridden by GATEWAY_BIND_ADDR environment variable)
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default maximum HTTP request body size in bytes (can be overridden by GATEWAY_MAX_BODY_BYTES)
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Environment variable naming an optional registry config file
pub const REGISTRY_CONFIG_ENV: &str = "LOBBY_CONFIG";

#[derive(Debug, Clone)]
pub struct GatewayRuntimeConfig {
	pub bind_addr: SocketAddr,
	pub workers: usize,
	pub max_body_bytes: usize,
}

impl GatewayRuntimeConfig {
	pub fn from_env() -> Result<Self> {
		dotenv::dotenv().ok();

		let bind_addr_str =
			env::var("GATEWAY_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
		let bind_addr = bind_addr_str
			.parse()
			.with_context(|| format!("Invalid bind address: {}", bind_addr_str))?;

		let workers = env::var("GATEWAY_WORKERS")
			.ok()
			.and_then(|w| w.parse().ok())
			.filter(|&w: &usize| w > 0)
			.unwrap_or_else(num_cpus::get);

		let max_body_bytes = env::var("GATEWAY_MAX_BODY_BYTES")
			.ok()
			.and_then(|v| v.parse().ok())
			.unwrap_or(DEFAULT_MAX_BODY_BYTES);

		Ok(Self {
			bind_addr,
			workers,
			max_body_bytes,
		})
	}
}
