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

//! Lobby Gateway Service
//!
//! HTTP front for the match registry. Each route maps onto one registry
//! operation, and registry errors map onto HTTP statuses:
//! - missing or malformed parameters, unknown matches on mutation,
//!   full or closed matches, bad amounts: 400
//! - unknown match on lookup: 404
//! - persistence failures: 500
//!
//! The gateway holds no match state of its own; all of it lives in the
//! registry's store.

mod config;
mod handlers;
mod middleware;
mod routes;
mod server;

use std::{env, sync::Arc};

use anyhow::{Context, Result};
use lobby_registry::{MatchRegistry, RegistryConfig, logging::init_logging};
use tracing::info;

use crate::config::{GatewayRuntimeConfig, LOG_COMPONENT_NAME, REGISTRY_CONFIG_ENV};
use server::GatewayServer;

#[actix_rt::main]
async fn main() -> Result<()> {
	// Initialize logging first
	init_logging(LOG_COMPONENT_NAME)?;

	let runtime_config = GatewayRuntimeConfig::from_env()?;

	let registry_config = match env::var(REGISTRY_CONFIG_ENV) {
		Ok(path) => RegistryConfig::from_file(&path)
			.with_context(|| format!("Failed to load registry config from {}", path))?,
		Err(_) => RegistryConfig::from_env().context("Invalid LOBBY_* registry configuration")?,
	};

	info!(target: "server", "Starting Lobby Gateway on {}", runtime_config.bind_addr);
	info!(target: "server", "Match store: {}", registry_config.store_path().display());

	let registry = Arc::new(MatchRegistry::from_config(&registry_config));

	GatewayServer::new(registry, runtime_config)
		.serve()
		.await
		.context("Failed to run gateway server")?;

	Ok(())
}
