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

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::registry::RegistryPolicy;

// Logging configuration constants
/// Default log level (can be overridden by RUST_LOG environment variable)
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default console output enabled (can be overridden by LOG_TO_CONSOLE environment variable)
pub const DEFAULT_LOG_TO_CONSOLE: bool = false;

// Store configuration constants
/// Default directory holding the match file (can be overridden by LOBBY_DATA_DIR)
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default match file name (can be overridden by LOBBY_FILE_NAME)
pub const DEFAULT_FILE_NAME: &str = "matches.json";

/// How status updates are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTransitions {
	/// Any non-empty status string is accepted
	#[default]
	Permissive,
	/// Only known states along the transition table are accepted
	Strict,
}

/// Match registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
	/// Directory holding the match file, created on first save
	pub data_dir: PathBuf,
	/// Match file name inside `data_dir`
	pub file_name: String,
	/// Status update checking mode
	pub status_transitions: StatusTransitions,
	/// Whether pool updates may carry negative amounts
	pub allow_negative_pool_delta: bool,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			data_dir: PathBuf::from(DEFAULT_DATA_DIR),
			file_name: DEFAULT_FILE_NAME.to_string(),
			status_transitions: StatusTransitions::default(),
			allow_negative_pool_delta: true,
		}
	}
}

impl RegistryConfig {
	/// Load configuration from environment variables
	///
	/// Unset keys take their defaults; a set but invalid value is an error.
	pub fn from_env() -> Result<Self, config::ConfigError> {
		Self::from_environment(config::Environment::with_prefix("LOBBY"))
	}

	fn from_environment(env: config::Environment) -> Result<Self, config::ConfigError> {
		let cfg = config::Config::builder().add_source(env).build()?;

		cfg.try_deserialize()
	}

	/// Load configuration from file
	pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
		let cfg = config::Config::builder()
			.add_source(config::File::with_name(path))
			.add_source(config::Environment::with_prefix("LOBBY"))
			.build()?;

		cfg.try_deserialize()
	}

	/// Full path of the match file
	pub fn store_path(&self) -> PathBuf {
		self.data_dir.join(&self.file_name)
	}

	pub fn policy(&self) -> RegistryPolicy {
		RegistryPolicy {
			status_transitions: self.status_transitions,
			allow_negative_pool_delta: self.allow_negative_pool_delta,
		}
	}
}
