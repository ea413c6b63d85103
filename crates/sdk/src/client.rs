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

use crate::types::{
	CreateMatchRequest, ErrorResponse, JoinMatchRequest, MatchRecord, NewMatch, UpdatePoolRequest,
	UpdateStatusRequest,
};
use reqwest::{Client as ReqwestClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Network error: {0}")]
	Network(String),
	#[error("Serialization error: {0}")]
	Serialization(String),
	#[error("Server error ({status}): {message}")]
	Server {
		status: StatusCode,
		/// Stable error code reported by the gateway, if any
		code: Option<String>,
		message: String,
	},
}

/// Client for the lobby gateway
///
/// This is an async client interface using reqwest for HTTP communication.
pub struct Client {
	base_url: String,
	client: ReqwestClient,
}

impl Client {
	/// Create a new client with the given base URL
	pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
		Self::with_config(base_url, Duration::from_secs(30))
	}

	/// Create a new client with a custom request timeout
	pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

		Ok(Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			client,
		})
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	/// List every match
	pub async fn list_matches(&self) -> Result<Vec<MatchRecord>, ClientError> {
		self.send(self.client.get(self.url("/api/v1/matches"))).await
	}

	/// Fetch a single match by id
	pub async fn get_match(&self, match_id: &str) -> Result<MatchRecord, ClientError> {
		let path = format!("/api/v1/matches/{}", match_id);
		self.send(self.client.get(self.url(&path))).await
	}

	/// Create a match and return the stored record
	pub async fn create_match(&self, new_match: NewMatch) -> Result<MatchRecord, ClientError> {
		let request = CreateMatchRequest {
			title: Some(new_match.title),
			max_players: Some(new_match.max_players),
			stake_amount: Some(new_match.stake_amount.into()),
		};
		self.send(self.client.post(self.url("/api/v1/matches")).json(&request))
			.await
	}

	/// Join a match as `player_address`
	pub async fn join_match(
		&self,
		match_id: &str,
		player_address: &str,
	) -> Result<MatchRecord, ClientError> {
		let request = JoinMatchRequest::new(match_id, player_address);
		self.send(self.client.post(self.url("/api/v1/matches/join")).json(&request))
			.await
	}

	/// Add `amount` to the match's stake pool
	pub async fn update_pool(&self, match_id: &str, amount: f64) -> Result<MatchRecord, ClientError> {
		let request = UpdatePoolRequest::new(match_id, amount);
		self.send(self.client.post(self.url("/api/v1/matches/pool")).json(&request))
			.await
	}

	/// Set the match status
	pub async fn update_status(
		&self,
		match_id: &str,
		status: &str,
	) -> Result<MatchRecord, ClientError> {
		let request = UpdateStatusRequest::new(match_id, status);
		self.send(self.client.post(self.url("/api/v1/matches/status")).json(&request))
			.await
	}

	/// Check gateway health
	pub async fn health_check(&self) -> Result<bool, ClientError> {
		let response = self
			.client
			.get(self.url("/health"))
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		Ok(response.status().is_success())
	}

	async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
		let response = request
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		let status = response.status();
		if !status.is_success() {
			let body = response
				.text()
				.await
				.unwrap_or_else(|_| format!("HTTP {}", status));
			return Err(server_error(status, &body));
		}

		response
			.json()
			.await
			.map_err(|e| ClientError::Serialization(format!("Failed to parse response: {}", e)))
	}
}

fn server_error(status: StatusCode, body: &str) -> ClientError {
	match serde_json::from_str::<ErrorResponse>(body) {
		Ok(err) => ClientError::Server {
			status,
			code: Some(err.code),
			message: err.error,
		},
		Err(_) => ClientError::Server {
			status,
			code: None,
			message: body.to_string(),
		},
	}
}
