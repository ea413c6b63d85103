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

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Match lifecycle status
///
/// The well-known states are modelled as variants. Any other string is kept
/// verbatim in `Other` so that externally defined states survive a
/// load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchStatus {
	Waiting,
	Active,
	Completed,
	Cancelled,
	Other(String),
}

impl MatchStatus {
	pub fn as_str(&self) -> &str {
		match self {
			MatchStatus::Waiting => "waiting",
			MatchStatus::Active => "active",
			MatchStatus::Completed => "completed",
			MatchStatus::Cancelled => "cancelled",
			MatchStatus::Other(s) => s.as_str(),
		}
	}

	/// Whether this is one of the built-in states
	pub fn is_known(&self) -> bool {
		!matches!(self, MatchStatus::Other(_))
	}
}

impl From<String> for MatchStatus {
	fn from(s: String) -> Self {
		match s.as_str() {
			"waiting" => MatchStatus::Waiting,
			"active" => MatchStatus::Active,
			"completed" => MatchStatus::Completed,
			"cancelled" => MatchStatus::Cancelled,
			_ => MatchStatus::Other(s),
		}
	}
}

impl From<&str> for MatchStatus {
	fn from(s: &str) -> Self {
		MatchStatus::from(s.to_string())
	}
}

impl From<MatchStatus> for String {
	fn from(status: MatchStatus) -> Self {
		match status {
			MatchStatus::Other(s) => s,
			known => known.as_str().to_string(),
		}
	}
}

impl fmt::Display for MatchStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Persisted state of a single two-player match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
	/// Opaque unique identifier
	pub id: String,
	/// Display title
	pub title: String,
	/// Participant addresses in join order
	#[serde(default)]
	pub players: Vec<String>,
	/// Capacity, fixed at creation
	pub max_players: u32,
	pub status: MatchStatus,
	/// Per-player stake set at creation
	pub stake_amount: f64,
	/// Accumulated stake pool
	#[serde(default)]
	pub pool_amount: f64,
	/// Number of pool updates applied
	#[serde(default)]
	pub stake_count: u64,
	pub created_at: DateTime<Utc>,
}

impl MatchRecord {
	pub fn has_player(&self, address: &str) -> bool {
		self.players.iter().any(|p| p == address)
	}

	pub fn is_full(&self) -> bool {
		self.players.len() >= self.max_players as usize
	}
}

/// Parameters for creating a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatch {
	pub title: String,
	pub max_players: u32,
	pub stake_amount: f64,
}

/// Amount as sent by clients: either a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
	Number(f64),
	Text(String),
}

impl From<f64> for AmountInput {
	fn from(n: f64) -> Self {
		AmountInput::Number(n)
	}
}

/// Request to create a match
///
/// Fields are optional on the wire so the gateway can report exactly which
/// parameter is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
	pub title: Option<String>,
	pub max_players: Option<u32>,
	pub stake_amount: Option<AmountInput>,
}

/// Request to join a match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinMatchRequest {
	pub match_id: Option<String>,
	pub player_address: Option<String>,
}

impl JoinMatchRequest {
	pub fn new(match_id: impl Into<String>, player_address: impl Into<String>) -> Self {
		Self {
			match_id: Some(match_id.into()),
			player_address: Some(player_address.into()),
		}
	}
}

/// Request to add to a match's stake pool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePoolRequest {
	pub match_id: Option<String>,
	pub amount: Option<AmountInput>,
}

impl UpdatePoolRequest {
	pub fn new(match_id: impl Into<String>, amount: impl Into<AmountInput>) -> Self {
		Self {
			match_id: Some(match_id.into()),
			amount: Some(amount.into()),
		}
	}
}

/// Request to set a match's status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
	pub match_id: Option<String>,
	pub status: Option<String>,
}

impl UpdateStatusRequest {
	pub fn new(match_id: impl Into<String>, status: impl Into<String>) -> Self {
		Self {
			match_id: Some(match_id.into()),
			status: Some(status.into()),
		}
	}
}

/// Error body returned by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	/// Stable machine-readable error code
	pub code: String,
}
