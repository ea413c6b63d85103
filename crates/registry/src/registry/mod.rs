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

mod policy;

pub use policy::{RegistryPolicy, is_allowed_transition};

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use lobby_sdk::types::{MatchRecord, MatchStatus, NewMatch};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
	config::RegistryConfig,
	store::{JsonFileStore, MatchStore, StoreError},
};

/// Error types for match registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
	#[error("Match not found: {0}")]
	NotFound(String),
	#[error("Match is full: {0}")]
	MatchFull(String),
	#[error("Match {id} is not joinable (status: {status})")]
	MatchNotJoinable { id: String, status: MatchStatus },
	#[error("Invalid amount: {0}")]
	InvalidAmount(String),
	#[error("Validation error: {0}")]
	Validation(String),
	#[error("Invalid status transition: {from} -> {to}")]
	InvalidTransition { from: MatchStatus, to: MatchStatus },
	#[error("Store error: {0}")]
	Store(#[from] StoreError),
}

impl RegistryError {
	/// Stable machine-readable code for this error
	pub fn code(&self) -> &'static str {
		match self {
			RegistryError::NotFound(_) => "NOT_FOUND",
			RegistryError::MatchFull(_) => "MATCH_FULL",
			RegistryError::MatchNotJoinable { .. } => "MATCH_NOT_JOINABLE",
			RegistryError::InvalidAmount(_) => "INVALID_AMOUNT",
			RegistryError::Validation(_) => "VALIDATION_ERROR",
			RegistryError::InvalidTransition { .. } => "INVALID_TRANSITION",
			RegistryError::Store(_) => "STORE_ERROR",
		}
	}
}

/// Parse a client-supplied amount into a finite number
pub fn parse_amount(raw: &str) -> Result<f64, RegistryError> {
	raw.trim()
		.parse::<f64>()
		.ok()
		.filter(|v| v.is_finite())
		.ok_or_else(|| RegistryError::InvalidAmount(raw.to_string()))
}

/// Reject blank input; ids are opaque, so the value is returned as given
fn require<'a>(field: &str, value: &'a str) -> Result<&'a str, RegistryError> {
	if value.trim().is_empty() {
		return Err(RegistryError::Validation(format!("{} is required", field)));
	}
	Ok(value)
}

/// JSON has no representation for NaN or infinity, so such a record would
/// be written as `null` and make the whole collection unreadable
fn check_finite(record: &MatchRecord) -> Result<(), RegistryError> {
	for value in [record.pool_amount, record.stake_amount] {
		if !value.is_finite() {
			return Err(RegistryError::InvalidAmount(format!(
				"non-finite amount on {}",
				record.id
			)));
		}
	}
	Ok(())
}

/// Match Registry - record-level operations over the whole-collection store
///
/// Every mutating operation runs the same sequence under one process-wide
/// write lock:
/// 1. Load the full collection
/// 2. Locate the record by id
/// 3. Validate the operation's preconditions
/// 4. Apply the mutation in memory
/// 5. Save the full collection
///
/// Validation failures return before anything is saved, so a rejected
/// operation never leaves a partial change behind. Reads (`get`, `list`)
/// skip the lock and see whichever collection was last fully saved.
///
/// The lock only serializes writers within this process. Running several
/// processes against the same store needs a cross-process lock or a
/// transactional `MatchStore`.
pub struct MatchRegistry {
	store: Arc<dyn MatchStore>,
	policy: RegistryPolicy,
	write_lock: Mutex<()>,
}

impl MatchRegistry {
	/// Create a registry with the default permissive policy
	pub fn new(store: Arc<dyn MatchStore>) -> Self {
		Self::with_policy(store, RegistryPolicy::default())
	}

	pub fn with_policy(store: Arc<dyn MatchStore>, policy: RegistryPolicy) -> Self {
		Self {
			store,
			policy,
			write_lock: Mutex::new(()),
		}
	}

	/// Create a registry backed by the JSON file named in `config`
	pub fn from_config(config: &RegistryConfig) -> Self {
		let store = JsonFileStore::new(config.store_path());
		info!(
			target: "registry",
			path = %store.path().display(),
			status_transitions = ?config.status_transitions,
			allow_negative_pool_delta = config.allow_negative_pool_delta,
			"Match registry configured"
		);
		Self::with_policy(Arc::new(store), config.policy())
	}

	pub fn policy(&self) -> &RegistryPolicy {
		&self.policy
	}

	/// All matches in stored order
	pub fn list(&self) -> Result<Vec<MatchRecord>, RegistryError> {
		Ok(self.store.load()?)
	}

	/// A single match by id
	pub fn get(&self, match_id: &str) -> Result<MatchRecord, RegistryError> {
		let match_id = require("matchId", match_id)?;
		self.store
			.load()?
			.into_iter()
			.find(|m| m.id == match_id)
			.ok_or_else(|| RegistryError::NotFound(match_id.to_string()))
	}

	/// Create a new waiting match with a fresh id
	pub fn create(&self, new_match: NewMatch) -> Result<MatchRecord, RegistryError> {
		let title = require("title", &new_match.title)?.trim().to_string();
		if new_match.max_players == 0 {
			return Err(RegistryError::Validation(
				"maxPlayers must be at least 1".to_string(),
			));
		}
		if !new_match.stake_amount.is_finite() || new_match.stake_amount < 0.0 {
			return Err(RegistryError::InvalidAmount(
				new_match.stake_amount.to_string(),
			));
		}

		let record = MatchRecord {
			id: Uuid::new_v4().to_string(),
			title,
			players: Vec::new(),
			max_players: new_match.max_players,
			status: MatchStatus::Waiting,
			stake_amount: new_match.stake_amount,
			pool_amount: 0.0,
			stake_count: 0,
			created_at: Utc::now(),
		};

		let _guard = self.lock();
		let mut matches = self.store.load()?;
		matches.push(record.clone());
		self.store.save(&matches)?;

		info!(
			target: "registry",
			match_id = %record.id,
			max_players = record.max_players,
			stake_amount = record.stake_amount,
			"Match created"
		);
		Ok(record)
	}

	/// Add `player_address` to a waiting match
	///
	/// Joining a match the player is already in succeeds without changes.
	/// Filling the last seat moves the match to `active`.
	pub fn join(&self, match_id: &str, player_address: &str) -> Result<MatchRecord, RegistryError> {
		let match_id = require("matchId", match_id)?;
		let player = require("playerAddress", player_address)?;

		let record = self.mutate(match_id, |record| {
			if record.has_player(player) {
				return Ok(false);
			}
			if record.is_full() {
				return Err(RegistryError::MatchFull(record.id.clone()));
			}
			if record.status != MatchStatus::Waiting {
				return Err(RegistryError::MatchNotJoinable {
					id: record.id.clone(),
					status: record.status.clone(),
				});
			}

			record.players.push(player.to_string());
			if record.is_full() {
				record.status = MatchStatus::Active;
			}
			Ok(true)
		})?;

		info!(
			target: "registry",
			match_id = %record.id,
			player = %player,
			players = record.players.len(),
			status = %record.status,
			"Player joined"
		);
		Ok(record)
	}

	/// Add `amount` to the stake pool and count the update
	pub fn update_pool(&self, match_id: &str, amount: f64) -> Result<MatchRecord, RegistryError> {
		let match_id = require("matchId", match_id)?;
		self.policy.check_pool_delta(amount)?;

		let record = self.mutate(match_id, |record| {
			let next = record.pool_amount + amount;
			if !next.is_finite() {
				return Err(RegistryError::InvalidAmount(format!(
					"pool of {} would overflow by {}",
					record.id, amount
				)));
			}
			record.pool_amount = next;
			record.stake_count += 1;
			Ok(true)
		})?;

		info!(
			target: "registry",
			match_id = %record.id,
			amount = amount,
			pool_amount = record.pool_amount,
			stake_count = record.stake_count,
			"Stake pool updated"
		);
		Ok(record)
	}

	/// Set the match status
	pub fn update_status(&self, match_id: &str, status: &str) -> Result<MatchRecord, RegistryError> {
		let match_id = require("matchId", match_id)?;
		let status = MatchStatus::from(require("status", status)?.trim());
		self.policy.check_status(&status)?;

		let record = self.mutate(match_id, |record| {
			self.policy.check_transition(&record.status, &status)?;
			if record.status == status {
				return Ok(false);
			}
			record.status = status.clone();
			Ok(true)
		})?;

		info!(
			target: "registry",
			match_id = %record.id,
			status = %record.status,
			"Match status updated"
		);
		Ok(record)
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
		// The guard protects no data, so a poisoned lock is still usable
		self.write_lock
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
	}

	/// Load, apply `apply` to one record, save
	///
	/// `apply` validates before it mutates and reports whether it changed
	/// anything; unchanged collections are not rewritten.
	fn mutate<F>(&self, match_id: &str, apply: F) -> Result<MatchRecord, RegistryError>
	where
		F: FnOnce(&mut MatchRecord) -> Result<bool, RegistryError>,
	{
		let _guard = self.lock();

		let mut matches = self.store.load()?;
		let record = matches
			.iter_mut()
			.find(|m| m.id == match_id)
			.ok_or_else(|| RegistryError::NotFound(match_id.to_string()))?;

		let changed = apply(record)?;
		check_finite(record)?;
		let updated = record.clone();

		if changed {
			self.store.save(&matches)?;
		} else {
			debug!(target: "registry", match_id = %match_id, "No change, skipping save");
		}

		Ok(updated)
	}
}
