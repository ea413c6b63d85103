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

use lobby_sdk::types::MatchStatus;

use super::RegistryError;
use crate::config::StatusTransitions;

/// Switches for the behaviours the match model leaves open
///
/// The default mirrors the historical permissive behaviour: any status
/// string is accepted and pool updates may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryPolicy {
	pub status_transitions: StatusTransitions,
	pub allow_negative_pool_delta: bool,
}

impl Default for RegistryPolicy {
	fn default() -> Self {
		Self {
			status_transitions: StatusTransitions::Permissive,
			allow_negative_pool_delta: true,
		}
	}
}

impl RegistryPolicy {
	/// Closed transition table and non-negative pool deltas
	pub fn strict() -> Self {
		Self {
			status_transitions: StatusTransitions::Strict,
			allow_negative_pool_delta: false,
		}
	}

	pub(crate) fn check_pool_delta(&self, amount: f64) -> Result<(), RegistryError> {
		if !amount.is_finite() {
			return Err(RegistryError::InvalidAmount(amount.to_string()));
		}
		if amount < 0.0 && !self.allow_negative_pool_delta {
			return Err(RegistryError::InvalidAmount(format!(
				"{} (negative pool updates are disabled)",
				amount
			)));
		}
		Ok(())
	}

	pub(crate) fn check_status(&self, status: &MatchStatus) -> Result<(), RegistryError> {
		if self.status_transitions == StatusTransitions::Strict && !status.is_known() {
			return Err(RegistryError::Validation(format!(
				"unknown status: {}",
				status
			)));
		}
		Ok(())
	}

	pub(crate) fn check_transition(
		&self,
		from: &MatchStatus,
		to: &MatchStatus,
	) -> Result<(), RegistryError> {
		match self.status_transitions {
			StatusTransitions::Permissive => Ok(()),
			StatusTransitions::Strict if from == to || is_allowed_transition(from, to) => Ok(()),
			StatusTransitions::Strict => Err(RegistryError::InvalidTransition {
				from: from.clone(),
				to: to.clone(),
			}),
		}
	}
}

/// Transition table enforced in strict mode
pub fn is_allowed_transition(from: &MatchStatus, to: &MatchStatus) -> bool {
	use MatchStatus::*;

	matches!(
		(from, to),
		(Waiting, Active) | (Waiting, Cancelled) | (Active, Completed) | (Active, Cancelled)
	)
}
