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

use std::sync::{Mutex, PoisonError};

use lobby_sdk::types::MatchRecord;

use super::{MatchStore, StoreError};

/// In-memory match store
///
/// Holds the collection in memory only. Suitable for:
/// - Development and testing
/// - Benchmarking without I/O
pub struct MemoryMatchStore {
	matches: Mutex<Vec<MatchRecord>>,
}

impl MemoryMatchStore {
	pub fn new() -> Self {
		Self::with_matches(Vec::new())
	}

	/// Start from an existing collection
	pub fn with_matches(matches: Vec<MatchRecord>) -> Self {
		Self {
			matches: Mutex::new(matches),
		}
	}
}

impl Default for MemoryMatchStore {
	fn default() -> Self {
		Self::new()
	}
}

impl MatchStore for MemoryMatchStore {
	fn load(&self) -> Result<Vec<MatchRecord>, StoreError> {
		let matches = self.matches.lock().unwrap_or_else(PoisonError::into_inner);
		Ok(matches.clone())
	}

	fn save(&self, matches: &[MatchRecord]) -> Result<(), StoreError> {
		let mut stored = self.matches.lock().unwrap_or_else(PoisonError::into_inner);
		*stored = matches.to_vec();
		Ok(())
	}
}
