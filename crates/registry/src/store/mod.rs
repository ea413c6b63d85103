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

mod file;
mod memory;

use std::{io, path::PathBuf};

use lobby_sdk::types::MatchRecord;
use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryMatchStore;

/// Error types for match store operations
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("I/O error on {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("Malformed match data in {}: {source}", path.display())]
	Malformed {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
	#[error("Failed to serialize matches: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Match Store trait - durable home of the full match collection
///
/// The store deals in whole collections only. It has no notion of a
/// single record, which keeps record-level semantics (lookup, validation,
/// mutation) in the registry and lets the backing store be swapped for a
/// transactional one without touching registry logic.
///
/// Contract:
/// - `load` on a never-written store returns an empty collection
/// - `save` replaces the previous collection as one unit; a concurrent
///   `load` sees either the old or the new collection, never a mix
/// - `load` right after `save(c)` returns a collection equal to `c`
pub trait MatchStore: Send + Sync {
	/// Load the full collection
	fn load(&self) -> Result<Vec<MatchRecord>, StoreError>;

	/// Persist the full collection, replacing what was stored before
	fn save(&self, matches: &[MatchRecord]) -> Result<(), StoreError>;
}
