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

use std::{
	fs::{self, File},
	io::{self, Write},
	path::{Path, PathBuf},
};

use lobby_sdk::types::MatchRecord;
use tracing::debug;

use super::{MatchStore, StoreError};

/// JSON file backed match store
///
/// The collection is kept as a pretty-printed JSON array in a single file.
/// Writes go to a sibling temp file which is fsynced and then renamed over
/// the target, so readers never observe a torn file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
	path: PathBuf,
}

impl JsonFileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Store at `{dir}/{file_name}`
	pub fn in_dir(dir: impl AsRef<Path>, file_name: &str) -> Self {
		Self::new(dir.as_ref().join(file_name))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn temp_path(&self) -> PathBuf {
		let file_name = self
			.path
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_else(|| "matches".to_string());
		self.path.with_file_name(format!(".{}.tmp", file_name))
	}

	fn io_error(&self, path: &Path, source: io::Error) -> StoreError {
		StoreError::Io {
			path: path.to_path_buf(),
			source,
		}
	}
}

fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
	let mut file = File::create(path)?;
	file.write_all(data)?;
	file.sync_all()
}

impl MatchStore for JsonFileStore {
	fn load(&self) -> Result<Vec<MatchRecord>, StoreError> {
		let data = match fs::read(&self.path) {
			Ok(data) => data,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				debug!(target: "store", path = %self.path.display(), "No match file yet, starting empty");
				return Ok(Vec::new());
			}
			Err(e) => return Err(self.io_error(&self.path, e)),
		};

		let matches: Vec<MatchRecord> =
			serde_json::from_slice(&data).map_err(|source| StoreError::Malformed {
				path: self.path.clone(),
				source,
			})?;

		debug!(target: "store", count = matches.len(), "Loaded matches");
		Ok(matches)
	}

	fn save(&self, matches: &[MatchRecord]) -> Result<(), StoreError> {
		if let Some(dir) = self.path.parent()
			&& !dir.as_os_str().is_empty()
		{
			fs::create_dir_all(dir).map_err(|e| self.io_error(dir, e))?;
		}

		let mut data = serde_json::to_vec_pretty(matches)?;
		data.push(b'\n');

		// Atomic replace: write temp, fsync, rename
		let tmp_path = self.temp_path();
		if let Err(e) = write_synced(&tmp_path, &data) {
			fs::remove_file(&tmp_path).ok();
			return Err(self.io_error(&tmp_path, e));
		}
		if let Err(e) = fs::rename(&tmp_path, &self.path) {
			fs::remove_file(&tmp_path).ok();
			return Err(self.io_error(&self.path, e));
		}

		debug!(target: "store", count = matches.len(), bytes = data.len(), "Saved matches");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use lobby_sdk::types::MatchStatus;
	use tempfile::TempDir;

	fn record(id: &str) -> MatchRecord {
		MatchRecord {
			id: id.to_string(),
			title: format!("match {}", id),
			players: vec!["0xabc".to_string()],
			max_players: 2,
			status: MatchStatus::Waiting,
			stake_amount: 0.5,
			pool_amount: 0.5,
			stake_count: 1,
			created_at: "2025-03-01T12:00:00Z".parse().unwrap(),
		}
	}

	#[test]
	fn test_missing_file_loads_empty() {
		let dir = TempDir::new().unwrap();
		let store = JsonFileStore::in_dir(dir.path(), "matches.json");

		assert!(store.load().unwrap().is_empty());
		assert!(!store.path().exists());
	}

	#[test]
	fn test_save_creates_directory() {
		let dir = TempDir::new().unwrap();
		let store = JsonFileStore::new(dir.path().join("nested").join("data").join("matches.json"));

		store.save(&[record("m1")]).unwrap();

		assert!(store.path().exists());
		assert_eq!(store.load().unwrap(), vec![record("m1")]);
	}

	#[test]
	fn test_save_replaces_previous_collection() {
		let dir = TempDir::new().unwrap();
		let store = JsonFileStore::in_dir(dir.path(), "matches.json");

		store.save(&[record("m1"), record("m2")]).unwrap();
		store.save(&[record("m3")]).unwrap();

		let loaded = store.load().unwrap();
		assert_eq!(loaded.len(), 1);
		assert_eq!(loaded[0].id, "m3");
		assert!(!store.temp_path().exists());
	}

	#[test]
	fn test_file_is_human_readable_and_ordered() {
		let dir = TempDir::new().unwrap();
		let store = JsonFileStore::in_dir(dir.path(), "matches.json");

		store.save(&[record("b"), record("a")]).unwrap();

		let text = fs::read_to_string(store.path()).unwrap();
		assert!(text.contains("\"maxPlayers\": 2"));
		assert!(text.find("\"b\"").unwrap() < text.find("\"a\"").unwrap());
	}

	#[test]
	fn test_malformed_file_is_an_error() {
		let dir = TempDir::new().unwrap();
		let store = JsonFileStore::in_dir(dir.path(), "matches.json");
		fs::write(store.path(), b"{ not json").unwrap();

		let err = store.load().unwrap_err();
		assert!(matches!(err, StoreError::Malformed { .. }));
	}

	#[test]
	fn test_unwritable_location_is_an_error() {
		let dir = TempDir::new().unwrap();
		let blocker = dir.path().join("blocker");
		fs::write(&blocker, b"file, not a directory").unwrap();
		let store = JsonFileStore::new(blocker.join("matches.json"));

		let err = store.save(&[record("m1")]).unwrap_err();
		assert!(matches!(err, StoreError::Io { .. }));
	}

	#[test]
	fn test_failed_replace_leaves_no_temp_file() {
		let dir = TempDir::new().unwrap();
		let store = JsonFileStore::in_dir(dir.path(), "matches.json");
		// A non-empty directory at the target path makes the rename fail
		fs::create_dir_all(store.path().join("occupied")).unwrap();

		let err = store.save(&[record("m1")]).unwrap_err();
		assert!(matches!(err, StoreError::Io { .. }));
		assert!(!store.temp_path().exists());
	}

	#[test]
	fn test_pool_amounts_round_trip_exactly() {
		let dir = TempDir::new().unwrap();
		let store = JsonFileStore::in_dir(dir.path(), "matches.json");

		// Deterministic spread of finite values across many magnitudes
		let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
		let matches: Vec<MatchRecord> = (0..2000)
			.map(|i| {
				let mut value;
				loop {
					state = state
						.wrapping_mul(6_364_136_223_846_793_005)
						.wrapping_add(1_442_695_040_888_963_407);
					value = f64::from_bits(state);
					if value.is_finite() {
						break;
					}
				}
				let mut m = record(&format!("m{}", i));
				m.pool_amount = value;
				m.stake_amount = value.abs() / 3.0;
				m
			})
			.collect();

		store.save(&matches).unwrap();
		let loaded = store.load().unwrap();

		assert_eq!(loaded.len(), matches.len());
		for (saved, read) in matches.iter().zip(&loaded) {
			assert_eq!(saved.pool_amount.to_bits(), read.pool_amount.to_bits());
			assert_eq!(saved.stake_amount.to_bits(), read.stake_amount.to_bits());
		}
	}
}
