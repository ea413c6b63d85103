//! Integration tests for the match registry
//!
//! These tests verify:
//! - Join capacity and activation on a file-backed store
//! - Pool accumulation
//! - Persistence round trips
//! - Error propagation without side effects

use std::{fs, io, path::PathBuf, sync::Arc};

use lobby_registry::{
	JsonFileStore, MatchRecord, MatchRegistry, MatchStatus, MatchStore, NewMatch, RegistryConfig,
	RegistryError, StoreError,
};
use tempfile::TempDir;

fn seed(store: &JsonFileStore, id: &str, max_players: u32) {
	let mut matches = store.load().unwrap();
	matches.push(MatchRecord {
		id: id.to_string(),
		title: format!("seeded {}", id),
		players: Vec::new(),
		max_players,
		status: MatchStatus::Waiting,
		stake_amount: 0.25,
		pool_amount: 0.0,
		stake_count: 0,
		created_at: "2025-06-01T09:30:00Z".parse().unwrap(),
	});
	store.save(&matches).unwrap();
}

/// Serves a fixed collection but refuses every write
struct ReadOnlyStore {
	matches: Vec<MatchRecord>,
}

impl MatchStore for ReadOnlyStore {
	fn load(&self) -> Result<Vec<MatchRecord>, StoreError> {
		Ok(self.matches.clone())
	}

	fn save(&self, _matches: &[MatchRecord]) -> Result<(), StoreError> {
		Err(StoreError::Io {
			path: PathBuf::from("matches.json"),
			source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume"),
		})
	}
}

fn file_registry(dir: &TempDir) -> (Arc<JsonFileStore>, MatchRegistry) {
	let store = Arc::new(JsonFileStore::in_dir(dir.path().join("data"), "matches.json"));
	let registry = MatchRegistry::new(store.clone());
	(store, registry)
}

#[test]
fn test_two_player_match_scenario() {
	let dir = TempDir::new().unwrap();
	let (store, registry) = file_registry(&dir);
	seed(&store, "m1", 2);

	let record = registry.join("m1", "A").unwrap();
	assert_eq!(record.players, vec!["A"]);
	assert_eq!(record.status, MatchStatus::Waiting);

	let record = registry.join("m1", "B").unwrap();
	assert_eq!(record.players, vec!["A", "B"]);
	assert_eq!(record.status, MatchStatus::Active);

	assert!(matches!(
		registry.join("m1", "C"),
		Err(RegistryError::MatchFull(_))
	));

	// A fresh registry over the same file sees the activated match
	let reopened = MatchRegistry::new(Arc::new(JsonFileStore::new(store.path())));
	let record = reopened.get("m1").unwrap();
	assert_eq!(record.status, MatchStatus::Active);
	assert_eq!(record.players, vec!["A", "B"]);
}

#[test]
fn test_pool_scenario() {
	let dir = TempDir::new().unwrap();
	let (store, registry) = file_registry(&dir);
	seed(&store, "m2", 2);

	let record = registry.update_pool("m2", 0.5).unwrap();
	assert_eq!((record.pool_amount, record.stake_count), (0.5, 1));

	let record = registry.update_pool("m2", 0.25).unwrap();
	assert_eq!((record.pool_amount, record.stake_count), (0.75, 2));
}

#[test]
fn test_pool_is_monotonic_for_nonnegative_amounts() {
	let dir = TempDir::new().unwrap();
	let (store, registry) = file_registry(&dir);
	seed(&store, "m1", 2);

	let amounts = [0.0, 1.0, 0.5, 2.0, 0.25, 0.0, 4.0];
	let mut previous = 0.0;
	for amount in amounts {
		let record = registry.update_pool("m1", amount).unwrap();
		assert!(record.pool_amount >= previous);
		previous = record.pool_amount;
	}

	let record = registry.get("m1").unwrap();
	assert_eq!(record.pool_amount, amounts.iter().sum::<f64>());
	assert_eq!(record.stake_count, amounts.len() as u64);
}

#[test]
fn test_capacity_never_exceeded() {
	let dir = TempDir::new().unwrap();
	let (store, registry) = file_registry(&dir);
	seed(&store, "m1", 3);

	for i in 0..10 {
		let _ = registry.join("m1", &format!("player-{}", i));
		let record = registry.get("m1").unwrap();
		assert!(record.players.len() <= record.max_players as usize);
	}

	let record = registry.get("m1").unwrap();
	assert_eq!(record.players, vec!["player-0", "player-1", "player-2"]);
	assert_eq!(record.status, MatchStatus::Active);
}

#[test]
fn test_status_visible_after_update() {
	let dir = TempDir::new().unwrap();
	let (store, registry) = file_registry(&dir);
	seed(&store, "m1", 2);

	registry.update_status("m1", "cancelled").unwrap();

	assert_eq!(registry.get("m1").unwrap().status, MatchStatus::Cancelled);
	assert!(matches!(
		registry.join("m1", "A"),
		Err(RegistryError::MatchNotJoinable { .. })
	));
}

#[test]
fn test_save_of_loaded_collection_is_noop() {
	let dir = TempDir::new().unwrap();
	let (store, registry) = file_registry(&dir);
	seed(&store, "m1", 2);
	seed(&store, "m2", 4);
	registry.join("m1", "A").unwrap();
	registry.update_pool("m2", 1.5).unwrap();
	registry.update_status("m2", "custom-state").unwrap();

	let before = store.load().unwrap();
	store.save(&before).unwrap();
	let after = store.load().unwrap();

	assert_eq!(before, after);
	assert_eq!(after[1].status, MatchStatus::Other("custom-state".to_string()));
}

#[test]
fn test_list_on_fresh_location_is_empty() {
	let dir = TempDir::new().unwrap();
	let (store, registry) = file_registry(&dir);

	assert!(registry.list().unwrap().is_empty());
	assert!(!store.path().exists());
}

#[test]
fn test_create_persists_to_file() {
	let dir = TempDir::new().unwrap();
	let (store, registry) = file_registry(&dir);

	let created = registry
		.create(NewMatch {
			title: "Checkers night".to_string(),
			max_players: 2,
			stake_amount: 0.1,
		})
		.unwrap();

	let stored = store.load().unwrap();
	assert_eq!(stored, vec![created.clone()]);
	assert_eq!(registry.join(&created.id, "A").unwrap().players, vec!["A"]);
}

#[test]
fn test_malformed_store_fails_without_changes() {
	let dir = TempDir::new().unwrap();
	let (store, registry) = file_registry(&dir);
	fs::create_dir_all(store.path().parent().unwrap()).unwrap();
	fs::write(store.path(), b"[{\"id\": 7}]").unwrap();

	assert!(matches!(
		registry.join("m1", "A"),
		Err(RegistryError::Store(StoreError::Malformed { .. }))
	));
	assert!(matches!(
		registry.list(),
		Err(RegistryError::Store(StoreError::Malformed { .. }))
	));
	assert_eq!(fs::read(store.path()).unwrap(), b"[{\"id\": 7}]");
}

#[test]
fn test_rejected_operations_leave_file_untouched() {
	let dir = TempDir::new().unwrap();
	let (store, registry) = file_registry(&dir);
	seed(&store, "m1", 1);
	registry.join("m1", "A").unwrap();
	let before = fs::read(store.path()).unwrap();

	assert!(registry.join("m1", "B").is_err());
	assert!(registry.update_pool("m1", f64::NAN).is_err());
	assert!(registry.update_status("m1", " ").is_err());
	assert!(registry.get("missing").is_err());

	assert_eq!(fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_failed_save_surfaces_store_error() {
	let dir = TempDir::new().unwrap();
	let (store, _) = file_registry(&dir);
	seed(&store, "m1", 2);
	let seeded = store.load().unwrap();
	let registry = MatchRegistry::new(Arc::new(ReadOnlyStore { matches: seeded.clone() }));

	assert!(matches!(
		registry.join("m1", "A"),
		Err(RegistryError::Store(StoreError::Io { .. }))
	));
	assert!(matches!(
		registry.update_pool("m1", 1.0),
		Err(RegistryError::Store(StoreError::Io { .. }))
	));
	assert!(matches!(
		registry.update_status("m1", "active"),
		Err(RegistryError::Store(StoreError::Io { .. }))
	));
	let err = registry
		.create(NewMatch {
			title: "unsaved".to_string(),
			max_players: 2,
			stake_amount: 0.0,
		})
		.unwrap_err();
	assert_eq!(err.code(), "STORE_ERROR");

	assert_eq!(registry.get("m1").unwrap(), seeded[0]);
	assert_eq!(registry.list().unwrap(), seeded);
}

#[test]
fn test_pool_overflow_keeps_store_readable() {
	let dir = TempDir::new().unwrap();
	let (store, registry) = file_registry(&dir);
	seed(&store, "a", 2);
	seed(&store, "b", 2);

	registry.update_pool("a", f64::MAX).unwrap();
	assert!(matches!(
		registry.update_pool("a", f64::MAX),
		Err(RegistryError::InvalidAmount(_))
	));

	let text = fs::read_to_string(store.path()).unwrap();
	assert!(!text.contains("null"));
	assert_eq!(registry.get("a").unwrap().pool_amount, f64::MAX);
	assert_eq!(registry.join("b", "A").unwrap().players, vec!["A"]);
}

#[test]
fn test_pool_total_matches_stored_value() {
	let dir = TempDir::new().unwrap();
	let (store, registry) = file_registry(&dir);
	seed(&store, "m1", 2);

	for amount in [0.1, 1e-18, 2.418114807370389e-18, 0.7, 9.168360343140306e-14, 3.3] {
		let returned = registry.update_pool("m1", amount).unwrap();
		assert_eq!(returned, store.load().unwrap()[0]);
	}
}

#[test]
fn test_registry_from_config() {
	let dir = TempDir::new().unwrap();
	let config = RegistryConfig {
		data_dir: dir.path().join("lobby"),
		..RegistryConfig::default()
	};
	let registry = MatchRegistry::from_config(&config);

	let created = registry
		.create(NewMatch {
			title: "configured".to_string(),
			max_players: 2,
			stake_amount: 0.0,
		})
		.unwrap();

	assert!(config.store_path().exists());
	assert_eq!(registry.get(&created.id).unwrap(), created);
}
