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

//! Lobby Match Registry
//!
//! This crate owns the persistent collection of match records and the
//! operations that mutate it. Every mutation reads the whole collection,
//! changes one record and writes the whole collection back, so mutations
//! are serialized behind a single process-wide lock.
//!
//! Architecture:
//! - `MatchStore`: all-or-nothing load/save of the full collection
//! - `JsonFileStore`: human-readable JSON file with atomic replace
//! - `MatchRegistry`: join, pool and status updates under the write lock
//! - `RegistryPolicy`: switches for status transitions and negative pool deltas

pub mod config;
pub mod logging;
pub mod registry;
pub mod store;

pub use config::{RegistryConfig, StatusTransitions};
pub use lobby_sdk::types::{MatchRecord, MatchStatus, NewMatch};
pub use registry::{MatchRegistry, RegistryError, RegistryPolicy, parse_amount};
pub use store::{JsonFileStore, MatchStore, MemoryMatchStore, StoreError};
