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

use actix_web::web;

use crate::handlers;

/// Configure API routes for the gateway
///
/// - `/api/v1/matches` - Match listing, creation and lookup
/// - `/api/v1/matches/{join,pool,status}` - Match mutations
/// - `/health` - Health check endpoint
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
	cfg.service(
		web::scope("/api/v1")
			.route("/matches", web::get().to(handlers::list_matches))
			.route("/matches", web::post().to(handlers::create_match))
			.route("/matches/join", web::post().to(handlers::join_match))
			.route("/matches/pool", web::post().to(handlers::update_pool))
			.route("/matches/status", web::post().to(handlers::update_status))
			.route("/matches/{match_id}", web::get().to(handlers::get_match)),
	)
	.route("/health", web::get().to(handlers::health));
}
