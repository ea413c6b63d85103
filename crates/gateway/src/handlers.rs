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

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use lobby_registry::{MatchRegistry, RegistryError, parse_amount};
use lobby_sdk::types::{
	AmountInput, CreateMatchRequest, ErrorResponse, JoinMatchRequest, NewMatch, UpdatePoolRequest,
	UpdateStatusRequest,
};
use thiserror::Error;

use crate::server::GatewayState;

/// Error types for gateway operations
#[derive(Debug, Error)]
pub enum GatewayError {
	#[error(transparent)]
	Registry(#[from] RegistryError),
	/// Lookup of a single match that does not exist
	#[error("Match not found: {0}")]
	NotFound(String),
	#[error("Validation error: {0}")]
	Validation(String),
	#[error("Internal error: {0}")]
	Internal(String),
}

impl GatewayError {
	fn code(&self) -> &'static str {
		match self {
			GatewayError::Registry(e) => e.code(),
			GatewayError::NotFound(_) => "NOT_FOUND",
			GatewayError::Validation(_) => "VALIDATION_ERROR",
			GatewayError::Internal(_) => "INTERNAL_ERROR",
		}
	}
}

impl actix_web::ResponseError for GatewayError {
	fn status_code(&self) -> StatusCode {
		match self {
			GatewayError::Registry(RegistryError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
			GatewayError::Registry(_) => StatusCode::BAD_REQUEST,
			GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
			GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
			GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code()).json(ErrorResponse {
			error: self.to_string(),
			code: self.code().to_string(),
		})
	}
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, GatewayError> {
	value.ok_or_else(|| GatewayError::Validation(format!("{} is required", field)))
}

fn amount(value: AmountInput) -> Result<f64, GatewayError> {
	match value {
		AmountInput::Number(n) => Ok(n),
		AmountInput::Text(s) => Ok(parse_amount(&s)?),
	}
}

/// Run a registry call on the blocking pool; store I/O is synchronous
async fn call_registry<T, F>(state: &GatewayState, op: F) -> Result<T, GatewayError>
where
	F: FnOnce(&MatchRegistry) -> Result<T, RegistryError> + Send + 'static,
	T: Send + 'static,
{
	let registry: Arc<MatchRegistry> = state.registry.clone();
	web::block(move || op(&registry))
		.await
		.map_err(|e| GatewayError::Internal(e.to_string()))?
		.map_err(GatewayError::from)
}

/// Health check endpoint
pub async fn health() -> impl Responder {
	HttpResponse::Ok().json(serde_json::json!({
		"status": "ok",
		"service": "lobby-gateway"
	}))
}

/// List every match
pub async fn list_matches(state: web::Data<GatewayState>) -> Result<HttpResponse, GatewayError> {
	let matches = call_registry(&state, |registry| registry.list()).await?;
	Ok(HttpResponse::Ok().json(matches))
}

/// Fetch one match; a missing match is a 404 here rather than a 400
pub async fn get_match(
	state: web::Data<GatewayState>,
	path: web::Path<String>,
) -> Result<HttpResponse, GatewayError> {
	let match_id = path.into_inner();

	let record = call_registry(&state, move |registry| registry.get(&match_id))
		.await
		.map_err(|e| match e {
			GatewayError::Registry(RegistryError::NotFound(id)) => GatewayError::NotFound(id),
			other => other,
		})?;

	Ok(HttpResponse::Ok().json(record))
}

/// Create a match
pub async fn create_match(
	state: web::Data<GatewayState>,
	request: web::Json<CreateMatchRequest>,
) -> Result<HttpResponse, GatewayError> {
	let request = request.into_inner();
	let new_match = NewMatch {
		title: required("title", request.title)?,
		max_players: required("maxPlayers", request.max_players)?,
		stake_amount: amount(required("stakeAmount", request.stake_amount)?)?,
	};

	let record = call_registry(&state, move |registry| registry.create(new_match)).await?;
	Ok(HttpResponse::Created().json(record))
}

/// Join a match
pub async fn join_match(
	state: web::Data<GatewayState>,
	request: web::Json<JoinMatchRequest>,
) -> Result<HttpResponse, GatewayError> {
	let request = request.into_inner();
	let match_id = required("matchId", request.match_id)?;
	let player = required("playerAddress", request.player_address)?;

	let record = call_registry(&state, move |registry| registry.join(&match_id, &player)).await?;
	Ok(HttpResponse::Ok().json(record))
}

/// Add to a match's stake pool
pub async fn update_pool(
	state: web::Data<GatewayState>,
	request: web::Json<UpdatePoolRequest>,
) -> Result<HttpResponse, GatewayError> {
	let request = request.into_inner();
	let match_id = required("matchId", request.match_id)?;
	let delta = amount(required("amount", request.amount)?)?;

	let record =
		call_registry(&state, move |registry| registry.update_pool(&match_id, delta)).await?;
	Ok(HttpResponse::Ok().json(record))
}

/// Set a match's status
pub async fn update_status(
	state: web::Data<GatewayState>,
	request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, GatewayError> {
	let request = request.into_inner();
	let match_id = required("matchId", request.match_id)?;
	let status = required("status", request.status)?;

	let record =
		call_registry(&state, move |registry| registry.update_status(&match_id, &status)).await?;
	Ok(HttpResponse::Ok().json(record))
}
