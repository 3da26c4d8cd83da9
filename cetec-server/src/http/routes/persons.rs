//! Person endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::{NewPerson, PersonProfile};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, PersonId};
use crate::http::server::AppState;

/// Create person request. Every field is required; unknown fields are
/// ignored.
#[derive(Debug, Deserialize)]
pub struct CreatePersonRequest {
    pub name: String,
    pub age: i32,
    pub phone_number: String,
    pub city: String,
    pub state: String,
    pub street1: String,
    pub street2: String,
    pub zip_code: String,
}

impl From<CreatePersonRequest> for NewPerson {
    fn from(r: CreatePersonRequest) -> Self {
        Self {
            name: r.name,
            age: r.age,
            phone_number: r.phone_number,
            city: r.city,
            state: r.state,
            street1: r.street1,
            street2: r.street2,
            zip_code: r.zip_code,
        }
    }
}

/// Person profile response
#[derive(Debug, Serialize)]
pub struct PersonInfoResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub phone_number: String,
    pub city: String,
    pub state: String,
    pub street1: String,
    pub street2: String,
    pub zip_code: String,
}

impl From<PersonProfile> for PersonInfoResponse {
    fn from(p: PersonProfile) -> Self {
        Self {
            id: p.id,
            name: p.name,
            age: p.age,
            phone_number: p.phone_number,
            city: p.city,
            state: p.state,
            street1: p.street1,
            street2: p.street2,
            zip_code: p.zip_code,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /person/{person_id}/info
async fn get_person_info(
    State(state): State<Arc<AppState>>,
    PersonId(person_id): PersonId,
) -> Result<Json<PersonInfoResponse>, ApiError> {
    let profile = state.store.fetch_profile(person_id).await?;
    Ok(Json(profile.into()))
}

/// POST /person/create
///
/// The new id is not returned; clients look the person up separately.
async fn create_person(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreatePersonRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let person = NewPerson::from(req);
    state.store.create_with_address(&person).await?;

    Ok(Json(MessageResponse {
        message: "Person created successfully",
    }))
}

/// Person routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/person/{person_id}/info", get(get_person_info))
        .route("/person/create", post(create_person))
}
