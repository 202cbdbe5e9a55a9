use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::error::Result;
use crate::models::{Attendee, CreateEventData, Event};
use crate::services::links::ShareLinks;

// Request/Response types
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub student_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub attendee_count: usize,
    pub preview: Vec<Attendee>,
    pub attend_url: String,
    pub view_url: String,
}

impl EventSummary {
    fn new(event: &Event, base_url: &Url) -> Self {
        let links = ShareLinks::for_event(base_url, event.id);
        Self {
            id: event.id,
            name: event.name.clone(),
            created_at: event.created_at,
            attendee_count: event.attendees_count(),
            preview: event.preview_attendees().to_vec(),
            attend_url: links.attend_url,
            view_url: links.view_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventDetail {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub attendee_count: usize,
    pub attendees: Vec<Attendee>,
}

impl From<&Event> for EventDetail {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            created_at: event.created_at,
            attendee_count: event.attendees_count(),
            attendees: event.all_attendees().to_vec(),
        }
    }
}

// Handlers

/// List events in creation order
async fn list_events(State(state): State<AppState>) -> Json<Vec<EventSummary>> {
    let registry = state.registry.read().await;

    let events = registry
        .events()
        .iter()
        .map(|event| EventSummary::new(event, &state.config.base_url))
        .collect();

    Json(events)
}

/// Create event
async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventSummary>)> {
    let mut registry = state.registry.write().await;

    let event = registry.create(CreateEventData {
        name: req.name,
        password: req.password,
    })?;

    tracing::info!(event_id = %event.id, event_name = %event.name, "Event created");

    Ok((
        StatusCode::CREATED,
        Json(EventSummary::new(event, &state.config.base_url)),
    ))
}

/// Get event with its full roster
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventDetail>> {
    let registry = state.registry.read().await;
    let event = registry.get(id)?;

    Ok(Json(EventDetail::from(event)))
}

async fn list_attendees(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Attendee>>> {
    let registry = state.registry.read().await;
    let event = registry.get(id)?;

    Ok(Json(event.all_attendees().to_vec()))
}

/// Check in an attendee
async fn check_in(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CheckInRequest>,
) -> Result<(StatusCode, Json<Attendee>)> {
    let mut registry = state.registry.write().await;

    let attendee = registry
        .check_in(id, &req.password, &req.name, &req.student_id)
        .map_err(|err| {
            tracing::info!(event_id = %id, error = %err, "Check-in rejected");
            err
        })?;

    tracing::info!(event_id = %id, student_id = %attendee.student_id, "Attendee checked in");

    Ok((StatusCode::CREATED, Json(attendee.clone())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/:id", get(get_event))
        .route(
            "/api/events/:id/attendees",
            get(list_attendees).post(check_in),
        )
}
