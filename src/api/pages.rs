use askama::Template;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::models::{CreateEventData, Event};
use crate::services::links::{page_href, ShareLinks};
use crate::services::registry::{EventRegistry, RegistryError};

// Templates
#[derive(Template)]
#[template(path = "pages/home.html")]
struct HomeTemplate {
    notice: Option<Notice>,
    created: Option<ShareLinks>,
    events: Vec<EventCard>,
    event_name: String,
}

#[derive(Template)]
#[template(path = "pages/event.html")]
struct EventTemplate {
    event_id: Uuid,
    event_name: String,
    notice: Option<Notice>,
    roster: Vec<RosterRow>,
    name: String,
    student_id: String,
}

#[derive(Template)]
#[template(path = "pages/view.html")]
struct ViewTemplate {
    event_name: String,
    roster: Vec<RosterRow>,
}

#[derive(Template)]
#[template(path = "pages/not_found.html")]
struct NotFoundTemplate;

#[derive(Template)]
#[template(path = "pages/invalid.html")]
struct InvalidTemplate;

/// Inline message shown above a form
struct Notice {
    kind: &'static str,
    text: String,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: "success",
            text: text.into(),
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: "warning",
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: "error",
            text: text.into(),
        }
    }
}

struct EventCard {
    name: String,
    attendee_count: usize,
    preview: Option<String>,
    attend_href: String,
    view_href: String,
}

impl EventCard {
    fn from_event(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            attendee_count: event.attendees_count(),
            preview: preview_text(event),
            attend_href: page_href("event", event.id),
            view_href: page_href("view", event.id),
        }
    }
}

struct RosterRow {
    position: usize,
    student_id: String,
    name: String,
}

fn roster_rows(event: &Event) -> Vec<RosterRow> {
    event
        .all_attendees()
        .iter()
        .enumerate()
        .map(|(i, a)| RosterRow {
            position: i + 1,
            student_id: a.student_id.clone(),
            name: a.name.clone(),
        })
        .collect()
}

/// `Kim(1), Lee(2), Park(3) and 2 more`, or `None` for an empty roster.
fn preview_text(event: &Event) -> Option<String> {
    if event.has_no_attendees() {
        return None;
    }

    let mut text = event
        .preview_attendees()
        .iter()
        .map(|a| a.label())
        .collect::<Vec<_>>()
        .join(", ");

    let hidden = event.attendees_count() - event.preview_attendees().len();
    if hidden > 0 {
        text.push_str(&format!(" and {} more", hidden));
    }

    Some(text)
}

// Request types
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub event_id: Option<String>,
}

enum Page<'a> {
    Home,
    Event(&'a str),
    View(&'a str),
    Invalid,
}

impl PageQuery {
    fn resolve(&self) -> Page<'_> {
        let event_id = self.event_id.as_deref().filter(|id| !id.is_empty());
        match (self.page.as_deref().unwrap_or("home"), event_id) {
            ("home", _) => Page::Home,
            ("event", Some(id)) => Page::Event(id),
            ("view", Some(id)) => Page::View(id),
            _ => Page::Invalid,
        }
    }
}

/// Fields from both forms; `page` decides which ones are read.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageForm {
    pub event_name: String,
    pub password: String,
    pub name: String,
    pub student_id: String,
}

fn home_page(
    registry: &EventRegistry,
    notice: Option<Notice>,
    created: Option<ShareLinks>,
    event_name: String,
) -> HomeTemplate {
    HomeTemplate {
        notice,
        created,
        events: registry.events().iter().map(EventCard::from_event).collect(),
        event_name,
    }
}

fn event_page(event: &Event, notice: Option<Notice>, form: PageForm) -> EventTemplate {
    EventTemplate {
        event_id: event.id,
        event_name: event.name.clone(),
        notice,
        roster: roster_rows(event),
        name: form.name,
        student_id: form.student_id,
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NotFoundTemplate).into_response()
}

fn invalid_access() -> Response {
    (StatusCode::BAD_REQUEST, InvalidTemplate).into_response()
}

/// Event ids that fail to parse cannot name an event either.
fn find_event<'r>(registry: &'r EventRegistry, raw_id: &str) -> Option<&'r Event> {
    let id = Uuid::parse_str(raw_id).ok()?;
    registry.get(id).ok()
}

// Handlers

/// Render the page selected by the query string
async fn show_page(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return invalid_access();
    };
    let registry = state.registry.read().await;

    match query.resolve() {
        Page::Home => home_page(&registry, None, None, String::new()).into_response(),
        Page::Event(raw_id) => match find_event(&registry, raw_id) {
            Some(event) => event_page(event, None, PageForm::default()).into_response(),
            None => not_found(),
        },
        Page::View(raw_id) => match find_event(&registry, raw_id) {
            Some(event) => ViewTemplate {
                event_name: event.name.clone(),
                roster: roster_rows(event),
            }
            .into_response(),
            None => not_found(),
        },
        Page::Invalid => invalid_access(),
    }
}

/// Handle a form submission from the home or event page
async fn submit_page(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
    Form(form): Form<PageForm>,
) -> Response {
    let Ok(Query(query)) = query else {
        return invalid_access();
    };
    match query.resolve() {
        Page::Home => create_event(&state, form).await,
        Page::Event(raw_id) => match Uuid::parse_str(raw_id) {
            Ok(id) => check_in(&state, id, form).await,
            Err(_) => not_found(),
        },
        Page::View(_) | Page::Invalid => invalid_access(),
    }
}

async fn create_event(state: &AppState, form: PageForm) -> Response {
    let mut registry = state.registry.write().await;

    let created = registry
        .create(CreateEventData {
            name: form.event_name.clone(),
            password: form.password,
        })
        .map(|event| {
            tracing::info!(event_id = %event.id, event_name = %event.name, "Event created");
            (
                Notice::success(format!("Event {} created!", event.name)),
                ShareLinks::for_event(&state.config.base_url, event.id),
            )
        });

    match created {
        Ok((notice, links)) => {
            home_page(&registry, Some(notice), Some(links), String::new()).into_response()
        }
        Err(err) => {
            let notice = Notice::error("Enter both an event name and a password.");
            tracing::debug!(error = %err, "Event creation rejected");
            home_page(&registry, Some(notice), None, form.event_name).into_response()
        }
    }
}

async fn check_in(state: &AppState, id: Uuid, form: PageForm) -> Response {
    let mut registry = state.registry.write().await;

    let result = registry
        .check_in(id, &form.password, &form.name, &form.student_id)
        .map(|attendee| {
            tracing::info!(
                event_id = %id,
                student_id = %attendee.student_id,
                "Attendee checked in"
            );
            Notice::success(format!("{} checked in!", attendee.label()))
        });

    let (notice, form) = match result {
        Ok(notice) => (notice, PageForm::default()),
        Err(RegistryError::NotFound(_)) => return not_found(),
        Err(RegistryError::WrongPassword) => {
            tracing::warn!(event_id = %id, "Check-in rejected: wrong password");
            (Notice::error("Wrong password."), form)
        }
        Err(RegistryError::Duplicate(duplicate)) => {
            tracing::info!(
                event_id = %id,
                student_id = %duplicate.student_id,
                "Check-in rejected: already attended"
            );
            (Notice::warning(format!("{}.", duplicate)), form)
        }
        Err(err) => (Notice::error(format!("{}.", err)), form),
    };

    match registry.get(id) {
        Ok(event) => event_page(event, Some(notice), form).into_response(),
        Err(_) => not_found(),
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show_page).post(submit_page))
}
