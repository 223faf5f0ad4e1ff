//! Page routes.
//!
//! GET handlers answer with the page's view model inside the success
//! envelope; action handlers answer with a `303 See Other` to the page that
//! should be shown next, or with the error envelope rendered as the page's
//! inline alert.

mod assigned;
mod auth;
mod consultations;
mod dashboard;
mod evaluations;
mod milestones;
mod profile;
mod projects;
mod public;
mod uploads;
mod users;

pub use assigned::*;
pub use auth::*;
pub use consultations::*;
pub use dashboard::*;
pub use evaluations::*;
pub use milestones::*;
pub use profile::*;
pub use projects::*;
pub use public::*;
pub use uploads::*;
pub use users::*;

use std::collections::BTreeSet;
use std::fmt::Display;
use std::future::Future;
use std::str::FromStr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::de::{value::StringDeserializer, DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

use crate::auth::AuthState;
use crate::client::ApiClient;
use crate::display::Listing;
use crate::errors::AppError;
use crate::models::{Paginated, Project, User};

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> IntoResponse for PageResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub type PageResult<T> = Result<PageResponse<T>, AppError>;

pub type ActionResult = Result<Redirect, AppError>;

/// Wrap a view model in the success envelope.
pub fn page<T: Serialize>(data: T) -> PageResult<T> {
    Ok(PageResponse {
        success: true,
        data,
    })
}

/// Redirect after a successful action.
pub fn redirect(path: impl AsRef<str>) -> ActionResult {
    Ok(Redirect::to(path.as_ref()))
}

/// The visitor as every page sees it.
#[derive(Debug, Clone, Serialize)]
pub struct Viewer {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_student: bool,
    pub is_teacher: bool,
    pub is_admin: bool,
}

impl Viewer {
    pub fn from_state(state: &AuthState) -> Self {
        Self {
            user: state.user().cloned(),
            is_authenticated: state.is_authenticated(),
            is_student: state.is_student(),
            is_teacher: state.is_teacher(),
            is_admin: state.is_admin(),
        }
    }
}

/// The signed-in user of a guarded route.
fn require_user(state: &AuthState) -> Result<&User, AppError> {
    state
        .user()
        .ok_or_else(|| AppError::Unauthorized("Přihlaste se prosím".to_string()))
}

/// Fetch each distinct project in turn. A project that fails to load is
/// logged and left out.
async fn fetch_projects(client: &ApiClient, ids: Vec<i64>) -> Vec<Project> {
    let mut seen = BTreeSet::new();
    let mut projects = Vec::new();
    for id in ids {
        if !seen.insert(id) {
            continue;
        }
        match client.get_project(id).await {
            Ok(project) => projects.push(project),
            Err(e) => tracing::warn!(project = id, "Skipping project that failed to load: {}", e),
        }
    }
    projects
}

/// Text of a query value, `None` when the form field was left empty.
fn filled<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

/// Parse a query value, treating an empty field as absent.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    filled(deserializer)?
        .map(|value| value.parse().map_err(D::Error::custom))
        .transpose()
}

/// Like [`blank_as_none`] for enums spelled by their serde names.
fn blank_variant_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    filled(deserializer)?
        .map(|value| T::deserialize(StringDeserializer::<D::Error>::new(value)))
        .transpose()
}

/// Title of a project among those fetched, if it loaded.
fn project_title(projects: &[Project], id: i64) -> Option<String> {
    projects.iter().find(|p| p.id == id).map(|p| p.title.clone())
}

/// Most pages a single request accumulates.
const MAX_LOADED_PAGES: u32 = 50;

/// Load pages `1..=pages` of a list in order, stopping at the last one.
async fn accumulate<T, F, Fut>(pages: Option<u32>, mut fetch: F) -> Result<Listing<T>, AppError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Paginated<T>, AppError>>,
{
    let pages = pages.unwrap_or(1).clamp(1, MAX_LOADED_PAGES);
    let mut listing = Listing::default();
    for page in 1..=pages {
        listing.absorb(page, fetch(page).await?);
        if !listing.has_more {
            break;
        }
    }
    Ok(listing)
}
