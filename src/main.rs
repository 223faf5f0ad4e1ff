//! Student Projects Web
//!
//! Server-side web frontend for the student projects platform. Every visitor
//! gets a cookie-backed session holding their backend token pair; pages are
//! assembled from the backend REST API and served as JSON view models.

mod auth;
mod client;
mod config;
mod db;
mod display;
mod errors;
mod forms;
mod guard;
mod models;
mod pages;
mod session;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::SessionRepository;
use guard::Policy;
use models::Role;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionRepository,
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Student Projects Web");
    tracing::info!("Backend API: {}", config.api_url);
    tracing::info!("Media base: {}", config.media_url);
    tracing::info!("Session database: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Idle sessions expire after {} days", config.session_idle_days);

    if !config.secure_cookies {
        tracing::warn!("Session cookie is not marked Secure (SPW_SECURE_COOKIES)");
    }

    // Initialize session store
    let pool = db::init_database(&config.db_path).await?;

    let sessions = SessionRepository::new(pool);
    session::spawn_purge_task(
        sessions.clone(),
        chrono::Duration::days(config.session_idle_days),
    );

    let state = AppState {
        sessions,
        http: reqwest::Client::new(),
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Wrap a route group in the guard for `policy`.
fn guarded(routes: Router<AppState>, policy: Policy) -> Router<AppState> {
    routes.route_layer(middleware::from_fn(move |req, next| {
        guard::guard_layer(policy.clone(), req, next)
    }))
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public_routes = Router::new()
        .route("/", get(pages::home_page))
        .route("/projects-public", get(pages::public_list_page))
        .route("/projects-public/{id}", get(pages::public_detail_page))
        .route("/login", get(pages::login_page).post(pages::login))
        .route("/register", get(pages::register_page).post(pages::register));

    let member_routes = Router::new()
        .route("/dashboard", get(pages::dashboard_page))
        .route("/profile", get(pages::profile_page))
        .route("/logout", post(pages::logout))
        .route(
            "/dashboard/upload",
            post(pages::upload).layer(DefaultBodyLimit::max(forms::MAX_UPLOAD_BYTES + 64 * 1024)),
        )
        // Comments
        .route(
            "/projects-public/{id}/comments",
            post(pages::create_comment),
        )
        .route(
            "/projects-public/{id}/comments/{comment_id}",
            delete(pages::delete_comment),
        )
        // Projects
        .route("/dashboard/projects", get(pages::project_list_page))
        .route(
            "/dashboard/projects/{id}",
            get(pages::project_detail_page)
                .patch(pages::update_project)
                .delete(pages::delete_project),
        )
        .route("/dashboard/projects/{id}/edit", get(pages::edit_project_page))
        .route("/dashboard/projects/{id}/submit", post(pages::submit_project))
        .route(
            "/dashboard/projects/{id}/teachers",
            get(pages::teacher_assignment_page).post(pages::assign_teacher),
        )
        .route(
            "/dashboard/projects/{id}/teachers/{assignment_id}",
            delete(pages::remove_teacher),
        )
        // Milestones
        .route("/dashboard/milestones", get(pages::milestone_dashboard_page))
        .route(
            "/dashboard/milestones/{milestone_id}/completion",
            post(pages::update_dashboard_completion),
        )
        .route(
            "/dashboard/projects/{id}/milestones",
            get(pages::project_milestones_page).post(pages::create_milestone),
        )
        .route(
            "/dashboard/projects/{id}/milestones/{milestone_id}",
            patch(pages::update_milestone).delete(pages::delete_milestone),
        )
        .route(
            "/dashboard/projects/{id}/milestones/{milestone_id}/completion",
            post(pages::update_project_completion),
        )
        // Consultations
        .route(
            "/dashboard/projects/{id}/consultations",
            get(pages::project_consultations_page).post(pages::create_consultation),
        )
        .route(
            "/dashboard/projects/{id}/consultations/{consultation_id}",
            patch(pages::update_consultation).delete(pages::delete_consultation),
        )
        // Evaluations
        .route(
            "/dashboard/projects/{id}/evaluations",
            get(pages::project_evaluations_page).post(pages::create_evaluation),
        )
        .route(
            "/dashboard/projects/{id}/evaluations/{evaluation_id}",
            patch(pages::update_evaluation).delete(pages::delete_evaluation),
        );

    let student_routes = Router::new()
        .route("/dashboard/my-projects", get(pages::my_projects_page))
        .route(
            "/dashboard/create-project",
            get(pages::create_project_page).post(pages::create_project),
        );

    let teacher_routes = Router::new()
        .route("/dashboard/assigned", get(pages::assigned_page))
        .route(
            "/dashboard/assigned/{assignment_id}/accept",
            post(pages::accept_assignment),
        )
        .route(
            "/dashboard/assigned/{assignment_id}/decline",
            post(pages::decline_assignment),
        );

    let staff_routes = Router::new()
        .route("/dashboard/consultations", get(pages::consultation_dashboard_page))
        .route("/dashboard/evaluations", get(pages::evaluation_dashboard_page));

    let admin_routes = Router::new()
        .route(
            "/dashboard/users",
            get(pages::user_management_page).post(pages::create_user),
        )
        .route(
            "/dashboard/users/{id}",
            get(pages::edit_user_page)
                .patch(pages::update_user)
                .delete(pages::delete_user),
        );

    // Health check (no session required)
    let health_routes = Router::new().route("/health", get(health_check));

    let site = Router::new()
        .merge(guarded(public_routes, Policy::Public))
        .merge(guarded(member_routes, Policy::Authenticated))
        .merge(guarded(student_routes, Policy::Roles(&[Role::Student])))
        .merge(guarded(teacher_routes, Policy::Roles(&[Role::Teacher])))
        .merge(guarded(staff_routes, Policy::Roles(&[Role::Teacher, Role::Admin])))
        .merge(guarded(admin_routes, Policy::Roles(&[Role::Admin])))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::session_layer,
        ));

    Router::new()
        .merge(site)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
