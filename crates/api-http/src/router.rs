// Route Table

use crate::handlers::{
    admin, api_not_found, auth, domains, faqs, health, pages, posts, public, settings, users,
};
use crate::rate_limiter::rate_limit;
use crate::state::AppState;
use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/auth/user", get(auth::current_user))
        .route("/auth/password", put(auth::change_password))
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", axum::routing::delete(users::delete))
        .route("/domains", get(domains::list).post(domains::create))
        .route(
            "/domains/{id}",
            get(domains::get).put(domains::update).delete(domains::delete),
        )
        .route(
            "/domains/{id}/pages",
            get(pages::list_for_domain).post(pages::create),
        )
        .route(
            "/domains/{id}/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route(
            "/domains/{id}/seo",
            get(settings::get_seo).put(settings::update_seo),
        )
        .route(
            "/pages/{id}",
            get(pages::get).put(pages::update).delete(pages::delete),
        )
        .route(
            "/pages/{id}/faqs",
            get(faqs::list_for_page).post(faqs::create),
        )
        .route("/pages/{id}/faqs/order", put(faqs::reorder))
        .route("/faqs/{id}", put(faqs::update).delete(faqs::delete))
        .route("/posts", get(posts::list).post(posts::create))
        .route(
            "/posts/{id}",
            get(posts::get).put(posts::update).delete(posts::delete),
        )
        .route("/admin/stats", get(admin::stats))
        .route("/admin/maintenance", post(admin::maintenance))
        .route("/public/sites/{name}", get(public::site))
        .route("/public/sites/{name}/pages/{page}", get(public::page))
        .fallback(api_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .with_state(state)
}

/// Full application router: `/api` plus, when given, the SPA build
/// directory with `index.html` as the client-side routing fallback.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new().nest("/api", api_routes(state));

    if let Some(dir) = static_dir {
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        router = router.fallback_service(spa);
    }

    router.layer(TraceLayer::new_for_http())
}
