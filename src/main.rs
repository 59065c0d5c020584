use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use civica_api::config;
use civica_api::database::manager::DatabaseManager;
use civica_api::handlers::{admin, public};
use civica_api::middleware::admin_guard;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting civica-api in {:?} mode", config.environment);

    if config.database.run_migrations {
        // A missing database is not fatal at boot; /health reports it
        if let Err(e) = DatabaseManager::run_migrations().await {
            tracing::error!("could not apply migrations: {}", e);
        }
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("civica-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(admin_session_routes())
        .merge(admin_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config::config().api.max_request_size_bytes))
}

fn public_routes() -> Router {
    use axum::routing::post;

    Router::new()
        .route(
            "/api/testimonies",
            get(public::testimonies::testimony_list).post(public::testimonies::testimony_post),
        )
        .route("/api/members", post(public::members::member_post))
        .route("/api/pre-members", post(public::pre_members::pre_member_post))
        .route("/api/contact", post(public::contact::contact_post))
        .route("/api/donations", post(public::donations::donation_post))
        .route("/api/newsletter/subscribe", post(public::newsletter::subscribe_post))
        .route("/api/newsletter/unsubscribe", post(public::newsletter::unsubscribe_post))
        .route("/api/articles", get(public::articles::article_list))
        .route("/api/articles/:slug", get(public::articles::article_get))
}

/// Session endpoints that must stay reachable without a valid token
fn admin_session_routes() -> Router {
    use axum::routing::post;

    Router::new().route(
        "/api/admin/session",
        post(admin::session::session_login).delete(admin::session::session_logout),
    )
}

/// Everything else under /api/admin/* sits behind the JWT-cookie guard
fn admin_routes() -> Router {
    use axum::routing::{delete, put};

    Router::new()
        .route("/api/admin/me", get(admin::session::session_whoami))
        .route("/api/admin/stats", get(admin::stats::stats_get))
        // Testimony moderation
        .route("/api/admin/testimonies", get(admin::testimonies::testimony_list))
        .route(
            "/api/admin/testimonies/:id/status",
            put(admin::testimonies::testimony_set_status),
        )
        .route("/api/admin/testimonies/:id", delete(admin::testimonies::testimony_delete))
        // Submission review
        .route("/api/admin/members", get(admin::submissions::member_list))
        .route("/api/admin/members/:id", delete(admin::submissions::member_delete))
        .route("/api/admin/pre-members", get(admin::submissions::pre_member_list))
        .route("/api/admin/pre-members/:id", delete(admin::submissions::pre_member_delete))
        .route("/api/admin/contact-messages", get(admin::submissions::contact_list))
        .route("/api/admin/contact-messages/:id", delete(admin::submissions::contact_delete))
        // Donations
        .route("/api/admin/donations", get(admin::donations::donation_list))
        .route("/api/admin/donations/:id/status", put(admin::donations::donation_set_status))
        // News articles
        .route(
            "/api/admin/articles",
            get(admin::articles::article_list).post(admin::articles::article_post),
        )
        .route(
            "/api/admin/articles/:id",
            get(admin::articles::article_get)
                .put(admin::articles::article_put)
                .delete(admin::articles::article_delete),
        )
        .route("/api/admin/articles/:id/publish", put(admin::articles::article_publish))
        // Newsletter
        .route("/api/admin/newsletter/subscribers", get(admin::newsletter::subscriber_list))
        .route_layer(axum::middleware::from_fn(admin_guard))
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;

    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        // The admin console authenticates with a cookie
        .allow_credentials(true)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "civica-api",
            "version": version,
            "description": "Backend API for the association's public site and admin console",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "testimonies": "/api/testimonies (public)",
                "members": "/api/members (public)",
                "pre_members": "/api/pre-members (public)",
                "contact": "/api/contact (public)",
                "donations": "/api/donations (public)",
                "newsletter": "/api/newsletter/subscribe, /api/newsletter/unsubscribe (public)",
                "articles": "/api/articles[/:slug] (public)",
                "admin_session": "/api/admin/session (public - token acquisition)",
                "admin": "/api/admin/* (protected - session cookie required)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
