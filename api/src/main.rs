mod error;
mod handlers;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use common::db;
use common::repositories::{OrganizationRepository, OrganizationRepositoryImpl};
use common::settings::Settings;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct AppState {
    pub orgs: Arc<dyn OrganizationRepository>,
    pub settings: Settings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().expect("Failed to load configuration");

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = db::establish_connection(&settings.database).await?;
    let orgs: Arc<dyn OrganizationRepository> = Arc::new(OrganizationRepositoryImpl::new(&db));

    let state = Arc::new(AppState {
        orgs,
        settings: settings.clone(),
    });

    let cors = build_cors(&settings);

    let app = build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_router(state: Arc<AppState>) -> Router {
    // Both the bare and trailing-slash forms of the collection path
    // serve the listing.
    Router::new()
        .route("/", get(|| async { "Organization Board API" }))
        .route("/orgs", get(handlers::list_organizations))
        .route("/orgs/", get(handlers::list_organizations))
        .route("/orgs/add", post(handlers::add_organization))
        .route("/orgs/:name", get(handlers::get_organization))
        .route("/orgs/:name/members", get(handlers::list_members))
        .route(
            "/orgs/:name/comments",
            get(handlers::get_comments)
                .post(handlers::add_comment)
                .delete(handlers::delete_comments),
        )
        .with_state(state)
}

fn build_cors(settings: &Settings) -> CorsLayer {
    let origin = settings
        .frontend_origin
        .as_ref()
        .and_then(|s| HeaderValue::from_str(s).ok());

    match (settings.debug, origin) {
        (false, Some(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_headers([axum::http::header::CONTENT_TYPE])
            .allow_methods(Any),
        _ => CorsLayer::permissive(),
    }
}
