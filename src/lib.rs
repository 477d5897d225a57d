pub mod auth;
pub mod error;
pub mod handlers;
pub mod i18n;
pub mod ical;
pub mod models;
pub mod openapi;
pub mod pages;
pub mod schedule;
pub mod seed;
pub mod settings;
pub mod store;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use handlers::{
    create_class, delete_class, get_class, get_ical, healthz_live, healthz_ready,
    list_all_classes, list_classes, update_class,
};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ical::ICalExporter;
use crate::openapi::ApiDoc;
use crate::settings::Settings;
use crate::store::ClassStore;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub store: ClassStore,
    pub exporter: Arc<ICalExporter>,
}

impl AppState {
    pub fn new(settings: Settings, store: ClassStore) -> Self {
        let exporter = ICalExporter::new(
            settings.site_title.clone(),
            settings.tz(),
            settings.location.clone(),
        );
        Self {
            settings,
            store,
            exporter: Arc::new(exporter),
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let store = ClassStore::connect(&settings.database_url, settings.max_connections).await?;
    if settings.seed_demo_data {
        let written = store.replace_all(&seed::demo_classes()).await?;
        info!("Seeded {written} demo classes");
    }

    let state = AppState::new(settings, store);
    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting yoga site on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let mut router = Router::new()
        .route("/", get(pages::root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/static/admin.js", get(pages::admin_script))
        .route("/api/classes", get(list_classes))
        .route("/api/classes.ics", get(get_ical))
        .route("/api/admin/classes", get(list_all_classes).post(create_class))
        .route(
            "/api/admin/classes/{id}",
            get(get_class).put(update_class).delete(delete_class),
        )
        .route("/{locale}", get(pages::home))
        .route("/{locale}/about", get(pages::about))
        .route("/{locale}/schedule", get(pages::schedule))
        .route("/{locale}/admin", get(pages::admin_login))
        .route("/{locale}/admin/dashboard", get(pages::admin_dashboard))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(trace_layer)
}
