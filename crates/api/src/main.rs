use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stock_dashboard_core::dashboard::DashboardController;
use stock_dashboard_core::domain::Ticker;
use stock_dashboard_core::provider::HttpJsonDataProvider;
use stock_dashboard_core::render::RenderedDashboard;
use stock_dashboard_core::time::WindowOptions;

const INDEX_HTML: &str = include_str!("../static/index.html");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stock_dashboard_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let provider = match HttpJsonDataProvider::from_settings(&settings) {
        Ok(p) => p,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "data provider configuration invalid");
            return Err(e);
        }
    };
    let window = WindowOptions::from_env().validate()?;

    let controller = DashboardController::new(Arc::new(provider), window);
    tracing::info!(
        provider = controller.provider_name(),
        history_years = window.history_years,
        visible_years = window.visible_years,
        "dashboard controller ready"
    );

    let state = AppState {
        controller: Arc::new(controller),
    };

    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/dashboard", post(submit_dashboard))
        .route("/dashboard/latest", get(get_latest_dashboard))
        .route("/dashboard/:ticker", get(get_dashboard))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Clone)]
struct AppState {
    controller: Arc<DashboardController>,
}

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    ticker: String,
}

#[derive(Debug, Serialize)]
struct ApiDashboard {
    submission: u64,
    published: bool,
    #[serde(flatten)]
    dashboard: RenderedDashboard,
}

async fn submit_dashboard(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<ApiDashboard>, StatusCode> {
    let ticker = Ticker::parse(&req.ticker).map_err(|_| StatusCode::BAD_REQUEST)?;
    let submission = state.controller.submit(ticker).await;

    Ok(Json(ApiDashboard {
        submission: submission.seq,
        published: submission.published,
        dashboard: RenderedDashboard::from_view(submission.view),
    }))
}

/// Renders without publishing, so `/dashboard/latest` is unaffected.
async fn get_dashboard(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<RenderedDashboard>, StatusCode> {
    let ticker = Ticker::parse(&ticker).map_err(|_| StatusCode::BAD_REQUEST)?;
    let view = state.controller.render(&ticker).await;
    Ok(Json(RenderedDashboard::from_view(view)))
}

async fn get_latest_dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiDashboard>, StatusCode> {
    let (submission, view) = state
        .controller
        .latest()
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(ApiDashboard {
        submission,
        published: true,
        dashboard: RenderedDashboard::from_view(view),
    }))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(
    settings: &stock_dashboard_core::config::Settings,
) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
