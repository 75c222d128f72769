use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stock_dashboard_core::dashboard::DashboardController;
use stock_dashboard_core::domain::Ticker;
use stock_dashboard_core::provider::HttpJsonDataProvider;
use stock_dashboard_core::render::RenderedDashboard;
use stock_dashboard_core::time::WindowOptions;

mod report;

#[derive(Debug, Parser)]
#[command(name = "stock_dashboard_cli")]
struct Args {
    /// Ticker symbol to render.
    #[arg(long, default_value = "GS")]
    ticker: String,

    /// Print the rendered dashboard (figures included) as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stock_dashboard_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let ticker = Ticker::parse(&args.ticker).context("--ticker must be non-empty")?;

    let provider = HttpJsonDataProvider::from_settings(&settings).inspect_err(|e| {
        sentry_anyhow::capture_anyhow(e);
    })?;
    let window = WindowOptions::from_env().validate()?;
    let controller = DashboardController::new(Arc::new(provider), window);

    let view = controller.render(&ticker).await;
    tracing::debug!(%ticker, "dashboard rendered");

    if args.json {
        let rendered = RenderedDashboard::from_view(view);
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        print!("{}", report::render_text(&view));
    }

    Ok(())
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
