//! Terminal SkyCast dashboard.
//!
//! Every line typed on stdin is submitted as a city search. The view is
//! redrawn whenever the dashboard state changes, including silent
//! auto-refreshes. Exits on EOF or Ctrl-C.

use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skycast::config::DashboardConfig;
use skycast::dashboard::client::AggregatorClient;
use skycast::dashboard::view::render;
use skycast::dashboard::Dashboard;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[tokio::main]
async fn main() {
    // Logs go to stderr so they do not interleave with the rendered view
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skycast=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = DashboardConfig::from_env();
    tracing::info!("Using aggregator at {}", config.api_url);

    let dashboard = Dashboard::new(Arc::new(AggregatorClient::new(&config.api_url)));

    let mut updates = dashboard.subscribe();
    let renderer = tokio::spawn(async move {
        loop {
            let frame = render(&updates.borrow_and_update());
            print!("{}{}\nKota> ", CLEAR_SCREEN, frame);
            let _ = std::io::stdout().flush();
            if updates.changed().await.is_err() {
                break;
            }
        }
    });

    let refresh = dashboard.mount().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(city)) => {
                    dashboard.set_city_input(&city);
                    if !dashboard.search_until(tokio::signal::ctrl_c()).await {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    drop(refresh);
    renderer.abort();
    println!();
}
