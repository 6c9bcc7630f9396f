//! `shapeassist-replay` -- replay a recorded shape assistant session.
//!
//! Feeds every interaction of a session script through the assistant,
//! with refinements served by a live inference server, then prints the
//! resulting objects as JSON on stdout.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default                 | Description                  |
//! |-------------------------|----------|-------------------------|------------------------------|
//! | `SESSION_SCRIPT`        | yes      | --                      | Path of the JSON script      |
//! | `LAMBDA_API_URL`        | no       | `http://localhost:8080` | Inference server base URL    |
//! | `CANVAS_EVENT_CAPACITY` | no       | `64`                    | Canvas event bus capacity    |
//! | `RUST_LOG`              | no       | see below               | `tracing` filter directives  |

use anyhow::Context;
use shapeassist_replay::{run, ReplayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shapeassist_replay=info,shapeassist_pipeline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ReplayConfig::from_env().context("invalid configuration")?;

    tracing::info!(
        script = %config.session_script.display(),
        api_url = %config.lambda_api_url,
        "Starting shapeassist-replay",
    );

    let report = run(&config).await.context("replay failed")?;

    tracing::info!(
        objects = report.objects.len(),
        refinements = report.refinements,
        failures = report.failures.len(),
        "Replay complete",
    );

    println!("{}", serde_json::to_string_pretty(&report.objects)?);
    Ok(())
}
