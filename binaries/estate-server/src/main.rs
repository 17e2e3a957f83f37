//! Real Estate Advisor server
//!
//! ```bash
//! estate-server                          # defaults, or ~/.config/estate-advisor/config.yaml
//! estate-server --config advisor.yaml    # explicit config file
//! estate-server --bind 0.0.0.0:8501      # override the listen address
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use estate_config::AppConfig;
use estate_dataset::ReferenceDataset;
use estate_models::ModelRegistry;
use estate_predictor::{FormChoices, Predictor};
use estate_web::{serve, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "estate_web=info,estate_server=info,tower_http=info";

#[derive(Parser, Debug)]
#[command(name = "estate-server")]
#[command(about = "Real Estate Investment Advisor dashboard")]
#[command(version)]
struct Cli {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(short, long)]
    bind: Option<String>,
}

/// `RUST_LOG` wins over the configured filter, which wins over the default.
fn init_tracing(configured: Option<&str>) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| configured.and_then(|f| tracing_subscriber::EnvFilter::try_new(f).ok()))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load the dataset and both pipelines. Any failure aborts startup.
fn build_state(config: &AppConfig) -> Result<AppState> {
    let dataset = ReferenceDataset::load_archive(&config.dataset_path, &config.dataset_entry)
        .with_context(|| {
            format!(
                "loading reference dataset {} (entry {})",
                config.dataset_path.display(),
                config.dataset_entry
            )
        })?;

    let counts = config.placeholders;
    for column in dataset.placeholder_variation() {
        tracing::warn!(
            column,
            nearby_schools = counts.nearby_schools,
            nearby_hospitals = counts.nearby_hospitals,
            "reference data varies in a column the form fills with a constant"
        );
    }

    let models = ModelRegistry::load(&config.classifier_path, &config.regressor_path)
        .context("loading model pipelines")?;

    let choices = FormChoices::from_dataset(&dataset);
    let predictor = Predictor::new(models, choices, counts);
    Ok(AppState::new(Arc::new(dataset), predictor, config.insights))
}

async fn run(cli: Cli, mut config: AppConfig) -> Result<()> {
    if let Some(bind) = cli.bind {
        config.bind = bind;
        config.validate().context("invalid --bind")?;
    }
    let addr = config.bind_addr()?;

    let state = build_state(&config)?;
    tracing::info!(
        rows = state.dataset.len(),
        dataset = %config.dataset_path.display(),
        "startup complete"
    );

    serve(Arc::new(state), addr)
        .await
        .with_context(|| format!("serving on {addr}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(None);
            tracing::error!(error = %e, "failed to load configuration");
            return Err(e.into());
        }
    };
    init_tracing(config.log_filter.as_deref());

    if let Err(e) = run(cli, config).await {
        tracing::error!(error = ?e, "estate-server stopped");
        return Err(e);
    }
    Ok(())
}
