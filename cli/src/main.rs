//! CLI entrypoint for Lecture Pulse
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use pulse_application::{
    FeedbackEvaluator, LlmFeedbackEvaluator, LogStore, RoomCodeGenerator, Simplifier,
};
use pulse_domain::Model;
use pulse_infrastructure::{
    ConfigLoader, FileConfig, GeminiGateway, HttpLogStore, HttpSimplifier, InMemoryLogStore,
    LogStoreBackend, RandomRoomCodeGenerator,
};
use pulse_presentation::{AppState, Cli, Collaborators, PulseServer, ServerConfig, StoreBackend};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The guard flushes the file writer when main returns
    let _log_guard = init_logging(&cli)?;

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    let config = apply_overrides(config, &cli);

    if cli.show_config {
        for line in ConfigLoader::describe_sources() {
            println!("{}", line);
        }
        println!();
        println!("{}", toml::to_string_pretty(&config.redacted())?);
        return Ok(());
    }

    config.validate().context("Invalid configuration")?;

    info!("Starting Lecture Pulse");

    // === Dependency Injection ===
    let store: Arc<dyn LogStore> = match config.log_store.backend {
        LogStoreBackend::Http => {
            let token = config.log_store.access_token.clone().unwrap_or_default();
            Arc::new(
                HttpLogStore::new(
                    &config.log_store.base_url,
                    token,
                    config.log_store_timeout(),
                )
                .context("Failed to create log store client")?,
            )
        }
        LogStoreBackend::Memory => {
            warn!("Using the in-memory log store; sessions are lost on exit");
            Arc::new(InMemoryLogStore::new())
        }
    };

    let Some(api_key) = config.llm.api_key.as_deref() else {
        bail!("llm.api_key is not set (set PULSE_LLM__API_KEY or GEMINI_API_KEY)");
    };
    if !config.llm.model.is_gemini() {
        warn!(model = %config.llm.model, "Model name does not look like a Gemini model");
    }
    let gateway = GeminiGateway::new(&config.llm.base_url, api_key, config.llm_timeout())
        .context("Failed to create generation client")?;
    let evaluator: Arc<dyn FeedbackEvaluator> = Arc::new(LlmFeedbackEvaluator::new(
        Arc::new(gateway),
        config.llm.model.clone(),
    ));

    let simplifier: Arc<dyn Simplifier> = Arc::new(
        HttpSimplifier::new(
            config.simplifier.endpoint.clone(),
            config.simplifier.api_key.clone(),
            config.simplifier_timeout(),
        )
        .context("Failed to create simplifier client")?,
    );
    let codes: Arc<dyn RoomCodeGenerator> = Arc::new(RandomRoomCodeGenerator);

    let state = AppState::new(
        Collaborators {
            store,
            evaluator,
            simplifier,
            codes,
        },
        config.session_params(),
    );

    info!(
        model = %config.llm.model,
        backend = ?config.log_store.backend,
        index = config.sessions.use_index,
        "Services wired"
    );

    let server_config = ServerConfig::new(config.server.host.clone(), config.server.port);
    PulseServer::new(server_config, state).run().await?;

    Ok(())
}

/// Install the tracing subscriber: stderr always, plus daily files with `--log-dir`
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    // RUST_LOG wins over the verbosity flags
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match &cli.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "lecture-pulse.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            Ok(None)
        }
    }
}

/// Command-line flags take precedence over every config layer
fn apply_overrides(mut config: FileConfig, cli: &Cli) -> FileConfig {
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(store) = cli.store {
        config.log_store.backend = match store {
            StoreBackend::Http => LogStoreBackend::Http,
            StoreBackend::Memory => LogStoreBackend::Memory,
        };
    }
    if let Some(model) = &cli.model {
        // Unknown names become custom models
        if let Ok(model) = model.parse::<Model>() {
            config.llm.model = model;
        }
    }
    if cli.no_index {
        config.sessions.use_index = false;
    }
    config
}
