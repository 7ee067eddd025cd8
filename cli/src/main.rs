//! CLI entrypoint for agendai
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use agendai_application::{
    ConversationLogger, HandleIntentInput, HandleIntentUseCase, NoConversationLogger,
};
use agendai_domain::{Severity, WebhookRequest, scheduling_catalog};
use agendai_infrastructure::{
    ConfigLoader, FileConfig, GeminiResponder, JsonlConversationLogger, SimulatedToolExecutor,
};
use agendai_presentation::{Cli, Command, WebhookState};
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?
    };

    if let Command::ShowConfig = cli.command {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_logging(cli.verbose, config.logging.directory.as_deref());

    info!("Starting agendai");

    let mut fatal = 0;
    for issue in config.validate() {
        match issue.severity {
            Severity::Error => {
                error!("{}", issue.message);
                fatal += 1;
            }
            Severity::Warning => warn!("{}", issue.message),
        }
    }
    if fatal > 0 {
        bail!("Configuration has {fatal} error(s); see the log above");
    }

    let use_case = Arc::new(build_use_case(&config)?);

    match cli.command {
        Command::Serve { bind } => {
            let addr = match bind {
                Some(addr) => addr,
                None => config
                    .webhook
                    .bind
                    .trim()
                    .parse::<SocketAddr>()
                    .context("webhook.bind is not a socket address")?,
            };
            run_server(use_case, &config, addr).await
        }
        Command::Invoke {
            intent,
            params,
            session,
            language,
            json,
        } => {
            let mut request = WebhookRequest::new(session, intent).with_language(
                language.unwrap_or_else(|| config.webhook.default_language.clone()),
            );
            for (key, value) in params {
                request = request.with_parameter(key, value);
            }
            run_invoke(&use_case, request, json).await
        }
        Command::ShowConfig => Ok(()),
    }
}

fn init_logging(verbose: u8, directory: Option<&Path>) -> Option<WorkerGuard> {
    // RUST_LOG wins when no -v flag is given
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "agendai.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(file_layer)
        .init();

    guard
}

fn build_use_case(config: &FileConfig) -> Result<HandleIntentUseCase> {
    // === Dependency Injection ===
    let settings = config
        .generation
        .to_settings()
        .map_err(|issue| anyhow::anyhow!("{}", issue.message))?;

    let responder = Arc::new(
        GeminiResponder::from_config(&config.model)
            .context("Failed to initialize the model responder")?,
    );
    let executor = Arc::new(SimulatedToolExecutor::new());
    let catalog = Arc::new(scheduling_catalog().context("Invalid tool catalog")?);

    let conversation_logger: Arc<dyn ConversationLogger> =
        match config.logging.conversation_log.as_deref() {
            Some(path) => match JsonlConversationLogger::new(path) {
                Some(logger) => {
                    info!(path = %logger.path().display(), "Conversation log enabled");
                    Arc::new(logger)
                }
                None => Arc::new(NoConversationLogger),
            },
            None => Arc::new(NoConversationLogger),
        };

    Ok(HandleIntentUseCase::new(responder, executor, catalog)
        .with_settings(settings)
        .with_params(config.execution_params())
        .with_conversation_logger(conversation_logger))
}

async fn run_server(
    use_case: Arc<HandleIntentUseCase>,
    config: &FileConfig,
    addr: SocketAddr,
) -> Result<()> {
    let shutdown = CancellationToken::new();
    let state = Arc::new(
        WebhookState::new(use_case)
            .with_default_language(config.webhook.default_language.trim())
            .with_shutdown(shutdown.clone()),
    );

    tokio::spawn(cancel_on_signal(shutdown, tokio::signal::ctrl_c()));

    agendai_presentation::serve(state, addr).await?;
    info!("Webhook server stopped");
    Ok(())
}

/// Cancel `token` once `signal` fires. A signal that cannot be listened for
/// leaves the token untouched.
async fn cancel_on_signal<F>(token: CancellationToken, signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("Shutdown signal received");
            token.cancel();
        }
        Err(e) => error!(error = %e, "Could not listen for Ctrl-C; stop the process externally"),
    }
}

async fn run_invoke(
    use_case: &HandleIntentUseCase,
    request: WebhookRequest,
    json: bool,
) -> Result<()> {
    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(cancel_on_signal(ctrl_c, tokio::signal::ctrl_c()));

    let input = HandleIntentInput::new(request, chrono::Local::now().naive_local());
    let output = use_case.execute(input, token).await?;

    if json {
        let summary = serde_json::json!({
            "reply": output.reply.text,
            "iterations": output.iterations,
            "tools": output.executed_tools,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", output.reply.text);
        if !output.executed_tools.is_empty() {
            eprintln!(
                "({} round(s); tools: {})",
                output.iterations,
                output.executed_tools.join(", ")
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_cancels_token() {
        let token = CancellationToken::new();
        cancel_on_signal(token.clone(), async { Ok(()) }).await;
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_signal_registration_failure_keeps_running() {
        let token = CancellationToken::new();
        cancel_on_signal(token.clone(), async {
            Err(std::io::Error::other("signal handler unavailable"))
        })
        .await;
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_invalid_generation_settings_are_rejected() {
        let mut config = FileConfig::default();
        config.generation.top_k = 0;
        let err = build_use_case(&config).err().unwrap();
        assert!(err.to_string().contains("generation.top_k"));
    }
}
