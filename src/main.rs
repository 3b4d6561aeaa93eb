use anyhow::Context;
use clap::Parser;
use pr_remediator::adapters::inbound::webhook::{router, WebhookSettings, WebhookState};
use pr_remediator::adapters::outbound::formatters::MarkdownFormatter;
use pr_remediator::adapters::outbound::manifest::NpmManifestParser;
use pr_remediator::adapters::outbound::network::GitHubClient;
use pr_remediator::application::use_cases::{HandlePullRequestUseCase, PullRequestOptions};
use pr_remediator::cli::Args;
use pr_remediator::config::{discover_config, load_config_from_path, ServiceConfig};
use pr_remediator::shared::error::{ExitCode, ServiceError};
use pr_remediator::shared::telemetry::init_tracing;
use pr_remediator::shared::Result;
use std::path::Path;
use std::process;
use tracing::{error, info, warn};

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    let file = match args.config.as_deref() {
        Some(path) => Some(load_config_from_path(Path::new(path))?),
        None => discover_config(Path::new("."))?,
    };
    let config = ServiceConfig::resolve(file.as_ref(), &args.overrides())?;

    init_tracing(config.log_format);

    if let Some(file) = &file {
        for field in file.unknown_field_names() {
            warn!(field, "Unknown config field will be ignored");
        }
    }

    if args.check_config {
        println!("Configuration OK");
        println!("  listen: {}", config.listen);
        println!(
            "  max_concurrent_evaluations: {}",
            config.max_concurrent_evaluations
        );
        println!("  memoize_evaluations: {}", config.memoize_evaluations);
        println!(
            "  policy_timeout_seconds: {}",
            config.policy_timeout.as_secs()
        );
        println!(
            "  github_timeout_seconds: {}",
            config.github_timeout.as_secs()
        );
        println!("  comment_when_clean: {}", config.comment_when_clean);
        println!("  log_format: {}", config.log_format);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    runtime.block_on(serve(config))
}

async fn serve(config: ServiceConfig) -> Result<()> {
    // Create adapters (Dependency Injection)
    let github = GitHubClient::new(config.github_timeout)?;

    let use_case = HandlePullRequestUseCase::new(
        github.clone(),
        github,
        vec![Box::new(NpmManifestParser::new())],
        Box::new(MarkdownFormatter::new()),
        PullRequestOptions {
            max_concurrent_evaluations: config.max_concurrent_evaluations,
            comment_when_clean: config.comment_when_clean,
        },
    );

    let state = WebhookState::new(
        use_case,
        WebhookSettings {
            policy_timeout: config.policy_timeout,
            memoize_evaluations: config.memoize_evaluations,
        },
    );

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .map_err(|e| ServiceError::BindFailed {
            addr: config.listen,
            details: e.to_string(),
        })?;

    info!(addr = %config.listen, "Webhook server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Webhook server error")?;

    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for the shutdown signal");
    }
}
