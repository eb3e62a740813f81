//! CLI entrypoint for EDRR Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use edrr_application::{
    ChatReporter, CompositeChatReporter, EdrrService, NoProgress, PhaseProgressNotifier, PhaseStep,
    TieredMemoryManager,
};
use edrr_domain::{ChangeType, MetricsRegistry, OutputFormat, RequirementChange};
use edrr_infrastructure::config::{FileAgentConfig, FileTierConfig};
use edrr_infrastructure::{
    ConfigLoader, FileConfig, FileTierBackend, HeuristicReasoningProvider, JsonlChatReporter,
    open_tiers,
};
use edrr_presentation::{
    Cli, ConsoleChatReporter, ConsoleFormatter, ProgressReporter, SimpleProgress,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let mut file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&cli, &mut file_config);

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, file_config.logging.dir.as_deref());

    info!("Starting EDRR Council");

    let config = file_config
        .to_edrr_config()
        .context("Invalid configuration")?;

    let description = match cli.change.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => bail!("A change description is required. Try: edrr-council \"Support SSO login\""),
    };
    let change = RequirementChange::new(ChangeType::from(cli.change_type), description)?;

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(file_config.output.format)
        .unwrap_or_default();
    ConsoleFormatter::set_color(file_config.output.color);

    // === Dependency Injection ===
    let metrics = Arc::new(MetricsRegistry::new());
    let tiers = open_tiers(&file_config.memory, metrics.clone())?;
    let memory = Arc::new(TieredMemoryManager::new(
        tiers,
        config.memory.clone(),
        metrics.clone(),
    )?);

    // Log lines on stderr would tear through spinners
    let plain = cli.verbose > 0 && file_config.logging.dir.is_none();
    let progress: Arc<dyn PhaseProgressNotifier> = if cli.quiet || format == OutputFormat::Json {
        Arc::new(NoProgress)
    } else if plain {
        Arc::new(SimpleProgress)
    } else {
        Arc::new(ProgressReporter::new())
    };

    let mut chat = CompositeChatReporter::default();
    if plain && !cli.quiet {
        chat = chat.with(Arc::new(ConsoleChatReporter::new()));
    }
    if let Some(path) = &file_config.logging.reasoning_log {
        match JsonlChatReporter::new(path) {
            Some(reporter) => chat = chat.with(Arc::new(reporter)),
            None => warn!("Reasoning transcript disabled: {}", path.display()),
        }
    }
    let chat: Arc<dyn ChatReporter> = Arc::new(chat);

    let service = EdrrService::new(
        Arc::new(HeuristicReasoningProvider::new()),
        memory.clone(),
        config,
    )
    .with_progress(progress)
    .with_chat_reporter(chat);

    // === Run ===
    if !cli.quiet && format != OutputFormat::Json {
        println!();
        println!("+============================================================+");
        println!("|              EDRR Council - Requirement Review             |");
        println!("+============================================================+");
        println!();
        println!("Change: [{}] {}", change.change_type(), change.description());
        println!(
            "Team:   {}",
            file_config
                .team
                .agents
                .iter()
                .map(|a| a.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    let handle = service.submit(change).await?;
    let limit = cli.phases.map(usize::from).unwrap_or(usize::MAX);
    let mut entered = 1;
    while entered < limit {
        match service.advance(&handle).await? {
            Some(PhaseStep::Entered(_)) => entered += 1,
            Some(PhaseStep::CycleComplete) | None => break,
        }
    }

    let reports = service.history(&handle).await.unwrap_or_default();
    println!("{}", ConsoleFormatter::render(format, &reports));

    if cli.stats {
        println!(
            "{}",
            ConsoleFormatter::format_stats(&metrics.snapshot(), &memory.tier_stats())
        );
    }

    Ok(())
}

/// Install the tracing subscriber: stderr by default, daily-rotated files
/// when `log_dir` is given.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "edrr-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

/// Command-line flags win over every configuration source
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    let team = cli.agent_profiles();
    if !team.is_empty() {
        config.team.agents = team
            .into_iter()
            .map(|p| FileAgentConfig {
                id: p.id,
                expertise: p.expertise,
            })
            .collect();
    }

    if !cli.discipline.is_empty() {
        config.reasoning.mode = "multi_disciplinary".to_string();
        config.reasoning.disciplines = cli.discipline.clone();
    }
    if let Some(rule) = &cli.rule {
        config.reasoning.rule = rule.clone();
    }
    if let Some(min_confidence) = cli.min_confidence {
        config.reasoning.min_confidence = min_confidence;
    }

    if let Some(path) = &cli.memory_file {
        config.memory.tiers.push(FileTierConfig {
            name: "archive".to_string(),
            backend: FileTierBackend::JsonFile,
            path: Some(path.clone()),
        });
    }
    if let Some(path) = &cli.reasoning_log {
        config.logging.reasoning_log = Some(path.clone());
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.dir = Some(dir.clone());
    }
}
