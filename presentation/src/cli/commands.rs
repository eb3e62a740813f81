//! CLI command definitions

use clap::{Parser, ValueEnum};
use edrr_domain::{AgentProfile, ChangeType};
use std::path::PathBuf;

/// Output format for cycle results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every phase with its dialectic, perspectives and outcome
    Full,
    /// Only the per-phase outcome and the final synthesis
    Synthesis,
    /// JSON output
    Json,
}

impl From<OutputFormat> for edrr_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => edrr_domain::OutputFormat::Full,
            OutputFormat::Synthesis => edrr_domain::OutputFormat::Synthesis,
            OutputFormat::Json => edrr_domain::OutputFormat::Json,
        }
    }
}

/// Kind of change being proposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChangeKind {
    Add,
    Modify,
    Remove,
}

impl From<ChangeKind> for ChangeType {
    fn from(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::Add => ChangeType::Add,
            ChangeKind::Modify => ChangeType::Modify,
            ChangeKind::Remove => ChangeType::Remove,
        }
    }
}

/// CLI arguments for edrr-council
#[derive(Parser, Debug)]
#[command(name = "edrr-council")]
#[command(author, version, about = "Agent council that evaluates requirement changes through EDRR")]
#[command(long_about = r#"
EDRR Council walks a proposed requirement change through four phases:

1. Expand:        explore the change and its alternatives
2. Differentiate: compare and pick the strongest option
3. Refine:        tighten the chosen option into concrete steps
4. Retrospect:    review what the cycle learned

Each phase assigns WSDE roles to the team, runs dialectical reasoning
(thesis, antithesis, synthesis) and records the result in vector memory.
A result without consensus is recorded under RETROSPECT.

Configuration files are loaded from (in priority order):
1. EDRR_* environment variables
2. --config <path>     Explicit config file
3. ./edrr.toml         Project-level config
4. ~/.config/edrr-council/config.toml   Global config

Example:
  edrr-council "Support SSO login"
  edrr-council -t remove -d security -d usability "Drop password login"
  edrr-council -a alice=analysis,review -a bob=research "Cache search results"
"#)]
pub struct Cli {
    /// Description of the proposed change
    pub change: Option<String>,

    /// Kind of change
    #[arg(short = 't', long = "type", value_enum, default_value = "modify")]
    pub change_type: ChangeKind,

    /// Team member as `id` or `id=expertise,expertise` (repeatable, replaces the configured team)
    #[arg(short, long, value_name = "AGENT")]
    pub agent: Vec<String>,

    /// Discipline to consult; any value switches to multi-disciplinary reasoning
    #[arg(short, long, value_name = "DISCIPLINE")]
    pub discipline: Vec<String>,

    /// Agreement rule: unanimous, majority, atleast:N or N%
    #[arg(long, value_name = "RULE")]
    pub rule: Option<String>,

    /// Minimum mean confidence for consensus (0.0 to 1.0)
    #[arg(long, value_name = "VALUE")]
    pub min_confidence: Option<f64>,

    /// Stop after this many phases instead of running the whole cycle
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=4))]
    pub phases: Option<u8>,

    /// Persist memory to this JSON file (added as the deepest tier)
    #[arg(long, value_name = "PATH")]
    pub memory_file: Option<PathBuf>,

    /// Append a JSONL transcript of every phase result to this file
    #[arg(long, value_name = "PATH")]
    pub reasoning_log: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Print store metrics and tier statistics after the run
    #[arg(long)]
    pub stats: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write tracing output to daily-rotated files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Team given with `--agent`, in command-line order
    pub fn agent_profiles(&self) -> Vec<AgentProfile> {
        self.agent.iter().filter_map(|raw| parse_agent(raw)).collect()
    }
}

/// Parse `id` or `id=expertise,expertise`. Blank ids yield `None`.
pub fn parse_agent(raw: &str) -> Option<AgentProfile> {
    let (id, expertise) = match raw.split_once('=') {
        Some((id, list)) => (id, list),
        None => (raw, ""),
    };
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    let expertise = expertise
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string);
    Some(AgentProfile::new(id).with_expertise(expertise))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "edrr-council",
            "-t",
            "add",
            "-a",
            "alice=analysis, review",
            "-a",
            "bob",
            "-d",
            "security",
            "--phases",
            "2",
            "-vv",
            "Support SSO login",
        ])
        .unwrap();

        assert_eq!(cli.change.as_deref(), Some("Support SSO login"));
        assert_eq!(ChangeType::from(cli.change_type), ChangeType::Add);
        assert_eq!(cli.phases, Some(2));
        assert_eq!(cli.verbose, 2);

        let team = cli.agent_profiles();
        assert_eq!(team.len(), 2);
        assert_eq!(team[0].id, "alice");
        assert_eq!(team[0].expertise, vec!["analysis", "review"]);
        assert!(team[1].expertise.is_empty());
    }

    #[test]
    fn test_phases_out_of_range() {
        assert!(Cli::try_parse_from(["edrr-council", "--phases", "5", "x"]).is_err());
    }

    #[test]
    fn test_parse_agent_rejects_blank_id() {
        assert!(parse_agent(" =analysis").is_none());
        assert!(parse_agent("").is_none());
    }
}
