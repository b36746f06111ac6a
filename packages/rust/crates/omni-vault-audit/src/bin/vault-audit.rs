#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use omni_vault_audit::{
    AuditConfig, AuditReport, ConnectivityClass, ScanOptions, VaultAuditor, display_name,
    load_vault, note_body, parse_wikilinks,
};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "vault-audit",
    about = "Audit a markdown vault: categories, link graph, stale and duplicate notes",
    arg_required_else_help = true
)]
struct Cli {
    /// Vault root directory.
    #[arg(
        long,
        short = 'r',
        value_name = "DIR",
        default_value = ".",
        global = true
    )]
    root: PathBuf,

    /// YAML config file merged over the built-in defaults.
    #[arg(long = "conf", short = 'c', value_name = "FILE", global = true)]
    config_file: Option<PathBuf>,

    /// Exclude these directory names (repeatable).
    #[arg(long = "exclude-dir", value_name = "DIR", global = true)]
    exclude_dirs: Vec<String>,

    /// Override the stale threshold in days.
    #[arg(long = "stale-days", global = true)]
    stale_days: Option<u64>,

    /// Override the hub threshold.
    #[arg(long = "hub-threshold", global = true)]
    hub_threshold: Option<usize>,

    /// Output format.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Json, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full audit report.
    Audit,
    /// Notes whose link count reaches the hub threshold.
    Hubs {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Notes with no links in either direction.
    Orphans,
    /// Vault statistics and insights.
    Stats,
    /// Wikilinks of one note with its connectivity class.
    Links { file: PathBuf },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

fn load_config(cli: &Cli) -> Result<AuditConfig> {
    let mut config = match &cli.config_file {
        Some(path) => AuditConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AuditConfig::default(),
    };
    if let Some(days) = cli.stale_days {
        config.stale_after_days = days;
    }
    if let Some(threshold) = cli.hub_threshold {
        config.hub_threshold = threshold;
    }
    Ok(config)
}

fn run_audit(cli: &Cli, auditor: &VaultAuditor) -> Result<AuditReport> {
    let options = ScanOptions::default().with_excluded_dirs(&cli.exclude_dirs);
    let inputs = load_vault(&cli.root, &options)
        .with_context(|| format!("failed to scan vault {}", cli.root.display()))?;
    Ok(auditor.audit(&inputs))
}

fn emit<T: Serialize>(value: &T, output: OutputFormat) -> Result<()> {
    let rendered = match output {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
    }
    .context("failed to serialize CLI output as JSON")?;
    println!("{rendered}");
    Ok(())
}

fn resolve_note_path(root: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() || file.exists() {
        file.to_path_buf()
    } else {
        root.join(file)
    }
}

fn execute(cli: &Cli, auditor: &VaultAuditor) -> Result<()> {
    let report = run_audit(cli, auditor)?;
    match &cli.command {
        Command::Audit => emit(&report, cli.output),
        Command::Hubs { limit } => {
            let hubs: Vec<_> = report.connectivity.hubs.iter().take(*limit).collect();
            emit(
                &json!({
                    "threshold": auditor.config().hub_threshold,
                    "total": report.connectivity.hubs.len(),
                    "hubs": hubs,
                }),
                cli.output,
            )
        }
        Command::Orphans => {
            let orphans: Vec<&str> = report
                .connectivity
                .names_in(ConnectivityClass::Orphan)
                .collect();
            emit(
                &json!({
                    "count": orphans.len(),
                    "percentage": report.stats.orphan_percentage,
                    "orphans": orphans,
                }),
                cli.output,
            )
        }
        Command::Stats => emit(
            &json!({
                "stats": report.stats,
                "connectivity": report.connectivity.counts,
                "insights": report.insights,
            }),
            cli.output,
        ),
        Command::Links { file } => {
            let path = resolve_note_path(&cli.root, file);
            let name = display_name(&path)
                .with_context(|| format!("not a note path: {}", path.display()))?;
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read note {}", path.display()))?;
            let row = report
                .connectivity
                .notes
                .iter()
                .find(|row| row.name == name);
            emit(
                &json!({
                    "name": name,
                    "path": path.to_string_lossy().replace('\\', "/"),
                    "class": row.map(|row| row.class),
                    "incoming_count": row.map_or(0, |row| row.incoming_count),
                    "outgoing_count": row.map_or(0, |row| row.outgoing_count),
                    "links": parse_wikilinks(note_body(&content)),
                }),
                cli.output,
            )
        }
    }
}

fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let auditor = VaultAuditor::new(config).context("invalid audit configuration")?;
    execute(&cli, &auditor)
}
