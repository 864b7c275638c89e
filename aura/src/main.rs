//! aura - mood journal CLI
//!
//! Record check-ins and derive statistical insights from them.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Database: $XDG_DATA_HOME/aura/data.db (~/.local/share/aura/data.db)
//! - Config: $XDG_CONFIG_HOME/aura/config.toml (~/.config/aura/config.toml)
//! - Logs: $XDG_STATE_HOME/aura/aura.log (~/.local/state/aura/aura.log)

mod render;

use aura_core::analytics::plugins::{
    confidence, correlation, forecast, interventions, momentum, outlook, pattern_strength,
};
use aura_core::analytics::{self, AnalyticsContext};
use aura_core::{parse_tags, AuraReportClient, Config, Database, Entry, EntryStore, KeyedEntryStore};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "aura")]
#[command(about = "Mood journal with statistical insights")]
#[command(version)]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Date forecasts start after (default: today)
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Record a check-in
    Checkin {
        /// Mood, 1-10
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..=10))]
        mood: i64,

        /// Energy, 1-10
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..=10))]
        energy: i64,

        /// Free-text note
        #[arg(short, long, default_value = "")]
        note: String,

        /// Comma-separated tags
        #[arg(short, long, default_value = "")]
        tags: String,

        /// Record at an RFC 3339 timestamp instead of now
        #[arg(long)]
        at: Option<DateTime<FixedOffset>>,
    },

    /// List recent check-ins
    List {
        /// Maximum entries to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Delete a check-in by id (a unique prefix is enough)
    Delete { id: String },

    /// Descriptive statistics, streaks and volatility
    Stats,

    /// Short-range direction of mood and energy
    Momentum,

    /// Strongest recurring patterns
    Patterns,

    /// Confidence scores for detected patterns
    Confidence,

    /// Multi-model forecasts
    Forecast {
        /// Days to forecast (default: from config)
        #[arg(short, long)]
        days: Option<u32>,

        /// Seed for the volatility-adjusted model
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Day-by-day outlook with risks, opportunities and suggestions
    Outlook,

    /// Correlations between mood, energy and frequent tags
    Correlations,

    /// Suggestions when the latest mood dips below the recent baseline
    Interventions,

    /// Run every analyzer
    Insights {
        /// Seed for the volatility-adjusted model
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Request an aura report from the analysis service
    Report,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard =
        aura_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let db = Database::open(&Config::database_path()).context("failed to open database")?;
    db.migrate().context("failed to run database migrations")?;
    let store = KeyedEntryStore::new(&db, config.storage.key.clone());

    let cli = Cli {
        config: &config,
        format: args.format,
        as_of: args.as_of.unwrap_or_else(|| Local::now().date_naive()),
    };

    match args.command {
        Command::Checkin {
            mood,
            energy,
            note,
            tags,
            at,
        } => cmd_checkin(&cli, &store, mood, energy, note, &tags, at),
        Command::List { limit } => cmd_list(&cli, &store, limit),
        Command::Delete { id } => cmd_delete(&cli, &store, &id),
        Command::Stats => cmd_stats(&cli, &store.load()),
        Command::Momentum => cmd_momentum(&cli, &store.load()),
        Command::Patterns => cmd_patterns(&cli, &store.load()),
        Command::Confidence => cmd_confidence(&cli, &store.load()),
        Command::Forecast { days, seed } => cmd_forecast(&cli, &store.load(), days, seed),
        Command::Outlook => cmd_outlook(&cli, &store.load()),
        Command::Correlations => cmd_correlations(&cli, &store.load()),
        Command::Interventions => cmd_interventions(&cli, &store.load()),
        Command::Insights { seed } => cmd_insights(&cli, &store.load(), seed),
        Command::Report => cmd_report(&cli, &store.load()),
    }
}

/// Settings shared by every command.
struct Cli<'a> {
    config: &'a Config,
    format: OutputFormat,
    as_of: NaiveDate,
}

impl Cli<'_> {
    fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print the below-threshold notice. Returns true when the command
    /// should stop.
    fn needs_more(&self, entries: &[Entry], required: usize, what: &str) -> Result<bool> {
        if entries.len() >= required {
            return Ok(false);
        }
        if self.json() {
            self.print_json(&serde_json::json!({
                "available": false,
                "required": required,
                "entries": entries.len(),
            }))?;
        } else {
            println!(
                "Need at least {} entries for {} (have {}).",
                required,
                what,
                entries.len()
            );
        }
        Ok(true)
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn cmd_checkin(
    cli: &Cli,
    store: &KeyedEntryStore,
    mood: i64,
    energy: i64,
    note: String,
    tags: &str,
    at: Option<DateTime<FixedOffset>>,
) -> Result<()> {
    let tags = parse_tags(tags);
    let entry = match at {
        Some(ts) => Entry::at(ts, mood, energy, note, tags),
        None => Entry::new(mood, energy, note, tags),
    };
    let total = store.add(entry.clone()).context("failed to save entry")?;
    tracing::info!(id = %entry.id, total, "Recorded check-in");

    if cli.json() {
        return cli.print_json(&entry);
    }
    println!(
        "Checked in: mood {}, energy {} ({} entries total)",
        entry.mood, entry.energy, total
    );
    println!("Id: {}", entry.id);
    Ok(())
}

fn cmd_list(cli: &Cli, store: &KeyedEntryStore, limit: usize) -> Result<()> {
    let entries = store.load();
    let shown = &entries[..entries.len().min(limit)];

    if cli.json() {
        return cli.print_json(shown);
    }
    if entries.is_empty() {
        println!("No entries yet. Run 'aura checkin' to add one.");
        return Ok(());
    }
    render::entries(shown);
    if entries.len() > shown.len() {
        println!("({} more)", entries.len() - shown.len());
    }
    Ok(())
}

fn cmd_delete(cli: &Cli, store: &KeyedEntryStore, id: &str) -> Result<()> {
    let entries = store.load();
    let matches: Vec<&Entry> = entries.iter().filter(|e| e.id.starts_with(id)).collect();
    let target = match matches.as_slice() {
        [] => anyhow::bail!("No entry found matching '{}'", id),
        [one] => one.id.clone(),
        _ => anyhow::bail!("'{}' matches {} entries, use a longer prefix", id, matches.len()),
    };

    store.remove(&target).context("failed to delete entry")?;
    if cli.json() {
        return cli.print_json(&serde_json::json!({ "deleted": target }));
    }
    println!("Deleted entry {}", target);
    Ok(())
}

fn cmd_stats(cli: &Cli, entries: &[Entry]) -> Result<()> {
    let stats = analytics::detailed_statistics(entries);
    if cli.json() {
        return cli.print_json(&stats);
    }
    match stats {
        Some(stats) => render::statistics(&stats),
        None => println!("No entries yet. Run 'aura checkin' to add one."),
    }
    Ok(())
}

fn cmd_momentum(cli: &Cli, entries: &[Entry]) -> Result<()> {
    if cli.needs_more(entries, momentum::MIN_ENTRIES, "momentum")? {
        return Ok(());
    }
    let momentum = analytics::momentum(entries);
    if cli.json() {
        return cli.print_json(&momentum);
    }
    if let Some(m) = momentum {
        println!("{}", m.description());
    }
    Ok(())
}

fn cmd_patterns(cli: &Cli, entries: &[Entry]) -> Result<()> {
    if cli.needs_more(entries, pattern_strength::MIN_ENTRIES, "pattern strength")? {
        return Ok(());
    }
    let patterns =
        analytics::pattern_strengths(entries, cli.config.analytics.max_pattern_insights);
    if cli.json() {
        return cli.print_json(&patterns);
    }
    render::patterns(&patterns);
    Ok(())
}

fn cmd_confidence(cli: &Cli, entries: &[Entry]) -> Result<()> {
    if cli.needs_more(entries, confidence::MIN_ENTRIES, "confidence scoring")? {
        return Ok(());
    }
    let scores = analytics::confidence_scores(entries, cli.config.analytics.max_confidence_scores);
    if cli.json() {
        return cli.print_json(&scores);
    }
    render::confidence(&scores);
    Ok(())
}

fn cmd_forecast(cli: &Cli, entries: &[Entry], days: Option<u32>, seed: Option<u64>) -> Result<()> {
    if cli.needs_more(entries, forecast::MIN_ENTRIES, "forecasting")? {
        return Ok(());
    }
    let days = days.unwrap_or(cli.config.analytics.forecast_days);
    let mut rng = rng_from(seed);
    let models = analytics::forecast_models(entries, cli.as_of, days, &mut rng);
    if cli.json() {
        return cli.print_json(&models);
    }
    render::forecasts(&models);
    Ok(())
}

fn cmd_outlook(cli: &Cli, entries: &[Entry]) -> Result<()> {
    if cli.needs_more(entries, outlook::MIN_ENTRIES, "the weekly outlook")? {
        return Ok(());
    }
    let days = analytics::weekly_outlook(entries, cli.as_of, cli.config.analytics.outlook_days);
    if cli.json() {
        return cli.print_json(&days);
    }
    render::outlook(&days);
    Ok(())
}

fn cmd_correlations(cli: &Cli, entries: &[Entry]) -> Result<()> {
    if cli.needs_more(entries, correlation::MIN_ENTRIES, "correlations")? {
        return Ok(());
    }
    let matrix = analytics::correlation_matrix(entries, cli.config.analytics.top_tags);
    if cli.json() {
        return cli.print_json(&matrix);
    }
    if let Some(matrix) = matrix {
        render::correlations(&matrix);
    }
    Ok(())
}

fn cmd_interventions(cli: &Cli, entries: &[Entry]) -> Result<()> {
    if cli.needs_more(entries, interventions::MIN_ENTRIES, "interventions")? {
        return Ok(());
    }
    let current = entries[0].mood_f64();
    let suggestions = analytics::interventions(entries, current);
    if cli.json() {
        return cli.print_json(&suggestions);
    }
    render::interventions(&suggestions);
    Ok(())
}

fn cmd_insights(cli: &Cli, entries: &[Entry], seed: Option<u64>) -> Result<()> {
    let engine = analytics::create_default_engine();
    let mut rng = rng_from(seed);
    let mut ctx = AnalyticsContext::new(cli.as_of, &cli.config.analytics, &mut rng);
    let results = engine.run_all(entries, &mut ctx);

    if cli.json() {
        let output = serde_json::json!({
            "entries": entries.len(),
            "as_of": cli.as_of,
            "results": results.iter().map(|r| {
                serde_json::json!({
                    "analyzer": r.analyzer_name,
                    "status": r.status.as_str(),
                    "insights_produced": r.insights_produced(),
                    "duration_ms": r.duration_ms,
                    "insights": r.insights,
                })
            }).collect::<Vec<_>>(),
        });
        return cli.print_json(&output);
    }

    render::run_results(&results);
    println!("\n---");
    println!(
        "Ran {} analyzer(s) over {} entries, {} insights produced",
        results.len(),
        entries.len(),
        results.iter().map(|r| r.insights_produced()).sum::<usize>()
    );
    Ok(())
}

fn cmd_report(cli: &Cli, entries: &[Entry]) -> Result<()> {
    let client = AuraReportClient::new(&cli.config.report).context("invalid report configuration")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    let response = runtime
        .block_on(client.analyze_patterns(entries))
        .context("failed to generate aura report")?;

    if cli.json() {
        return cli.print_json(&response);
    }
    println!("{}", response.analysis);
    println!();
    println!("({} entries analyzed)", response.entries_analyzed);
    Ok(())
}
