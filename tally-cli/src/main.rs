use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tally_core::fmt_usd;
use tally_finance::benchmarks::write_benchmarks_csv;
use tally_finance::{
    BudgetReport, Completion, MonthlyProfile, Scorecard, load_benchmarks, national_averages,
    try_aggregate,
};
use tally_ingest::parse_transactions_csv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod chat;
mod config;
mod llm;
mod render;
mod state;

use config::Config;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "tally", version = VERSION, about = "50/30/20 budget analysis and savings coach")]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dashboard for a transaction CSV: metrics, 50/30/20 split, trend, benchmarks
    Report {
        #[arg(long)]
        csv: PathBuf,

        /// Monthly income (defaults to config)
        #[arg(long)]
        income: Option<f64>,

        /// Benchmark CSV (defaults to config)
        #[arg(long)]
        benchmarks: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Project savings from cutting Wants by a percentage (0-50)
    Simulate {
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        income: Option<f64>,

        #[arg(long)]
        cut: Option<u8>,
    },

    /// Grade raw bucket ratios, e.g. `tally grade 0.5 0.3 0.2`
    Grade {
        needs: f64,
        wants: f64,
        savings: f64,
    },

    /// Interactive session: dashboard, simulator and assistant chat
    Session {
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long)]
        income: Option<f64>,

        #[arg(long)]
        benchmarks: Option<PathBuf>,
    },

    /// National average spending table
    Benchmarks {
        #[command(subcommand)]
        command: BenchmarksCommand,
    },

    /// ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum BenchmarksCommand {
    /// Write the BLS national averages to a CSV
    Fetch {
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the benchmark table in use
    Show {
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();

    let cfg = config::load_config()?;

    match cli.command {
        Command::Report {
            csv,
            income,
            benchmarks,
            json,
        } => {
            let income = income.unwrap_or(cfg.budget.income);
            let (report, profile) = build_report(&csv, income)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let table = load_benchmarks(benchmarks_path(&cfg, benchmarks.as_deref()));
                let cmp = table.as_ref().map(|t| t.compare(&profile)).unwrap_or_default();
                print!("{}", render::dashboard(&report, table.as_ref(), &cmp));
            }
        }

        Command::Simulate { csv, income, cut } => {
            let income = income.unwrap_or(cfg.budget.income);
            let (report, _) = build_report(&csv, income)?;
            let sim = report.simulate(cut.unwrap_or(cfg.budget.default_cut));
            print!("{}", render::simulator(&report, &sim));
        }

        Command::Grade {
            needs,
            wants,
            savings,
        } => {
            for (name, v) in [("needs", needs), ("wants", wants), ("savings", savings)] {
                if !v.is_finite() {
                    bail!("{name} ratio must be a finite number");
                }
            }
            let card = Scorecard::from_ratios(needs, wants, savings);
            println!("Score {:.2}  Grade {}", card.score, card.grade);
        }

        Command::Session {
            csv,
            income,
            benchmarks,
        } => {
            let income = config::check_income(income.unwrap_or(cfg.budget.income))?;
            let table = load_benchmarks(benchmarks_path(&cfg, benchmarks.as_deref()));
            let mut ctx = chat::SessionCtx::new(income, table, cfg.budget.default_cut);
            if let Some(csv) = csv {
                println!("{}\n", ctx.load_and_report(&csv));
            }

            let client = llm::LlmClient::from_config(&cfg.llm)?;
            if client.is_none() {
                eprintln!(
                    "Assistant disabled: {} is not set. Dashboard and simulator still work.\n",
                    cfg.llm.api_key_env
                );
            }
            chat::run_session(ctx, client.as_ref().map(|c| c as &dyn Completion))?;
        }

        Command::Benchmarks { command } => match command {
            BenchmarksCommand::Fetch { out } => {
                let out = out.unwrap_or_else(|| cfg.budget.benchmarks_path.clone());
                let table = national_averages();
                write_benchmarks_csv(&table, &out)?;
                println!("Wrote {} benchmark rows to {}", table.entries().len(), out.display());
            }
            BenchmarksCommand::Show { path } => {
                let p = benchmarks_path(&cfg, path.as_deref());
                match load_benchmarks(&p) {
                    Some(table) => print!("{}", render::benchmark_table(&table)),
                    None => bail!(
                        "no benchmark data at {} (run: tally benchmarks fetch)",
                        p.display()
                    ),
                }
            }
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => show_config(&cfg)?,
        },
    }

    Ok(())
}

fn benchmarks_path(cfg: &Config, flag: Option<&Path>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| cfg.budget.benchmarks_path.clone())
}

fn build_report(csv: &Path, income: f64) -> Result<(BudgetReport, MonthlyProfile)> {
    if !csv.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv.display());
    }
    let income = config::check_income(income)?;
    let txns = parse_transactions_csv(csv).with_context(|| format!("parsing {}", csv.display()))?;
    let profile = try_aggregate(&txns, income)?;
    info!(
        transactions = txns.len(),
        months = profile.months_observed,
        spend = %fmt_usd(profile.total_monthly_spend),
        "aggregated"
    );
    Ok((BudgetReport::build(&profile), profile))
}

fn show_config(cfg: &Config) -> Result<()> {
    let p = config::config_path()?;
    let origin = if p.exists() { p.display().to_string() } else { "defaults".to_string() };
    println!("# {origin}");
    print!("{}", toml::to_string_pretty(cfg).context("serialize config")?);
    Ok(())
}
