//! Interactive session loop. One `Session` per run; every line either is a
//! slash command or goes to the assistant.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tally_core::{BudgetError, Session, View, fmt_usd, parse_date};
use tally_finance::{BenchmarkTable, BudgetReport, Completion, aggregate, ask, is_ready, session_report};
use tally_ingest::{ManualEntry, SUGGESTED_CATEGORIES, parse_transactions_csv};
use tracing::{debug, warn};

use crate::config::check_income;
use crate::render;

const NO_DATA: &str = "No data yet. Use /load <csv> or /add <date> <category> <amount>.";

pub struct SessionCtx {
    pub session: Session,
    pub benchmarks: Option<BenchmarkTable>,
    pub cut: u8,
}

#[derive(Debug, PartialEq)]
pub enum Reply {
    Text(String),
    Ask(String),
    Quit,
}

impl SessionCtx {
    pub fn new(income: f64, benchmarks: Option<BenchmarkTable>, cut: u8) -> Self {
        Self {
            session: Session::new(income),
            benchmarks,
            cut,
        }
    }

    /// Replace the transaction set from a CSV; on error the old set is kept.
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        let txns = parse_transactions_csv(path)?;
        let n = txns.len();
        self.session.replace_transactions(txns);
        debug!(path = %path.display(), rows = n, "session data replaced");
        Ok(n)
    }

    /// `load`, reported as text. A failure leaves the previous data in place.
    pub fn load_and_report(&mut self, path: &Path) -> String {
        match self.load(path) {
            Ok(n) => format!("Loaded {n} transactions from {}", path.display()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "CSV upload rejected");
                format!("Error processing CSV: {e}")
            }
        }
    }

    fn current_view(&self) -> String {
        let view = self.session.view();
        if view == View::Chat {
            return render::messages(self.session.messages());
        }
        let txns = self.session.transactions();
        if !is_ready(txns) {
            return NO_DATA.to_string();
        }
        let profile = aggregate(txns, self.session.income());
        let report = BudgetReport::build(&profile);
        if view == View::Simulator {
            return render::simulator(&report, &report.simulate(self.cut));
        }
        let cmp = self
            .benchmarks
            .as_ref()
            .map(|t| t.compare(&profile))
            .unwrap_or_default();
        render::dashboard(&report, self.benchmarks.as_ref(), &cmp)
    }
}

fn help_text() -> String {
    format!(
        "Commands:\n\
- /help\n\
- /view dashboard|simulator|chat\n\
- /add <YYYY-MM-DD> <category> <amount> [description]\n\
- /load <csv>\n\
- /income <amount>\n\
- /simulate <percent 0-50>\n\
- /quit\n\
Anything else is sent to the assistant.\n\
Suggested categories: {}",
        SUGGESTED_CATEGORIES.join(", ")
    )
}

fn parse_add(args: &str) -> tally_core::Result<ManualEntry> {
    let mut parts = args.split_whitespace();
    let usage = || BudgetError::InvalidInput("usage: /add <date> <category> <amount> [description]".into());

    let date = parts.next().ok_or_else(usage)?;
    let category = parts.next().ok_or_else(usage)?;
    let amount = parts.next().ok_or_else(usage)?;
    let description = parts.collect::<Vec<_>>().join(" ");

    let date = parse_date(date)
        .ok_or_else(|| BudgetError::InvalidInput(format!("unrecognized date '{date}'")))?;
    let amount: f64 = amount
        .trim_start_matches('$')
        .replace(',', "")
        .parse()
        .map_err(|_| BudgetError::InvalidInput(format!("invalid amount '{amount}'")))?;

    Ok(ManualEntry::new(date, description, category, amount))
}

fn parse_percent(arg: &str) -> Option<u8> {
    let v: f64 = arg.trim().trim_end_matches('%').parse().ok()?;
    if !v.is_finite() || v < 0.0 {
        return None;
    }
    Some(v.round().min(u8::MAX as f64) as u8)
}

/// Apply one input line to the session.
pub fn handle_line(ctx: &mut SessionCtx, line: &str) -> Reply {
    let s = line.trim();
    if s.is_empty() {
        return Reply::Text(String::new());
    }
    if !s.starts_with('/') {
        return Reply::Ask(s.to_string());
    }

    let (cmd, args) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
    let args = args.trim();
    match cmd {
        "/help" => Reply::Text(help_text()),
        "/quit" | "/exit" => Reply::Quit,
        "/view" => {
            if !args.is_empty() {
                match View::parse(args) {
                    Some(v) => ctx.session.set_view(v),
                    None => return Reply::Text(format!("Unknown view '{args}'. Try dashboard, simulator or chat.")),
                }
            }
            Reply::Text(ctx.current_view())
        }
        "/add" => match parse_add(args).and_then(ManualEntry::into_transaction) {
            Ok(txn) => {
                let date = txn.date.map(|d| d.to_string()).unwrap_or_default();
                let msg = format!("Added: {} {} on {date}", txn.category, fmt_usd(txn.amount));
                ctx.session.add_transaction(txn);
                Reply::Text(msg)
            }
            Err(e) => Reply::Text(e.to_string()),
        },
        "/load" => {
            if args.is_empty() {
                return Reply::Text("usage: /load <csv>".to_string());
            }
            Reply::Text(ctx.load_and_report(&PathBuf::from(args)))
        }
        "/income" => match args.replace(',', "").trim_start_matches('$').parse::<f64>().ok().map(check_income) {
            Some(Ok(v)) => {
                ctx.session.set_income(v);
                Reply::Text(format!("Monthly income set to {}", fmt_usd(v)))
            }
            _ => Reply::Text(format!("invalid income '{args}'")),
        },
        "/simulate" => {
            if !args.is_empty() {
                match parse_percent(args) {
                    Some(p) => ctx.cut = p,
                    None => return Reply::Text(format!("invalid percentage '{args}'")),
                }
            }
            ctx.session.set_view(View::Simulator);
            match session_report(&ctx.session) {
                None => Reply::Text(NO_DATA.to_string()),
                Some(report) => {
                    let sim = report.simulate(ctx.cut);
                    ctx.cut = sim.cut_percentage;
                    Reply::Text(render::simulator(&report, &sim))
                }
            }
        }
        _ => Reply::Text("Unknown command. Try /help".to_string()),
    }
}

/// Send one question to the assistant; errors become visible text.
pub fn answer(ctx: &mut SessionCtx, question: &str, completion: Option<&dyn Completion>) -> String {
    let Some(completion) = completion else {
        return "Assistant disabled: set the API key variable named in ~/.tally/config.toml [llm].api_key_env".to_string();
    };
    match ask(&mut ctx.session, question, ctx.benchmarks.as_ref(), completion) {
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, "chat turn failed");
            format!("Error: {e}")
        }
    }
}

pub fn run_session(mut ctx: SessionCtx, completion: Option<&dyn Completion>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("tally session (type /help for commands)\n");
    print!("{}", render::messages(ctx.session.messages()));
    if ctx.session.has_data() {
        println!("{}", ctx.current_view());
    }

    let mut line = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match handle_line(&mut ctx, &line) {
            Reply::Quit => break,
            Reply::Text(t) if t.is_empty() => {}
            Reply::Text(t) => println!("{t}"),
            Reply::Ask(q) => println!("agent: {}\n", answer(&mut ctx, &q, completion)),
        }
    }
    Ok(())
}
