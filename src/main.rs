//! resume-match - Score a resume against a job description
//!
//! Uploads a resume and job description to a matching service and shows the
//! score with matching and missing skills, either once on the command line
//! or in a fullscreen terminal UI.

mod api;
mod config;
mod matching;
mod page;
mod report;
mod submit;
mod tui;

use std::fs::{self, File, OpenOptions};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::api::MatchClient;
use crate::config::Config;
use crate::matching::{FormField, MatchForm, JOB_DESCRIPTION_FIELD, RESUME_FIELD};
use crate::page::{Page, PageView, BUSY_LABEL};
use crate::submit::{SubmissionHandler, SubmitOutcome};

/// resume-match - See how well a resume fits a job
#[derive(Parser)]
#[command(name = "resume-match")]
#[command(version)]
#[command(about = "Score a resume against a job description")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a resume once and print the match
    Analyze(AnalyzeArgs),

    /// Start the fullscreen terminal UI
    Tui {
        /// Resume file to prefill
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Matching service base URL
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Show configuration path and effective settings
    Config {
        /// Write the default config file if none exists
        #[arg(long, default_value_t = false)]
        init: bool,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Resume file to upload
    #[arg(short, long)]
    resume: PathBuf,

    /// Job description text
    #[arg(short, long, conflicts_with = "job_file", required_unless_present = "job_file")]
    job_description: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    job_file: Option<PathBuf>,

    /// Extra form field as NAME=VALUE; `NAME=@PATH` attaches a file
    #[arg(long = "field", value_name = "NAME=VALUE", value_parser = FormField::parse_assignment)]
    fields: Vec<FormField>,

    /// Print the rendered results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Matching service base URL
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_else(|err| {
        eprintln!("{} {err:#}", "Ignoring config:".bright_yellow());
        Config::default()
    });
    let diagnostics = config.diagnostics_enabled();

    match cli.command {
        Some(Commands::Analyze(args)) => {
            init_logging(LogTarget::Stderr, diagnostics)?;
            run_analyze(args, &config)
        }
        Some(Commands::Tui { resume, api_url }) => {
            if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
                println!(
                    "{}",
                    "The terminal UI requires an interactive TTY. Try `resume-match analyze`."
                        .bright_yellow()
                );
                return Ok(ExitCode::FAILURE);
            }
            init_logging(LogTarget::File, diagnostics)?;
            run_tui(resume, api_url.as_deref(), &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config { init }) => {
            show_config_info(init)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            if io::stdin().is_terminal() && io::stdout().is_terminal() {
                init_logging(LogTarget::File, diagnostics)?;
                run_tui(None, None, &config)?;
            } else {
                Cli::command().print_help()?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

enum LogTarget {
    Stderr,
    /// The TUI owns the screen, so events go to the log file.
    File,
}

fn init_logging(target: LogTarget, diagnostics: bool) -> Result<()> {
    let default_directive = if diagnostics {
        "warn,resume_match=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = Registry::default().with(filter);
    let installed = match target {
        LogTarget::Stderr => registry
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .try_init(),
        LogTarget::File => {
            let file = open_log_file()?;
            registry
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .try_init()
        }
    };
    // A subscriber installed earlier keeps receiving events.
    if let Err(err) = installed {
        debug!("logging already initialised: {err}");
    }
    Ok(())
}

fn open_log_file() -> Result<File> {
    let path = Config::log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

fn client_for(api_url: Option<&str>, config: &Config) -> MatchClient {
    match api_url {
        Some(url) => MatchClient::with_url(url, &config.api),
        None => MatchClient::new(&config.api),
    }
}

/// The upload form as the analyze flags describe it.
fn analyze_form(args: &AnalyzeArgs) -> Result<MatchForm> {
    let job_description = match (&args.job_description, &args.job_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read job description from {}", path.display()))?,
        (None, None) => String::new(),
    };

    let mut form = MatchForm::resume_upload();
    form.set_file(RESUME_FIELD, Some(args.resume.clone()));
    form.set_text(JOB_DESCRIPTION_FIELD, job_description);
    for field in &args.fields {
        match field {
            FormField::Text { name, value } => form.set_text(name, value.clone()),
            FormField::File { name, path } => form.set_file(name, path.clone()),
        }
    }
    Ok(form)
}

fn run_analyze(args: AnalyzeArgs, config: &Config) -> Result<ExitCode> {
    let page = Page::new(PageView::new(analyze_form(&args)?));
    let handler = SubmissionHandler::new(client_for(args.api_url.as_deref(), config))
        .with_diagnostics(config.diagnostics_enabled());

    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    eprintln!("{}", BUSY_LABEL.bright_cyan());
    let outcome = rt.block_on(handler.handle_submit(&page));

    let view = page.snapshot();
    if let Some(message) = view.alert_message() {
        report::print_alert(message);
    }

    match outcome {
        SubmitOutcome::Rendered => {
            if args.json {
                report::print_json(&view.results)?;
            } else {
                report::print_results(&view.results);
            }
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Rejected | SubmitOutcome::Failed | SubmitOutcome::Ignored => {
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_tui(resume: Option<PathBuf>, api_url: Option<&str>, config: &Config) -> Result<()> {
    let client = client_for(api_url, config);
    let endpoint = client.base_url().to_string();
    let handler =
        Arc::new(SubmissionHandler::new(client).with_diagnostics(config.diagnostics_enabled()));

    let mut form = MatchForm::resume_upload();
    form.set_file(RESUME_FIELD, resume);
    let page = Page::new(PageView::new(form));

    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    tui::run_tui(&rt, handler, page, &endpoint)
}

fn show_config_info(init: bool) -> Result<()> {
    println!("{}", "resume-match configuration\n".bright_cyan().bold());

    let path = config::get_config_path()?;
    println!("{} {}", "Config file:".bright_yellow(), path.bright_white());

    let cfg = if init {
        let cfg = Config::init()?;
        println!("  {} {}", "Status:".bright_cyan(), "Ready".bright_green());
        cfg
    } else {
        if std::path::Path::new(&path).exists() {
            println!("  {} {}", "Status:".bright_cyan(), "Exists".bright_green());
        } else {
            println!(
                "  {} {}",
                "Status:".bright_cyan(),
                "Not created yet (run `resume-match config --init`)".bright_yellow()
            );
        }
        Config::load()?
    };

    let client = MatchClient::new(&cfg.api);
    println!("\n{}", "Matching service:".bright_white().bold());
    println!(
        "  {} {}",
        "Base URL:".bright_cyan(),
        client.base_url().bright_white()
    );
    println!(
        "  {} {}",
        "Timeout:".bright_cyan(),
        match cfg.api.timeout_seconds {
            Some(secs) => format!("{secs}s").bright_white(),
            None => "none".bright_white(),
        }
    );
    println!(
        "  {} {}",
        "Verify SSL:".bright_cyan(),
        if cfg.api.verify_ssl {
            "true".bright_green()
        } else {
            "false".bright_yellow()
        }
    );
    println!(
        "  {} {}",
        "Diagnostics:".bright_cyan(),
        cfg.diagnostics_enabled().to_string().bright_white()
    );

    if let Ok(log) = Config::log_path() {
        println!(
            "\n{} {}",
            "TUI log file:".bright_yellow(),
            log.display().to_string().bright_white()
        );
    }
    Ok(())
}
