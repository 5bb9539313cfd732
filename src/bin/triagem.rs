//! triagem — email triage CLI
//!
//! Classify an email and print a suggested reply.

use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use triagem::render::{self, Theme, Typewriter};
use triagem::{
    AnalyzeClient, Config, EmailFile, Notice, Preferences, SubmissionHandler, SubmitControl,
    ViewState,
};

/// Triagem CLI
#[derive(Parser)]
#[command(name = "triagem")]
#[command(version = triagem::PKG_VERSION)]
#[command(about = "Classify emails as productive or unproductive and draft a reply")]
struct Args {
    /// Service base URL (overrides the config file)
    #[arg(short, long, env = "TRIAGEM_URL")]
    url: Option<String>,

    /// Config file path
    #[arg(short, long, env = "TRIAGEM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyse an email given as text or as a file
    Analyze {
        /// Email text (or omit to read from stdin)
        #[arg(conflicts_with = "file")]
        text: Option<String>,
        /// Upload a .txt or .pdf file instead of sending text
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Declared media type of the file (default: inferred from the extension)
        #[arg(long, requires = "file")]
        media_type: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Print the suggested reply at once instead of typing it out
        #[arg(long)]
        no_typewriter: bool,
    },

    /// Show or change the colour theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },

    /// Show build information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
    Dark,
    Light,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let prefs_path = Preferences::default_path();
    let mut prefs = Preferences::load(&prefs_path);

    match args.command {
        Command::Analyze {
            text,
            file,
            media_type,
            json,
            no_typewriter,
        } => {
            let mut config = Config::load(args.config.as_deref())?;
            if let Some(url) = args.url {
                config.service.base_url = url;
            }
            let theme = Theme::from_prefs(&prefs);

            let view = match file {
                Some(path) => {
                    let mut email = EmailFile::from_path(&path)?;
                    if let Some(media_type) = media_type {
                        email.media_type = media_type;
                    }
                    ViewState::with_file(email)
                }
                None => ViewState::with_text(resolve_text(text)?),
            };

            let client =
                AnalyzeClient::with_timeout(&config.service.base_url, config.service.timeout())?;
            let handler = SubmissionHandler::with_limits(Arc::new(client), config.limits.clone());

            let outcome = handler.submit(&view, &StatusLine::new()).await;

            if let Some(result) = outcome.analysis() {
                if json {
                    println!("{}", serde_json::to_string_pretty(result)?);
                } else {
                    let bar_width = config.display.confidence_bar_width;
                    print!("{}", render::render_summary(result, theme, bar_width));
                    print!("{}", render::reply_heading(theme));
                    let delay = if no_typewriter || !io::stdout().is_terminal() {
                        std::time::Duration::ZERO
                    } else {
                        config.display.typewriter_delay()
                    };
                    type_reply(&result.response, delay).await?;
                }
            }

            eprintln!("{}", render::render_notice(&outcome.notice, theme));
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }

        Command::Theme { action } => {
            let changed = match action {
                ThemeAction::Show => false,
                ThemeAction::Toggle => {
                    prefs.toggle_dark_mode();
                    true
                }
                ThemeAction::Dark => {
                    prefs.dark_mode = true;
                    true
                }
                ThemeAction::Light => {
                    prefs.dark_mode = false;
                    true
                }
            };
            if changed {
                prefs.save(&prefs_path)?;
            }
            let name = if prefs.dark_mode { "dark" } else { "light" };
            let notice = Notice::info(format!("theme: {name}"));
            println!(
                "{}",
                render::render_notice(&notice, Theme::from_prefs(&prefs))
            );
        }

        Command::Version => {
            println!("triagem {}", triagem::version_string());
            println!("built: {}", triagem::BUILD_TIMESTAMP);
        }
    }

    Ok(())
}

/// Type the reply out; Ctrl-C skips to the full text.
async fn type_reply(reply: &str, delay: std::time::Duration) -> io::Result<()> {
    let typer = Typewriter::spawn(reply.to_string(), delay);
    let cancel = typer.abort_handle();

    let completed = tokio::select! {
        finished = typer.finish() => finished?,
        _ = tokio::signal::ctrl_c() => {
            cancel.abort();
            false
        }
    };

    let mut stdout = io::stdout();
    if completed {
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "\n{reply}")?;
    }
    stdout.flush()
}

/// Loading indicator on stderr, shown only on a terminal.
struct StatusLine {
    enabled: bool,
    visible: AtomicBool,
}

const STATUS_TEXT: &str = "analysing email...";

impl StatusLine {
    fn new() -> Self {
        Self {
            enabled: io::stderr().is_terminal(),
            visible: AtomicBool::new(false),
        }
    }
}

impl SubmitControl for StatusLine {
    fn set_loading(&self, loading: bool) {
        if !self.enabled {
            return;
        }
        let was_visible = self.visible.swap(loading, Ordering::SeqCst);
        if loading && !was_visible {
            eprint!("{}", STATUS_TEXT.dimmed());
        } else if !loading && was_visible {
            eprint!("\r{}\r", " ".repeat(STATUS_TEXT.len()));
        }
    }
}

/// Resolve text input from an optional CLI argument and/or stdin.
fn resolve_text(arg: Option<String>) -> io::Result<String> {
    let stdin_text = if io::stdin().is_terminal() {
        None
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Some(buf)
    };
    Ok(combine_text(arg, stdin_text))
}

/// Combination rules:
/// - arg only → arg
/// - stdin only → stdin
/// - both → `"{arg}\n\n{stdin}"`
/// - neither → empty, left for submission validation to report
fn combine_text(arg: Option<String>, stdin: Option<String>) -> String {
    let stdin = stdin
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match (arg, stdin) {
        (Some(a), Some(s)) => format!("{a}\n\n{s}"),
        (Some(a), None) => a,
        (None, Some(s)) => s,
        (None, None) => String::new(),
    }
}
