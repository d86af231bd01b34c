//! Command-line front end.
//!
//! Reads lines from stdin. A line of text is submitted for analysis; lines
//! starting with `:` are commands:
//!
//! - `:edit`: focus the input again after a result
//! - `:status`: show backend availability
//! - `:notices`: list visible notices
//! - `:dismiss <n>`: hide notice `n`
//! - `:quit`: exit
//!
//! The full view is rendered to stdout after every transition. Logs go to
//! stderr.
//!
//! Text given as arguments is analysed once and the process exits:
//!
//! ```text
//! saral "Article 21A"
//! ```

use clap::Parser;
use saral::app::Session;
use saral::background::BackgroundServices;
use saral::{observability, Config, ConfigOverrides, SessionState};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "saral", version)]
#[command(about = "Simplified explanations of Indian constitutional and legal text")]
struct Cli {
    /// Configuration file (default: ~/.config/saral/config.toml)
    #[arg(short, long, env = "SARAL_CONFIG")]
    config: Option<String>,

    /// Backend base URL
    #[arg(long, env = "SARAL_BASE_URL")]
    base_url: Option<String>,

    /// Log filter, e.g. `debug` (RUST_LOG takes precedence)
    #[arg(long)]
    trace_level: Option<String>,

    /// Skip waking the backend at start
    #[arg(long)]
    no_warmup: bool,

    /// Do not poll backend availability
    #[arg(long)]
    no_poll: bool,

    /// Analyse this text once and exit
    text: Vec<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            trace_level: self.trace_level.clone(),
            no_warmup: self.no_warmup,
            no_poll: self.no_poll,
        }
    }
}

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Submit(String),
    Edit,
    Status,
    Notices,
    Dismiss(usize),
    Quit,
    Invalid(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return Self::Submit(line.to_string());
        };

        let mut words = command.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("edit"), None, _) => Self::Edit,
            (Some("status"), None, _) => Self::Status,
            (Some("notices"), None, _) => Self::Notices,
            (Some("quit" | "q"), None, _) => Self::Quit,
            (Some("dismiss"), Some(n), None) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Self::Dismiss(n - 1),
                _ => Self::Invalid(format!("not a notice number: {n}")),
            },
            _ => Self::Invalid(format!("unknown command: {trimmed}")),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref())
        .and_then(|config| config.with_overrides(cli.overrides()))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("saral: {e}");
            return ExitCode::FAILURE;
        }
    };

    observability::init_tracing(&config);

    let code = match run(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "session ended with an error");
            eprintln!("saral: {e}");
            ExitCode::FAILURE
        }
    };

    observability::shutdown_tracing();
    code
}

async fn run(cli: &Cli, config: &Config) -> saral::Result<ExitCode> {
    let (mut session, mut services) = saral::initialize(config)?;

    if !cli.text.is_empty() {
        session.set_input(cli.text.join(" "));
        let failed = matches!(session.submit().await, SessionState::Error(_));
        print_view(&session, &services);
        services.shutdown();
        return Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS });
    }

    let loading = spawn_loading_indicator(&session);
    print_view(&session, &services);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Edit => {
                session.focus_input();
            }
            Command::Status => {
                println!("backend: {}", services.availability());
                continue;
            }
            Command::Notices => {}
            Command::Dismiss(index) => {
                if !services.dismiss(index) {
                    eprintln!("no visible notice {}", index + 1);
                    continue;
                }
            }
            Command::Invalid(message) => {
                eprintln!("{message}");
                continue;
            }
            Command::Submit(text) => {
                session.set_input(text);
                session.submit().await;
            }
        }
        print_view(&session, &services);
    }

    loading.abort();
    services.shutdown();
    Ok(ExitCode::SUCCESS)
}

fn print_view(session: &Session, services: &BackgroundServices) {
    let view = session
        .state()
        .compute_viewmodel(services.availability(), &services.notifications());
    print!("{}", saral::ui::render(&view));
}

/// Prints a line to stderr whenever a request starts.
fn spawn_loading_indicator(session: &Session) -> tokio::task::JoinHandle<()> {
    let mut states = session.subscribe();
    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            if states.borrow_and_update().is_loading() {
                eprintln!("… analysing");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_submissions() {
        assert_eq!(
            Command::parse("What is Article 14?"),
            Command::Submit("What is Article 14?".to_string())
        );
        assert_eq!(Command::parse(""), Command::Submit(String::new()));
    }

    #[test]
    fn commands() {
        assert_eq!(Command::parse(":edit"), Command::Edit);
        assert_eq!(Command::parse("  :status "), Command::Status);
        assert_eq!(Command::parse(":notices"), Command::Notices);
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(Command::parse(":dismiss 2"), Command::Dismiss(1));
    }

    #[test]
    fn malformed_commands() {
        assert!(matches!(Command::parse(":dismiss 0"), Command::Invalid(_)));
        assert!(matches!(Command::parse(":dismiss x"), Command::Invalid(_)));
        assert!(matches!(Command::parse(":dismiss"), Command::Invalid(_)));
        assert!(matches!(Command::parse(":edit now"), Command::Invalid(_)));
        assert!(matches!(Command::parse(":frobnicate"), Command::Invalid(_)));
    }

    #[test]
    fn overrides_come_from_flags() {
        let cli = Cli::parse_from(["saral", "--base-url", "http://x.test", "--no-poll"]);
        let overrides = cli.overrides();
        assert_eq!(overrides.base_url.as_deref(), Some("http://x.test"));
        assert!(overrides.no_poll);
        assert!(!overrides.no_warmup);
        assert!(cli.text.is_empty());
    }
}
