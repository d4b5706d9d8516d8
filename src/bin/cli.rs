//! Mindful CLI
//!
//! Command-line front end for the companion service:
//! - Sign up, log in and out
//! - Record and list moods
//! - Show mood analytics
//! - Talk to the support bot

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};

use mindful::api::{ApiClient, Credentials, MoodEntry, SignupRequest};
use mindful::config::{self, Config};
use mindful::session::{FileTokenStore, Session};
use mindful::views::analytics::{NO_SUMMARY, NO_TREND, SCORE_AXIS};
use mindful::views::{
    AnalyticsView, AuthOutcome, AuthView, ChatMessage, ChatView, DashboardState, DashboardView,
    MoodView, SendOutcome, Sender, SubmitOutcome, ViewContext,
};

#[derive(Parser)]
#[command(name = "mindful")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mood journal and support chat")]
#[command(long_about = "Mindful talks to the companion service.\nTrack how you feel, see your trends, and chat with the support bot.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides config and MINDFUL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table, global = true)]
    pub format: Format,

    /// Config file (default: ~/.config/mindful/config.toml or ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Signup {
        /// Display name
        name: String,
        /// Email address
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log in and store the session token
    Login {
        /// Email address
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Mood journal
    Mood {
        #[command(subcommand)]
        command: MoodCommands,
    },

    /// Mood trend and summary
    Analytics,

    /// Support chat
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum MoodCommands {
    /// Record how you feel
    Add {
        /// A few words about your mood
        text: String,
        /// Score from 1 (low) to 10 (great)
        score: i64,
    },
    /// List recorded moods, newest first
    History,
}

#[derive(Subcommand)]
pub enum ChatCommands {
    /// Send one message and print the reply
    Send {
        /// Message text
        message: Vec<String>,
    },
    /// Print the stored conversation
    History,
    /// Interactive conversation; an empty line or EOF ends it
    Repl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    if let Err(e) = mindful::logging::init_tracing(&config.logging) {
        eprintln!("Logging disabled: {}", e);
    }

    let store = FileTokenStore::new(&config.session.token_file);
    let session = Session::new(Arc::new(store))
        .with_context(|| format!("Cannot read session token from {}", config.session.token_file))?;
    let client = ApiClient::new(&config.api, session.clone())?;
    tracing::debug!(base_url = %client.base_url(), "Client ready");

    let context = ViewContext::new(Arc::new(client), session);

    match cli.command {
        Commands::Signup {
            name,
            email,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let request = SignupRequest {
                name,
                email,
                password,
            };

            match AuthView::new(context).signup(&request).await {
                AuthOutcome::Redirect { to, notice } => {
                    if let Some(notice) = notice {
                        println!("{}", notice);
                    }
                    if to.requires_session() {
                        println!("You are logged in.");
                    } else {
                        println!();
                        println!("Log in with:");
                        println!("  mindful login {}", request.email);
                    }
                }
                AuthOutcome::Failed { message } => fail(&message),
            }
        }

        Commands::Login { email, password } => {
            let password = password_or_prompt(password)?;
            let credentials = Credentials::new(email, password);

            match AuthView::new(context.clone()).login(&credentials).await {
                AuthOutcome::Redirect { .. } => {
                    match DashboardView::new(context).load().await.login_report() {
                        Ok(greeting) => println!("{}", greeting),
                        Err(message) => fail(message),
                    }
                }
                AuthOutcome::Failed { message } => fail(&message),
            }
        }

        Commands::Logout => {
            AuthView::new(context).logout()?;
            println!("Logged out.");
        }

        Commands::Whoami => match DashboardView::new(context).load().await {
            DashboardState::Welcome(user) => match cli.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&user)?),
                Format::Table => {
                    println!("Welcome, {}!", user.name);
                    println!();
                    println!("  Email: {}", user.email);
                    println!("  ID:    {}", user.id);
                }
            },
            DashboardState::Redirect(_) => not_logged_in(),
        },

        Commands::Mood { command } => {
            require_session(&context);
            let mut view = MoodView::new(context);

            match command {
                MoodCommands::Add { text, score } => match view.submit(&text, score).await {
                    SubmitOutcome::Submitted => {
                        println!("{}", mindful::views::mood::SUBMITTED);
                        println!();
                        print_moods(view.entries(), cli.format)?;
                    }
                    SubmitOutcome::Rejected { message } => fail(&message),
                },
                MoodCommands::History => {
                    view.refresh().await;
                    if let Some(error) = view.error() {
                        fail(error);
                    }
                    print_moods(view.entries(), cli.format)?;
                }
            }
        }

        Commands::Analytics => {
            require_session(&context);
            let mut view = AnalyticsView::new(context);
            view.refresh().await;

            if let Some(error) = view.error() {
                fail(error);
            }

            match cli.format {
                Format::Json => {
                    let body = serde_json::json!({
                        "trend": view.trend(),
                        "summary": view.summary(),
                        "chat_words": view.top_words(),
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Format::Table => print_analytics(&view),
            }
        }

        Commands::Chat { command } => {
            require_session(&context);
            let mut view = ChatView::new(context);

            match command {
                ChatCommands::Send { message } => {
                    let text = message.join(" ");
                    let before = view.transcript().len();
                    match view.send(&text).await {
                        SendOutcome::Sent => {
                            print_chat(&view.transcript().lines()[before..], cli.format)?
                        }
                        SendOutcome::Ignored => fail("Nothing to send"),
                        SendOutcome::Failed { message } => fail(&message),
                    }
                }
                ChatCommands::History => {
                    view.load_history().await;
                    if let Some(error) = view.error() {
                        fail(error);
                    }
                    if view.transcript().is_empty() {
                        println!("No messages yet.");
                        println!();
                        println!("Start a conversation with:");
                        println!("  mindful chat send \"hello\"");
                    } else {
                        print_chat(view.transcript().lines(), cli.format)?;
                    }
                }
                ChatCommands::Repl => run_repl(&mut view).await?,
            }
        }

        Commands::Config { output } => write_default_config(output.as_ref())?,
    }

    Ok(())
}

async fn run_repl(view: &mut ChatView) -> anyhow::Result<()> {
    view.load_history().await;
    if let Some(error) = view.error() {
        fail(error);
    }
    for line in view.transcript().lines() {
        print_line(line);
    }

    println!("(empty line to quit)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(input) = lines.next_line().await? else {
            break;
        };
        if input.trim().is_empty() {
            break;
        }

        let before = view.transcript().len();
        match view.send(&input).await {
            SendOutcome::Sent => {
                for line in &view.transcript().lines()[before + 1..] {
                    print_line(line);
                }
            }
            SendOutcome::Ignored => {}
            SendOutcome::Failed { message } => eprintln!("{}", message),
        }
    }

    Ok(())
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = config::generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }

    Ok(())
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    eprint!("Password: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn require_session(context: &ViewContext) {
    if !context.session.is_authenticated() {
        not_logged_in();
    }
}

fn not_logged_in() -> ! {
    eprintln!("Not logged in.");
    eprintln!();
    eprintln!("Log in with:");
    eprintln!("  mindful login <email>");
    std::process::exit(1);
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn print_moods(entries: &[MoodEntry], format: Format) -> anyhow::Result<()> {
    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No moods recorded yet.");
        println!();
        println!("Record one with:");
        println!("  mindful mood add \"calm\" 7");
        return Ok(());
    }

    println!("{:<18} {:<6} {}", "When", "Score", "Mood");
    println!("{}", "-".repeat(50));

    for entry in entries {
        println!(
            "{:<18} {:<6} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.mood_score,
            entry.mood_text
        );
    }

    Ok(())
}

fn print_analytics(view: &AnalyticsView) {
    println!("Mood trend");
    println!("{}", "-".repeat(50));

    if view.trend().is_empty() {
        println!("{}", NO_TREND);
    } else {
        for point in view.trend() {
            println!(
                "{:<12} {:>5.1} {}",
                point.date,
                point.average_score,
                bar(point.average_score, SCORE_AXIS.1, 30)
            );
        }
    }

    println!();
    println!("Mood summary");
    println!("{}", "-".repeat(50));

    match view.summary().filter(|s| s.total() > 0) {
        None => println!("{}", NO_SUMMARY),
        Some(summary) => {
            let total = summary.total() as f64;
            for (label, count) in summary.slices() {
                let share = count as f64 / total;
                println!(
                    "{:<10} {:>4} {:>5.1}% {}",
                    label,
                    count,
                    share * 100.0,
                    bar(share, 1.0, 30)
                );
            }
        }
    }

    if !view.top_words().is_empty() {
        println!();
        println!("Frequent chat words");
        println!("{}", "-".repeat(50));
        for word in view.top_words() {
            println!("{:<16} {}", word.word, word.count);
        }
    }
}

fn bar(value: f64, max: f64, width: usize) -> String {
    let filled = ((value.clamp(SCORE_AXIS.0, max) / max) * width as f64).round() as usize;
    "#".repeat(filled.min(width))
}

fn print_chat(lines: &[ChatMessage], format: Format) -> anyhow::Result<()> {
    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(lines)?);
        return Ok(());
    }

    for line in lines {
        print_line(line);
    }
    Ok(())
}

fn print_line(line: &ChatMessage) {
    let who = match line.sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    let when = line
        .timestamp
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());

    println!("[{}] {}> {}", when, who, line.text);
}
