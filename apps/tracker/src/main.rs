use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tracker::models::RecordId;
use tracker::{load_status_flow, ApiClient, Config, DashboardStats, Session};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Job application tracker - pull records and derive the status flow", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend origin, overrides TRACKER_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Skip the login even when credentials are configured
    #[arg(long, global = true)]
    anonymous: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Status-transition graph (nodes + weighted edges) as JSON
    Flow,
    /// Dashboard counters
    Stats,
    /// List applications
    Applications,
    /// Timeline of one application
    Timeline {
        /// Application id
        #[arg(value_parser = parse_record_id)]
        application_id: RecordId,
    },
    /// List network contacts
    Contacts,
    /// Role insights
    Insights,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_url(url)?;
    }

    // stdout carries the JSON output, logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("tracker v{} against {}", env!("CARGO_PKG_VERSION"), config.api_url);

    let client = ApiClient::new(&config).context("failed to build HTTP client")?;

    let session = match config.credentials() {
        Some(creds) if !cli.anonymous => Some(
            client
                .login(&creds)
                .await
                .with_context(|| format!("login as {} failed", creds.email))?,
        ),
        _ => None,
    };

    let outcome = run(&client, session.as_ref(), cli.command).await;

    if let Some(session) = session {
        if let Err(e) = client.logout(session).await {
            warn!("logout failed: {e}");
        }
    }

    outcome
}

async fn run(client: &ApiClient, session: Option<&Session>, command: Commands) -> Result<()> {
    match command {
        Commands::Flow => {
            let flow = load_status_flow(&client.source(session)).await?;
            if !flow.has_valid_data {
                warn!("not enough status history to draw a flow");
            }
            print_json(&flow)
        }
        Commands::Stats => {
            let applications = client.list_applications(session).await?;
            print_json(&DashboardStats::from_applications(&applications))
        }
        Commands::Applications => print_json(&client.list_applications(session).await?),
        Commands::Timeline { application_id } => {
            print_json(&client.get_timeline(session, &application_id).await?)
        }
        Commands::Contacts => print_json(&client.list_contacts(session).await?),
        Commands::Insights => print_json(&client.role_insights(session).await?),
    }
}

/// Numeric ids go out as integers, anything else as an opaque string.
fn parse_record_id(raw: &str) -> Result<RecordId, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("application id must not be empty".to_string());
    }
    Ok(match raw.parse::<i64>() {
        Ok(n) => RecordId::Int(n),
        Err(_) => RecordId::Str(raw.to_string()),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
