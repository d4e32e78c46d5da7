mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tiktok_business_api::{Client, Config};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "tiktok-business")]
#[command(about = "Manage TikTok Business API accounts, campaigns, and reports")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Log request and response details
    #[arg(long, global = true)]
    debug: bool,

    /// Access token; overrides TIKTOK_ACCESS_TOKEN
    #[arg(long, global = true)]
    access_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authorization and token management
    Auth(commands::auth::AuthArgs),
    /// List entities of a resource
    List(commands::resources::ListArgs),
    /// Show a single entity
    Get(commands::resources::GetArgs),
    /// Enable, disable, or delete an entity
    Status(commands::resources::StatusArgs),
    /// Run a synchronous integrated report
    Report(commands::report::ReportArgs),
    /// Upload an image to the ad library
    UploadImage(commands::upload::UploadImageArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("tiktok_business={}", level).parse()?),
        )
        .with_target(false)
        .init();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let mut config = Config::from_env();
    if cli.debug {
        config = config.with_debug(true);
    }
    if let Some(token) = &cli.access_token {
        config = config.with_access_token(token);
    }
    let client = Client::new(config)?;

    match &cli.command {
        Commands::Auth(args) => commands::auth::run(args, &client, &format).await?,
        Commands::List(args) => commands::resources::list(args, &client, &format).await?,
        Commands::Get(args) => commands::resources::get(args, &client, &format).await?,
        Commands::Status(args) => commands::resources::status(args, &client, &format).await?,
        Commands::Report(args) => commands::report::run(args, &client, &format).await?,
        Commands::UploadImage(args) => commands::upload::run(args, &client, &format).await?,
    }

    Ok(())
}
