use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use tiktok_business_api::{Client, ReportQuery};

use crate::output::{print_report, OutputFormat};

#[derive(Args)]
pub struct ReportArgs {
    #[arg(long)]
    pub advertiser_id: String,

    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub start_date: NaiveDate,

    /// Last day (inclusive), YYYY-MM-DD
    #[arg(long)]
    pub end_date: NaiveDate,

    /// Comma-separated dimensions (default: campaign_id,stat_time_day)
    #[arg(long, value_delimiter = ',')]
    pub dimensions: Vec<String>,

    /// Comma-separated metrics (default: spend,impressions,clicks)
    #[arg(long, value_delimiter = ',')]
    pub metrics: Vec<String>,

    #[arg(long, default_value = "AUCTION_CAMPAIGN")]
    pub data_level: String,

    #[arg(long, default_value = "BASIC")]
    pub report_type: String,

    /// Fetch every page
    #[arg(long)]
    pub all: bool,
}

pub async fn run(args: &ReportArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut query = ReportQuery::new(&args.advertiser_id, args.start_date, args.end_date)
        .with_data_level(&args.data_level)
        .with_report_type(&args.report_type);
    if !args.dimensions.is_empty() {
        let dimensions: Vec<&str> = args.dimensions.iter().map(String::as_str).collect();
        query = query.with_dimensions(&dimensions);
    }
    if !args.metrics.is_empty() {
        let metrics: Vec<&str> = args.metrics.iter().map(String::as_str).collect();
        query = query.with_metrics(&metrics);
    }

    let reports = client.reports();
    let rows = if args.all {
        reports.get_sync_report_all(&query).await?
    } else {
        reports.get_sync_report(&query).await?
    };

    print_report(&rows, format)
}
