use anyhow::{bail, Result};
use clap::Args;
use serde_json::json;
use tiktok_business_api::{Client, ListAllQuery, ListQuery, ResourceKind};

use crate::output::{print_entities, print_fields, OutputFormat};

#[derive(Args)]
pub struct ListArgs {
    /// Resource: campaign, adgroup, ad, spc, image, video, identity, account
    pub resource: String,

    /// Advertiser that owns the entities
    #[arg(long)]
    pub advertiser_id: String,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u64,

    /// Results per page (max 100)
    #[arg(long)]
    pub page_size: Option<u64>,

    /// Fetch every page
    #[arg(long)]
    pub all: bool,

    /// Only entities of this campaign
    #[arg(long)]
    pub campaign_id: Option<String>,
}

#[derive(Args)]
pub struct GetArgs {
    /// Resource: campaign, adgroup, ad, spc, image, video
    pub resource: String,

    #[arg(long)]
    pub advertiser_id: String,

    /// Entity ID
    #[arg(long)]
    pub id: String,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Resource: campaign, adgroup, ad, spc
    pub resource: String,

    #[arg(long)]
    pub advertiser_id: String,

    /// Entity ID
    #[arg(long)]
    pub id: String,

    /// New operation status
    #[arg(long, value_parser = ["ENABLE", "DISABLE", "DELETE"])]
    pub status: String,
}

pub async fn list(args: &ListArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let kind: ResourceKind = args.resource.parse()?;
    let handle = client.resource(kind);

    let items = if args.all {
        let mut query = ListAllQuery::new();
        if let Some(page_size) = args.page_size {
            query = query.with_page_size(page_size);
        }
        if let Some(campaign_id) = &args.campaign_id {
            query = query.with_filter("campaign_ids", json!([campaign_id]));
        }
        handle.list_all(args.advertiser_id.as_str(), query).await?
    } else {
        let mut query = ListQuery::for_owner(args.advertiser_id.as_str()).with_page(args.page);
        if let Some(page_size) = args.page_size {
            query = query.with_page_size(page_size);
        }
        if let Some(campaign_id) = &args.campaign_id {
            query = query.with_filter("campaign_ids", json!([campaign_id]));
        }
        handle.list(query).await?
    };

    print_entities(kind, &items, format)
}

pub async fn get(args: &GetArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let kind: ResourceKind = args.resource.parse()?;
    match client
        .resource(kind)
        .get(args.advertiser_id.as_str(), &args.id)
        .await?
    {
        Some(entity) => print_fields(&entity, format),
        None => bail!("{} {} not found", kind, args.id),
    }
}

pub async fn status(args: &StatusArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let kind: ResourceKind = args.resource.parse()?;
    let data = client
        .resource(kind)
        .update_status(args.advertiser_id.as_str(), &args.id, &args.status)
        .await?;
    print_fields(&data, format)
}
