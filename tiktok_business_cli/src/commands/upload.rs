use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tiktok_business_api::{Client, ImageUpload, UploadFile};

use crate::output::{print_fields, OutputFormat};

#[derive(Args)]
pub struct UploadImageArgs {
    #[arg(long)]
    pub advertiser_id: String,

    /// Local image to upload
    #[arg(long, conflicts_with = "url", required_unless_present = "url")]
    pub file: Option<PathBuf>,

    /// Public URL TikTok fetches the image from
    #[arg(long)]
    pub url: Option<String>,

    /// Name shown in the asset library
    #[arg(long)]
    pub file_name: Option<String>,
}

pub async fn run(args: &UploadImageArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut upload = match (&args.file, &args.url) {
        (Some(path), _) => ImageUpload::by_file(&args.advertiser_id, UploadFile::from_path(path)),
        (None, Some(url)) => ImageUpload::by_url(&args.advertiser_id, url),
        (None, None) => anyhow::bail!("either --file or --url is required"),
    };
    if let Some(file_name) = &args.file_name {
        upload = upload.with_file_name(file_name);
    }

    let data = client.images().upload(upload).await?;
    print_fields(&data, format)
}
