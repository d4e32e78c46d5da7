use anyhow::Result;
use clap::{Args, Subcommand};
use tiktok_business_api::{Client, ResourceKind};

use crate::output::{print_entities, print_fields, OutputFormat};

#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Print the URL an advertiser visits to authorize this app
    Url {
        /// Where TikTok sends the authorization code
        #[arg(long)]
        redirect_uri: String,

        /// Opaque value echoed back to the redirect URI
        #[arg(long)]
        state: Option<String>,

        /// Comma-separated permission scopes
        #[arg(long, value_delimiter = ',')]
        scope: Vec<String>,
    },
    /// Exchange an authorization code for an access token
    Token {
        #[arg(long)]
        code: String,

        #[arg(long)]
        redirect_uri: Option<String>,
    },
    /// Refresh a TikTok account access token
    Refresh {
        #[arg(long)]
        refresh_token: String,
    },
    /// Revoke an access token (defaults to the configured one)
    Revoke {
        #[arg(long)]
        token: Option<String>,
    },
    /// List advertisers that authorized this app
    Advertisers,
}

pub async fn run(args: &AuthArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let auth = client.auth();
    match &args.command {
        AuthCommand::Url {
            redirect_uri,
            state,
            scope,
        } => {
            let scope: Vec<&str> = scope.iter().map(String::as_str).collect();
            println!("{}", auth.authorization_url(redirect_uri, state.as_deref(), &scope)?);
        }
        AuthCommand::Token { code, redirect_uri } => {
            let resp = auth
                .generate_access_token(code, redirect_uri.as_deref())
                .await?;
            print_fields(resp.data(), format)?;
            if resp.access_token().is_some() {
                eprintln!("Store the token in TIKTOK_ACCESS_TOKEN or pass it with --access-token.");
            }
        }
        AuthCommand::Refresh { refresh_token } => {
            let resp = auth.refresh_access_token(refresh_token).await?;
            print_fields(resp.data(), format)?;
        }
        AuthCommand::Revoke { token } => {
            let resp = auth.revoke_access_token(token.as_deref()).await?;
            if resp.is_success() {
                eprintln!("Token revoked.");
            }
            print_fields(resp.data(), format)?;
        }
        AuthCommand::Advertisers => {
            let resp = auth.get_authorized_advertisers(None).await?;
            print_entities(ResourceKind::Account, resp.items("list"), format)?;
        }
    }
    Ok(())
}
