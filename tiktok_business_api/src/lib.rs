//! Async client for the TikTok Business (Marketing) API.
//!
//! ```no_run
//! use tiktok_business_api::{Client, Config, CrudResource, ListQuery};
//!
//! # async fn run() -> Result<(), tiktok_business_api::Error> {
//! let client = Client::new(Config::default().with_access_token("act.example"))?;
//! let campaigns = client.campaigns().list(ListQuery::for_owner("7000000000")).await?;
//! println!("{} campaigns", campaigns.len());
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod errors;
pub mod resources;
pub mod types;
pub mod upload;

pub use self::auth::{Auth, AUTHORIZATION_BASE_URL};
pub use self::client::{ApiRequest, Client, FilePart, Params};
pub use self::config::{Config, DEFAULT_API_BASE_URL};
pub use self::errors::{ApiError, Error, ErrorKind, RequestSummary};
pub use self::resources::{
    AdFilter, CrudResource, ListAllQuery, ListQuery, Owner, ReportQuery, ResourceHandle,
    ResourceKind,
};
pub use self::types::{ApiResponse, PageInfo};
pub use self::upload::{ImageUpload, UploadFile, UploadType, VideoUpload};
