use serde_json::{json, Value};

use super::crud::API_VERSION;
use crate::{
    client::{Client, Params},
    Error,
};

/// Advertiser account endpoints under `v1.3/advertiser/`.
#[derive(Debug, Clone, Copy)]
pub struct Accounts<'a> {
    client: &'a Client,
}

impl<'a> Accounts<'a> {
    pub const RESOURCE_NAME: &'static str = "advertiser";

    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Advertisers that authorized the configured app, from `data.list`.
    ///
    /// Uses the app credentials rather than an owner id.
    pub async fn list(&self) -> Result<Vec<Value>, Error> {
        let mut response = self.client.auth().get_authorized_advertisers(None).await?;
        Ok(response.take_items("list"))
    }

    /// Account details for `advertiser_ids`. Empty `fields` returns the
    /// server's default field set.
    pub async fn details(
        &self,
        advertiser_ids: &[&str],
        fields: &[&str],
    ) -> Result<Vec<Value>, Error> {
        let mut params = Params::new();
        params.insert("advertiser_ids".to_string(), json!(advertiser_ids));
        if !fields.is_empty() {
            params.insert("fields".to_string(), json!(fields));
        }
        let path = format!("{}/{}/info/", API_VERSION, Self::RESOURCE_NAME);
        let mut response = self.client.get(&path, params).await?;
        Ok(response.take_items("list"))
    }
}
