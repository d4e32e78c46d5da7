use serde_json::{json, Value};

use super::crud::CrudResource;
use super::query::{ListQuery, Owner};
use crate::{
    client::{Client, Params},
    Error,
};

/// Ad group endpoints under `v1.3/adgroup/`.
#[derive(Debug, Clone, Copy)]
pub struct AdGroups<'a> {
    client: &'a Client,
}

impl<'a> AdGroups<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists ad groups of `owner`, restricted to one campaign when
    /// `campaign_id` is given.
    pub async fn list_for(
        &self,
        owner: impl Into<Owner>,
        campaign_id: Option<&str>,
        query: ListQuery,
    ) -> Result<Vec<Value>, Error> {
        let mut query = query.with_owner(owner);
        if let Some(campaign_id) = campaign_id {
            query = query.with_filter("campaign_ids", json!([campaign_id]));
        }
        self.list(query).await
    }

    /// Estimates the reach of a targeting configuration.
    pub async fn estimate_audience_size(
        &self,
        owner: impl Into<Owner>,
        params: Params,
    ) -> Result<Value, Error> {
        let mut params = params;
        owner.into().insert_into(&mut params);
        let response = self
            .client
            .post(&self.endpoint("audience_size/estimate/"), params)
            .await?;
        Ok(response.into_data())
    }
}

impl CrudResource for AdGroups<'_> {
    const RESOURCE_NAME: &'static str = "adgroup";

    fn client(&self) -> &Client {
        self.client
    }
}
