use serde_json::{json, Value};

use super::crud::CrudResource;
use super::query::{ListQuery, Owner};
use crate::{
    client::{Client, Params},
    Error,
};

/// Optional scoping for [`Ads::list_for`].
#[derive(Debug, Clone, Default)]
pub struct AdFilter {
    pub campaign_id: Option<String>,
    pub adgroup_id: Option<String>,
}

/// Ad endpoints under `v1.3/ad/`.
#[derive(Debug, Clone, Copy)]
pub struct Ads<'a> {
    client: &'a Client,
}

impl<'a> Ads<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Creates one ad per creative inside `adgroup_id`.
    pub async fn create_with_creatives(
        &self,
        owner: impl Into<Owner>,
        adgroup_id: &str,
        creatives: Vec<Value>,
    ) -> Result<Value, Error> {
        let path = self.endpoint(self.create_path());
        self.post_creatives(&path, owner.into(), adgroup_id, creatives)
            .await
    }

    pub async fn create_single(
        &self,
        owner: impl Into<Owner>,
        adgroup_id: &str,
        creative: Value,
    ) -> Result<Value, Error> {
        self.create_with_creatives(owner, adgroup_id, vec![creative])
            .await
    }

    /// Creates an automated creative optimization ad.
    pub async fn create_aco(
        &self,
        owner: impl Into<Owner>,
        adgroup_id: &str,
        creatives: Vec<Value>,
    ) -> Result<Value, Error> {
        let path = self.endpoint("aco/create/");
        self.post_creatives(&path, owner.into(), adgroup_id, creatives)
            .await
    }

    pub async fn list_for(
        &self,
        owner: impl Into<Owner>,
        filter: AdFilter,
        query: ListQuery,
    ) -> Result<Vec<Value>, Error> {
        let mut query = query.with_owner(owner);
        if let Some(campaign_id) = filter.campaign_id {
            query = query.with_filter("campaign_ids", json!([campaign_id]));
        }
        if let Some(adgroup_id) = filter.adgroup_id {
            query = query.with_filter("adgroup_ids", json!([adgroup_id]));
        }
        self.list(query).await
    }

    async fn post_creatives(
        &self,
        path: &str,
        owner: Owner,
        adgroup_id: &str,
        creatives: Vec<Value>,
    ) -> Result<Value, Error> {
        let mut params = Params::new();
        owner.insert_into(&mut params);
        params.insert("adgroup_id".to_string(), json!(adgroup_id));
        params.insert("creatives".to_string(), Value::Array(creatives));
        let response = self.client.post(path, params).await?;
        Ok(response.into_data())
    }
}

impl CrudResource for Ads<'_> {
    const RESOURCE_NAME: &'static str = "ad";

    fn client(&self) -> &Client {
        self.client
    }
}
