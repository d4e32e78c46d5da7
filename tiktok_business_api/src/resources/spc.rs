use serde_json::{json, Value};

use super::crud::CrudResource;
use super::query::{ListQuery, Owner};
use crate::{client::Client, Error};

/// Smart+ campaign endpoints under `v1.3/campaign/spc/`.
///
/// Entities are keyed by `campaign_id`, and lookups pass `campaign_ids` as a
/// top-level parameter rather than inside `filtering`.
#[derive(Debug, Clone, Copy)]
pub struct SmartPlusCampaigns<'a> {
    client: &'a Client,
}

impl<'a> SmartPlusCampaigns<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

impl CrudResource for SmartPlusCampaigns<'_> {
    const RESOURCE_NAME: &'static str = "campaign/spc";

    fn client(&self) -> &Client {
        self.client
    }

    fn id_field(&self) -> String {
        "campaign_id".to_string()
    }

    fn ids_field(&self) -> String {
        "campaign_ids".to_string()
    }

    async fn get(&self, owner: impl Into<Owner>, id: &str) -> Result<Option<Value>, Error> {
        let query = ListQuery::for_owner(owner).with_param(&self.ids_field(), json!([id]));
        Ok(self.list(query).await?.into_iter().next())
    }
}
