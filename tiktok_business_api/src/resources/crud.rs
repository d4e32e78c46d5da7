//! The [`CrudResource`] trait: default create/list/get/update/delete
//! operations shared by every entity endpoint.

use serde_json::{json, Value};

use super::pagination::paginate;
use super::query::{ListAllQuery, ListQuery, Owner};
use crate::{
    client::{Client, Params},
    types::ApiResponse,
    Error,
};

/// API version prefix for every resource path.
pub const API_VERSION: &str = "v1.3";

/// Trait implemented by every entity resource. Provides the standard
/// endpoint layout (`v1.3/<name>/create/`, `get/`, `update/`, ...) and the
/// operations on top of it.
///
/// Implementors supply [`RESOURCE_NAME`](Self::RESOURCE_NAME) and
/// [`client`](Self::client), and override the field or path accessors
/// when their endpoint deviates from the convention.
#[allow(async_fn_in_trait)]
pub trait CrudResource {
    /// Resource name used in paths and default field names.
    const RESOURCE_NAME: &'static str;

    fn client(&self) -> &Client;

    fn base_path(&self) -> String {
        format!("{}/{}/", API_VERSION, Self::RESOURCE_NAME)
    }

    /// Field naming a single entity, e.g. `campaign_id`.
    fn id_field(&self) -> String {
        format!("{}_id", Self::RESOURCE_NAME)
    }

    /// Field naming a list of entities, e.g. `campaign_ids`.
    fn ids_field(&self) -> String {
        format!("{}_ids", Self::RESOURCE_NAME)
    }

    fn create_path(&self) -> &str {
        "create/"
    }

    fn list_path(&self) -> &str {
        "get/"
    }

    fn update_path(&self) -> &str {
        "update/"
    }

    fn delete_path(&self) -> &str {
        "delete/"
    }

    fn status_update_path(&self) -> &str {
        "status/update/"
    }

    /// Full path of `relative` under this resource's base path.
    fn endpoint(&self, relative: &str) -> String {
        format!("{}{}", self.base_path(), relative.trim_start_matches('/'))
    }

    /// Creates an entity and returns the `data` of the response.
    async fn create(&self, owner: impl Into<Owner>, params: Params) -> Result<Value, Error> {
        let mut params = params;
        owner.into().insert_into(&mut params);
        let response = self
            .client()
            .post(&self.endpoint(self.create_path()), params)
            .await?;
        Ok(response.into_data())
    }

    /// Fetches one page and returns the items under `data.list`.
    async fn list(&self, query: ListQuery) -> Result<Vec<Value>, Error> {
        let mut response = self.fetch_page(query).await?;
        Ok(response.take_items("list"))
    }

    /// Fetches one page, calls `each` for every item under `data.list`, and
    /// returns the whole envelope.
    async fn list_each<F>(&self, query: ListQuery, mut each: F) -> Result<ApiResponse, Error>
    where
        F: FnMut(&Value),
    {
        let response = self.fetch_page(query).await?;
        response.items("list").iter().for_each(&mut each);
        Ok(response)
    }

    /// Sends a single list request built from `query`.
    async fn fetch_page(&self, query: ListQuery) -> Result<ApiResponse, Error> {
        self.client()
            .get(&self.endpoint(self.list_path()), query.into_params())
            .await
    }

    /// Collects every item across all pages.
    async fn list_all(
        &self,
        owner: impl Into<Owner>,
        query: ListAllQuery,
    ) -> Result<Vec<Value>, Error> {
        let mut items = Vec::new();
        self.list_all_each(owner, query, |item| items.push(item)).await?;
        Ok(items)
    }

    /// Walks every page, handing each item to `each` as it arrives.
    async fn list_all_each<F>(
        &self,
        owner: impl Into<Owner>,
        query: ListAllQuery,
        each: F,
    ) -> Result<(), Error>
    where
        F: FnMut(Value),
    {
        let params = query.base_params(&owner.into());
        paginate(
            self.client(),
            &self.endpoint(self.list_path()),
            params,
            &query.list_key,
            1,
            query.effective_page_size(),
            each,
        )
        .await
    }

    /// Looks up a single entity by id through a filtered list call.
    async fn get(&self, owner: impl Into<Owner>, id: &str) -> Result<Option<Value>, Error> {
        let query = ListQuery::for_owner(owner).with_filter(&self.ids_field(), json!([id]));
        Ok(self.list(query).await?.into_iter().next())
    }

    async fn update(
        &self,
        owner: impl Into<Owner>,
        id: &str,
        params: Params,
    ) -> Result<Value, Error> {
        let mut params = params;
        owner.into().insert_into(&mut params);
        params.insert(self.id_field(), json!(id));
        let response = self
            .client()
            .post(&self.endpoint(self.update_path()), params)
            .await?;
        Ok(response.into_data())
    }

    /// Sets `operation_status` (e.g. `ENABLE`, `DISABLE`, `DELETE`).
    async fn update_status(
        &self,
        owner: impl Into<Owner>,
        id: &str,
        status: &str,
    ) -> Result<Value, Error> {
        let mut params = Params::new();
        owner.into().insert_into(&mut params);
        params.insert(self.ids_field(), json!([id]));
        params.insert("operation_status".to_string(), json!(status));
        let response = self
            .client()
            .post(&self.endpoint(self.status_update_path()), params)
            .await?;
        Ok(response.into_data())
    }

    async fn delete(&self, owner: impl Into<Owner>, id: &str) -> Result<Value, Error> {
        let mut params = Params::new();
        owner.into().insert_into(&mut params);
        params.insert(self.ids_field(), json!([id]));
        let response = self
            .client()
            .post(&self.endpoint(self.delete_path()), params)
            .await?;
        Ok(response.into_data())
    }
}
