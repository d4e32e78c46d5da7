use serde_json::{json, Value};

use super::crud::API_VERSION;
use super::pagination::paginate;
use super::query::{Owner, MAX_PAGE_SIZE};
use crate::{
    client::{Client, Params},
    Error,
};

const DEFAULT_PAGE_SIZE: u64 = 100;
const LIST_KEY: &str = "identity_list";

/// Filters for [`Identities::list`] and [`Identities::list_all`].
#[derive(Debug, Clone, Default)]
pub struct IdentityListOptions {
    /// `CUSTOMIZED_USER`, `AUTH_CODE`, `TT_USER` or `BC_AUTH_TT`.
    pub identity_type: Option<String>,
    pub identity_authorized_bc_id: Option<String>,
    pub filtering: Option<Params>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl IdentityListOptions {
    fn into_params(self, owner: Owner) -> Params {
        let mut params = Params::new();
        owner.insert_into(&mut params);
        if let Some(identity_type) = self.identity_type {
            params.insert("identity_type".to_string(), json!(identity_type));
        }
        if let Some(bc_id) = self.identity_authorized_bc_id {
            params.insert("identity_authorized_bc_id".to_string(), json!(bc_id));
        }
        if let Some(filtering) = self.filtering {
            params.insert(
                "filtering".to_string(),
                json!(Value::Object(filtering).to_string()),
            );
        }
        if let Some(page) = self.page {
            params.insert("page".to_string(), json!(page));
        }
        if let Some(page_size) = self.page_size {
            params.insert("page_size".to_string(), json!(page_size));
        }
        params
    }
}

/// Identity (display account) endpoints under `v1.3/identity/`.
#[derive(Debug, Clone, Copy)]
pub struct Identities<'a> {
    client: &'a Client,
}

impl<'a> Identities<'a> {
    pub const RESOURCE_NAME: &'static str = "identity";

    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn endpoint(&self, relative: &str) -> String {
        format!("{}/{}/{}", API_VERSION, Self::RESOURCE_NAME, relative)
    }

    /// One page of identities. Returns `data`, which holds `identity_list`
    /// and `page_info`.
    pub async fn list(
        &self,
        owner: impl Into<Owner>,
        options: IdentityListOptions,
    ) -> Result<Value, Error> {
        let params = options.into_params(owner.into());
        Ok(self.client.get(&self.endpoint("get/"), params).await?.into_data())
    }

    /// Details of one identity, from `data.identity_info`.
    pub async fn get_info(
        &self,
        owner: impl Into<Owner>,
        identity_id: &str,
        identity_type: &str,
        identity_authorized_bc_id: Option<&str>,
    ) -> Result<Value, Error> {
        let mut params = Params::new();
        owner.into().insert_into(&mut params);
        params.insert("identity_id".to_string(), json!(identity_id));
        params.insert("identity_type".to_string(), json!(identity_type));
        if let Some(bc_id) = identity_authorized_bc_id {
            params.insert("identity_authorized_bc_id".to_string(), json!(bc_id));
        }
        let data = self.client.get(&self.endpoint("info/"), params).await?.into_data();
        Ok(data.get("identity_info").cloned().unwrap_or(Value::Null))
    }

    /// Creates a custom identity.
    pub async fn create(
        &self,
        owner: impl Into<Owner>,
        display_name: &str,
        image_uri: Option<&str>,
    ) -> Result<Value, Error> {
        let mut params = Params::new();
        owner.into().insert_into(&mut params);
        params.insert("display_name".to_string(), json!(display_name));
        if let Some(image_uri) = image_uri {
            params.insert("image_uri".to_string(), json!(image_uri));
        }
        Ok(self.client.post(&self.endpoint("create/"), params).await?.into_data())
    }

    /// Every identity across all pages, 100 per page unless overridden.
    /// Starts at `options.page` when set, page 1 otherwise.
    pub async fn list_all(
        &self,
        owner: impl Into<Owner>,
        options: IdentityListOptions,
    ) -> Result<Vec<Value>, Error> {
        let mut identities = Vec::new();
        self.list_all_each(owner, options, |identity| identities.push(identity)).await?;
        Ok(identities)
    }

    pub async fn list_all_each<F>(
        &self,
        owner: impl Into<Owner>,
        options: IdentityListOptions,
        each: F,
    ) -> Result<(), Error>
    where
        F: FnMut(Value),
    {
        let first_page = options.page.unwrap_or(1);
        let page_size = options
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        let options = IdentityListOptions {
            page: None,
            page_size: None,
            ..options
        };
        let params = options.into_params(owner.into());
        paginate(
            self.client,
            &self.endpoint("get/"),
            params,
            LIST_KEY,
            first_page,
            page_size,
            each,
        )
        .await
    }
}
