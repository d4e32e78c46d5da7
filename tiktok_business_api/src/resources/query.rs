//! Parameter builders shared by the list operations: [`Owner`],
//! [`ListQuery`] and [`ListAllQuery`].

use serde_json::{json, Value};

use crate::client::Params;

/// Largest `page_size` the list endpoints accept.
pub const MAX_PAGE_SIZE: u64 = 100;

const DEFAULT_LIST_PAGE_SIZE: u64 = 100;
const DEFAULT_LIST_ALL_PAGE_SIZE: u64 = 10;
const DEFAULT_LIST_KEY: &str = "list";

/// The account an entity belongs to, sent as `<field>=<id>`.
///
/// Almost every endpoint is scoped by `advertiser_id`, which is what the
/// `From` conversions produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub field: String,
    pub id: String,
}

impl Owner {
    pub fn new(field: &str, id: &str) -> Self {
        Self {
            field: field.to_string(),
            id: id.to_string(),
        }
    }

    pub fn advertiser(id: &str) -> Self {
        Self::new("advertiser_id", id)
    }

    pub(crate) fn insert_into(&self, params: &mut Params) {
        params.insert(self.field.clone(), json!(self.id));
    }
}

impl From<&str> for Owner {
    fn from(id: &str) -> Self {
        Owner::advertiser(id)
    }
}

impl From<String> for Owner {
    fn from(id: String) -> Self {
        Owner {
            field: "advertiser_id".to_string(),
            id,
        }
    }
}

impl From<&String> for Owner {
    fn from(id: &String) -> Self {
        Owner::advertiser(id)
    }
}

/// One page of a list endpoint.
///
/// `filtering` is always sent as a JSON string, `{}` when nothing was
/// added. `page_size` defaults to 100 and is clamped to [`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub owner: Option<Owner>,
    pub filtering: Params,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub params: Params,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_owner(owner: impl Into<Owner>) -> Self {
        Self::new().with_owner(owner)
    }

    pub fn with_owner(mut self, owner: impl Into<Owner>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Adds one filter dimension, e.g. `("campaign_ids", json!(["1"]))`.
    pub fn with_filter(mut self, key: &str, value: Value) -> Self {
        self.filtering.insert(key.to_string(), value);
        self
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Adds an extra top-level request parameter.
    pub fn with_param(mut self, key: &str, value: Value) -> Self {
        self.params.insert(key.to_string(), value);
        self
    }

    pub(crate) fn into_params(self) -> Params {
        let mut params = self.params;
        if let Some(owner) = &self.owner {
            owner.insert_into(&mut params);
        }
        params.insert(
            "filtering".to_string(),
            json!(Value::Object(self.filtering).to_string()),
        );
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_LIST_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        params.insert("page_size".to_string(), json!(page_size));
        params.insert("page".to_string(), json!(self.page.unwrap_or(1)));
        params
    }
}

/// Options for walking every page of a list endpoint.
#[derive(Debug, Clone)]
pub struct ListAllQuery {
    pub filtering: Params,
    pub page_size: Option<u64>,
    pub params: Params,
    /// Key under `data` holding each page's items.
    pub list_key: String,
}

impl Default for ListAllQuery {
    fn default() -> Self {
        Self {
            filtering: Params::new(),
            page_size: None,
            params: Params::new(),
            list_key: DEFAULT_LIST_KEY.to_string(),
        }
    }
}

impl ListAllQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, key: &str, value: Value) -> Self {
        self.filtering.insert(key.to_string(), value);
        self
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_param(mut self, key: &str, value: Value) -> Self {
        self.params.insert(key.to_string(), value);
        self
    }

    pub fn with_list_key(mut self, list_key: &str) -> Self {
        self.list_key = list_key.to_string();
        self
    }

    pub(crate) fn effective_page_size(&self) -> u64 {
        self.page_size
            .unwrap_or(DEFAULT_LIST_ALL_PAGE_SIZE)
            .min(MAX_PAGE_SIZE)
    }

    /// Parameters shared by every page; `page` and `page_size` are set per
    /// request by the pager.
    pub(crate) fn base_params(&self, owner: &Owner) -> Params {
        let mut params = self.params.clone();
        owner.insert_into(&mut params);
        if !self.filtering.is_empty() {
            params.insert(
                "filtering".to_string(),
                json!(Value::Object(self.filtering.clone()).to_string()),
            );
        }
        params
    }
}
