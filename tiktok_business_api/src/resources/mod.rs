//! Endpoint groups of the API, one type per resource.
//!
//! Entity resources (campaigns, ad groups, ads, Smart+ campaigns) share the
//! [`CrudResource`] operations. The others expose their own calls.
//! [`Client::resource`] picks a resource from a [`ResourceKind`] at runtime.

mod account;
mod ad;
mod adgroup;
mod campaign;
mod crud;
mod identity;
mod image;
mod pagination;
mod query;
mod reporting;
mod spc;
mod video;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

pub use self::account::Accounts;
pub use self::ad::{AdFilter, Ads};
pub use self::adgroup::AdGroups;
pub use self::campaign::Campaigns;
pub use self::crud::{CrudResource, API_VERSION};
pub use self::identity::{Identities, IdentityListOptions};
pub use self::image::{ImageSearch, Images};
pub use self::query::{ListAllQuery, ListQuery, Owner, MAX_PAGE_SIZE};
pub use self::reporting::{ReportQuery, Reports};
pub use self::spc::SmartPlusCampaigns;
pub use self::video::Videos;

use crate::{Client, Error};

/// Every resource the client knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Campaign,
    AdGroup,
    Ad,
    Spc,
    Image,
    Video,
    Identity,
    Account,
    Report,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Campaign,
        ResourceKind::AdGroup,
        ResourceKind::Ad,
        ResourceKind::Spc,
        ResourceKind::Image,
        ResourceKind::Video,
        ResourceKind::Identity,
        ResourceKind::Account,
        ResourceKind::Report,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Campaign => "campaign",
            ResourceKind::AdGroup => "adgroup",
            ResourceKind::Ad => "ad",
            ResourceKind::Spc => "spc",
            ResourceKind::Image => "image",
            ResourceKind::Video => "video",
            ResourceKind::Identity => "identity",
            ResourceKind::Account => "account",
            ResourceKind::Report => "report",
        }
    }

    /// Field carrying an entity's id in list responses.
    pub fn id_field(&self) -> &'static str {
        match self {
            ResourceKind::Campaign | ResourceKind::Spc => "campaign_id",
            ResourceKind::AdGroup => "adgroup_id",
            ResourceKind::Ad => "ad_id",
            ResourceKind::Image => "image_id",
            ResourceKind::Video => "video_id",
            ResourceKind::Identity => "identity_id",
            ResourceKind::Account => "advertiser_id",
            ResourceKind::Report => "dimensions",
        }
    }

    /// Whether the generic list/get/status operations apply.
    pub fn is_crud(&self) -> bool {
        matches!(
            self,
            ResourceKind::Campaign | ResourceKind::AdGroup | ResourceKind::Ad | ResourceKind::Spc
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| Error::Config(format!("unknown resource: {}", s)))
    }
}

/// A resource chosen at runtime, borrowed from a [`Client`].
#[derive(Debug, Clone, Copy)]
pub enum ResourceHandle<'a> {
    Campaign(Campaigns<'a>),
    AdGroup(AdGroups<'a>),
    Ad(Ads<'a>),
    Spc(SmartPlusCampaigns<'a>),
    Image(Images<'a>),
    Video(Videos<'a>),
    Identity(Identities<'a>),
    Account(Accounts<'a>),
    Report(Reports<'a>),
}

impl ResourceHandle<'_> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceHandle::Campaign(_) => ResourceKind::Campaign,
            ResourceHandle::AdGroup(_) => ResourceKind::AdGroup,
            ResourceHandle::Ad(_) => ResourceKind::Ad,
            ResourceHandle::Spc(_) => ResourceKind::Spc,
            ResourceHandle::Image(_) => ResourceKind::Image,
            ResourceHandle::Video(_) => ResourceKind::Video,
            ResourceHandle::Identity(_) => ResourceKind::Identity,
            ResourceHandle::Account(_) => ResourceKind::Account,
            ResourceHandle::Report(_) => ResourceKind::Report,
        }
    }

    fn unsupported(&self, operation: &str) -> Error {
        Error::Config(format!("{} does not support {}", self.kind(), operation))
    }

    /// One page of entities.
    pub async fn list(&self, query: ListQuery) -> Result<Vec<Value>, Error> {
        match self {
            ResourceHandle::Campaign(r) => r.list(query).await,
            ResourceHandle::AdGroup(r) => r.list(query).await,
            ResourceHandle::Ad(r) => r.list(query).await,
            ResourceHandle::Spc(r) => r.list(query).await,
            ResourceHandle::Video(r) => r.search(query).await,
            ResourceHandle::Image(r) => {
                let owner = query
                    .owner
                    .clone()
                    .ok_or_else(|| Error::Config("image search needs an owner".to_string()))?;
                let search = ImageSearch {
                    page: query.page,
                    page_size: query.page_size.map(|size| size.min(MAX_PAGE_SIZE)),
                    ..Default::default()
                };
                r.search(owner, search).await
            }
            ResourceHandle::Account(r) => r.list().await,
            ResourceHandle::Identity(r) => {
                let owner = query
                    .owner
                    .clone()
                    .ok_or_else(|| Error::Config("identity listing needs an owner".to_string()))?;
                let options = IdentityListOptions {
                    page: query.page,
                    page_size: query.page_size,
                    ..Default::default()
                };
                let data = r.list(owner, options).await?;
                Ok(data
                    .get("identity_list")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default())
            }
            _ => Err(self.unsupported("list")),
        }
    }

    /// Every entity of `owner` across all pages.
    pub async fn list_all(
        &self,
        owner: impl Into<Owner>,
        query: ListAllQuery,
    ) -> Result<Vec<Value>, Error> {
        match self {
            ResourceHandle::Campaign(r) => r.list_all(owner, query).await,
            ResourceHandle::AdGroup(r) => r.list_all(owner, query).await,
            ResourceHandle::Ad(r) => r.list_all(owner, query).await,
            ResourceHandle::Spc(r) => r.list_all(owner, query).await,
            ResourceHandle::Identity(r) => {
                let options = IdentityListOptions {
                    page_size: query.page_size,
                    filtering: (!query.filtering.is_empty()).then_some(query.filtering),
                    ..Default::default()
                };
                r.list_all(owner, options).await
            }
            _ => Err(self.unsupported("list_all")),
        }
    }

    pub async fn get(&self, owner: impl Into<Owner>, id: &str) -> Result<Option<Value>, Error> {
        match self {
            ResourceHandle::Campaign(r) => r.get(owner, id).await,
            ResourceHandle::AdGroup(r) => r.get(owner, id).await,
            ResourceHandle::Ad(r) => r.get(owner, id).await,
            ResourceHandle::Spc(r) => r.get(owner, id).await,
            ResourceHandle::Image(r) => r.get_info(owner, id).await,
            ResourceHandle::Video(r) => Ok(r.get_info(owner, &[id]).await?.into_iter().next()),
            _ => Err(self.unsupported("get")),
        }
    }

    pub async fn update_status(
        &self,
        owner: impl Into<Owner>,
        id: &str,
        status: &str,
    ) -> Result<Value, Error> {
        match self {
            ResourceHandle::Campaign(r) => r.update_status(owner, id, status).await,
            ResourceHandle::AdGroup(r) => r.update_status(owner, id, status).await,
            ResourceHandle::Ad(r) => r.update_status(owner, id, status).await,
            ResourceHandle::Spc(r) => r.update_status(owner, id, status).await,
            _ => Err(self.unsupported("update_status")),
        }
    }
}

impl Client {
    /// Authentication and token endpoints.
    pub fn auth(&self) -> crate::Auth<'_> {
        crate::Auth::new(self)
    }

    pub fn campaigns(&self) -> Campaigns<'_> {
        Campaigns::new(self)
    }

    pub fn ad_groups(&self) -> AdGroups<'_> {
        AdGroups::new(self)
    }

    pub fn ads(&self) -> Ads<'_> {
        Ads::new(self)
    }

    pub fn smart_plus_campaigns(&self) -> SmartPlusCampaigns<'_> {
        SmartPlusCampaigns::new(self)
    }

    pub fn images(&self) -> Images<'_> {
        Images::new(self)
    }

    pub fn videos(&self) -> Videos<'_> {
        Videos::new(self)
    }

    pub fn identities(&self) -> Identities<'_> {
        Identities::new(self)
    }

    pub fn accounts(&self) -> Accounts<'_> {
        Accounts::new(self)
    }

    pub fn reports(&self) -> Reports<'_> {
        Reports::new(self)
    }

    /// Looks up a resource by kind.
    pub fn resource(&self, kind: ResourceKind) -> ResourceHandle<'_> {
        match kind {
            ResourceKind::Campaign => ResourceHandle::Campaign(self.campaigns()),
            ResourceKind::AdGroup => ResourceHandle::AdGroup(self.ad_groups()),
            ResourceKind::Ad => ResourceHandle::Ad(self.ads()),
            ResourceKind::Spc => ResourceHandle::Spc(self.smart_plus_campaigns()),
            ResourceKind::Image => ResourceHandle::Image(self.images()),
            ResourceKind::Video => ResourceHandle::Video(self.videos()),
            ResourceKind::Identity => ResourceHandle::Identity(self.identities()),
            ResourceKind::Account => ResourceHandle::Account(self.accounts()),
            ResourceKind::Report => ResourceHandle::Report(self.reports()),
        }
    }
}
