use serde::{Deserialize, Serialize};

/// Pagination block found at `data.page_info` on list endpoints.
///
/// Endpoints disagree on which fields they fill in, so every field is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u64>,
    #[serde(default)]
    pub total_number: Option<u64>,
    #[serde(default)]
    pub total_page: Option<u64>,
    #[serde(default)]
    pub has_more: Option<bool>,
}

impl PageInfo {
    /// Decides whether another page should be requested after `page`
    /// (1-based) was fetched with `page_size` items per page.
    ///
    /// `has_more` wins when present. Otherwise `total_number` arithmetic is
    /// used with the page size the server reports, falling back to the
    /// requested one, then `total_page`. With none of them there is nothing to go on
    /// and paging stops. An empty page is handled by the caller and always
    /// stops regardless of this answer.
    pub fn has_next_page(&self, page: u64, page_size: u64) -> bool {
        if let Some(has_more) = self.has_more {
            return has_more;
        }
        if let Some(total_number) = self.total_number {
            let page_size = self.page_size.filter(|&size| size > 0).unwrap_or(page_size);
            return page.saturating_mul(page_size) < total_number;
        }
        if let Some(total_page) = self.total_page {
            return page < total_page;
        }
        false
    }
}
