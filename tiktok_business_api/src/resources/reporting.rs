use chrono::NaiveDate;
use serde_json::{json, Value};

use super::crud::API_VERSION;
use super::pagination::paginate;
use crate::{
    client::{Client, Params},
    Error,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_PAGE_SIZE: u64 = 100;

/// A synchronous integrated report request.
///
/// `dimensions` and `metrics` are sent as JSON lists. Dates are inclusive.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub advertiser_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `BASIC`, `AUDIENCE`, `PLAYABLE_MATERIAL` or `CATALOG`.
    pub report_type: String,
    /// e.g. `AUCTION_CAMPAIGN`, `AUCTION_ADGROUP`, `AUCTION_AD`.
    pub data_level: String,
    pub dimensions: Vec<String>,
    pub metrics: Vec<String>,
    pub filtering: Option<Value>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl ReportQuery {
    /// A `BASIC` campaign-level report keyed by `campaign_id` and `stat_time_day`.
    pub fn new(advertiser_id: &str, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            advertiser_id: advertiser_id.to_string(),
            start_date,
            end_date,
            report_type: "BASIC".to_string(),
            data_level: "AUCTION_CAMPAIGN".to_string(),
            dimensions: vec!["campaign_id".to_string(), "stat_time_day".to_string()],
            metrics: vec!["spend".to_string(), "impressions".to_string(), "clicks".to_string()],
            filtering: None,
            page: None,
            page_size: None,
        }
    }

    pub fn with_report_type(mut self, report_type: &str) -> Self {
        self.report_type = report_type.to_string();
        self
    }

    pub fn with_data_level(mut self, data_level: &str) -> Self {
        self.data_level = data_level.to_string();
        self
    }

    pub fn with_dimensions(mut self, dimensions: &[&str]) -> Self {
        self.dimensions = dimensions.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_metrics(mut self, metrics: &[&str]) -> Self {
        self.metrics = metrics.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    fn validate(&self) -> Result<(), Error> {
        if self.start_date > self.end_date {
            return Err(Error::Config(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        if self.dimensions.is_empty() {
            return Err(Error::Config("at least one dimension is required".to_string()));
        }
        Ok(())
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("advertiser_id".to_string(), json!(self.advertiser_id));
        params.insert("report_type".to_string(), json!(self.report_type));
        params.insert("data_level".to_string(), json!(self.data_level));
        params.insert("dimensions".to_string(), json!(self.dimensions));
        if !self.metrics.is_empty() {
            params.insert("metrics".to_string(), json!(self.metrics));
        }
        params.insert(
            "start_date".to_string(),
            json!(self.start_date.format(DATE_FORMAT).to_string()),
        );
        params.insert(
            "end_date".to_string(),
            json!(self.end_date.format(DATE_FORMAT).to_string()),
        );
        if let Some(filtering) = &self.filtering {
            params.insert("filtering".to_string(), json!(filtering.to_string()));
        }
        params
    }
}

/// Integrated reporting under `v1.3/report/integrated/`.
#[derive(Debug, Clone, Copy)]
pub struct Reports<'a> {
    client: &'a Client,
}

impl<'a> Reports<'a> {
    pub const RESOURCE_NAME: &'static str = "report/integrated";

    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn path(&self) -> String {
        format!("{}/{}/get/", API_VERSION, Self::RESOURCE_NAME)
    }

    /// Rows of one report page, from `data.list`.
    pub async fn get_sync_report(&self, query: &ReportQuery) -> Result<Vec<Value>, Error> {
        query.validate()?;
        let mut params = query.to_params();
        if let Some(page) = query.page {
            params.insert("page".to_string(), json!(page));
        }
        if let Some(page_size) = query.page_size {
            params.insert("page_size".to_string(), json!(page_size));
        }
        let mut response = self.client.get(&self.path(), params).await?;
        Ok(response.take_items("list"))
    }

    /// Rows of every report page, starting at `query.page` (default 1).
    pub async fn get_sync_report_all(&self, query: &ReportQuery) -> Result<Vec<Value>, Error> {
        query.validate()?;
        let mut rows = Vec::new();
        paginate(
            self.client,
            &self.path(),
            query.to_params(),
            "list",
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            |row| rows.push(row),
        )
        .await?;
        Ok(rows)
    }
}
