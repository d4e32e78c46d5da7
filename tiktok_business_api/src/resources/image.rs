use serde_json::{json, Value};

use super::crud::API_VERSION;
use super::query::Owner;
use crate::{
    client::{Client, Params},
    upload::ImageUpload,
    Error,
};

const DEFAULT_SEARCH_PAGE_SIZE: u64 = 20;

/// Optional filters for [`Images::search`].
#[derive(Debug, Clone, Default)]
pub struct ImageSearch {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub image_ids: Option<Vec<String>>,
    pub material_ids: Option<Vec<String>>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub signature: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub displayable: Option<bool>,
}

impl ImageSearch {
    fn into_params(self, owner: Owner) -> Params {
        let mut params = Params::new();
        owner.insert_into(&mut params);
        params.insert("page".to_string(), json!(self.page.unwrap_or(1)));
        params.insert(
            "page_size".to_string(),
            json!(self.page_size.unwrap_or(DEFAULT_SEARCH_PAGE_SIZE)),
        );
        let optional = [
            ("image_ids", self.image_ids.map(|v| json!(v))),
            ("material_ids", self.material_ids.map(|v| json!(v))),
            ("width", self.width.map(|v| json!(v))),
            ("height", self.height.map(|v| json!(v))),
            ("signature", self.signature.map(|v| json!(v))),
            ("start_time", self.start_time.map(|v| json!(v))),
            ("end_time", self.end_time.map(|v| json!(v))),
            ("displayable", self.displayable.map(|v| json!(v))),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.insert(key.to_string(), value);
            }
        }
        params
    }
}

/// Image library endpoints under `v1.3/file/image/ad/`.
#[derive(Debug, Clone, Copy)]
pub struct Images<'a> {
    client: &'a Client,
}

impl<'a> Images<'a> {
    pub const RESOURCE_NAME: &'static str = "file/image/ad";

    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn endpoint(&self, relative: &str) -> String {
        format!("{}/{}/{}", API_VERSION, Self::RESOURCE_NAME, relative)
    }

    /// Uploads an image and returns the created image's `data`.
    pub async fn upload(&self, upload: ImageUpload) -> Result<Value, Error> {
        let request = upload.into_request(&self.endpoint("upload/")).await?;
        Ok(self.client.request(request).await?.into_data())
    }

    /// Metadata for one image, or `None` when the id is unknown.
    pub async fn get_info(
        &self,
        owner: impl Into<Owner>,
        image_id: &str,
    ) -> Result<Option<Value>, Error> {
        let mut params = Params::new();
        owner.into().insert_into(&mut params);
        params.insert("image_ids".to_string(), json!([image_id]));
        let mut response = self.client.get(&self.endpoint("info/"), params).await?;
        Ok(response.take_items("list").into_iter().next())
    }

    /// One page of the image library matching `search`.
    pub async fn search(
        &self,
        owner: impl Into<Owner>,
        search: ImageSearch,
    ) -> Result<Vec<Value>, Error> {
        let params = search.into_params(owner.into());
        let mut response = self.client.get(&self.endpoint("search/"), params).await?;
        Ok(response.take_items("list"))
    }

    /// Checks whether `file_names` are still free in the material library.
    pub async fn check_name(
        &self,
        owner: impl Into<Owner>,
        file_names: &[&str],
    ) -> Result<Value, Error> {
        let mut params = Params::new();
        owner.into().insert_into(&mut params);
        params.insert("file_names".to_string(), json!(file_names));
        let path = format!("{}/file/name/check/", API_VERSION);
        Ok(self.client.post(&path, params).await?.into_data())
    }
}
