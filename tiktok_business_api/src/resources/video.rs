use serde_json::{json, Value};

use super::crud::API_VERSION;
use super::query::{ListQuery, Owner};
use crate::{
    client::{Client, Params},
    upload::VideoUpload,
    Error,
};

/// Video library endpoints under `v1.3/file/video/ad/`.
#[derive(Debug, Clone, Copy)]
pub struct Videos<'a> {
    client: &'a Client,
}

impl<'a> Videos<'a> {
    pub const RESOURCE_NAME: &'static str = "file/video/ad";

    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn endpoint(&self, relative: &str) -> String {
        format!("{}/{}/{}", API_VERSION, Self::RESOURCE_NAME, relative)
    }

    /// Metadata for the given videos.
    pub async fn get_info(
        &self,
        owner: impl Into<Owner>,
        video_ids: &[&str],
    ) -> Result<Vec<Value>, Error> {
        let mut params = Params::new();
        owner.into().insert_into(&mut params);
        params.insert("video_ids".to_string(), json!(video_ids));
        let mut response = self.client.get(&self.endpoint("info/"), params).await?;
        Ok(response.take_items("list"))
    }

    pub async fn upload(&self, upload: VideoUpload) -> Result<Value, Error> {
        let request = upload.into_request(&self.endpoint("upload/")).await?;
        Ok(self.client.request(request).await?.into_data())
    }

    /// One page of the video library. Filters go into `query.filtering`.
    pub async fn search(&self, query: ListQuery) -> Result<Vec<Value>, Error> {
        let mut response = self
            .client
            .get(&self.endpoint("search/"), query.into_params())
            .await?;
        Ok(response.take_items("list"))
    }
}
