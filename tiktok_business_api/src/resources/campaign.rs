use super::crud::CrudResource;
use crate::client::Client;

/// Campaign endpoints under `v1.3/campaign/`. All operations come from
/// [`CrudResource`].
#[derive(Debug, Clone, Copy)]
pub struct Campaigns<'a> {
    client: &'a Client,
}

impl<'a> Campaigns<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

impl CrudResource for Campaigns<'_> {
    const RESOURCE_NAME: &'static str = "campaign";

    fn client(&self) -> &Client {
        self.client
    }
}
