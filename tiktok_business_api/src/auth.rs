//! OAuth token exchange and authorization helpers.
//!
//! None of these calls touch the client's stored token. Read the issued
//! token with [`ApiResponse::access_token`] and hand it to
//! [`Client::set_access_token`] to use it for later requests.

use serde_json::json;
use url::form_urlencoded;

use crate::{
    client::{ApiRequest, Client, Params},
    types::ApiResponse,
    Error,
};

/// Page the user is sent to for granting advertiser access.
pub const AUTHORIZATION_BASE_URL: &str = "https://ads.tiktok.com/marketing_api/auth";

const ACCESS_TOKEN_PATH: &str = "v1.3/oauth2/access_token/";
const REFRESH_TOKEN_PATH: &str = "v1.3/tt_user/oauth2/refresh_token/";
const REVOKE_TOKEN_PATH: &str = "v1.3/oauth2/revoke_token/";
const AUTHORIZED_ADVERTISERS_PATH: &str = "v1.3/oauth2/advertiser/get/";

/// Authentication endpoints, borrowed from a [`Client`] via [`Client::auth`].
#[derive(Debug, Clone, Copy)]
pub struct Auth<'a> {
    client: &'a Client,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Exchanges an authorization code for an access token.
    pub async fn generate_access_token(
        &self,
        auth_code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<ApiResponse, Error> {
        let mut params = self.app_credentials()?;
        params.insert("auth_code".to_string(), json!(auth_code));
        params.insert("grant_type".to_string(), json!("auth_code"));
        if let Some(redirect_uri) = redirect_uri {
            params.insert("redirect_uri".to_string(), json!(redirect_uri));
        }
        self.client.post(ACCESS_TOKEN_PATH, params).await
    }

    /// Trades a refresh token for a new access token.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<ApiResponse, Error> {
        let mut params = self.app_credentials()?;
        params.insert("refresh_token".to_string(), json!(refresh_token));
        params.insert("grant_type".to_string(), json!("refresh_token"));
        self.client.post(REFRESH_TOKEN_PATH, params).await
    }

    /// Revokes `token`, or the client's stored token when `None`.
    ///
    /// A successful response (`is_success()`) means the caller should drop
    /// the token with [`Client::clear_access_token`].
    pub async fn revoke_access_token(&self, token: Option<&str>) -> Result<ApiResponse, Error> {
        let token = self.token_or_stored(token)?;
        let mut params = self.app_credentials()?;
        params.insert("access_token".to_string(), json!(token));
        self.client.post(REVOKE_TOKEN_PATH, params).await
    }

    /// Lists advertiser accounts that granted access to this app.
    pub async fn get_authorized_advertisers(
        &self,
        token: Option<&str>,
    ) -> Result<ApiResponse, Error> {
        let params = self.app_credentials()?;
        let mut request = ApiRequest::get(AUTHORIZED_ADVERTISERS_PATH).with_params(params);
        if let Some(token) = token {
            request = request.with_header("Access-Token", token);
        }
        self.client.request(request).await
    }

    /// Builds the URL a user visits to authorize this app.
    ///
    /// Requires `app_id` to be configured. `scope` is joined with commas
    /// and left out when empty.
    pub fn authorization_url(
        &self,
        redirect_uri: &str,
        state: Option<&str>,
        scope: &[&str],
    ) -> Result<String, Error> {
        let app_id = self.app_id()?;
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("app_id", app_id);
        query.append_pair("redirect_uri", redirect_uri);
        if let Some(state) = state {
            query.append_pair("state", state);
        }
        if !scope.is_empty() {
            query.append_pair("scope", &scope.join(","));
        }
        Ok(format!("{}?{}", AUTHORIZATION_BASE_URL, query.finish()))
    }

    fn app_id(&self) -> Result<&'a str, Error> {
        self.client
            .config()
            .app_id
            .as_deref()
            .ok_or_else(|| Error::Config("app_id is not configured".to_string()))
    }

    fn app_credentials(&self) -> Result<Params, Error> {
        let app_id = self.app_id()?;
        let secret = self
            .client
            .config()
            .secret
            .as_deref()
            .ok_or_else(|| Error::Config("secret is not configured".to_string()))?;
        let mut params = Params::new();
        params.insert("app_id".to_string(), json!(app_id));
        params.insert("secret".to_string(), json!(secret));
        Ok(params)
    }

    fn token_or_stored(&self, token: Option<&str>) -> Result<String, Error> {
        token
            .or(self.client.config().access_token.as_deref())
            .map(str::to_string)
            .ok_or_else(|| Error::Config("no access token given or configured".to_string()))
    }
}
