use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::PageInfo;

/// A successful response envelope: `{"code": 0, "message": "OK", "data": {...}}`.
///
/// The parsed body is kept as-is so nothing the server sent is lost. When
/// the body was not valid JSON it holds `{"error": "Invalid JSON response: ..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ApiResponse {
    body: Value,
}

impl ApiResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// The envelope's numeric `code`, when present.
    pub fn code(&self) -> Option<i64> {
        self.body.get("code").and_then(Value::as_i64)
    }

    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.body.get("request_id").and_then(Value::as_str)
    }

    /// `true` when the envelope reports `code == 0`.
    pub fn is_success(&self) -> bool {
        self.code() == Some(0)
    }

    /// The `data` member, or `Value::Null` when the envelope has none.
    pub fn data(&self) -> &Value {
        self.body.get("data").unwrap_or(&Value::Null)
    }

    pub fn into_data(self) -> Value {
        match self.body {
            Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// Deserializes `data` into a typed struct.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data().clone())
    }

    /// Items stored under `data[key]`; empty when missing or not an array.
    pub fn items(&self, key: &str) -> &[Value] {
        self.data()
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Removes and returns the items under `data[key]`.
    pub fn take_items(&mut self, key: &str) -> Vec<Value> {
        match self
            .body
            .get_mut("data")
            .and_then(|data| data.get_mut(key))
            .map(Value::take)
        {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        }
    }

    /// `data.page_info`, when present and well-formed.
    pub fn page_info(&self) -> Option<PageInfo> {
        self.data()
            .get("page_info")
            .and_then(|info| serde_json::from_value(info.clone()).ok())
    }

    /// `data.access_token` as issued by the OAuth endpoints.
    pub fn access_token(&self) -> Option<&str> {
        self.data().get("access_token").and_then(Value::as_str)
    }

    /// The raw parsed body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope() -> ApiResponse {
        ApiResponse::new(json!({
            "code": 0,
            "message": "OK",
            "request_id": "20240101abc",
            "data": {
                "list": [{"campaign_id": "1"}, {"campaign_id": "2"}],
                "page_info": {"page": 1, "page_size": 10, "total_number": 2, "total_page": 1}
            }
        }))
    }

    #[test]
    fn exposes_envelope_fields() {
        let resp = envelope();
        assert_eq!(resp.code(), Some(0));
        assert!(resp.is_success());
        assert_eq!(resp.message(), Some("OK"));
        assert_eq!(resp.request_id(), Some("20240101abc"));
        assert_eq!(resp.items("list").len(), 2);
        assert!(resp.items("missing").is_empty());
        assert_eq!(resp.page_info().unwrap().total_number, Some(2));
    }

    #[test]
    fn take_items_moves_the_list_out() {
        let mut resp = envelope();
        let items = resp.take_items("list");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["campaign_id"], "2");
        assert!(resp.take_items("list").is_empty());
    }

    #[test]
    fn data_is_null_without_envelope() {
        let resp = ApiResponse::new(json!({"error": "Invalid JSON response: <html>"}));
        assert!(resp.data().is_null());
        assert_eq!(resp.code(), None);
        assert!(!resp.is_success());
        assert!(resp.into_data().is_null());
    }

    #[test]
    fn access_token_is_read_from_data() {
        let resp = ApiResponse::new(json!({
            "code": 0,
            "data": {"access_token": "act.123", "advertiser_ids": ["1"]}
        }));
        assert_eq!(resp.access_token(), Some("act.123"));
    }

    #[test]
    fn data_as_deserializes_typed() {
        #[derive(serde::Deserialize)]
        struct Created {
            campaign_id: String,
        }
        let resp = ApiResponse::new(json!({"code": 0, "data": {"campaign_id": "987"}}));
        let created: Created = resp.data_as().unwrap();
        assert_eq!(created.campaign_id, "987");
    }
}
