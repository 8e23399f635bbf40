//! HTTP gateway for the tableros collection
//!
//! One HTTP call per operation. No retries, timeouts or backoff here; the
//! network actor layers its retry policy on top.

use crate::constants::TABLEROS_PATH;
use crate::error::GatewayError;
use crate::models::{ApiResult, NewTablero, Tablero, TableroId};

/// Gateway bound to one API base URL
#[derive(Clone, Debug)]
pub struct TableroGateway {
    client: reqwest::Client,
    base_url: String,
}

impl TableroGateway {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        TableroGateway {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, TABLEROS_PATH)
    }

    pub fn item_url(&self, id: &TableroId) -> String {
        format!("{}{}{}", self.base_url, TABLEROS_PATH, id)
    }

    /// GET /tableros/
    pub async fn list(&self) -> ApiResult<Vec<Tablero>> {
        into_result(self.try_list().await)
    }

    /// POST /tableros/
    pub async fn create(&self, payload: &NewTablero) -> ApiResult<Tablero> {
        into_result(self.try_create(payload).await)
    }

    /// PATCH /tableros/{id}
    pub async fn update(&self, id: &TableroId, payload: &NewTablero) -> ApiResult<Tablero> {
        into_result(self.try_update(id, payload).await)
    }

    /// DELETE /tableros/{id}. An empty body counts as success with no data.
    pub async fn delete(&self, id: &TableroId) -> ApiResult<Option<serde_json::Value>> {
        into_result(self.try_delete(id).await)
    }

    async fn try_list(&self) -> Result<Vec<Tablero>, GatewayError> {
        let resp = self.client.get(self.collection_url()).send().await?;
        let body = success_body(resp).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn try_create(&self, payload: &NewTablero) -> Result<Tablero, GatewayError> {
        let resp = self
            .client
            .post(self.collection_url())
            .json(payload)
            .send()
            .await?;
        let body = success_body(resp).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn try_update(
        &self,
        id: &TableroId,
        payload: &NewTablero,
    ) -> Result<Tablero, GatewayError> {
        let resp = self
            .client
            .patch(self.item_url(id))
            .json(payload)
            .send()
            .await?;
        let body = success_body(resp).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn try_delete(&self, id: &TableroId) -> Result<Option<serde_json::Value>, GatewayError> {
        let resp = self.client.delete(self.item_url(id)).send().await?;
        let body = success_body(resp).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&body).ok())
    }
}

/// Read the body of a 2xx response, or turn anything else into an error
async fn success_body(resp: reqwest::Response) -> Result<String, GatewayError> {
    let status = resp.status();
    let body = resp.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(GatewayError::Http {
            status: status.as_u16(),
            message: error_message(status.as_u16(), &body),
        })
    }
}

/// Prefer the server's `detail` field, else a status-coded fallback
pub fn error_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| match json.get("detail") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            // FastAPI-style validation errors: [{"msg": "..."}, ...]
            Some(serde_json::Value::Array(items)) => items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        });
    detail.unwrap_or_else(|| format!("Error {}", status))
}

fn into_result<T>(result: Result<T, GatewayError>) -> ApiResult<T> {
    match result {
        Ok(data) => ApiResult::ok(data),
        Err(e) => {
            tracing::warn!(status = ?e.status(), error = %e, "Gateway call failed");
            ApiResult::err(e.to_string())
        }
    }
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let gw = TableroGateway::new(create_client(), "http://localhost:8000/");
        assert_eq!(gw.collection_url(), "http://localhost:8000/tableros/");
        assert_eq!(
            gw.item_url(&TableroId::Int(42)),
            "http://localhost:8000/tableros/42"
        );
        assert_eq!(
            gw.item_url(&TableroId::Text("x1".into())),
            "http://localhost:8000/tableros/x1"
        );
    }

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(
            error_message(404, r#"{"detail": "Tablero no encontrado"}"#),
            "Tablero no encontrado"
        );
        assert_eq!(
            error_message(422, r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#),
            "field required"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(error_message(500, "Internal Server Error"), "Error 500");
        assert_eq!(error_message(400, r#"{"other": 1}"#), "Error 400");
        assert_eq!(error_message(503, ""), "Error 503");
    }

    #[test]
    fn test_into_result_maps_errors_to_messages() {
        let r: ApiResult<u8> = into_result(Err(GatewayError::Http {
            status: 409,
            message: "Duplicado".into(),
        }));
        assert!(!r.success);
        assert_eq!(r.error.as_deref(), Some("Duplicado"));
        assert!(r.data.is_none());

        let ok = into_result(Ok(3u8));
        assert_eq!(ok, ApiResult::ok(3));
    }
}
