use super::queue_id::ConductionPayload;
use crate::config::ApiConfig;
use crate::error::{Result, VenueError};
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;

const USER_AGENT: &str = concat!("venue/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ConfirmedIds {
    #[serde(default)]
    conduced_ids: Vec<String>,
}

/// Client for the remote conduction endpoints.
///
/// Holds no local state about confirmations: every call goes to the server,
/// which owns idempotency. Failed calls are returned to the caller and never
/// retried here.
#[derive(Debug, Clone)]
pub struct ConductionClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ConductionClient {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|e| VenueError::tracker(None, format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            token: api.token(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/conduction", self.base_url)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Ids already conduced at a venue on a given day. A 404 means nothing
    /// has been confirmed yet and yields an empty set.
    pub async fn list_confirmed(
        &self,
        establishment_id: i64,
        flow_date: NaiveDate,
    ) -> Result<BTreeSet<String>> {
        let date = flow_date.format("%Y-%m-%d").to_string();
        tracing::debug!(establishment_id, flow_date = %date, "fetching conduced ids");

        let response = self
            .authorize(self.http.get(self.endpoint()).query(&[
                ("establishment_id", establishment_id.to_string()),
                ("flow_date", date),
            ]))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(BTreeSet::new());
        }
        if !status.is_success() {
            return Err(failure(response, "listing conduced ids").await);
        }

        let body: ConfirmedIds = response.json().await.map_err(|e| {
            VenueError::tracker(
                Some(status.as_u16()),
                format!("invalid conduction response: {e}"),
            )
        })?;
        Ok(body.conduced_ids.into_iter().collect())
    }

    /// Mark one queue item as conduced. Safe to repeat with the same payload.
    pub async fn confirm(&self, payload: &ConductionPayload) -> Result<()> {
        let response = self
            .authorize(self.http.post(self.endpoint()).json(payload))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(failure(response, "confirming conduction").await);
        }

        tracing::info!(
            establishment_id = payload.establishment_id,
            queue_item_id = %payload.queue_item_id,
            entity_type = %payload.entity_type,
            entity_id = payload.entity_id,
            "conduction confirmed"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Error helpers
// ---------------------------------------------------------------------------

fn transport_error(e: reqwest::Error) -> VenueError {
    tracing::warn!(error = %e, "conduction request did not complete");
    VenueError::tracker(None, format!("conduction service unreachable: {e}"))
}

async fn failure(response: reqwest::Response, action: &str) -> VenueError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message =
        server_message(&body).unwrap_or_else(|| format!("{action} failed with status {status}"));
    tracing::warn!(status, %message, "conduction request rejected");
    VenueError::tracker(Some(status), message)
}

/// The server's own `message` (or `error`) field, if the body carries one.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn client(server: &mockito::ServerGuard) -> ConductionClient {
        ConductionClient::new(&ApiConfig::new(server.url())).unwrap()
    }

    fn list_query() -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("establishment_id".into(), "3".into()),
            Matcher::UrlEncoded("flow_date".into(), "2026-10-17".into()),
        ])
    }

    #[test]
    fn server_message_prefers_message_then_error() {
        assert_eq!(
            server_message(r#"{"message":"closed","error":"x"}"#).as_deref(),
            Some("closed")
        );
        assert_eq!(server_message(r#"{"error":"bad day"}"#).as_deref(), Some("bad day"));
        assert_eq!(server_message(r#"{"message":"  ","error":"e"}"#).as_deref(), Some("e"));
        assert_eq!(server_message(r#"{"message": 4}"#), None);
        assert_eq!(server_message("<html>oops</html>"), None);
    }

    #[tokio::test]
    async fn list_confirmed_returns_ids() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/conduction")
            .match_query(list_query())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"conduced_ids":["owner-5","guest-3-7","owner-5"]}"#)
            .create_async()
            .await;

        let ids = client(&server).list_confirmed(3, day()).await.unwrap();
        mock.assert_async().await;
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("owner-5"));
        assert!(ids.contains("guest-3-7"));
    }

    #[tokio::test]
    async fn list_confirmed_not_found_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/conduction")
            .match_query(list_query())
            .with_status(404)
            .with_body(r#"{"message":"no flow for this day"}"#)
            .create_async()
            .await;

        let ids = client(&server).list_confirmed(3, day()).await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn list_confirmed_surfaces_server_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/conduction")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error":"database offline"}"#)
            .create_async()
            .await;

        let err = client(&server).list_confirmed(3, day()).await.unwrap_err();
        match err {
            VenueError::Tracker { status, message } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "database offline");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_confirmed_generic_message_without_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/conduction")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = client(&server).list_confirmed(3, day()).await.unwrap_err();
        assert!(err.to_string().contains("503"), "{err}");
    }

    #[tokio::test]
    async fn confirm_posts_full_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/conduction")
            .match_body(Matcher::Json(serde_json::json!({
                "establishment_id": 3,
                "flow_date": "2026-10-17",
                "queue_item_id": "owner-5",
                "entity_type": "owner",
                "entity_id": 5,
                "guest_list_id": 5
            })))
            .with_status(201)
            .create_async()
            .await;

        let payload = ConductionPayload::for_item(3, day(), "owner-5", None, None);
        client(&server).confirm(&payload).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn confirm_twice_issues_two_requests_without_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/conduction")
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .expect(2)
            .create_async()
            .await;

        let c = client(&server);
        let payload = ConductionPayload::for_item(3, day(), "reservation-9", None, None);
        c.confirm(&payload).await.unwrap();
        c.confirm(&payload).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn confirm_failure_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/conduction")
            .with_status(422)
            .with_body(r#"{"message":"flow_date is closed"}"#)
            .create_async()
            .await;

        let payload = ConductionPayload::for_item(3, day(), "guest-3-7", None, None);
        let err = client(&server).confirm(&payload).await.unwrap_err();
        assert!(matches!(
            err,
            VenueError::Tracker { status: Some(422), ref message } if message == "flow_date is closed"
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_tracker_error() {
        let api = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            token_env: None,
        };
        let err = ConductionClient::new(&api)
            .unwrap()
            .list_confirmed(3, day())
            .await
            .unwrap_err();
        assert!(matches!(err, VenueError::Tracker { status: None, .. }));
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/conduction")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"conduced_ids":[]}"#)
            .create_async()
            .await;

        let api = ApiConfig::new(format!("{}/", server.url()));
        let ids = ConductionClient::new(&api)
            .unwrap()
            .list_confirmed(3, day())
            .await
            .unwrap();
        assert!(ids.is_empty());
        mock.assert_async().await;
    }
}
