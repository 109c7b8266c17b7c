// src/layout/client.rs
//! HTTP client for the bus-management API.
//!
//! - `GET  {base}/buses/{id}`              bus metadata (deck bounds)
//! - `GET  {base}/buses/{id}/seats`        previously saved seats, 404 when none
//! - `POST {base}/buses/{id}/seat-layout`  overwrite the layout with a full snapshot
//!
//! One request per call, no retries and no timeout.

use bevy::prelude::*;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use super::bus_metadata::{BusMetadata, SavedSeat};
use super::error::ApiError;
use super::submit::LayoutSubmission;

/// Shape of the collaborator's JSON bodies that carry a human message.
#[derive(Debug, Default, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Resource, Debug, Clone)]
pub struct BusApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BusApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Applies to requests spawned after this call.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.trim().is_empty()).map(|t| t.trim().to_string());
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim().trim_end_matches('/').to_string();
    }

    /// `{base}/buses/{id}`. The id is one path segment, so `/`, `?` and `#`
    /// in it are percent-encoded.
    pub fn bus_url(&self, bus_id: &str) -> Result<Url, ApiError> {
        self.endpoint(bus_id, None)
    }

    fn endpoint(&self, bus_id: &str, tail: Option<&str>) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ApiError::Transport(format!("invalid API base URL '{}': {}", self.base_url, e))
        })?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::Transport(format!("API base URL '{}' cannot take a path", self.base_url))
            })?;
            segments.pop_if_empty().push("buses").push(bus_id.trim());
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        Ok(self.authorize(request).send().await?)
    }

    pub async fn fetch_bus(&self, bus_id: &str) -> Result<BusMetadata, ApiError> {
        let url = self.bus_url(bus_id)?;
        debug!("BusApi: GET {}", url);
        let response = self.send(self.http.get(url)).await?;
        let response = ensure_success(response).await?;
        let metadata: BusMetadata = response.json().await?;
        metadata.deck_bounds()?;
        Ok(metadata)
    }

    /// Saved seats for the bus; an empty list when nothing was saved yet.
    pub async fn fetch_saved_seats(&self, bus_id: &str) -> Result<Vec<SavedSeat>, ApiError> {
        let url = self.endpoint(bus_id, Some("seats"))?;
        debug!("BusApi: GET {}", url);
        let response = self.send(self.http.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            info!("BusApi: no saved layout for bus '{}'", bus_id);
            return Ok(Vec::new());
        }
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Loads bus metadata and its saved seats in one go.
    pub async fn load_bus(&self, bus_id: &str) -> Result<(BusMetadata, Vec<SavedSeat>), ApiError> {
        let metadata = self.fetch_bus(bus_id).await?;
        let seats = self.fetch_saved_seats(bus_id).await?;
        Ok((metadata, seats))
    }

    /// Posts the snapshot. Returns the collaborator's confirmation text if it sent one.
    pub async fn save_layout(&self, submission: &LayoutSubmission) -> Result<Option<String>, ApiError> {
        let url = self.endpoint(&submission.bus_id, Some("seat-layout"))?;
        debug!("BusApi: POST {} ({} seats)", url, submission.seat_count());
        let response = self.send(self.http.post(url).json(submission)).await?;
        let response = ensure_success(response).await?;
        let body = response.text().await?;
        Ok(parse_message(&body))
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = rejection_message(status, &body);
    warn!("BusApi: request rejected with {}: {}", status, message);
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}

fn parse_message(body: &str) -> Option<String> {
    let parsed: ApiMessage = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}

/// The collaborator's own message if it sent one, otherwise the raw body,
/// otherwise the status line.
fn rejection_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = parse_message(body) {
        return message;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    format!("HTTP {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = BusApiClient::new("http://localhost:8080/api/", None);
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(
            client.bus_url(" 42 ").unwrap().as_str(),
            "http://localhost:8080/api/buses/42"
        );
        assert_eq!(
            client.endpoint("42", Some("seats")).unwrap().as_str(),
            "http://localhost:8080/api/buses/42/seats"
        );
        assert!(!client.has_token());
        assert!(!BusApiClient::new("http://x", Some("  ".to_string())).has_token());
        assert!(BusApiClient::new("http://x", Some("abc".to_string())).has_token());
    }

    #[test]
    fn test_settings_changes_apply() {
        let mut client = BusApiClient::new("http://old/api", Some("abc".to_string()));
        client.set_base_url(" https://fleet.example.com/v2/ ");
        assert_eq!(
            client.bus_url("7").unwrap().as_str(),
            "https://fleet.example.com/v2/buses/7"
        );
        client.set_token(Some(" ".to_string()));
        assert!(!client.has_token());
        client.set_token(Some(" xyz ".to_string()));
        assert!(client.has_token());
    }

    #[test]
    fn test_bus_id_is_one_path_segment() {
        let client = BusApiClient::new("http://localhost:8080/api", None);
        assert_eq!(
            client.bus_url("A/B").unwrap().as_str(),
            "http://localhost:8080/api/buses/A%2FB"
        );
        assert_eq!(
            client.endpoint("X?y", Some("seat-layout")).unwrap().as_str(),
            "http://localhost:8080/api/buses/X%3Fy/seat-layout"
        );
        assert_eq!(
            client.bus_url("bus 7#2").unwrap().as_str(),
            "http://localhost:8080/api/buses/bus%207%232"
        );
        let bare = BusApiClient::new("http://fleet.local/", None);
        assert_eq!(bare.bus_url("9").unwrap().as_str(), "http://fleet.local/buses/9");
    }

    #[test]
    fn test_unusable_base_url_is_error() {
        let client = BusApiClient::new("not a url", None);
        assert!(matches!(client.bus_url("1"), Err(ApiError::Transport(_))));
        let client = BusApiClient::new("mailto:ops@example.com", None);
        assert!(matches!(client.bus_url("1"), Err(ApiError::Transport(_))));
    }

    #[test]
    fn test_rejection_message_prefers_collaborator_text() {
        assert_eq!(
            rejection_message(StatusCode::BAD_REQUEST, r#"{"message":"Seat 4 overlaps seat 5"}"#),
            "Seat 4 overlaps seat 5"
        );
        assert_eq!(
            rejection_message(StatusCode::UNAUTHORIZED, r#"{"error":"Token expired"}"#),
            "Token expired"
        );
        assert_eq!(
            rejection_message(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
        assert_eq!(
            rejection_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "HTTP 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = BusApiClient::new("http://127.0.0.1:1/api", None);
        match client.fetch_bus("B1").await {
            Err(ApiError::Transport(_)) => {}
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_message() {
        assert_eq!(parse_message(r#"{"message":"Layout saved"}"#), Some("Layout saved".to_string()));
        assert_eq!(parse_message(r#"{"message":""}"#), None);
        assert_eq!(parse_message("ok"), None);
    }
}
