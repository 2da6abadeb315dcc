//! Client for the remote hotel catalog. The engine consumes four read
//! endpoints; everything written locally goes through the store instead.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{BestOffer, Hotel};
use crate::store::{KvStore, AUTH_TOKEN_KEY};
use crate::utils::error::AppError;

pub struct HotelApi {
    http: Client,
    base_url: String,
    store: Arc<dyn KvStore>,
}

/// Catalog search parameters: free-text name match and country filter.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub country: Option<String>,
}

impl SearchQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(name) = &self.name {
            params.push(("q", name.clone()));
        }
        if let Some(country) = &self.country {
            params.push(("address.country", country.clone()));
        }
        params
    }
}

impl HotelApi {
    pub fn new(config: &Config, store: Arc<dyn KvStore>) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    pub async fn hotels(&self, query: &SearchQuery) -> Result<Vec<Hotel>, AppError> {
        self.fetch("hotels", &query.params()).await
    }

    pub async fn hotel(&self, id: &str) -> Result<Hotel, AppError> {
        self.fetch(&format!("hotels/{id}"), &[]).await
    }

    pub async fn recommended_hotels(&self) -> Result<Vec<Hotel>, AppError> {
        self.fetch("recommended_hotels", &[]).await
    }

    pub async fn best_offers(&self) -> Result<Vec<BestOffer>, AppError> {
        self.fetch("best_offer", &[]).await
    }

    /// One-shot GET with bearer auth when a session token is present.
    /// A 401 evicts the stored token so a stale session cannot keep
    /// poisoning requests.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, AppError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self.http.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(token) = self.store.get(AUTH_TOKEN_KEY)? {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::UNAUTHORIZED => {
                warn!(path, "catalog rejected the session token; evicting it");
                self.store.remove(AUTH_TOKEN_KEY)?;
                Err(AppError::AuthError("Session is no longer valid".to_string()))
            }
            StatusCode::NOT_FOUND => Err(AppError::NotFound(format!("GET /{path} returned 404"))),
            status if !status.is_success() => Err(AppError::ExternalServiceError(format!(
                "GET /{path} returned {status}"
            ))),
            _ => {
                info!(path, "catalog fetch succeeded");
                Ok(response.json::<T>().await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rust_decimal::Decimal;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one canned HTTP response, then closes.
    async fn spawn_stub(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn api_against(base_url: String, store: Arc<MemoryStore>) -> HotelApi {
        let config = Config {
            api_base_url: base_url,
            api_timeout_secs: 5,
            storage_path: None,
        };
        HotelApi::new(&config, store).unwrap()
    }

    #[test]
    fn search_params_cover_name_and_country() {
        let query = SearchQuery {
            name: Some("plaza".to_string()),
            country: Some("Chile".to_string()),
        };
        assert_eq!(
            query.params(),
            vec![
                ("q", "plaza".to_string()),
                ("address.country", "Chile".to_string())
            ]
        );
        assert!(SearchQuery::default().params().is_empty());
    }

    #[tokio::test]
    async fn fetches_and_normalizes_a_hotel() {
        let body = r#"{
            "id": 1,
            "name": "Grand Plaza",
            "pricing": [{"originalPrice": 200, "discountedPrice": 160, "currency": "USD", "priceUnit": "night"}]
        }"#;
        let base_url = spawn_stub("200 OK", body).await;
        let api = api_against(base_url, Arc::new(MemoryStore::new()));

        let hotel = api.hotel("1").await.unwrap();
        assert_eq!(hotel.id, "1");
        assert_eq!(hotel.nightly_rate().unwrap().amount, Decimal::from(160));
    }

    #[tokio::test]
    async fn missing_hotel_maps_to_not_found() {
        let base_url = spawn_stub("404 Not Found", "{}").await;
        let api = api_against(base_url, Arc::new(MemoryStore::new()));

        let err = api.hotel("999").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn unauthorized_response_evicts_the_token() {
        let base_url = spawn_stub("401 Unauthorized", "{}").await;
        let store = Arc::new(MemoryStore::new());
        store.set(AUTH_TOKEN_KEY, "stale-token").unwrap();
        let api = api_against(base_url, store.clone());

        let err = api.recommended_hotels().await.unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn server_errors_surface_as_external_service_errors() {
        let base_url = spawn_stub("500 Internal Server Error", "{}").await;
        let api = api_against(base_url, Arc::new(MemoryStore::new()));

        let err = api.best_offers().await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }
}
