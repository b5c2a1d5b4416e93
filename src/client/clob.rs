use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client, Method};
use serde_json::Value;
use sha2::Sha256;
use std::time::Duration;
use tracing::{debug, error};

use crate::client::{PageQuery, TradeSource};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::paginator::Page;
use crate::{
    BUILDER_TRADES_PATH, HEADER_BUILDER_API_KEY, HEADER_BUILDER_PASSPHRASE,
    HEADER_BUILDER_SIGNATURE, HEADER_BUILDER_TIMESTAMP,
};

type HmacSha256 = Hmac<Sha256>;

/// Builder-authenticated client for the venue's trades endpoint.
pub struct ClobClient {
    client: Client,
    config: ClientConfig,
}

impl ClobClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn query_params(query: &PageQuery) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(cursor) = &query.cursor {
            params.push(("next_cursor", cursor.clone()));
        }
        if let Some(after) = query.after {
            params.push(("after", after.timestamp().to_string()));
        }
        if let Some(before) = query.before {
            params.push(("before", before.timestamp().to_string()));
        }
        params
    }
}

/// URL-safe base64 HMAC-SHA256 over `timestamp + method + path`, keyed with
/// the URL-safe base64 decoded secret.
pub fn sign_request(secret: &str, timestamp: i64, method: &Method, path: &str) -> Result<String> {
    let key = URL_SAFE
        .decode(secret.trim())
        .map_err(|e| Error::Config(format!("BUILDER_SECRET is not valid base64: {}", e)))?;
    let mut mac = HmacSha256::new_from_slice(&key)
        .map_err(|e| Error::Config(format!("Invalid signing key: {}", e)))?;
    mac.update(format!("{}{}{}", timestamp, method.as_str(), path).as_bytes());

    Ok(URL_SAFE.encode(mac.finalize().into_bytes()))
}

#[async_trait]
impl TradeSource for ClobClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page> {
        let url = format!("{}{}", self.config.host.trim_end_matches('/'), BUILDER_TRADES_PATH);
        let timestamp = Utc::now().timestamp();
        let creds = &self.config.credentials;
        let signature = sign_request(&creds.secret, timestamp, &Method::GET, BUILDER_TRADES_PATH)?;

        debug!("Requesting builder trades page with cursor {:?}", query.cursor);

        let response = self
            .client
            .get(&url)
            .query(&Self::query_params(query))
            .header(HEADER_BUILDER_API_KEY, &creds.key)
            .header(HEADER_BUILDER_PASSPHRASE, &creds.passphrase)
            .header(HEADER_BUILDER_TIMESTAMP, timestamp.to_string())
            .header(HEADER_BUILDER_SIGNATURE, signature)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Builder trades request failed with {}: {}", status, body);
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        Ok(Page::from(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_request_is_deterministic_url_safe_base64() {
        let secret = URL_SAFE.encode(b"builder-secret");
        let first = sign_request(&secret, 1_700_000_000, &Method::GET, BUILDER_TRADES_PATH).unwrap();
        let second = sign_request(&secret, 1_700_000_000, &Method::GET, BUILDER_TRADES_PATH).unwrap();
        let later = sign_request(&secret, 1_700_000_001, &Method::GET, BUILDER_TRADES_PATH).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, later);
        assert!(!first.contains('+') && !first.contains('/'));
        assert_eq!(URL_SAFE.decode(&first).unwrap().len(), 32);
    }

    #[test]
    fn test_sign_request_rejects_bad_secret() {
        let result = sign_request("not base64 !!", 1, &Method::GET, BUILDER_TRADES_PATH);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_query_params_skip_empty_filters() {
        assert!(ClobClient::query_params(&PageQuery::default()).is_empty());

        let after = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let params = ClobClient::query_params(&PageQuery {
            cursor: Some("MTAw".to_string()),
            after: Some(after),
            before: None,
        });
        assert_eq!(
            params,
            vec![("next_cursor", "MTAw".to_string()), ("after", "1700000000".to_string())]
        );
    }
}
