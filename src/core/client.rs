//! DeepL HTTP client for the translate and usage endpoints

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::core::config::ClientConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{
    TranslateResponse, TranslationRequest, TranslationResult, UsageReport, UsageResponse,
};

/// DeepL answers 456 once the character quota is used up
const QUOTA_EXCEEDED_STATUS: u16 = 456;

/// Single-attempt DeepL client
#[derive(Debug, Clone)]
pub struct DeepLClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl DeepLClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Translate a single request
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let url = format!("{}/v2/translate", self.config.endpoint());
        debug!(
            "Translating {} chars to {}",
            request.text.chars().count(),
            request.target_lang
        );

        let mut query = vec![("auth_key", self.config.api_key.clone())];
        query.extend(request.query_params());

        let body: TranslateResponse = self.get_json(&url, &query).await?;

        let item = body
            .translations
            .and_then(|translations| translations.into_iter().next())
            .ok_or_else(|| TranslationError::InvalidResponseError {
                message: "No translation in response".to_string(),
            })?;

        if let Some(detected) = &item.detected_source_language {
            debug!("Detected source language: {}", detected);
        }

        Ok(TranslationResult {
            translated_text: item.text,
            detected_source_language: item.detected_source_language,
        })
    }

    /// Fetch character usage for the account
    pub async fn usage(&self) -> Result<UsageReport> {
        let url = format!("{}/v2/usage", self.config.endpoint());
        let query = [("auth_key", self.config.api_key.clone())];

        let body: UsageResponse = self.get_json(&url, &query).await?;

        match (body.character_count, body.character_limit) {
            (Some(count), Some(limit)) => {
                info!("Usage: {} of {} characters", count, limit);
                Ok(UsageReport::new(count, limit))
            }
            _ => Err(TranslationError::InvalidResponseError {
                message: "Usage response lacks character_count or character_limit".to_string(),
            }),
        }
    }

    /// Send a GET and decode a successful JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response).await?;

        // the timeout also covers reading the body
        let body = response.bytes().await.map_err(transport_error)?;

        serde_json::from_slice(&body).map_err(|e| TranslationError::InvalidResponseError {
            message: e.to_string(),
        })
    }
}

fn transport_error(err: reqwest::Error) -> TranslationError {
    if err.is_timeout() {
        TranslationError::TimeoutError
    } else {
        // the URL carries the auth key
        TranslationError::NetworkError {
            message: err.without_url().to_string(),
        }
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    let error_text = response.text().await.unwrap_or_default();
    warn!("DeepL returned {}: {}", status, error_text);

    Err(match status {
        StatusCode::TOO_MANY_REQUESTS => TranslationError::RateLimitError { retry_after },
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => TranslationError::AuthError,
        s if s.as_u16() == QUOTA_EXCEEDED_STATUS => TranslationError::QuotaExceededError,
        _ => TranslationError::ApiError {
            status: status.as_u16(),
            message: error_text,
        },
    })
}
