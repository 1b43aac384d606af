//! HTTP client for provider user-info endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use staybook_core::config::SocialConfig;
use staybook_core::error::{AppError, ErrorKind};
use staybook_entity::user::AuthProvider;

use super::profile::{GoogleUser, KakaoUser, NaverEnvelope, SocialProfile};

/// Looks up the user behind a provider access token.
#[async_trait]
pub trait SocialProfileClient: Send + Sync {
    /// Fetch the profile for `access_token` from `provider`.
    async fn fetch_profile(
        &self,
        provider: AuthProvider,
        access_token: &str,
    ) -> Result<SocialProfile, AppError>;
}

/// [`SocialProfileClient`] backed by the providers' REST APIs.
#[derive(Debug, Clone)]
pub struct HttpSocialProfileClient {
    client: Client,
    config: SocialConfig,
}

impl HttpSocialProfileClient {
    /// Create a client from configuration.
    pub fn new(config: SocialConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        provider: AuthProvider,
        url: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                warn!(provider = %provider, error = %e, "Social profile request failed");
                AppError::with_source(ErrorKind::Gateway, "소셜 로그인 서버에 연결할 수 없습니다", e)
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::unauthorized("소셜 로그인 토큰이 유효하지 않습니다"));
        }
        if !status.is_success() {
            warn!(provider = %provider, status = %status, "Social profile request rejected");
            return Err(AppError::gateway("소셜 로그인 정보를 가져오지 못했습니다"));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::with_source(ErrorKind::Gateway, "소셜 로그인 응답을 해석할 수 없습니다", e)
        })
    }
}

#[async_trait]
impl SocialProfileClient for HttpSocialProfileClient {
    async fn fetch_profile(
        &self,
        provider: AuthProvider,
        access_token: &str,
    ) -> Result<SocialProfile, AppError> {
        debug!(provider = %provider, "Fetching social profile");

        match provider {
            AuthProvider::Kakao => {
                let user: KakaoUser = self
                    .get_json(provider, &self.config.kakao_userinfo_url, access_token)
                    .await?;
                Ok(user.into())
            }
            AuthProvider::Google => {
                let user: GoogleUser = self
                    .get_json(provider, &self.config.google_userinfo_url, access_token)
                    .await?;
                Ok(user.into())
            }
            AuthProvider::Naver => {
                let envelope: NaverEnvelope = self
                    .get_json(provider, &self.config.naver_userinfo_url, access_token)
                    .await?;
                SocialProfile::try_from(envelope)
            }
            AuthProvider::Local => Err(AppError::validation("지원하지 않는 로그인 방식입니다")),
        }
    }
}
