//! Social login provider configuration.

use serde::{Deserialize, Serialize};

/// User-info endpoints for the supported social login providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialConfig {
    /// Kakao user-info endpoint.
    #[serde(default = "default_kakao")]
    pub kakao_userinfo_url: String,
    /// Google user-info endpoint.
    #[serde(default = "default_google")]
    pub google_userinfo_url: String,
    /// Naver user-info endpoint.
    #[serde(default = "default_naver")]
    pub naver_userinfo_url: String,
    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            kakao_userinfo_url: default_kakao(),
            google_userinfo_url: default_google(),
            naver_userinfo_url: default_naver(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_kakao() -> String {
    "https://kapi.kakao.com/v2/user/me".to_string()
}

fn default_google() -> String {
    "https://www.googleapis.com/oauth2/v3/userinfo".to_string()
}

fn default_naver() -> String {
    "https://openapi.naver.com/v1/nid/me".to_string()
}

fn default_timeout() -> u64 {
    5
}
