//! Provider user-info payloads normalized into [`SocialProfile`].

use serde::Deserialize;

use staybook_core::error::AppError;
use staybook_entity::user::AuthProvider;

/// A signed-in user as reported by a social provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialProfile {
    /// Provider that vouched for the user.
    pub provider: AuthProvider,
    /// Stable user id at the provider.
    pub provider_id: String,
    /// Email, when the user granted it.
    pub email: Option<String>,
    /// Display name, when available.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KakaoUser {
    id: i64,
    #[serde(default)]
    kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Deserialize)]
struct KakaoAccount {
    email: Option<String>,
    profile: Option<KakaoProfile>,
}

#[derive(Debug, Deserialize)]
struct KakaoProfile {
    nickname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleUser {
    sub: String,
    email: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NaverEnvelope {
    resultcode: String,
    message: String,
    response: Option<NaverUser>,
}

#[derive(Debug, Deserialize)]
struct NaverUser {
    id: String,
    email: Option<String>,
    name: Option<String>,
    nickname: Option<String>,
}

impl From<KakaoUser> for SocialProfile {
    fn from(user: KakaoUser) -> Self {
        let account = user.kakao_account;
        let (email, name) = match account {
            Some(a) => (a.email, a.profile.and_then(|p| p.nickname)),
            None => (None, None),
        };
        Self {
            provider: AuthProvider::Kakao,
            provider_id: user.id.to_string(),
            email,
            name,
        }
    }
}

impl From<GoogleUser> for SocialProfile {
    fn from(user: GoogleUser) -> Self {
        Self {
            provider: AuthProvider::Google,
            provider_id: user.sub,
            email: user.email,
            name: user.name,
        }
    }
}

impl TryFrom<NaverEnvelope> for SocialProfile {
    type Error = AppError;

    fn try_from(envelope: NaverEnvelope) -> Result<Self, Self::Error> {
        match envelope.response {
            Some(user) if envelope.resultcode == "00" => Ok(Self {
                provider: AuthProvider::Naver,
                provider_id: user.id,
                email: user.email,
                name: user.name.or(user.nickname),
            }),
            _ => Err(AppError::gateway(format!(
                "네이버 사용자 정보를 가져오지 못했습니다: {}",
                envelope.message
            ))),
        }
    }
}
