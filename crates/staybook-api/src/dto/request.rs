//! Request DTOs with validation.
//!
//! Bodies are camelCase. Each DTO converts into the matching service input
//! once `validator` has accepted it.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use staybook_core::error::AppError;
use staybook_core::types::pagination::PageRequest;
use staybook_database::repositories::HotelSearch;
use staybook_entity::business::ApplicationStatus;
use staybook_entity::coupon::DiscountType;
use staybook_entity::reservation::ReservationStatus;
use staybook_entity::user::AuthProvider;
use staybook_service::auth::RegisterRequest as SvcRegister;
use staybook_service::business::{ReviewDecision, SubmitApplicationRequest as SvcSubmit};
use staybook_service::card::RegisterCardRequest as SvcRegisterCard;
use staybook_service::coupon::CreateCouponRequest as SvcCreateCoupon;
use staybook_service::payment::ConfirmPaymentRequest as SvcConfirmPayment;
use staybook_service::reservation::CreateReservationRequest as SvcCreateReservation;
use staybook_service::review::CreateReviewRequest as SvcCreateReview;
use staybook_service::user::UpdateProfileRequest as SvcUpdateProfile;

/// Accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub mod flexible_datetime {
    use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
    use serde::{Deserialize, Deserializer};

    /// Parses either accepted format.
    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(instant.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }
}

// ── Auth ────────────────────────────────────────────────────────

/// Local registration body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
    #[validate(length(min = 1, max = 50, message = "이름은 1~50자여야 합니다"))]
    pub name: String,
    #[validate(length(max = 20, message = "전화번호가 너무 깁니다"))]
    pub phone: Option<String>,
}

impl From<RegisterRequest> for SvcRegister {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            name: req.name,
            phone: req.phone,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}

/// Social login body: the provider's access token from the client SDK.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SocialLoginRequest {
    pub provider: AuthProvider,
    #[validate(length(min = 1, message = "소셜 액세스 토큰이 필요합니다"))]
    pub access_token: String,
}

// ── Users ───────────────────────────────────────────────────────

/// Profile update body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "이름은 1~50자여야 합니다"))]
    pub name: Option<String>,
    #[validate(length(max = 20, message = "전화번호가 너무 깁니다"))]
    pub phone: Option<String>,
}

impl From<UpdateProfileRequest> for SvcUpdateProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            phone: req.phone,
        }
    }
}

/// Password change body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "현재 비밀번호를 입력해주세요"))]
    pub current_password: String,
    #[validate(length(min = 1, message = "새 비밀번호를 입력해주세요"))]
    pub new_password: String,
}

// ── Hotels ──────────────────────────────────────────────────────

/// `GET /api/hotels` query.
#[derive(Debug, Clone, Deserialize)]
pub struct HotelSearchQuery {
    pub city: Option<String>,
    pub keyword: Option<String>,
    pub page: Option<u64>,
    #[serde(alias = "pageSize")]
    pub limit: Option<u64>,
}

impl HotelSearchQuery {
    /// Splits into the repository filter and a clamped page.
    pub fn into_parts(self) -> (HotelSearch, PageRequest) {
        let defaults = PageRequest::default();
        let page = PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.limit),
        );
        (
            HotelSearch {
                city: self.city,
                keyword: self.keyword,
            },
            page,
        )
    }
}

/// `GET /api/hotels/rooms` query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub hotel_id: Uuid,
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub check_in: DateTime<Utc>,
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub check_out: DateTime<Utc>,
    #[serde(default = "default_guests")]
    pub guests: i32,
}

fn default_guests() -> i32 {
    1
}

// ── Reservations ────────────────────────────────────────────────

/// Reservation creation body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub check_in: DateTime<Utc>,
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub check_out: DateTime<Utc>,
    #[validate(range(min = 1, message = "투숙 인원은 1명 이상이어야 합니다"))]
    pub guests: i32,
    #[validate(range(min = 0, message = "추가 요금은 0 이상이어야 합니다"))]
    pub extras_price: Option<i64>,
    pub coupon_code: Option<String>,
    #[validate(length(max = 500, message = "요청사항은 500자 이하여야 합니다"))]
    pub special_requests: Option<String>,
    pub total_price: Option<i64>,
    pub discount: Option<i64>,
}

impl From<CreateReservationRequest> for SvcCreateReservation {
    fn from(req: CreateReservationRequest) -> Self {
        Self {
            hotel_id: req.hotel_id,
            room_id: req.room_id,
            check_in: req.check_in,
            check_out: req.check_out,
            guests: req.guests,
            extras_price: req.extras_price,
            coupon_code: req.coupon_code,
            special_requests: req.special_requests,
            total_price: req.total_price,
            discount: req.discount,
        }
    }
}

/// Optional reason attached to a cancellation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CancelRequest {
    #[validate(length(max = 500, message = "취소 사유는 500자 이하여야 합니다"))]
    pub reason: Option<String>,
}

/// Reservation status change by the hotel owner or an admin.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatus,
}

// ── Coupons ─────────────────────────────────────────────────────

/// Coupon preview body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplyCouponRequest {
    #[validate(length(min = 1, message = "쿠폰 코드를 입력해주세요"))]
    pub code: String,
    #[validate(range(min = 0, message = "주문 금액은 0 이상이어야 합니다"))]
    pub amount: i64,
}

/// Admin coupon creation body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponRequest {
    #[validate(length(min = 1, max = 50, message = "쿠폰 코드는 1~50자여야 합니다"))]
    pub code: String,
    #[validate(length(min = 1, max = 100, message = "쿠폰 이름은 1~100자여야 합니다"))]
    pub name: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    #[validate(range(min = 1, message = "할인 값은 1 이상이어야 합니다"))]
    pub discount_value: i64,
    #[validate(range(min = 0, message = "최소 주문 금액은 0 이상이어야 합니다"))]
    pub min_amount: Option<i64>,
    #[validate(range(min = 1, message = "최대 할인 금액은 1 이상이어야 합니다"))]
    pub max_discount: Option<i64>,
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub valid_from: DateTime<Utc>,
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub valid_until: DateTime<Utc>,
    #[validate(range(min = 1, message = "사용 한도는 1 이상이어야 합니다"))]
    pub usage_limit: Option<i32>,
    pub is_public: Option<bool>,
    pub owner_id: Option<Uuid>,
}

impl From<CreateCouponRequest> for SvcCreateCoupon {
    fn from(req: CreateCouponRequest) -> Self {
        Self {
            code: req.code,
            name: req.name,
            description: req.description,
            discount_type: req.discount_type,
            discount_value: req.discount_value,
            min_amount: req.min_amount,
            max_discount: req.max_discount,
            valid_from: req.valid_from,
            valid_until: req.valid_until,
            usage_limit: req.usage_limit,
            is_public: req.is_public,
            owner_id: req.owner_id,
        }
    }
}

// ── Payments ────────────────────────────────────────────────────

/// Opens a payment for a reservation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub reservation_id: Uuid,
}

/// Checkout confirmation body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    #[validate(length(min = 1, message = "결제 키가 필요합니다"))]
    pub payment_key: String,
    #[validate(length(min = 1, message = "주문 번호가 필요합니다"))]
    pub order_id: String,
    #[validate(range(min = 0, message = "결제 금액은 0 이상이어야 합니다"))]
    pub amount: i64,
}

impl From<ConfirmPaymentRequest> for SvcConfirmPayment {
    fn from(req: ConfirmPaymentRequest) -> Self {
        Self {
            payment_key: req.payment_key,
            order_id: req.order_id,
            amount: req.amount,
        }
    }
}

/// Refund body. Without `amount` the remaining balance is refunded.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RefundRequest {
    #[validate(range(min = 1, message = "환불 금액은 1 이상이어야 합니다"))]
    pub amount: Option<i64>,
    #[validate(length(max = 200, message = "환불 사유는 200자 이하여야 합니다"))]
    pub reason: Option<String>,
}

/// Gateway notification. Only the identifiers are trusted.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    pub event_type: Option<String>,
    pub data: WebhookData,
}

/// Identifiers inside a gateway notification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookData {
    pub payment_key: String,
    pub order_id: String,
}

// ── Reviews ─────────────────────────────────────────────────────

/// Review body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub reservation_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "평점은 1~5 사이여야 합니다"))]
    pub rating: i32,
    #[validate(length(min = 1, max = 1000, message = "리뷰 내용은 1~1000자여야 합니다"))]
    pub content: String,
}

impl From<CreateReviewRequest> for SvcCreateReview {
    fn from(req: CreateReviewRequest) -> Self {
        Self {
            reservation_id: req.reservation_id,
            rating: req.rating,
            content: req.content,
        }
    }
}

// ── Cards ───────────────────────────────────────────────────────

/// Card registration body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCardRequest {
    #[validate(length(min = 12, max = 23, message = "카드 번호가 올바르지 않습니다"))]
    pub card_number: String,
    #[validate(range(min = 1, max = 12, message = "유효기간 월이 올바르지 않습니다"))]
    pub expiry_month: i32,
    #[validate(range(min = 2000, max = 2100, message = "유효기간 연도가 올바르지 않습니다"))]
    pub expiry_year: i32,
    #[validate(length(max = 30, message = "카드 별칭은 30자 이하여야 합니다"))]
    pub alias: Option<String>,
}

impl From<RegisterCardRequest> for SvcRegisterCard {
    fn from(req: RegisterCardRequest) -> Self {
        Self {
            card_number: req.card_number,
            expiry_month: req.expiry_month,
            expiry_year: req.expiry_year,
            alias: req.alias,
        }
    }
}

// ── Business applications ───────────────────────────────────────

/// Business application body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationRequest {
    #[validate(length(min = 1, max = 100, message = "상호명은 1~100자여야 합니다"))]
    pub business_name: String,
    #[validate(length(min = 10, max = 12, message = "사업자등록번호가 올바르지 않습니다"))]
    pub registration_number: String,
    #[validate(length(min = 1, max = 50, message = "대표자명을 입력해주세요"))]
    pub representative: String,
    #[validate(length(min = 1, max = 20, message = "연락처를 입력해주세요"))]
    pub contact_phone: String,
}

impl From<SubmitApplicationRequest> for SvcSubmit {
    fn from(req: SubmitApplicationRequest) -> Self {
        Self {
            business_name: req.business_name,
            registration_number: req.registration_number,
            representative: req.representative,
            contact_phone: req.contact_phone,
        }
    }
}

/// Admin decision on an application.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewApplicationRequest {
    pub status: ApplicationStatus,
    pub reject_reason: Option<String>,
}

impl TryFrom<ReviewApplicationRequest> for ReviewDecision {
    type Error = AppError;

    fn try_from(req: ReviewApplicationRequest) -> Result<Self, Self::Error> {
        match req.status {
            ApplicationStatus::Approved => Ok(Self::Approved),
            ApplicationStatus::Rejected => Ok(Self::Rejected {
                reason: req.reject_reason.unwrap_or_default(),
            }),
            ApplicationStatus::Pending => {
                Err(AppError::validation("승인 또는 거절만 선택할 수 있습니다"))
            }
        }
    }
}

/// `GET /api/admin/business-applications` query.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationListQuery {
    pub status: Option<ApplicationStatus>,
    pub page: Option<u64>,
    #[serde(alias = "pageSize")]
    pub limit: Option<u64>,
}

impl ApplicationListQuery {
    pub fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.limit),
        )
    }
}

// ── Support ─────────────────────────────────────────────────────

/// Notice body (admin).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoticeRequest {
    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다"))]
    pub title: String,
    #[validate(length(min = 1, message = "내용을 입력해주세요"))]
    pub content: String,
    #[serde(default)]
    pub is_pinned: bool,
}

/// FAQ body (admin).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFaqRequest {
    #[validate(length(min = 1, max = 50, message = "카테고리를 입력해주세요"))]
    pub category: String,
    #[validate(length(min = 1, max = 300, message = "질문은 1~300자여야 합니다"))]
    pub question: String,
    #[validate(length(min = 1, message = "답변을 입력해주세요"))]
    pub answer: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// `GET /api/faqs` query.
#[derive(Debug, Clone, Deserialize)]
pub struct FaqQuery {
    pub category: Option<String>,
}

/// Newsletter subscribe / unsubscribe body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewsletterRequest {
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_flexible_datetime_formats() {
        let midnight = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(flexible_datetime::parse("2026-03-01"), Some(midnight));
        assert_eq!(
            flexible_datetime::parse("2026-03-01T09:00:00+09:00"),
            Some(midnight)
        );
        assert_eq!(flexible_datetime::parse("03/01/2026"), None);
    }

    #[test]
    fn test_reservation_body_accepts_dates() {
        let req: CreateReservationRequest = serde_json::from_value(serde_json::json!({
            "hotelId": Uuid::nil(),
            "roomId": Uuid::nil(),
            "checkIn": "2026-03-01",
            "checkOut": "2026-03-03T00:00:00Z",
            "guests": 2,
            "couponCode": "WELCOME"
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        let svc: SvcCreateReservation = req.into();
        assert_eq!((svc.check_out - svc.check_in).num_days(), 2);
        assert_eq!(svc.coupon_code.as_deref(), Some("WELCOME"));
    }

    #[test]
    fn test_zero_guests_rejected() {
        let req: CreateReservationRequest = serde_json::from_value(serde_json::json!({
            "hotelId": Uuid::nil(),
            "roomId": Uuid::nil(),
            "checkIn": "2026-03-01",
            "checkOut": "2026-03-02",
            "guests": 0
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_review_decision_mapping() {
        let approve = ReviewApplicationRequest {
            status: ApplicationStatus::Approved,
            reject_reason: None,
        };
        assert!(matches!(
            ReviewDecision::try_from(approve),
            Ok(ReviewDecision::Approved)
        ));

        let pending = ReviewApplicationRequest {
            status: ApplicationStatus::Pending,
            reject_reason: None,
        };
        assert!(ReviewDecision::try_from(pending).is_err());
    }

    #[test]
    fn test_rating_bounds() {
        let review = CreateReviewRequest {
            reservation_id: Uuid::nil(),
            rating: 6,
            content: "좋아요".into(),
        };
        assert!(review.validate().is_err());
    }
}
