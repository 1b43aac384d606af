//! Card service.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use staybook_core::error::AppError;
use staybook_core::result::AppResult;
use staybook_database::repositories::CardRepository;
use staybook_entity::card::{Card, NewCard};

use super::number::{CardBrand, luhn_valid};
use crate::context::RequestContext;

/// Input for registering a card. The number is checked and discarded.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterCardRequest {
    pub card_number: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub alias: Option<String>,
}

/// Manages the caller's saved cards.
#[derive(Debug, Clone)]
pub struct CardService {
    card_repo: Arc<CardRepository>,
}

impl CardService {
    /// Creates a new card service.
    pub fn new(card_repo: Arc<CardRepository>) -> Self {
        Self { card_repo }
    }

    /// The caller's cards, default first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Card>> {
        self.card_repo.find_by_user(ctx.user_id).await
    }

    /// Register a card. The first card becomes the default.
    pub async fn register(&self, ctx: &RequestContext, req: RegisterCardRequest) -> AppResult<Card> {
        let data = prepare_card(ctx.user_id, req, Utc::now())?;
        let card = self.card_repo.create(&data).await?;
        info!(user_id = %ctx.user_id, card_id = %card.id, brand = %card.brand, "Card registered");
        Ok(card)
    }

    /// Delete one of the caller's cards.
    pub async fn delete(&self, ctx: &RequestContext, card_id: Uuid) -> AppResult<()> {
        if !self.card_repo.delete(ctx.user_id, card_id).await? {
            return Err(AppError::not_found("카드를 찾을 수 없습니다"));
        }
        info!(user_id = %ctx.user_id, card_id = %card_id, "Card deleted");
        Ok(())
    }

    /// Make a card the caller's default.
    pub async fn set_default(&self, ctx: &RequestContext, card_id: Uuid) -> AppResult<Card> {
        self.card_repo
            .set_default(ctx.user_id, card_id)
            .await?
            .ok_or_else(|| AppError::not_found("카드를 찾을 수 없습니다"))
    }
}

fn prepare_card(user_id: Uuid, req: RegisterCardRequest, now: DateTime<Utc>) -> AppResult<NewCard> {
    let digits: String = req
        .card_number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if !luhn_valid(&digits) {
        return Err(AppError::validation("유효하지 않은 카드 번호입니다"));
    }

    if !(1..=12).contains(&req.expiry_month) {
        return Err(AppError::validation("유효기간 월은 1에서 12 사이여야 합니다"));
    }
    let year = if req.expiry_year < 100 {
        2000 + req.expiry_year
    } else {
        req.expiry_year
    };
    // A card stays valid through the last day of its expiry month.
    if (year, req.expiry_month as u32) < (now.year(), now.month()) {
        return Err(AppError::validation("유효기간이 지난 카드입니다"));
    }

    Ok(NewCard {
        user_id,
        brand: CardBrand::detect(&digits).to_string(),
        last4: digits[digits.len() - 4..].to_string(),
        expiry_month: req.expiry_month,
        expiry_year: year,
        alias: req.alias.filter(|a| !a.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use staybook_core::ErrorKind;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap()
    }

    fn request(number: &str, month: i32, year: i32) -> RegisterCardRequest {
        RegisterCardRequest {
            card_number: number.into(),
            expiry_month: month,
            expiry_year: year,
            alias: Some("출장용".into()),
        }
    }

    #[test]
    fn test_only_last_four_kept() {
        let card = prepare_card(Uuid::new_v4(), request("4242 4242 4242 4242", 12, 27), now()).unwrap();
        assert_eq!(card.last4, "4242");
        assert_eq!(card.brand, "visa");
        assert_eq!(card.expiry_year, 2027);
    }

    #[test]
    fn test_current_month_still_valid() {
        assert!(prepare_card(Uuid::new_v4(), request("5555555555554444", 6, 2025), now()).is_ok());
        let err = prepare_card(Uuid::new_v4(), request("5555555555554444", 5, 2025), now())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_bad_number_rejected() {
        let err = prepare_card(Uuid::new_v4(), request("4242424242424241", 1, 2030), now())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
