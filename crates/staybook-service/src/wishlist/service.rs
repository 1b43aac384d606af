//! Wishlist service. Adding and removing are idempotent.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use staybook_core::error::AppError;
use staybook_core::result::AppResult;
use staybook_database::repositories::{HotelRepository, WishlistRepository};
use staybook_entity::hotel::Hotel;

use crate::context::RequestContext;

/// Manages the caller's saved hotels.
#[derive(Debug, Clone)]
pub struct WishlistService {
    wishlist_repo: Arc<WishlistRepository>,
    hotel_repo: Arc<HotelRepository>,
}

impl WishlistService {
    /// Creates a new wishlist service.
    pub fn new(wishlist_repo: Arc<WishlistRepository>, hotel_repo: Arc<HotelRepository>) -> Self {
        Self {
            wishlist_repo,
            hotel_repo,
        }
    }

    /// Saved hotels, most recent first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Hotel>> {
        self.wishlist_repo.find_hotels(ctx.user_id).await
    }

    /// Save a hotel. Saving it twice is not an error.
    pub async fn add(&self, ctx: &RequestContext, hotel_id: Uuid) -> AppResult<()> {
        if self.hotel_repo.find_by_id(hotel_id).await?.is_none() {
            return Err(AppError::not_found("호텔을 찾을 수 없습니다"));
        }
        let inserted = self.wishlist_repo.add(ctx.user_id, hotel_id).await?;
        debug!(user_id = %ctx.user_id, hotel_id = %hotel_id, inserted, "Wishlist add");
        Ok(())
    }

    /// Remove a hotel. Removing an absent hotel is not an error.
    pub async fn remove(&self, ctx: &RequestContext, hotel_id: Uuid) -> AppResult<()> {
        let removed = self.wishlist_repo.remove(ctx.user_id, hotel_id).await?;
        debug!(user_id = %ctx.user_id, hotel_id = %hotel_id, removed, "Wishlist remove");
        Ok(())
    }
}
