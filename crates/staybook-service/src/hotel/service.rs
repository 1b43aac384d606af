//! Read-only hotel queries.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use staybook_core::error::AppError;
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_database::repositories::{HotelRepository, HotelSearch, RoomRepository};
use staybook_entity::hotel::{Hotel, HotelSummary, Room, RoomAvailability};

use crate::booking::StayDates;

/// A hotel with all of its rooms.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDetail {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub rooms: Vec<Room>,
}

/// A room with its free units for a requested stay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailabilityView {
    #[serde(flatten)]
    pub room: Room,
    pub available_count: i64,
    pub is_available: bool,
}

impl From<RoomAvailability> for RoomAvailabilityView {
    fn from(a: RoomAvailability) -> Self {
        Self {
            available_count: a.available_count(),
            is_available: a.is_available(),
            room: a.room,
        }
    }
}

/// Hotel listing, detail, and availability.
#[derive(Debug, Clone)]
pub struct HotelService {
    hotel_repo: Arc<HotelRepository>,
    room_repo: Arc<RoomRepository>,
}

impl HotelService {
    /// Creates a new hotel service.
    pub fn new(hotel_repo: Arc<HotelRepository>, room_repo: Arc<RoomRepository>) -> Self {
        Self {
            hotel_repo,
            room_repo,
        }
    }

    /// Search hotels by city and keyword.
    pub async fn search(
        &self,
        filter: HotelSearch,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HotelSummary>> {
        let filter = HotelSearch {
            city: non_blank(filter.city),
            keyword: non_blank(filter.keyword),
        };
        self.hotel_repo.search(&filter, page).await
    }

    /// A hotel and its rooms.
    pub async fn detail(&self, hotel_id: Uuid) -> AppResult<HotelDetail> {
        let hotel = self
            .hotel_repo
            .find_by_id(hotel_id)
            .await?
            .ok_or_else(|| AppError::not_found("호텔을 찾을 수 없습니다"))?;
        let rooms = self.room_repo.find_by_hotel(hotel_id).await?;
        Ok(HotelDetail { hotel, rooms })
    }

    /// Rooms of a hotel that fit `guests`, with free units for the stay.
    pub async fn availability(
        &self,
        hotel_id: Uuid,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        guests: i32,
    ) -> AppResult<Vec<RoomAvailabilityView>> {
        let dates = StayDates::new(check_in, check_out)?;
        if guests < 1 {
            return Err(AppError::validation("투숙 인원은 1명 이상이어야 합니다"));
        }

        let rooms = self
            .room_repo
            .availability(hotel_id, dates.check_in(), dates.check_out(), guests)
            .await?;
        debug!(hotel_id = %hotel_id, rooms = rooms.len(), "Availability computed");

        Ok(rooms.into_iter().map(RoomAvailabilityView::from).collect())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
