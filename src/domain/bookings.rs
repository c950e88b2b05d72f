//! Booking entities and requests.

use serde::{Deserialize, Serialize};

use crate::domain::auth::User;
use crate::domain::catalog::Event;
use crate::domain::foundation::{BookingHash, EventHash, UserHash};

/// Which of the user's bookings to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingScope {
    #[default]
    All,
    Canceled,
    Upcoming,
    Past,
}

impl BookingScope {
    /// The query flag selecting this scope, if any.
    pub fn query_flag(&self) -> Option<&'static str> {
        match self {
            BookingScope::All => None,
            BookingScope::Canceled => Some("canceled"),
            BookingScope::Upcoming => Some("upcoming"),
            BookingScope::Past => Some("past"),
        }
    }
}

/// What kind of product a booking is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingKind {
    #[default]
    Event,
    Course,
    SmallCourse,
    Lesson,
    EquipmentRent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub hash: BookingHash,
    /// Milliseconds since the Unix epoch.
    pub date: i64,
    pub event: Event,
    pub user_hash: UserHash,
    #[serde(default)]
    pub is_course: bool,
    #[serde(default)]
    pub is_small_course: bool,
    #[serde(default)]
    pub is_lesson: bool,
    #[serde(default)]
    pub is_equipment_rent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_owner: Option<User>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_voucher_hash: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub sport_icon: String,
    #[serde(default)]
    pub is_canceled: bool,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_start_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_end_date: Option<i64>,
}

impl Booking {
    pub fn kind(&self) -> BookingKind {
        if self.is_course {
            BookingKind::Course
        } else if self.is_small_course {
            BookingKind::SmallCourse
        } else if self.is_lesson {
            BookingKind::Lesson
        } else if self.is_equipment_rent {
            BookingKind::EquipmentRent
        } else {
            BookingKind::Event
        }
    }

    /// Still counts as an active reservation.
    pub fn is_active(&self) -> bool {
        !self.is_canceled && !self.deleted
    }
}

/// Body of `POST bookings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub event_hash: EventHash,
    pub date: i64,
    pub user_hash: UserHash,
    pub is_course: bool,
    pub is_small_course: bool,
    pub is_lesson: bool,
    pub is_equipment_rent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_voucher_hash: Option<String>,
}

impl BookingRequest {
    pub fn new(event_hash: EventHash, date: i64, user_hash: UserHash, kind: BookingKind) -> Self {
        Self {
            event_hash,
            date,
            user_hash,
            is_course: kind == BookingKind::Course,
            is_small_course: kind == BookingKind::SmallCourse,
            is_lesson: kind == BookingKind::Lesson,
            is_equipment_rent: kind == BookingKind::EquipmentRent,
            user_voucher_hash: None,
        }
    }

    pub fn with_voucher(mut self, user_voucher_hash: impl Into<String>) -> Self {
        self.user_voucher_hash = Some(user_voucher_hash.into());
        self
    }
}

/// Partial update for `PUT bookings/{hash}`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_hash: Option<EventHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_voucher_hash: Option<String>,
}
