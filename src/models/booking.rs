use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::{iso_timestamp, Resource};
use crate::sanitize::escape_html;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub date: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub status: BookingStatus,
    #[serde(rename = "cancelledAt", default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
}

#[derive(Debug, Deserialize)]
pub struct BookingPayload {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub date: Option<String>,
}

/// Accepts a plain ISO date or a full RFC 3339 timestamp.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

pub struct Bookings;

impl Resource for Bookings {
    type Record = Booking;
    type Payload = BookingPayload;

    const KEY: &'static str = "bookings";
    const ID_PREFIX: &'static str = "booking";

    fn validate(payload: &BookingPayload) -> Result<(), String> {
        let name = payload.name.as_deref().unwrap_or("");
        if name.trim().chars().count() < 2 {
            return Err("name must be at least 2 characters".to_string());
        }

        let phone = payload.phone.as_deref().unwrap_or("");
        if phone.chars().count() < 10 {
            return Err("invalid phone number".to_string());
        }

        let date = payload.date.as_deref().unwrap_or("");
        if date.is_empty() {
            return Err("booking date is required".to_string());
        }
        match parse_date(date) {
            Some(d) if d >= Utc::now().date_naive() => Ok(()),
            Some(_) => Err("cannot book a date in the past".to_string()),
            None => Err("invalid booking date".to_string()),
        }
    }

    fn build(payload: BookingPayload, id: String, now: DateTime<Utc>) -> Booking {
        Booking {
            id,
            name: escape_html(payload.name.as_deref().unwrap_or("").trim()),
            phone: escape_html(payload.phone.as_deref().unwrap_or("").trim()),
            date: payload.date.unwrap_or_default(),
            created_at: iso_timestamp(now),
            status: BookingStatus::Active,
            cancelled_at: None,
        }
    }

    // A cancelled booking frees its date for rebooking.
    fn conflict(existing: &[Booking], payload: &BookingPayload) -> Option<String> {
        let date = payload.date.as_deref().unwrap_or("");
        existing
            .iter()
            .any(|b| b.date == date && b.status != BookingStatus::Cancelled)
            .then(|| "this date is already booked".to_string())
    }

    fn id(record: &Booking) -> &str {
        &record.id
    }

    fn visible(record: &Booking, show_all: bool) -> bool {
        show_all || record.status != BookingStatus::Cancelled
    }

    /// Soft delete: the record is retained with a cancellation stamp.
    fn delete_at(records: &mut Vec<Booking>, idx: usize, now: DateTime<Utc>) -> String {
        let booking = &mut records[idx];
        booking.status = BookingStatus::Cancelled;
        booking.cancelled_at = Some(iso_timestamp(now));
        "booking cancelled".to_string()
    }
}
