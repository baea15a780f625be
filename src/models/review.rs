use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::{iso_timestamp, Resource};
use crate::sanitize::escape_html;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub project: String,
    pub rating: i64,
    pub text: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default = "default_approved")]
    pub approved: bool,
}

fn default_approved() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ReviewPayload {
    pub name: Option<String>,
    pub project: Option<String>,
    pub rating: Option<i64>,
    pub text: Option<String>,
    pub photo: Option<String>,
}

/// Only base64 image data-URIs are kept; anything else is dropped
/// silently rather than rejected.
fn is_image_data_uri(raw: &str) -> bool {
    if !raw.starts_with("data:image/") {
        return false;
    }
    match raw.split_once(";base64,") {
        Some((_, payload)) => base64::engine::general_purpose::STANDARD
            .decode(payload)
            .is_ok(),
        None => false,
    }
}

pub struct Reviews;

impl Resource for Reviews {
    type Record = Review;
    type Payload = ReviewPayload;

    const KEY: &'static str = "reviews";
    const ID_PREFIX: &'static str = "review";

    fn validate(payload: &ReviewPayload) -> Result<(), String> {
        let name = payload.name.as_deref().unwrap_or("");
        if name.trim().chars().count() < 2 {
            return Err("name must be at least 2 characters".to_string());
        }

        match payload.rating {
            Some(r) if (1..=5).contains(&r) => {}
            _ => return Err("rating must be between 1 and 5".to_string()),
        }

        let text = payload.text.as_deref().unwrap_or("");
        if text.trim().chars().count() < 10 {
            return Err("review text must be at least 10 characters".to_string());
        }

        if name.chars().count() > 100 {
            return Err("name is too long (maximum 100 characters)".to_string());
        }

        if text.chars().count() > 1000 {
            return Err("review text is too long (maximum 1000 characters)".to_string());
        }

        Ok(())
    }

    fn build(payload: ReviewPayload, id: String, now: DateTime<Utc>) -> Review {
        Review {
            id,
            name: escape_html(payload.name.as_deref().unwrap_or("").trim()),
            project: payload
                .project
                .map(|p| escape_html(p.trim()))
                .unwrap_or_default(),
            rating: payload.rating.unwrap_or_default(),
            text: escape_html(payload.text.as_deref().unwrap_or("").trim()),
            date: iso_timestamp(now),
            photo: payload.photo.filter(|p| is_image_data_uri(p)),
            // Auto-approved; flip to false in stored data to hold a
            // review back from the public listing.
            approved: true,
        }
    }

    fn id(record: &Review) -> &str {
        &record.id
    }

    fn visible(record: &Review, _show_all: bool) -> bool {
        record.approved
    }

    /// Hard delete: the record is removed from the collection.
    fn delete_at(records: &mut Vec<Review>, idx: usize, _now: DateTime<Utc>) -> String {
        records.remove(idx);
        "review deleted".to_string()
    }
}
