use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Describes one record collection to the generic CRUD engine in
/// `handlers::records`: where it is stored, how new records are
/// validated and built, and the resource-specific business rules
/// (creation conflicts, visibility filtering, soft vs hard delete).
pub trait Resource: Send + Sync + 'static {
    type Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;
    type Payload: DeserializeOwned + Send;

    /// Collection key in the backend, also the list field in responses.
    const KEY: &'static str;
    /// Singular name, used for generated ids and response messages.
    const ID_PREFIX: &'static str;

    /// Ordered field checks; the first failure short-circuits and its
    /// message becomes the 400 response.
    fn validate(payload: &Self::Payload) -> Result<(), String>;

    /// Builds the record to append. Free-text fields are sanitized here,
    /// after validation and before storage.
    fn build(payload: Self::Payload, id: String, now: DateTime<Utc>) -> Self::Record;

    /// Returns a message when the new record cannot join the collection.
    fn conflict(_existing: &[Self::Record], _payload: &Self::Payload) -> Option<String> {
        None
    }

    fn id(record: &Self::Record) -> &str;

    /// Whether a record appears in GET responses.
    fn visible(record: &Self::Record, show_all: bool) -> bool;

    /// Removes or marks the record at `idx`; returns the success message.
    fn delete_at(records: &mut Vec<Self::Record>, idx: usize, now: DateTime<Utc>) -> String;
}

/// `<prefix>_<millis>_<random-9-alnum>`, unique and never recycled.
pub fn generate_id(prefix: &str, now: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("{}_{}_{}", prefix, now.timestamp_millis(), suffix)
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
