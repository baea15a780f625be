pub mod health;
pub mod notify;
pub mod records;
