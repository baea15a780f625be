pub mod booking;
pub mod review;

pub use booking::{Booking, BookingPayload, BookingStatus, Bookings};
pub use review::{Review, ReviewPayload, Reviews};
