// Reservations module (read side only)

pub mod models;

pub use models::{Reservation, ReservationStatus};
