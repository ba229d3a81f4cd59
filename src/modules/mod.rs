pub mod health;
pub mod payments;
pub mod reports;
pub mod reservations;
