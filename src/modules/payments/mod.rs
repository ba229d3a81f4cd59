// Payments module (read side only)

pub mod models;

pub use models::{Payment, PaymentStatus};
