//! Pure helpers shared by the scheduling services

pub mod date_normalizer;
pub mod phone;

pub use date_normalizer::{is_past, normalize_date};
pub use phone::{format_phone, phone_digits};
