//! Macro for implementing Display and FromStr for status enums
//!
//! Status values travel as short lowercase words (in the database, in config
//! and across the command facade). The macro keeps the canonical spelling in
//! one place and lets each variant accept extra aliases on input, which is how
//! the Portuguese spellings used by the shop's older tools keep parsing.
//!
//! # Example
//!
//! ```rust
//! use chairbook_domain::impl_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum TicketStatus {
//!     Open,
//!     Closed,
//! }
//!
//! impl_status_conversions!(TicketStatus {
//!     Open => "open" | "aberto",
//!     Closed => "closed",
//! });
//!
//! assert_eq!(TicketStatus::Open.as_str(), "open");
//! assert_eq!("ABERTO".parse::<TicketStatus>(), Ok(TicketStatus::Open));
//! ```

/// Implements `as_str`, `Display` and `FromStr` for a fieldless status enum.
///
/// - `as_str`/`Display` always produce the first (canonical) spelling.
/// - `FromStr` trims, lowercases, then accepts the canonical spelling or any
///   listed alias.
/// - Unknown input yields `Err(String)` naming the enum and the rejected value.
#[macro_export]
macro_rules! impl_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical lowercase spelling used for storage and display.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str $(| $alias)* => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
