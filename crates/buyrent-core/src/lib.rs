pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "mortgage")]
pub mod mortgage;

#[cfg(feature = "buy_vs_rent")]
pub mod buy_vs_rent;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::BuyRentError;
pub use types::*;

/// Standard result type for all buyrent operations
pub type BuyRentResult<T> = Result<T, BuyRentError>;
