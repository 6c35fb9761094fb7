//! Exchange rate resolution between supported currencies

pub mod rates;

pub use rates::*;
