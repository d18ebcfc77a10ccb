//! Numeric types

pub mod nimber;
