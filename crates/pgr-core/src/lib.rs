//! pgr-core - Core library for pgrange
//!
//! This crate provides the interval (range) model and its algebra, the runtime
//! type descriptions used to talk about in-memory values, and the value
//! representation shared by the query and storage layers.

pub mod error;
pub mod range;
pub mod types;
pub mod value;

pub use error::{CoreError, CoreResult};
pub use range::Interval;
pub use types::RuntimeType;
pub use value::Value;
