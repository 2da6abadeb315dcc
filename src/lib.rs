//! Client-side hotel booking engine: hotel catalog access, stay pricing,
//! checkout form validation, and local persistence of booking records.

pub mod api;
pub mod config;
pub mod form;
pub mod models;
pub mod pricing;
pub mod session;
pub mod store;
pub mod utils;
pub mod validate;

pub use config::Config;
pub use utils::clock::{Clock, SystemClock};
pub use utils::error::AppError;
