//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "insert these fragments" or "wire a controller".

pub mod insert_service;
pub mod wiring_service;

pub use insert_service::{InsertOutcome, InsertService, Rewrite};
pub use wiring_service::WiringService;
