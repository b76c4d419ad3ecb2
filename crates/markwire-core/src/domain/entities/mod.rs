pub mod insertion;
pub mod resource;

pub use insertion::InsertionRequest;
pub use resource::{Project, Resource};
