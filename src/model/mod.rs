pub mod config;
pub mod factcheck;
pub mod verdict;

pub use config::{AdapterKind, Config, ModelEndpointConfig};
pub use factcheck::{ClaimReview, ClaimSearchResponse};
pub use verdict::*;
