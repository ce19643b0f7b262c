pub mod auth;
pub mod factcheck;
pub mod verdict;

pub use auth::JwtVerifier;
pub use factcheck::{FactCheckClient, FactCheckService};
pub use verdict::EnsembleService;
