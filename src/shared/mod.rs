// Shared Kernel - Domain Driven Design
// Following Clean Architecture + Hexagonal Architecture patterns

pub mod application; // Shared application layer patterns (request context)
pub mod config; // Environment configuration
pub mod domain; // Shared identifier types
pub mod errors; // Shared error types
pub mod infrastructure; // Shared infrastructure (database)
pub mod utils; // Shared utilities (logging)

// Re-exports for convenience
pub use application::RequestContext;
pub use config::{Config, DownstreamEndpoints};
pub use domain::{MediaId, ReviewId, UserId};
pub use errors::{AppError, AppResult, ErrorKind};
pub use infrastructure::database::Database;
