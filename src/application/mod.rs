// Application layer - use cases and orchestration on top of the domain
// ledger and the repository. This is the surface any client (CLI, HTTP,
// TUI) talks to.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
