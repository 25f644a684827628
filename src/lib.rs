//! Balancer token list to Google Sheets sync.
//!
//! Fetches the token list from the Balancer v3 API, flattens it into rows and
//! overwrites a worksheet with them, authenticating as a service account.
pub mod balancer;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod settings;
pub mod sheets;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export commonly used items
pub use di::*;
pub use entity::*;
pub use interactor::*;
pub use settings::Settings;

/// Current version of the application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
