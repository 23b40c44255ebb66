// Library for the binary and tests to access modules

pub mod collector;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod probe;
pub mod routes;
pub mod sampler;
pub mod sysinfo_repo;

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
