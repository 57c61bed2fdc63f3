//! Balance-sheet proxy library.
//!
//! Relays `GET /balancesheet` to an accounting API's balance-sheet report
//! and returns the JSON body to a browser front-end under a single-origin
//! CORS policy.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod report;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
