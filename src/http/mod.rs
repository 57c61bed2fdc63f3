//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign / propagate x-request-id)
//!     → cors.rs (preflight answered here; origin checks)
//!     → handlers.rs (GET /balancesheet → upstream)
//!     → response.rs (upstream failure → {"detail": ...})
//!     → Send to client
//! ```

pub mod cors;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{ApiError, ErrorBody, INTERNAL_ERROR_DETAIL, UPSTREAM_ERROR_DETAIL};
pub use server::{AppState, HttpServer, ServerError};
