//! Request handlers.
//!
//! Handlers delegate persistence to the `MovieStore` in [`crate::state::AppState`]
//! and map errors via [`crate::error::AppError`].

pub mod fallback;
pub mod movie;
