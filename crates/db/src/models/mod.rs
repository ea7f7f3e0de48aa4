//! Row models.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching a
//! database row. Request DTOs and their validation live in `catalog_core`.

pub mod movie;
