//! Domain types, errors and validation rules for the movie catalog.
//!
//! Nothing in this crate performs I/O; the `db` and `api` crates build on
//! these types.

pub mod error;
pub mod movie;
pub mod types;
