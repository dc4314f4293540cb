//! Bookshelf application library
//!
//! Domain modules for the bookshelf service. The binary wires them into the
//! kernel registry and the HTTP server.

// The OpenAPI fragment in `modules::books` is one large `json!` literal.
#![recursion_limit = "256"]

pub mod modules;

pub use modules::register_all;
