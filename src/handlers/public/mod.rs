// handlers/public/mod.rs - Public handlers (no credential required)
//
// Token acquisition and session teardown. These are the only API routes the
// route guard always lets through.

pub mod auth;

pub use auth::*;
