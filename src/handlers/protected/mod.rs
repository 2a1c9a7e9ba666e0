// handlers/protected/mod.rs - Protected handlers (session credential required)
//
// Every handler takes a `SessionToken`, so a request without `session` or
// `idToken` is answered 401 before the backend is contacted. The credential
// is forwarded as `Cookie: session=<value>` on exactly one backend call.

pub mod auth;        // /api/auth/change-password, /api/auth/session
pub mod config_user; // /api/config-user
pub mod numbers;     // /api/user-numbers
pub mod utils;
pub mod whatsapp;    // /api/whatsapp/*
