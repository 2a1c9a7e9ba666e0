pub mod password;
pub mod session;

// Re-export handler functions for use in routing
pub use password::change as change_password;
pub use session::get as session_get;
