// handlers/public/auth/mod.rs - Public authentication handlers

pub mod login;    // POST /api/auth/login, POST /api/auth/login-action
pub mod logout;   // GET /api/auth/logout, POST /api/auth/logoff
pub mod password; // POST /api/auth/forgot-password

pub use login::{login, login_action};
pub use logout::{logoff, logout};
pub use password::forgot_password;

/// Backend endpoint both login flavours call.
const BACKEND_LOGIN: &str = "/api/auth/login";
