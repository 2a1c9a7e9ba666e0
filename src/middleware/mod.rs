pub mod auth;
pub mod guard;
pub mod response;

pub use auth::SessionToken;
pub use guard::{route_guard, GuardDecision};
pub use response::JsonReply;
