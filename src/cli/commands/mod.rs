pub mod guard;
pub mod routes;
pub mod serve;
