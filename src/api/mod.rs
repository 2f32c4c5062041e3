//! API routes module.

pub mod handlers;
pub mod pages;
pub mod routes;

pub use routes::create_router;
