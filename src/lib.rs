pub mod auth;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

pub use store::create_pool;
