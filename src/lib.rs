pub mod database;
pub mod error;
pub mod friends;
pub mod handlers;
pub mod marketplace;
pub mod posts;
pub mod query;
