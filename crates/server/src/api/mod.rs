//! HTTP endpoint handlers.

pub mod companies;
pub mod doc;
pub mod health;
pub mod rules;
pub mod users;
