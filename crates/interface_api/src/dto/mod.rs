//! Request and response bodies

pub mod client;
pub mod address;
pub mod rules;
