pub mod handlers;
pub mod rules;
pub mod service;
