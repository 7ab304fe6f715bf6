pub mod models;
pub mod rules;
pub mod bot_strategy;
pub mod session;
