// Preferred keyword history: merge model, persistence and HTTP surface.

pub mod handlers;
pub mod history;
pub mod service;
pub mod store;
