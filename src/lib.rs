pub mod assistant;
pub mod backend;
pub mod calendar;
pub mod classifier;
pub mod config;
pub mod context;
pub mod engine;
pub mod recommend;
pub mod render;
pub mod tasks;
pub mod templates;

pub use assistant::{Assistant, Reply};
pub use engine::PolicyEngine;
