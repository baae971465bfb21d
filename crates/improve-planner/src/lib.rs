pub mod backend;
pub mod config;
pub mod generator;
pub mod parser;
pub mod sanitize;
pub mod schema;
pub mod timer;

pub use generator::HabitPlanGenerator;
