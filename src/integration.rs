pub mod app_runner;
pub mod effect_executor;
