pub mod app;
pub mod effect;
pub mod message;
pub mod translator;
