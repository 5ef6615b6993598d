pub mod config;
pub mod event;
pub mod issue;
pub mod scoring;
