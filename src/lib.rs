pub mod boundary;
pub mod cache;
pub mod cli;
pub mod codec;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod pattern;
pub mod resolver;
pub mod strategy;
pub mod ui;

pub use error::{Result, VersionerError};
