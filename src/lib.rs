#![doc = include_str!("../README.md")]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod tools;

mod macros;
mod runtime;
mod selectors;

pub use engine::{Collection, Engine, RunSummary};
pub use error::{Error, Result};
