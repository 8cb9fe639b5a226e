#![no_std]

extern crate alloc;

pub use cascade::*;
pub use error::*;
pub use orchestrator::*;
pub use scheduler::*;
pub use state::*;
pub use types::*;

mod cascade;
mod error;
mod orchestrator;
mod scheduler;
mod state;
mod types;
