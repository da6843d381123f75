pub mod bst;
pub mod error;
pub mod linkedlist;
pub mod lock;
pub mod runner;
pub mod set;
pub mod stack;
pub mod sweep;
pub mod util;
pub mod workload;

pub use error::{BenchError, Result};
