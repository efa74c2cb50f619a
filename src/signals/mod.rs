//! Signal evaluation: crossing rule, indicator votes and confirmation.

pub mod crossover;
pub mod engine;
pub mod signal_generator;
pub mod votes;

pub use engine::SignalEngine;
pub use signal_generator::{SignalGenerator, SignalScan};
pub use votes::DirectionalState;
