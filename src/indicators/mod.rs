pub mod engine;
pub mod error;
pub mod registry;

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use engine::IndicatorEngine;
pub use error::ComputationError;
pub use registry::*;
