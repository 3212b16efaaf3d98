//! Pure aggregation and classification logic behind the analytics
//! endpoints. Everything here is synchronous and side-effect free; handlers
//! fetch rows and hand them to these functions.

pub mod correlation;
pub mod energy;
pub mod series;
pub mod time_aggregator;
pub mod trend;
