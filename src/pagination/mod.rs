pub mod metrics;
pub mod paginator;

pub use metrics::{CourierMetrics, Font, TextMetrics};
pub use paginator::{PageSize, Paginator};
