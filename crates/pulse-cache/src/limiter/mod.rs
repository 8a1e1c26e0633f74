//! Per-user rate limiting

mod fixed_window;

pub use fixed_window::FixedWindowLimiter;
