pub mod memory;

pub use memory::{InMemoryRateLimiter, retry_after_secs};
