//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus delivering refresh signals

mod in_memory;

pub use in_memory::InMemoryEventBus;
