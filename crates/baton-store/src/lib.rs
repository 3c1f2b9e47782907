//! Record storage behind a swappable collection capability.
//!
//! [`Collection`] is what a backend must provide; [`MemoryCollection`] is the in-process
//! implementation and [`TaskService`] applies task validation on top of any collection.
//! Stores are explicitly constructed and passed around; nothing here is global.

mod error;
pub use error::StoreError;

mod collection;
pub use collection::{Collection, Document};

mod memory;
pub use memory::MemoryCollection;

mod service;
pub use service::TaskService;
