pub use self::{backend::Backend, http::HTTP, memory::MemoryStore};

mod backend;
mod http;
mod memory;
