//! Identity data store adapters

mod in_memory;
mod mysql;

pub use in_memory::InMemoryIdentityRepository;
pub use mysql::MySqlIdentityRepository;
