mod inmemory;

pub use inmemory::InMemoryGroupRegistry;
