pub mod fetch;
pub mod repo;
