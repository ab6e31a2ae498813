pub mod food_entry_repository;

pub use food_entry_repository::*;
