pub mod db;
pub mod food_entry;
pub mod llm;
