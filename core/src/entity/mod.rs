pub mod food_entries;
