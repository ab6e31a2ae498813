pub mod entities;
pub mod extractor;
pub mod ports;
pub mod request_builder;
pub mod schema;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
