pub mod chat_request;
pub mod chat_response;
pub mod errors;
pub mod nutrition_record;

pub use chat_request::*;
pub use chat_response::*;
pub use errors::*;
pub use nutrition_record::*;
