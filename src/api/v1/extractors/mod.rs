pub mod authorized;
pub mod json_body;

pub use authorized::Authorized;
pub use json_body::JsonBody;
