pub mod bearer;
pub mod claims;
pub mod config;
pub mod error;
pub mod factory;
pub mod gate;
pub mod jwks;
pub mod permissions;
pub mod verifier;

pub use claims::Claims;
pub use config::AuthConfig;
pub use error::AuthError;
pub use factory::build_authorizer;
pub use gate::Authorizer;
