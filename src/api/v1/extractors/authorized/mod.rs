/**
 * Responsibility
 *  - Bundle core and types
 *  - Control which gate types handlers can see
 */
mod core;
mod types;

pub use self::core::{Authorized, Permission};
pub use self::types::*;
