//! Data transfer objects
//!
//! Request and response types exchanged with the HTTP layer, plus
//! mappers from domain entities.

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
