//! Data types shared by the service and HTTP layers.
//!
//! The JSON field names (`titulo`, `genero`, `favorito`) are the persisted
//! and wire format; the Rust side uses English field names.

pub mod errors;
pub mod movie;

pub use movie::{Movie, NewMovie};
