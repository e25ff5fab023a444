//! Domain layer for CarbonRoute
//!
//! Contains the transport emission model: modes, legs, journeys, emission
//! factors, estimates and recommendations. This layer performs no I/O and
//! defines the ubiquitous language shared by the outer layers.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
