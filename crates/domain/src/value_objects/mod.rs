//! Value Objects - Immutable, identity-less domain primitives

mod distance;
mod fuel_subtype;
mod load;
mod load_factor;
mod transport_mode;

pub use distance::Distance;
pub use fuel_subtype::FuelSubtype;
pub use load::{Load, LoadBasis, LoadUnit};
pub use load_factor::LoadFactor;
pub use transport_mode::TransportMode;
