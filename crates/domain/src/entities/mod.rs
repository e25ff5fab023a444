//! Domain entities - journeys, reference data and calculation results

mod alternative;
mod emission_estimate;
mod emission_factor;
mod journey;
mod leg;
mod recommendation;

pub use alternative::{Alternative, Substitution};
pub use emission_estimate::{EmissionEstimate, LegContribution};
pub use emission_factor::{EmissionFactor, EmissionFactorTable};
pub use journey::Journey;
pub use leg::Leg;
pub use recommendation::Recommendation;
