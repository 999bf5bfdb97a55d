//! Value types shared by the facade and the decision logic.
mod position;
mod unit;

pub use position::{Direction, Position};
pub use unit::{SensedUnit, Team, UnitId, UnitKind};
