use lift_core::{ElevatorId, Floor, LiftError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{elevator} cannot travel down from {from} to {to}")]
    InvalidFloorHeight {
        elevator: ElevatorId,
        from:     Floor,
        to:       Floor,
    },

    #[error("{0} is not a destination floor of this building")]
    InvalidDestination(Floor),

    #[error(transparent)]
    Source(#[from] LiftError),
}

pub type SimResult<T> = Result<T, SimError>;
