use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("speed must be finite and positive, got {0}")]
    InvalidSpeed(f64),

    #[error("max_steps_per_frame must be at least 1")]
    ZeroStepBound,
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
