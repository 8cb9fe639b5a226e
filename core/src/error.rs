use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FlipError {
    #[error("Cell index {0} is outside the 1..=9 grid")]
    InvalidCell(u8),
    #[error("Delay window is inverted: min {min_ms}ms > max {max_ms}ms")]
    InvalidDelayWindow { min_ms: u32, max_ms: u32 },
    #[error("{0} must be used within a FlipProvider")]
    MissingProvider(&'static str),
}

pub type Result<T> = core::result::Result<T, FlipError>;
