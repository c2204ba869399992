use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeterError {
    #[error("Frame not ready: {0}")]
    NotReady(String),

    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid metering region: {width}x{height} at ({x}, {y}) in {frame_width}x{frame_height} frame")]
    InvalidRegion {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        frame_width: usize,
        frame_height: usize,
    },

    #[error("Frame too large: {pixels} pixels (limit: {max})")]
    BufferTooLarge { pixels: usize, max: usize },

    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    #[error("A measurement is already in progress")]
    MeasurementInProgress,

    #[error("Failed to read input frame: {0}")]
    InputReadError(String),
}

impl MeterError {
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Whether the measurement loop can skip this cycle and carry on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MeterError::InputReadError(_))
    }
}

pub type Result<T> = std::result::Result<T, MeterError>;
