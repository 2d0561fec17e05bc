use thiserror::Error;

/// Errors from building or importing a brush stamp
#[derive(Debug, Error)]
pub enum StampError {
    #[error("brush stamp must be square, got {width}x{height}")]
    NotSquare { width: u32, height: u32 },
    #[error("brush stamp must have a non-zero size")]
    Empty,
    #[error("brush stamp data has {actual} values, expected {expected}")]
    DataLength { expected: usize, actual: usize },
    #[error("failed to decode brush image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Errors from allocating a paint buffer
#[derive(Debug, Error)]
pub enum BufferError {
    #[error("paint buffer size must be in 1..={max}, got {size}")]
    InvalidSize { size: u32, max: u32 },
    #[error("tile size must be non-zero")]
    InvalidTileSize,
}
