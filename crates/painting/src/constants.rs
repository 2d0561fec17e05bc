/// Smallest stamp diameter in pixels; smaller requests are clamped up.
pub const MIN_STAMP_DIAMETER: u32 = 1;

/// Bytes per paint buffer pixel (4 x f32, Rgba32Float).
pub const BYTES_PER_PIXEL: usize = 16;
