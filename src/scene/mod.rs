//! Region input and coordinate normalization.

/// Normalization into origin-centered canvas space.
pub mod normalize;
/// JSON region loading.
pub mod region;
