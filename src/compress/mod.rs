//! Texture selection, external encoder invocation and the batch driver that ties them together.

/// Batch recompression driver.
pub mod driver;
/// Encoder abstraction and the `squoosh-cli` implementation.
pub mod encoder;
/// Per-codec encode profiles and their options.
pub mod profile;
/// Texture selection by format and slot.
pub mod select;
