//! Minimal scene-graph document: textures, slot bindings, extension declarations and a logger.

/// Manifest loading and saving.
pub mod io;
/// Diagnostic sinks.
pub mod logger;
/// Document, texture and link types.
pub mod model;
