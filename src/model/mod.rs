//! Structured-value model backing path extraction

pub mod json;

pub use json::{JsonCodec, JsonValue, SerdeJsonCodec};

/// An in-memory handle over a deserialized hierarchical document
/// (object/array/scalar), exposing the navigation the path extractor needs.
///
/// Navigation into a missing key or out-of-range index produces an absent
/// value rather than an error; further navigation from an absent value
/// stays absent. Implementations synthesize no defaults.
pub trait Structured: Send + Sync {
    /// Child at `index`, treating the current value as an array.
    fn child_at(&self, index: usize) -> Box<dyn Structured>;

    /// Child under `key`, treating the current value as a keyed object.
    fn child_key(&self, key: &str) -> Box<dyn Structured>;

    /// An independent copy: mutating the copy must not affect the original
    /// (cache hits navigate a copy, never the cached document itself).
    fn independent_copy(&self) -> Box<dyn Structured>;

    /// Whether this handle holds no value (missing key, bad index, or a
    /// document that failed to deserialize).
    fn is_absent(&self) -> bool;

    /// Textual representation substituted into resolved output. Strings
    /// render without surrounding quotes; other values render as their
    /// wire-format text.
    fn render(&self) -> String;
}
