//! Built-in placeholder handlers
//!
//! Each handler follows the fail-gracefully rule: any internal failure
//! (malformed arguments, unreachable target, failed extraction) results in
//! the original matched text being returned verbatim, never a panic.

pub mod address_alive;
pub mod api;
pub mod random;
pub mod range;

pub use address_alive::AddressAlivePlaceholder;
pub use api::ApiPlaceholder;
pub use random::RandomPlaceholder;
pub use range::RangePlaceholder;
