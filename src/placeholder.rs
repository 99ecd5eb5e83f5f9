//! The handler capability contract

use std::any::Any;

/// Stable identity token distinguishing one registered handler type from
/// another. Used as the registry's map key: two registrations with the same
/// identity never create two entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub &'static str);

impl std::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// One placeholder occurrence handed to a handler, as matched in the text
/// being resolved.
#[derive(Debug)]
pub struct Invocation<'a> {
    /// The full matched span, delimiters and tag included
    pub origin: &'a str,
    /// The captured argument body, split on the handler's separator
    pub arguments: Vec<String>,
    /// The resolver's start delimiter
    pub start_delimiter: char,
    /// The resolver's end delimiter
    pub end_delimiter: char,
}

/// Trait implemented by every pluggable placeholder handler.
///
/// Handlers must not panic out of [`Placeholder::parse`]: on any internal
/// failure (malformed arguments, unreachable network target, failed
/// extraction) the handler returns `invocation.origin` verbatim, leaving the
/// matched span untouched in the output. The engine treats the returned
/// string as authoritative and never substitutes anything on its own
/// initiative.
pub trait Placeholder: Send + Sync {
    /// The registry key for this handler type.
    fn identity(&self) -> HandlerId;

    /// The literal tag matched inside the delimiters, e.g. `"api"`.
    /// ASCII alphanumerics and underscores only.
    fn tag(&self) -> &str;

    /// The character splitting the raw argument body into arguments.
    fn separator(&self) -> char {
        ','
    }

    /// Produce the replacement text for one matched occurrence.
    ///
    /// `context` is the caller-supplied opaque data for the enclosing
    /// resolution call, passed through unchanged; the engine attaches no
    /// interpretation to it.
    fn parse(&self, context: Option<&dyn Any>, invocation: &Invocation<'_>) -> String;
}
