//! The resolution engine: delimiter configuration and the four modes

use crate::error::{ResolverError, Result};
use crate::placeholder::{HandlerId, Invocation, Placeholder};
use crate::registry::{HandlerRegistry, RegistryEntry};
use crate::tokenizer::tokenize;
use log::debug;
use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;

/// Delimiter characters that would conflict with argument and array-index
/// syntax inside placeholder bodies.
const RESERVED_DELIMITERS: [char; 4] = ['{', '}', '[', ']'];

/// Placeholder resolver with a fixed delimiter pair and a concurrent
/// handler registry.
///
/// All resolution methods take `&self`; many resolution calls may run
/// concurrently against one instance, interleaved with registrations.
pub struct Resolver {
    start_delimiter: char,
    end_delimiter: char,
    registry: HandlerRegistry,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("start_delimiter", &self.start_delimiter)
            .field("end_delimiter", &self.end_delimiter)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Create a resolver with the given delimiter pair.
    ///
    /// Fails fast on an invalid delimiter: whitespace, or one of the
    /// reserved characters `{`, `}`, `[`, `]`.
    pub fn new(start_delimiter: char, end_delimiter: char) -> Result<Self> {
        for delimiter in [start_delimiter, end_delimiter] {
            if delimiter.is_whitespace() {
                return Err(ResolverError::invalid_delimiter(
                    delimiter,
                    "delimiters must not be whitespace",
                ));
            }
            if RESERVED_DELIMITERS.contains(&delimiter) {
                return Err(ResolverError::invalid_delimiter(
                    delimiter,
                    "delimiter is reserved",
                ));
            }
        }

        Ok(Self {
            start_delimiter,
            end_delimiter,
            registry: HandlerRegistry::new(),
        })
    }

    /// The configured start delimiter.
    pub fn start_delimiter(&self) -> char {
        self.start_delimiter
    }

    /// The configured end delimiter.
    pub fn end_delimiter(&self) -> char {
        self.end_delimiter
    }

    /// Register a handler, compiling its tag pattern against this
    /// resolver's delimiters. First registration for an identity wins;
    /// later ones are discarded. Builder-style, usable before or during
    /// resolution traffic.
    pub fn register(&self, handler: Arc<dyn Placeholder>) -> Result<&Self> {
        self.registry
            .register(handler, self.start_delimiter, self.end_delimiter)?;
        Ok(self)
    }

    /// Apply every registered handler, in registry iteration order, each
    /// performing a full substitution pass over the (possibly
    /// already-mutated) text.
    pub fn resolve_all(&self, origin: &str, context: Option<&dyn Any>) -> String {
        let mut text = origin.to_string();
        for (_, entry) in self.registry.entries() {
            text = self.apply_pass(text, context, &entry);
        }
        text
    }

    /// Like [`Resolver::resolve_all`], skipping handlers whose identity is
    /// in `excluded`.
    pub fn resolve_all_without(
        &self,
        origin: &str,
        context: Option<&dyn Any>,
        excluded: &HashSet<HandlerId>,
    ) -> String {
        let mut text = origin.to_string();
        for (identity, entry) in self.registry.entries() {
            if excluded.contains(&identity) {
                continue;
            }
            text = self.apply_pass(text, context, &entry);
        }
        text
    }

    /// Apply only the named handlers, in the order supplied. An identity
    /// with no registered handler is a no-op for that entry: no error, no
    /// substitution.
    pub fn resolve_subset(
        &self,
        origin: &str,
        context: Option<&dyn Any>,
        identities: &[HandlerId],
    ) -> String {
        let mut text = origin.to_string();
        for &identity in identities {
            let Some(entry) = self.registry.lookup(identity) else {
                debug!("no handler registered for {identity}, skipping");
                continue;
            };
            text = self.apply_pass(text, context, &entry);
        }
        text
    }

    /// Shorthand for [`Resolver::resolve_subset`] with exactly one identity.
    pub fn resolve_single(
        &self,
        origin: &str,
        context: Option<&dyn Any>,
        identity: HandlerId,
    ) -> String {
        self.resolve_subset(origin, context, &[identity])
    }

    /// One handler's substitution pass.
    ///
    /// Scans the text as it exists at the start of the pass for
    /// non-overlapping, leftmost-first occurrences, then rebuilds the output
    /// as a single concatenation of unmatched segments and replacements.
    /// Replacement text is never re-scanned for further matches of the same
    /// tag: no implicit recursion. Zero matches moves the input through
    /// unchanged.
    fn apply_pass(&self, origin: String, context: Option<&dyn Any>, entry: &RegistryEntry) -> String {
        let handler = &entry.handler;
        let separator = handler.separator();
        let mut resolved = String::new();
        let mut tail = 0;
        let mut substitutions = 0usize;

        for captures in entry.pattern.regex().captures_iter(&origin) {
            let matched = captures.get(0).expect("group 0 always present");
            let body = captures.get(1).map_or("", |c| c.as_str());
            let invocation = Invocation {
                origin: matched.as_str(),
                arguments: tokenize(body, separator),
                start_delimiter: self.start_delimiter,
                end_delimiter: self.end_delimiter,
            };
            let replacement = handler.parse(context, &invocation);
            resolved.push_str(&origin[tail..matched.start()]);
            resolved.push_str(&replacement);
            tail = matched.end();
            substitutions += 1;
        }

        if tail == 0 {
            return origin;
        }
        debug!("substituted {substitutions} occurrence(s) of tag '{}'", handler.tag());
        resolved.push_str(&origin[tail..]);
        resolved
    }
}
