//! Placeholder-macro expansion engine
//!
//! Scans arbitrary text for tokens of the form
//! `<start><tag>(<args>)<end>`, dispatches each recognized tag to its
//! registered handler with the tokenized arguments, and substitutes the
//! handler's result back into the text. Delimiters are configurable per
//! [`Resolver`] instance; resolution can apply all registered handlers, all
//! but an excluded set, an explicit subset, or exactly one.
//!
//! ```
//! use std::any::Any;
//! use std::sync::Arc;
//! use tagexpand::{HandlerId, Invocation, Placeholder, Resolver};
//!
//! struct Echo;
//!
//! impl Placeholder for Echo {
//!     fn identity(&self) -> HandlerId {
//!         HandlerId("echo")
//!     }
//!     fn tag(&self) -> &str {
//!         "echo"
//!     }
//!     fn parse(&self, _: Option<&dyn Any>, invocation: &Invocation<'_>) -> String {
//!         invocation.arguments[0].clone()
//!     }
//! }
//!
//! let resolver = Resolver::new('<', '>').unwrap();
//! resolver.register(Arc::new(Echo)).unwrap();
//! assert_eq!(resolver.resolve_all("hi <echo(world)> !", None), "hi world !");
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod net;
pub mod pattern;
pub mod placeholder;
pub mod registry;
pub mod resolver;
pub mod tokenizer;

pub use cache::ExpiringCache;
pub use error::{HttpError, ResolverError, Result};
pub use extract::extract;
pub use model::{JsonCodec, JsonValue, SerdeJsonCodec, Structured};
pub use net::{HttpDispatch, HttpRequestSpec, ReqwestDispatch};
pub use pattern::TagPattern;
pub use placeholder::{HandlerId, Invocation, Placeholder};
pub use registry::{HandlerRegistry, RegistryEntry};
pub use resolver::Resolver;
