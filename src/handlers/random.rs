//! `random` placeholder - uniform pick among its arguments

use crate::placeholder::{HandlerId, Invocation, Placeholder};
use std::any::Any;

/// Substitutes one of its arguments, chosen uniformly at random.
///
/// `<random(heads,tails)>` becomes `heads` or `tails`.
pub struct RandomPlaceholder;

impl RandomPlaceholder {
    /// Registry identity for this handler type.
    pub const ID: HandlerId = HandlerId("random");
}

impl Placeholder for RandomPlaceholder {
    fn identity(&self) -> HandlerId {
        Self::ID
    }

    fn tag(&self) -> &str {
        "random"
    }

    fn parse(&self, _context: Option<&dyn Any>, invocation: &Invocation<'_>) -> String {
        let arguments = &invocation.arguments;
        if arguments.is_empty() {
            return invocation.origin.to_string();
        }
        arguments[fastrand::usize(..arguments.len())].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call<'a>(origin: &'a str, arguments: &[&str]) -> Invocation<'a> {
        Invocation {
            origin,
            arguments: arguments.iter().map(|s| s.to_string()).collect(),
            start_delimiter: '<',
            end_delimiter: '>',
        }
    }

    #[test]
    fn picks_one_of_the_arguments() {
        let handler = RandomPlaceholder;
        for _ in 0..64 {
            let picked = handler.parse(None, &call("<random(a,b,c)>", &["a", "b", "c"]));
            assert!(["a", "b", "c"].contains(&picked.as_str()));
        }
    }

    #[test]
    fn single_argument_is_deterministic() {
        let handler = RandomPlaceholder;
        assert_eq!(handler.parse(None, &call("<random(only)>", &["only"])), "only");
    }

    #[test]
    fn empty_capture_picks_the_empty_argument() {
        // Tokenization of `<random()>` yields one empty argument.
        let handler = RandomPlaceholder;
        assert_eq!(handler.parse(None, &call("<random()>", &[""])), "");
    }
}
