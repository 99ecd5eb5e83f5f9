//! `range` placeholder - random number within a range

use crate::placeholder::{HandlerId, Invocation, Placeholder};
use log::warn;
use std::any::Any;

/// Substitutes a random number drawn from a caller-supplied range.
///
/// `<range(single,min[,max])>` draws an integer from `[0,min)` or
/// `[min,max)`; `<range(decimal,min[,max[,precision]])>` draws a float,
/// optionally formatted to `precision` decimal places. Malformed numbers,
/// empty ranges, and unknown variants echo the origin.
pub struct RangePlaceholder;

impl RangePlaceholder {
    /// Registry identity for this handler type.
    pub const ID: HandlerId = HandlerId("range");
}

impl Placeholder for RangePlaceholder {
    fn identity(&self) -> HandlerId {
        Self::ID
    }

    fn tag(&self) -> &str {
        "range"
    }

    fn parse(&self, _context: Option<&dyn Any>, invocation: &Invocation<'_>) -> String {
        parse_range(&invocation.arguments).unwrap_or_else(|| {
            warn!("range placeholder echoing origin: {:?}", invocation.origin);
            invocation.origin.to_string()
        })
    }
}

fn parse_range(arguments: &[String]) -> Option<String> {
    if arguments.len() < 2 {
        return None;
    }

    match arguments[0].as_str() {
        "single" => {
            let minimum: i64 = arguments[1].parse().ok()?;
            let (low, high) = if arguments.len() == 2 {
                (0, minimum)
            } else {
                (minimum, arguments[2].parse().ok()?)
            };
            if low >= high {
                return None;
            }
            Some(fastrand::i64(low..high).to_string())
        }
        "decimal" => {
            let minimum: f64 = arguments[1].parse().ok()?;
            let (low, high) = if arguments.len() == 2 {
                (0.0, minimum)
            } else {
                (minimum, arguments[2].parse().ok()?)
            };
            if !(low < high) {
                return None;
            }
            let value = low + fastrand::f64() * (high - low);
            if arguments.len() >= 4 {
                let precision: usize = arguments[3].parse().ok()?;
                Some(format!("{value:.precision$}"))
            } else {
                Some(value.to_string())
            }
        }
        _ => None,
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
    fn single_two_arguments_draws_below_minimum() {
        let handler = RangePlaceholder;
        for _ in 0..64 {
            let out = handler.parse(None, &call("<range(single,10)>", &["single", "10"]));
            let n: i64 = out.parse().unwrap();
            assert!((0..10).contains(&n));
        }
    }

    #[test]
    fn single_three_arguments_draws_within_bounds() {
        let handler = RangePlaceholder;
        for _ in 0..64 {
            let out = handler.parse(None, &call("<range(single,5,8)>", &["single", "5", "8"]));
            let n: i64 = out.parse().unwrap();
            assert!((5..8).contains(&n));
        }
    }

    #[test]
    fn decimal_with_precision_formats() {
        let handler = RangePlaceholder;
        let out = handler.parse(
            None,
            &call("<range(decimal,1,2,2)>", &["decimal", "1", "2", "2"]),
        );
        let (whole, frac) = out.split_once('.').unwrap();
        assert_eq!(frac.len(), 2);
        assert!(whole.parse::<i64>().is_ok());
    }

    #[test]
    fn malformed_number_echoes_origin() {
        let handler = RangePlaceholder;
        let origin = "<range(single,ten)>";
        assert_eq!(handler.parse(None, &call(origin, &["single", "ten"])), origin);
    }

    #[test]
    fn empty_range_echoes_origin() {
        let handler = RangePlaceholder;
        let origin = "<range(single,9,3)>";
        assert_eq!(
            handler.parse(None, &call(origin, &["single", "9", "3"])),
            origin
        );
    }

    #[test]
    fn unknown_variant_echoes_origin() {
        let handler = RangePlaceholder;
        let origin = "<range(hex,1,5)>";
        assert_eq!(handler.parse(None, &call(origin, &["hex", "1", "5"])), origin);
    }

    #[test]
    fn too_few_arguments_echoes_origin() {
        let handler = RangePlaceholder;
        let origin = "<range(single)>";
        assert_eq!(handler.parse(None, &call(origin, &["single"])), origin);
    }
}
