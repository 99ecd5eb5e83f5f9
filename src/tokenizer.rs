//! Argument tokenization for captured placeholder bodies

/// Split a captured argument body on every occurrence of `separator`.
///
/// No escaping or quoting is supported: a separator character inside an
/// intended argument value is a literal split point. This is a documented
/// limitation of the placeholder syntax, not something the tokenizer tries
/// to repair. A zero-length capture yields exactly one empty-string
/// argument, never zero arguments.
pub fn tokenize(capture: &str, separator: char) -> Vec<String> {
    capture.split(separator).map(str::to_string).collect()
}
