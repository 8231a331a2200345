//! A module implementing lexical analysis (tokenization) of raw input lines.
//!
//! Input is handled in two passes: the line is cut into `;`-delimited segments,
//! then every segment is cut on whitespace. There is no quoting or escaping, so
//! markers such as `>` or `|` are only recognized as standalone tokens.

/// Separator between independent commands on one line.
pub const SEGMENT_SEPARATOR: char = ';';

/// Ordered tokens of one command segment.
pub type TokenSequence = Vec<String>;

/// Splits a raw line into the token sequences of its segments.
///
/// Segments that contain nothing but whitespace are dropped, so the result never
/// holds an empty sequence.
///
/// # Arguments
/// * `line` - The raw text read from the user.
pub fn segments(line: &str) -> Vec<TokenSequence> {
    line.split(SEGMENT_SEPARATOR)
        .map(tokens)
        .filter(|tokens| !tokens.is_empty())
        .collect()
}

/// Splits one segment into whitespace-delimited tokens.
///
/// Leading and trailing whitespace is ignored and no empty token is ever produced.
pub fn tokens(segment: &str) -> TokenSequence {
    segment.split_whitespace().map(str::to_owned).collect()
}
