use crate::lexer::TokenSequence;

/// Last token that detaches a command from the interpreter.
pub const BACKGROUND_MARKER: &str = "&";
/// Token that sends the left command's output to a file.
pub const REDIRECT_MARKER: &str = ">";
/// Token that connects two commands.
pub const PIPE_MARKER: &str = "|";
/// Single-token command that ends the session.
pub const EXIT_COMMAND: &str = "exit";

/// A classified, ready-to-run command segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// A built-in or a single external program run in the foreground.
    Plain(TokenSequence),

    /// An external program whose completion is not awaited. The `&` is removed.
    Background(TokenSequence),

    /// The command left of `>` and everything right of it.
    ///
    /// Only the first right-hand token is used as the target file name, the rest
    /// is ignored.
    Redirect(TokenSequence, TokenSequence),

    /// Producer (left of `|`) and consumer (right of `|`).
    Pipe(TokenSequence, TokenSequence),
}

impl Job {
    /// File name a `Redirect` job appends to, if one was given.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Job::Redirect(_, right) => right.first().map(String::as_str),
            _ => None,
        }
    }
}

/// Result of classifying one token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// The whole interpreter should shut down.
    Exit,
    Run(Job),
}

/// Determines the shape of a token sequence.
///
/// Decision order, first match wins:
/// 1. exactly `exit` ends the session;
/// 2. a trailing `&` makes a background job of the preceding tokens;
/// 3. a `>` anywhere splits into a redirect at its first occurrence;
/// 4. a `|` anywhere splits into a pipe at its first occurrence;
/// 5. anything else is a plain job.
///
/// A sequence holding both `&` and `>` is therefore a background job whose
/// tokens still contain the `>`.
pub fn classify(mut tokens: TokenSequence) -> Parsed {
    if tokens.len() == 1 && tokens[0] == EXIT_COMMAND {
        return Parsed::Exit;
    }

    if tokens.last().is_some_and(|last| last == BACKGROUND_MARKER) {
        tokens.pop();
        return Parsed::Run(Job::Background(tokens));
    }

    if let Some((left, right)) = split_at_marker(&tokens, REDIRECT_MARKER) {
        return Parsed::Run(Job::Redirect(left, right));
    }

    if let Some((left, right)) = split_at_marker(&tokens, PIPE_MARKER) {
        return Parsed::Run(Job::Pipe(left, right));
    }

    Parsed::Run(Job::Plain(tokens))
}

/// Splits around the first standalone `marker`, which belongs to neither side.
fn split_at_marker(tokens: &[String], marker: &str) -> Option<(TokenSequence, TokenSequence)> {
    let pos = tokens.iter().position(|token| token == marker)?;
    Some((tokens[..pos].to_vec(), tokens[pos + 1..].to_vec()))
}
