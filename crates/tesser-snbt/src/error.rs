use thiserror::Error;

/// Characters of context shown on each side of a failure.
const SNIPPET_RADIUS: usize = 20;

/// What went wrong while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("unterminated quoted string")]
    UnterminatedString,

    #[error("invalid number literal '{0}'")]
    NumberFormat(String),

    #[error("expected {expected}, found '{found}'")]
    ExpectedToken { expected: &'static str, found: char },

    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
}

/// A syntax error with enough context to find it in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column} (byte {offset}) near `{snippet}`")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset into the input.
    pub offset: usize,
    /// 1-based.
    pub line: usize,
    /// 1-based, in characters.
    pub column: usize,
    /// Input surrounding `offset`, newlines flattened to spaces.
    pub snippet: String,
}

impl ParseError {
    /// `offset` must lie on a char boundary of `input`.
    pub(crate) fn new(kind: ParseErrorKind, input: &str, offset: usize) -> Self {
        let offset = offset.min(input.len());
        let (head, tail) = input.split_at(offset);

        let line = head.matches('\n').count() + 1;
        let line_start = head.rfind('\n').map_or(0, |i| i + 1);
        let column = head[line_start..].chars().count() + 1;

        let mut before: Vec<char> = head.chars().rev().take(SNIPPET_RADIUS).collect();
        before.reverse();
        let snippet: String = before
            .into_iter()
            .chain(tail.chars().take(SNIPPET_RADIUS))
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();

        Self {
            kind,
            offset,
            line,
            column,
            snippet,
        }
    }
}
