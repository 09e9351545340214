//! Reader and writer for the string-NBT text format used by structure
//! exports: compounds, lists, typed integer arrays, strings and suffixed
//! numbers.

pub mod error;
pub mod parser;
pub mod value;
pub mod writer;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{parse, parse_with, ParseOptions, DEFAULT_MAX_DEPTH};
pub use value::{Compound, Number, TypedArray, Value};
