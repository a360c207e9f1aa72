//! Token vocabulary and sample-value tables
//!
//! The vocabulary is a fixed, ordered table. Its order is the tokenizer's
//! match priority: the first entry whose text is a prefix of the remaining
//! input wins, so entries must never be reordered.
//!
//! Every longhand placeholder carries a table of representative CSS values.
//! Separators (keywords and punctuation) render as themselves. Structural
//! symbols never reach an expansion and have no samples.
//!
//! All data here is `static` and read-only for the life of the process.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

/// Category of a vocabulary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Angle-bracketed type placeholder, e.g. `<angle>`
    Longhand,
    /// Literal keyword or punctuation, e.g. `ray`, `(`
    Separator,
    /// Combinator, bracket or multiplier
    Symbol,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Longhand => write!(f, "longhand"),
            TokenKind::Separator => write!(f, "separator"),
            TokenKind::Symbol => write!(f, "symbol"),
        }
    }
}

/// One row of the vocabulary table
#[derive(Debug)]
pub struct Lexeme {
    pub text: &'static str,
    pub kind: TokenKind,
    pub samples: &'static [&'static str],
}

macro_rules! longhand {
    ($text:literal, $samples:expr) => {
        Lexeme {
            text: $text,
            kind: TokenKind::Longhand,
            samples: $samples,
        }
    };
}

macro_rules! separator {
    ($text:literal) => {
        Lexeme {
            text: $text,
            kind: TokenKind::Separator,
            samples: &[$text],
        }
    };
}

macro_rules! symbol {
    ($text:literal) => {
        Lexeme {
            text: $text,
            kind: TokenKind::Symbol,
            samples: &[],
        }
    };
}

// ── Sample values ─────────────────────────────────────────

const ANGLE_VALUES: &[&str] = &["0deg"];

const SHAPE_VALUES: &[&str] = &["circle(50% at 50% 50%)"];

const BOX_VALUES: &[&str] = &["margin-box"];

const ANCHOR_VALUES: &[&str] = &["0px 0px", "0px", "auto"];

const DISTANCE_VALUES: &[&str] = &["0px", "100%"];

const POSITION_VALUES: &[&str] = &["0px 0px", "0px", "auto"];

const ROTATION_VALUES: &[&str] = &["0deg auto", "0deg", "auto 0deg", "auto"];

// Shared by <offset-path> and <path()>.
const PATH_VALUES: &[&str] = &["path('m 0 0 h 1')"];

const SIZE_VALUES: &[&str] = &["closest-side"];

const URL_VALUES: &[&str] = &["url('https://www.example.com/shape#element')"];

const LENGTH_PERCENTAGE_VALUES: &[&str] = &["0%"];

// ── Vocabulary ────────────────────────────────────────────

/// The fixed token vocabulary in match-priority order:
/// longhands, then separators, then structural symbols.
pub static VOCABULARY: [Lexeme; 30] = [
    longhand!("<angle>", ANGLE_VALUES),
    longhand!("<basic-shape>", SHAPE_VALUES),
    longhand!("<geometry-box>", BOX_VALUES),
    longhand!("<offset-anchor>", ANCHOR_VALUES),
    longhand!("<offset-distance>", DISTANCE_VALUES),
    longhand!("<offset-path>", PATH_VALUES),
    longhand!("<offset-position>", POSITION_VALUES),
    longhand!("<offset-rotation>", ROTATION_VALUES),
    longhand!("<path()>", PATH_VALUES),
    longhand!("<size>", SIZE_VALUES),
    longhand!("<url>", URL_VALUES),
    longhand!("<length-percentage>", LENGTH_PERCENTAGE_VALUES),
    separator!("("),
    separator!(")"),
    separator!("/"),
    separator!("contain"),
    separator!("none"),
    separator!("ray"),
    separator!("bottom"),
    separator!("center"),
    separator!("left"),
    separator!("right"),
    separator!("top"),
    symbol!("&&"),
    symbol!("||"),
    symbol!("|"),
    symbol!("["),
    symbol!("]"),
    symbol!("?"),
    symbol!("!"),
];

/// A vocabulary token
///
/// A copyable handle into [`VOCABULARY`]. Equality, ordering and hashing
/// go by token text.
#[derive(Clone, Copy)]
pub struct Token(&'static Lexeme);

impl Token {
    /// Find the vocabulary entry with exactly this text
    pub fn lookup(text: &str) -> Option<Token> {
        VOCABULARY.iter().find(|lexeme| lexeme.text == text).map(Token)
    }

    /// All vocabulary tokens in priority order
    pub fn all() -> impl Iterator<Item = Token> {
        VOCABULARY.iter().map(Token)
    }

    pub fn as_str(self) -> &'static str {
        self.0.text
    }

    pub fn kind(self) -> TokenKind {
        self.0.kind
    }

    /// Concrete literals this token may be written as
    pub fn samples(self) -> &'static [&'static str] {
        self.0.samples
    }

    /// Longhands and separators are atoms; structural symbols are not
    pub fn is_atom(self) -> bool {
        self.0.kind != TokenKind::Symbol
    }

    pub(crate) fn is(self, text: &str) -> bool {
        self.0.text == text
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.0.text == other.0.text
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.text.hash(state);
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.text.cmp(other.0.text)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Token").field(&self.0.text).finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0.text)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.text)
    }
}
