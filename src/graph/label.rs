use std::fmt::{Display, Formatter};

pub const LAMBDA: char = 'λ';
pub const EPSILON: char = 'ε';

const LAMBDA_ENTITY: &str = "&lambda;";
const EPSILON_ENTITY: &str = "&epsilon;";

/// Separates alternative labels stored on a single serialized edge.
const ALTERNATIVE_SEPARATOR: &str = "<br>";
/// Separates symbols of a collapsed multi-hop path.
const PATH_SEPARATOR: char = ':';

/// The label of a single transition.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Label {
    /// The empty string; traversed without consuming input.
    Lambda,
    Symbol(char),
    /// A collapsed chain of at least two single-symbol transitions (shorthand mode only).
    Path(Vec<char>),
    /// An alternative with a token longer than one character. Input is consumed one character
    /// at a time, so this label never matches.
    Word(String),
}

impl Label {
    /// The symbols consumed by this label, in order. Empty for [`Label::Lambda`] and
    /// [`Label::Word`].
    pub fn symbols(&self) -> &[char] {
        match self {
            Label::Lambda | Label::Word(_) => &[],
            Label::Symbol(symbol) => std::slice::from_ref(symbol),
            Label::Path(symbols) => symbols,
        }
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self, Label::Lambda)
    }

    /// Build a label from a list of symbols, dropping lambda glyphs.
    fn from_symbols(mut symbols: Vec<char>) -> Label {
        symbols.retain(|it| !is_lambda_symbol(*it));
        match symbols.as_slice() {
            [] => Label::Lambda,
            [symbol] => Label::Symbol(*symbol),
            _ => Label::Path(symbols),
        }
    }

    /// Split a serialized edge weight into one label per `<br>` alternative.
    pub(crate) fn parse_weight(weight: &str) -> Vec<Label> {
        normalize_weight(weight)
            .split(ALTERNATIVE_SEPARATOR)
            .map(Label::parse_alternative)
            .collect()
    }

    fn parse_alternative(alternative: &str) -> Label {
        let mut symbols = Vec::new();
        for token in alternative.split(PATH_SEPARATOR) {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (None, _) => {}
                (Some(symbol), None) => symbols.push(symbol),
                (Some(_), Some(_)) => return Label::Word(alternative.to_string()),
            }
        }
        Label::from_symbols(symbols)
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Lambda => write!(f, "{LAMBDA}"),
            Label::Symbol(symbol) => write!(f, "{symbol}"),
            Label::Path(symbols) => {
                for (i, symbol) in symbols.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{PATH_SEPARATOR}")?;
                    }
                    write!(f, "{symbol}")?;
                }
                Ok(())
            }
            Label::Word(word) => write!(f, "{word}"),
        }
    }
}

/// True for the glyphs that stand for the empty string.
pub(crate) fn is_lambda_symbol(symbol: char) -> bool {
    symbol == LAMBDA || symbol == EPSILON
}

/// Replace the textual `&lambda;` / `&epsilon;` tokens in a serialized edge weight by the
/// corresponding glyphs. Alternatives and path separators are kept as they are.
pub fn normalize_weight(weight: &str) -> String {
    weight
        .split(ALTERNATIVE_SEPARATOR)
        .map(|alternative| {
            alternative
                .split(PATH_SEPARATOR)
                .map(|token| match token {
                    LAMBDA_ENTITY => LAMBDA.to_string(),
                    EPSILON_ENTITY => EPSILON.to_string(),
                    _ => token.to_string(),
                })
                .collect::<Vec<_>>()
                .join(":")
        })
        .collect::<Vec<_>>()
        .join(ALTERNATIVE_SEPARATOR)
}
