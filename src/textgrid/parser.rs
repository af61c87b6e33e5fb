/*!
 * TextGrid reader.
 *
 * Both Praat text layouts ("long" with `key = value` lines and "short" with
 * bare values) carry the same sequence of strings, numbers and flags. The
 * reader tokenizes the file, drops keys and bracketed indices, and walks the
 * remaining values, so both layouts go through one code path.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TextGridError;
use super::model::{Interval, IntervalTier, Point, PointTier, TextGrid, Tier};
use super::{DuplicateNamesMode, ReadOptions};

// @const: Praat numeric literal
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?$").expect("number regex is valid")
});

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Str(String),
    Num(f64),
    Flag(String),
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    line: usize,
}

/// Decode raw file bytes. UTF-16 needs a byte order mark; everything else
/// must be UTF-8.
pub fn decode_text(bytes: &[u8]) -> Result<String, TextGridError> {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => utf8(rest),
        _ => utf8(bytes),
    }
}

fn utf8(bytes: &[u8]) -> Result<String, TextGridError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| TextGridError::Encoding(e.to_string()))
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String, TextGridError> {
    if bytes.len() % 2 != 0 {
        return Err(TextGridError::Encoding("odd number of bytes in UTF-16 input".to_string()));
    }
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|e| TextGridError::Encoding(e.to_string()))
}

fn tokenize(content: &str) -> Result<Vec<Token>, TextGridError> {
    let mut tokens = Vec::new();
    let mut chars = content.chars().peekable();
    let mut line = 1;

    while let Some(&c) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '"' => {
                let start_line = line;
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some('"') => {
                            // A doubled quote is an escaped quote
                            if chars.peek() == Some(&'"') {
                                chars.next();
                                text.push('"');
                            } else {
                                break;
                            }
                        }
                        Some(ch) => {
                            if ch == '\n' {
                                line += 1;
                            }
                            text.push(ch);
                        }
                        None => {
                            return Err(TextGridError::UnexpectedEof(format!(
                                "string starting at line {}",
                                start_line
                            )));
                        }
                    }
                }
                tokens.push(Token { kind: TokenKind::Str(text), line: start_line });
            }
            '<' => {
                let mut flag = String::new();
                for ch in chars.by_ref() {
                    flag.push(ch);
                    if ch == '>' {
                        break;
                    }
                }
                tokens.push(Token { kind: TokenKind::Flag(flag), line });
            }
            '[' => {
                for ch in chars.by_ref() {
                    if ch == ']' {
                        break;
                    }
                }
            }
            '!' => {
                // Praat comment, runs to end of line
                while let Some(&ch) = chars.peek() {
                    if ch == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            c if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                let mut text = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_whitespace() {
                        break;
                    }
                    text.push(ch);
                    chars.next();
                }
                if !NUMBER_REGEX.is_match(&text) {
                    return Err(TextGridError::Parse {
                        line,
                        message: format!("malformed number '{}'", text),
                    });
                }
                let value = text.parse::<f64>().map_err(|e| TextGridError::Parse {
                    line,
                    message: format!("malformed number '{}': {}", text, e),
                })?;
                tokens.push(Token { kind: TokenKind::Num(value), line });
            }
            _ => {
                // Keys such as `xmin =`, `item`, `intervals:` carry no data
                while let Some(&ch) = chars.peek() {
                    if ch.is_whitespace() || ch == '"' || ch == '[' || ch == '<' {
                        break;
                    }
                    chars.next();
                }
            }
        }
    }

    Ok(tokens)
}

struct TokenCursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenCursor {
    fn next(&mut self, what: &str) -> Result<Token, TextGridError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| TextGridError::UnexpectedEof(what.to_string()))?;
        self.pos += 1;
        Ok(token)
    }

    fn string(&mut self, what: &str) -> Result<String, TextGridError> {
        let token = self.next(what)?;
        match token.kind {
            TokenKind::Str(text) => Ok(text),
            other => Err(TextGridError::Parse {
                line: token.line,
                message: format!("expected {} as a quoted string, found {:?}", what, other),
            }),
        }
    }

    fn number(&mut self, what: &str) -> Result<f64, TextGridError> {
        let token = self.next(what)?;
        match token.kind {
            TokenKind::Num(value) => Ok(value),
            other => Err(TextGridError::Parse {
                line: token.line,
                message: format!("expected {} as a number, found {:?}", what, other),
            }),
        }
    }

    /// Declared counts come from the file; never reserve more slots than
    /// there are tokens left to fill them.
    fn capacity_hint(&self, declared: usize) -> usize {
        declared.min(self.tokens.len().saturating_sub(self.pos))
    }

    fn count(&mut self, what: &str) -> Result<usize, TextGridError> {
        let line = self.tokens.get(self.pos).map_or(0, |t| t.line);
        let value = self.number(what)?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(TextGridError::Parse {
                line,
                message: format!("{} must be a non-negative integer, found {}", what, value),
            });
        }
        Ok(value as usize)
    }

    fn flag(&mut self, what: &str) -> Result<String, TextGridError> {
        let token = self.next(what)?;
        match token.kind {
            TokenKind::Flag(flag) => Ok(flag),
            other => Err(TextGridError::Parse {
                line: token.line,
                message: format!("expected {} flag, found {:?}", what, other),
            }),
        }
    }
}

/// Parse TextGrid text in either layout, applying the read options
pub fn parse_textgrid(content: &str, options: &ReadOptions) -> Result<TextGrid, TextGridError> {
    let mut cursor = TokenCursor { tokens: tokenize(content)?, pos: 0 };

    let file_type = cursor.string("file type")?;
    if file_type != "ooTextFile" {
        return Err(TextGridError::InvalidHeader(format!("file type is '{}'", file_type)));
    }
    let object_class = cursor.string("object class")?;
    if object_class != "TextGrid" {
        return Err(TextGridError::InvalidHeader(format!("object class is '{}'", object_class)));
    }

    let xmin = cursor.number("xmin")?;
    let xmax = cursor.number("xmax")?;

    let tier_count = match cursor.flag("tiers")?.as_str() {
        "<exists>" => cursor.count("tier count")?,
        "<absent>" => 0,
        other => {
            return Err(TextGridError::Parse {
                line: cursor.tokens[cursor.pos - 1].line,
                message: format!("unknown tiers flag {}", other),
            });
        }
    };

    let mut tiers: Vec<Tier> = Vec::with_capacity(cursor.capacity_hint(tier_count));
    for _ in 0..tier_count {
        let mut tier = parse_tier(&mut cursor, options)?;

        if tiers.iter().any(|t| t.name() == tier.name()) {
            match options.duplicate_names {
                DuplicateNamesMode::Error => {
                    return Err(TextGridError::DuplicateTierName(tier.name().to_string()));
                }
                DuplicateNamesMode::Rename => {
                    let unique = unique_name(tier.name(), &tiers);
                    debug!("Renaming duplicate tier '{}' to '{}'", tier.name(), unique);
                    tier.set_name(unique);
                }
            }
        }

        tiers.push(tier);
    }

    Ok(TextGrid { xmin, xmax, tiers })
}

fn parse_tier(cursor: &mut TokenCursor, options: &ReadOptions) -> Result<Tier, TextGridError> {
    let class = cursor.string("tier class")?;
    let name = cursor.string("tier name")?;
    let min_time = cursor.number("tier xmin")?;
    let max_time = cursor.number("tier xmax")?;
    let size = cursor.count("entry count")?;

    match class.as_str() {
        "IntervalTier" => {
            let mut entries = Vec::with_capacity(cursor.capacity_hint(size));
            for _ in 0..size {
                let start = cursor.number("interval xmin")?;
                let end = cursor.number("interval xmax")?;
                let label = cursor.string("interval text")?;
                if options.include_empty_intervals || !label.trim().is_empty() {
                    entries.push(Interval { start, end, label });
                }
            }
            Ok(Tier::Interval(IntervalTier { name, min_time, max_time, entries }))
        }
        "TextTier" => {
            let mut entries = Vec::with_capacity(cursor.capacity_hint(size));
            for _ in 0..size {
                let time = cursor.number("point time")?;
                let label = cursor.string("point mark")?;
                entries.push(Point { time, label });
            }
            Ok(Tier::Point(PointTier { name, min_time, max_time, entries }))
        }
        other => Err(TextGridError::UnknownTierClass(other.to_string())),
    }
}

/// First `<name>_<n>` (n >= 2) not already used by a tier
fn unique_name(name: &str, tiers: &[Tier]) -> String {
    (2..)
        .map(|n| format!("{}_{}", name, n))
        .find(|candidate| tiers.iter().all(|t| t.name() != candidate))
        .unwrap_or_else(|| name.to_string())
}
