//! Shell-style glob patterns for store enumeration.
//!
//! Patterns match whole entry names:
//!
//! | Syntax | Matches |
//! |--------|---------|
//! | `*` | any run of characters except `/` |
//! | `?` | one character except `/` |
//! | `[abc]`, `[a-z]` | one character from the class |
//!
//! Any other character, including `\`, matches itself.
//!
//! A pattern is compiled up front, so a malformed pattern is reported even
//! when there is nothing to match it against.
//!
//! ```rust
//! use base16_schemes::Pattern;
//!
//! let pattern = Pattern::new("*.y*").unwrap();
//! assert!(pattern.matches("ocean.yaml"));
//! assert!(pattern.matches("ocean.yml"));
//! assert!(!pattern.matches("ocean.json"));
//! assert!(!pattern.matches("dark/ocean.yaml"));
//! ```

/// Error returned for a malformed glob pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Invalid glob pattern '{pattern}': unclosed character class")]
    UnclosedClass { pattern: String },

    #[error("Invalid glob pattern '{pattern}': empty character class")]
    EmptyClass { pattern: String },

    #[error("Invalid glob pattern '{pattern}': bad range in character class")]
    BadRange { pattern: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyChar,
    Star,
    Class(Vec<(char, char)>),
}

impl Token {
    fn matches_char(&self, c: char) -> bool {
        match self {
            Token::Literal(l) => *l == c,
            Token::AnyChar => c != '/',
            Token::Star => c != '/',
            Token::Class(ranges) => c != '/' && ranges.iter().any(|(lo, hi)| *lo <= c && c <= *hi),
        }
    }
}

/// A compiled glob pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Compiles a pattern.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '*' => {
                    // Consecutive stars behave like one.
                    if tokens.last() != Some(&Token::Star) {
                        tokens.push(Token::Star);
                    }
                }
                '?' => tokens.push(Token::AnyChar),
                '[' => {
                    let mut ranges = Vec::new();
                    let mut closed = false;
                    while let Some(lo) = chars.next() {
                        if lo == ']' {
                            closed = true;
                            break;
                        }

                        let hi = if chars.peek() == Some(&'-') {
                            chars.next();
                            match chars.next() {
                                Some(']') | None => {
                                    return Err(PatternError::BadRange {
                                        pattern: pattern.to_string(),
                                    })
                                }
                                Some(hi) => hi,
                            }
                        } else {
                            lo
                        };

                        if hi < lo {
                            return Err(PatternError::BadRange {
                                pattern: pattern.to_string(),
                            });
                        }
                        ranges.push((lo, hi));
                    }

                    if !closed {
                        return Err(PatternError::UnclosedClass {
                            pattern: pattern.to_string(),
                        });
                    }
                    if ranges.is_empty() {
                        return Err(PatternError::EmptyClass {
                            pattern: pattern.to_string(),
                        });
                    }
                    tokens.push(Token::Class(ranges));
                }
                other => tokens.push(Token::Literal(other)),
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens,
        })
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if the whole of `name` matches.
    pub fn matches(&self, name: &str) -> bool {
        let chars: Vec<char> = name.chars().collect();
        Self::match_from(&self.tokens, &chars)
    }

    fn match_from(tokens: &[Token], name: &[char]) -> bool {
        // Iterative wildcard matching with a single backtrack point per star.
        let (mut t, mut n) = (0, 0);
        let mut backtrack: Option<(usize, usize)> = None;

        while n < name.len() {
            match tokens.get(t) {
                Some(Token::Star) => {
                    backtrack = Some((t, n));
                    t += 1;
                }
                Some(token) if token.matches_char(name[n]) => {
                    t += 1;
                    n += 1;
                }
                _ => match backtrack {
                    // The star may only absorb non-separator characters.
                    Some((star_t, star_n)) if name[star_n] != '/' => {
                        backtrack = Some((star_t, star_n + 1));
                        t = star_t + 1;
                        n = star_n + 1;
                    }
                    _ => return false,
                },
            }
        }

        tokens[t..].iter().all(|token| *token == Token::Star)
    }
}
