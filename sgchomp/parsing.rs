//! Parsing utilities for textual game positions

/// Implement [`std::str::FromStr`] using parser. Type must have `parse` method implemented.
macro_rules! impl_from_str_via_parser {
    ($t: ident) => {
        impl std::str::FromStr for $t {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match $t::parse($crate::parsing::Parser::new(s)) {
                    Some((p, result)) if p.input.is_empty() => Ok(result),
                    Some(_) => Err("Parse error: leftover input"),
                    None => Err("Parse error: parser failed"),
                }
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                use std::str::FromStr;

                $t::from_str(&String::deserialize(deserializer)?).map_err(serde::de::Error::custom)
            }
        }
    };
}
pub(crate) use impl_from_str_via_parser;

macro_rules! try_option {
    ($e:expr) => {
        match $e {
            Some(v) => v,
            None => return None,
        }
    };
}
pub(crate) use try_option;

macro_rules! lexeme {
    ($p:expr, $f:expr) => {{
        let p = $p.trim_whitespace();
        match $f(p) {
            None => None,
            Some((p, val)) => {
                let p = p.trim_whitespace();
                Some((p, val))
            }
        }
    }};
}

#[must_use]
#[derive(Debug, Clone, Copy)]
/// `const`-capable string parser
pub struct Parser<'s> {
    /// Remaining unparsed input
    pub input: &'s str,
}

impl<'s> Parser<'s> {
    /// Create new parser marking the beginning of the input
    pub const fn new(input: &'s str) -> Parser<'s> {
        Parser { input }
    }

    /// Remove whitespace from the beginning of the input
    pub const fn trim_whitespace(self) -> Parser<'s> {
        let mut bs = self.input.as_bytes();
        loop {
            match bs {
                [b'\t' | b'\n' | b'\r' | b' ', rest @ ..] => bs = rest,
                _ => {
                    return Parser {
                        input: {
                            // const-hack
                            match core::str::from_utf8(bs) {
                                Ok(input) => input,
                                Err(_) => unreachable!(),
                            }
                        },
                    };
                }
            }
        }
    }

    /// Parse one ascii char if input is non-empty
    pub const fn parse_any_ascii_char(self) -> Option<(Parser<'s>, char)> {
        match self.input.as_bytes() {
            [b, rest @ ..] if b.is_ascii() => Some((
                Parser {
                    // const-hack
                    input: match core::str::from_utf8(rest) {
                        Ok(input) => input,
                        Err(_) => unreachable!(),
                    },
                },
                *b as char,
            )),
            _ => None,
        }
    }

    /// Parse one ascii char if input is non-empty and it matches the `expected`
    pub const fn parse_ascii_char(self, expected: char) -> Option<Parser<'s>> {
        match self.parse_any_ascii_char() {
            Some((p, c)) if c == expected => Some(p),
            _ => None,
        }
    }

    /// Parse `keyword` if the input starts with it
    pub fn parse_keyword(self, keyword: &str) -> Option<Parser<'s>> {
        self.input
            .strip_prefix(keyword)
            .map(|input| Parser { input })
    }

    /// Parse unsigned number
    pub const fn parse_u32(self) -> Option<(Parser<'s>, u32)> {
        let mut bs = self.input.as_bytes();

        let mut parsed_anything = false;
        let mut acc: u32 = 0;

        loop {
            match bs {
                [
                    b @ (b'0' | b'1' | b'2' | b'3' | b'4' | b'5' | b'6' | b'7' | b'8' | b'9'),
                    rest @ ..,
                ] => {
                    parsed_anything = true;
                    match acc.checked_mul(10) {
                        Some(a) => acc = a,
                        None => {
                            return None;
                        }
                    }
                    match acc.checked_add((*b - b'0') as u32) {
                        Some(a) => acc = a,
                        None => {
                            return None;
                        }
                    }

                    bs = rest;
                }
                _ => {
                    if !parsed_anything {
                        return None;
                    }

                    return Some((
                        Parser {
                            // const-hack
                            input: match core::str::from_utf8(bs) {
                                Ok(input) => input,
                                Err(_) => unreachable!(),
                            },
                        },
                        acc,
                    ));
                }
            }
        }
    }

    /// Parse comma separated list of unsigned numbers, possibly empty
    pub fn parse_u32_list(self) -> Option<(Parser<'s>, Vec<u32>)> {
        let mut values = Vec::new();
        let Some((mut p, first)) = lexeme!(self, Parser::parse_u32) else {
            return Some((self, values));
        };
        values.push(first);

        while let Some(after_comma) = p.parse_ascii_char(',') {
            let (rest, value) = try_option!(lexeme!(after_comma, Parser::parse_u32));
            values.push(value);
            p = rest;
        }

        Some((p, values))
    }
}

#[test]
fn parse_numbers() {
    let (p, n) = Parser::new("42,7").parse_u32().unwrap();
    assert_eq!(n, 42);
    assert_eq!(p.input, ",7");

    assert!(Parser::new("x").parse_u32().is_none());
    assert!(Parser::new("99999999999").parse_u32().is_none());
}

#[test]
fn parse_lists() {
    let (p, values) = Parser::new(" 5, 5 ,3]").parse_u32_list().unwrap();
    assert_eq!(values, vec![5, 5, 3]);
    assert_eq!(p.input, "]");

    let (p, values) = Parser::new("]").parse_u32_list().unwrap();
    assert!(values.is_empty());
    assert_eq!(p.input, "]");

    assert!(Parser::new("1, ").parse_u32_list().is_none());
}

#[test]
fn parse_keywords() {
    let p = Parser::new("Chomp[1]").parse_keyword("Chomp").unwrap();
    assert_eq!(p.input, "[1]");
    assert!(Parser::new("[1]").parse_keyword("Chomp").is_none());
}
