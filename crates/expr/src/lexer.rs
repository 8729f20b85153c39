use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {n}"),
            Token::Ident(name) => format!("name `{name}`"),
            Token::Plus => "`+`".to_string(),
            Token::Minus => "`-`".to_string(),
            Token::Star => "`*`".to_string(),
            Token::Slash => "`/`".to_string(),
            Token::Caret => "`^`".to_string(),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
        }
    }
}

/// A token and the character offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub(crate) token: Token,
    pub(crate) pos: usize,
}

/// Splits source text into tokens.
///
/// Both `^` and `**` lex as [`Token::Caret`]. A number may carry an exponent
/// (`3.4e-2`) only when digits follow the `e`; otherwise the `e` starts a
/// name, so `2e` and `2exp(x)` keep their implicit products.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Spanned>, ParseError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];
        let start = pos;

        let token = match ch {
            c if c.is_whitespace() => {
                pos += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '*' if chars.get(pos + 1) == Some(&'*') => {
                pos += 1;
                Token::Caret
            }
            '*' => Token::Star,
            c if c.is_ascii_digit() || (c == '.' && next_is_digit(&chars, pos + 1)) => {
                let (number, end) = scan_number(&chars, pos)?;
                pos = end;
                tokens.push(Spanned {
                    token: Token::Number(number),
                    pos: start,
                });
                continue;
            }
            c if c.is_alphabetic() || c == '_' => {
                let end = scan_identifier(&chars, pos);
                let name: String = chars[pos..end].iter().collect();
                pos = end;
                tokens.push(Spanned {
                    token: Token::Ident(name),
                    pos: start,
                });
                continue;
            }
            other => return Err(ParseError::UnexpectedChar { ch: other, pos }),
        };

        tokens.push(Spanned { token, pos: start });
        pos += 1;
    }

    Ok(tokens)
}

fn next_is_digit(chars: &[char], pos: usize) -> bool {
    chars.get(pos).is_some_and(char::is_ascii_digit)
}

fn scan_identifier(chars: &[char], start: usize) -> usize {
    let mut end = start + 1;
    while end < chars.len() && (chars[end].is_alphanumeric() || chars[end] == '_') {
        end += 1;
    }
    end
}

fn scan_number(chars: &[char], start: usize) -> Result<(f64, usize), ParseError> {
    let mut end = start;
    while next_is_digit(chars, end) {
        end += 1;
    }
    if chars.get(end) == Some(&'.') {
        end += 1;
        while next_is_digit(chars, end) {
            end += 1;
        }
    }

    // exponent only when digits follow: `3e5`, `3e-5`, but not `3e` or `3exp`
    if matches!(chars.get(end), Some('e' | 'E')) {
        let signed = matches!(chars.get(end + 1), Some('+' | '-'));
        let digits_at = if signed { end + 2 } else { end + 1 };
        if next_is_digit(chars, digits_at) {
            end = digits_at;
            while next_is_digit(chars, end) {
                end += 1;
            }
        }
    }

    let text: String = chars[start..end].iter().collect();
    if chars.get(end) == Some(&'.') {
        return Err(ParseError::MalformedNumber {
            text: format!("{text}."),
            pos: start,
        });
    }
    text.parse::<f64>()
        .map(|number| (number, end))
        .map_err(|_| ParseError::MalformedNumber { text, pos: start })
}
