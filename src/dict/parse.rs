use std::{iter::Peekable, str::Chars};

use thiserror::Error;

use super::{Dict, Dimension, Value, write::quote};

/// An error encountered while reading OpenFOAM dictionary text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

/// Parses dictionary text into a [`Dict`].
///
/// The `FoamFile` header, if present, is returned as an ordinary entry.
///
/// # Errors
///
/// Returns a [`ParseError`] if the text is not a well-formed dictionary.
pub fn parse(text: &str) -> Result<Dict, ParseError> {
    let tokens = Lexer::new(text).tokenize()?;
    let mut parser = Parser { tokens, pos: 0 };
    let dict = parser.entries()?;
    match parser.next() {
        None => Ok(dict),
        Some((line, token)) => Err(ParseError {
            line,
            message: format!("unexpected {token:?} at top level"),
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Str(String),
    Punct(char),
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: self.line,
            message: message.into(),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn tokenize(mut self) -> Result<Vec<(usize, Token)>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(&c) = self.chars.peek() {
            match c {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' => self.comment()?,
                '"' => {
                    let line = self.line;
                    tokens.push((line, Token::Str(self.string()?)));
                }
                '{' | '}' | '(' | ')' | '[' | ']' | ';' => {
                    tokens.push((self.line, Token::Punct(c)));
                    self.bump();
                }
                _ => tokens.push((self.line, Token::Word(self.word()))),
            }
        }
        Ok(tokens)
    }

    fn comment(&mut self) -> Result<(), ParseError> {
        self.bump();
        match self.bump() {
            Some('/') => {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
                Ok(())
            }
            Some('*') => {
                let mut previous = '\0';
                while let Some(c) = self.bump() {
                    if previous == '*' && c == '/' {
                        return Ok(());
                    }
                    previous = c;
                }
                Err(self.error("unterminated block comment"))
            }
            _ => Err(self.error("stray '/'")),
        }
    }

    fn string(&mut self) -> Result<String, ParseError> {
        self.bump();
        let mut text = String::new();
        while let Some(c) = self.bump() {
            match c {
                '"' => return Ok(text),
                '\\' => match self.chars.peek() {
                    Some(&escaped @ ('\\' | '"')) => {
                        self.bump();
                        text.push(escaped);
                    }
                    _ => text.push('\\'),
                },
                c => text.push(c),
            }
        }
        Err(self.error("unterminated string"))
    }

    /// Reads a word, allowing balanced parentheses such as `div(phi,U)`.
    fn word(&mut self) -> String {
        let mut text = String::new();
        let mut depth = 0_usize;
        while let Some(&c) = self.chars.peek() {
            match c {
                c if c.is_whitespace() => break,
                '{' | '}' | '[' | ']' | ';' | '"' => break,
                '(' => depth += 1,
                ')' if depth == 0 => break,
                ')' => depth -= 1,
                _ => {}
            }
            text.push(c);
            self.bump();
        }
        text
    }
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, token)| token)
    }

    fn next(&mut self) -> Option<(usize, Token)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |(line, _)| *line)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: self.line(),
            message: message.into(),
        }
    }

    /// Parses entries until a closing brace or the end of input.
    fn entries(&mut self) -> Result<Dict, ParseError> {
        let mut dict = Dict::new();
        loop {
            let key = match self.peek() {
                None | Some(Token::Punct('}')) => return Ok(dict),
                Some(Token::Word(word)) => word.clone(),
                Some(Token::Str(text)) => quote(text),
                Some(token) => return Err(self.error(format!("expected a key, found {token:?}"))),
            };
            self.pos += 1;

            if key.starts_with('#') {
                let value = match self.next() {
                    Some((_, Token::Word(word))) => Value::Word(word),
                    Some((_, Token::Str(text))) => Value::Str(text),
                    _ => return Err(self.error(format!("directive {key} needs an argument"))),
                };
                dict.insert(key, value);
                continue;
            }

            if self.peek() == Some(&Token::Punct('{')) {
                self.pos += 1;
                let sub = self.entries()?;
                self.expect('}')?;
                dict.insert(key, Value::Dict(sub));
                continue;
            }

            let mut items = Vec::new();
            while self.peek() != Some(&Token::Punct(';')) {
                if self.peek().is_none() {
                    return Err(self.error(format!("entry {key} is missing ';'")));
                }
                items.push(self.item()?);
            }
            self.pos += 1;

            let value = match items.len() {
                0 => Value::Word(String::new()),
                1 => items.remove(0),
                _ => Value::Tuple(items),
            };
            dict.insert(key, value);
        }
    }

    fn expect(&mut self, punct: char) -> Result<(), ParseError> {
        match self.next() {
            Some((_, Token::Punct(c))) if c == punct => Ok(()),
            Some((line, token)) => Err(ParseError {
                line,
                message: format!("expected '{punct}', found {token:?}"),
            }),
            None => Err(self.error(format!("expected '{punct}', found end of input"))),
        }
    }

    fn item(&mut self) -> Result<Value, ParseError> {
        match self.next() {
            Some((_, Token::Word(word))) => Ok(scalar(word)),
            Some((_, Token::Str(text))) => Ok(Value::Str(text)),
            Some((_, Token::Punct('('))) => {
                let mut items = Vec::new();
                while self.peek() != Some(&Token::Punct(')')) {
                    if self.peek().is_none() {
                        return Err(self.error("unterminated list"));
                    }
                    items.push(self.item()?);
                }
                self.pos += 1;
                Ok(Value::List(items))
            }
            Some((_, Token::Punct('{'))) => {
                let dict = self.entries()?;
                self.expect('}')?;
                Ok(Value::Dict(dict))
            }
            Some((_, Token::Punct('['))) => self.dimension(),
            Some((line, token)) => Err(ParseError {
                line,
                message: format!("unexpected {token:?}"),
            }),
            None => Err(self.error("unexpected end of input")),
        }
    }

    /// Parses the body of `[m l t k n a j]`; the short five-exponent form is accepted.
    fn dimension(&mut self) -> Result<Value, ParseError> {
        let mut exponents = [0_i8; 7];
        let mut count = 0;
        loop {
            match self.next() {
                Some((_, Token::Punct(']'))) => break,
                Some((line, Token::Word(word))) => {
                    let exponent = word.parse::<i8>().map_err(|_| ParseError {
                        line,
                        message: format!("invalid dimension exponent {word:?}"),
                    })?;
                    if count == exponents.len() {
                        return Err(ParseError {
                            line,
                            message: "too many dimension exponents".to_string(),
                        });
                    }
                    exponents[count] = exponent;
                    count += 1;
                }
                _ => return Err(self.error("malformed dimension set")),
            }
        }
        if count != 5 && count != 7 {
            return Err(self.error(format!("expected 5 or 7 dimension exponents, found {count}")));
        }
        Ok(Value::Dimension(Dimension::from_exponents(exponents)))
    }
}

fn scalar(word: String) -> Value {
    match word.as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    let numeric = word
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'));
    if numeric {
        if let Ok(n) = word.parse::<i64>() {
            return Value::Int(n);
        }
        if let Ok(x) = word.parse::<f64>() {
            return Value::Float(x);
        }
    }
    Value::Word(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_and_nesting() {
        let dict = parse(
            "// comment\n\
             application rhoCentralFoam;\n\
             deltaT 0.001;\n\
             endTime 10;\n\
             runTimeModifiable true;\n\
             /* block\n comment */\n\
             ddtSchemes { default Euler; }\n",
        )
        .unwrap();

        assert_eq!(dict.get("application"), Some(&Value::word("rhoCentralFoam")));
        assert_eq!(dict.get("deltaT"), Some(&Value::Float(0.001)));
        assert_eq!(dict.get("endTime"), Some(&Value::Int(10)));
        assert_eq!(dict.get("runTimeModifiable"), Some(&Value::Bool(true)));
        assert_eq!(
            dict.get_dict("ddtSchemes").and_then(|d| d.get("default")),
            Some(&Value::word("Euler"))
        );
    }

    #[test]
    fn words_with_parentheses_and_quoted_keys() {
        let dict = parse(
            "divSchemes { div(tauMC) Gauss linear; }\n\
             solvers { \"(rho|rhoU|rhoE)\" { solver diagonal; } }\n",
        )
        .unwrap();

        let div = dict.get_dict("divSchemes").unwrap();
        assert_eq!(
            div.get("div(tauMC)"),
            Some(&Value::tuple(["Gauss", "linear"]))
        );
        assert!(
            dict.get_dict("solvers")
                .unwrap()
                .contains_key("\"(rho|rhoU|rhoE)\"")
        );
    }

    #[test]
    fn lists_dimensions_and_directives() {
        let dict = parse(
            "dimensions [0 1 -1 0 0 0 0];\n\
             internalField uniform (2 0 0);\n\
             features ( { file \"whole.eMesh\"; level 8; } );\n\
             #include \"meshQualityDict\"\n",
        )
        .unwrap();

        assert_eq!(
            dict.get("dimensions"),
            Some(&Value::Dimension(Dimension::VELOCITY))
        );
        assert_eq!(dict.get("internalField"), Some(&Value::uniform([2, 0, 0])));
        let features = dict.get("features").and_then(Value::as_list).unwrap();
        assert_eq!(
            features[0].as_dict().and_then(|d| d.get("file")),
            Some(&Value::string("whole.eMesh"))
        );
        assert_eq!(
            dict.get("#include"),
            Some(&Value::string("meshQualityDict"))
        );
    }

    #[test]
    fn render_then_parse_is_stable() {
        let original = Dict::new()
            .with("vertices", Value::list([[-0.6, -1.0, -1.0], [3.0, -1.0, -1.0]]))
            .with(
                "boundary",
                Value::list([Value::tuple([
                    Value::word("inlet"),
                    Value::Dict(
                        Dict::new()
                            .with("type", "patch")
                            .with("faces", Value::list([[0, 3, 4, 7]])),
                    ),
                ])]),
            )
            .with("mergeTolerance", 1e-6)
            .with(
                "solvers",
                Dict::new().with(r#""U\.*""#, Dict::new().with("solver", "smoothSolver")),
            )
            .with("regex", Value::string(r"U\.*"))
            .with("title", Value::string(r#"say "hi" \ bye \"#));

        let first = original.to_foam_string();
        let parsed = parse(&first).unwrap();
        assert_eq!(parsed.get("regex"), Some(&Value::string(r"U\.*")));
        assert_eq!(
            parsed.get("title"),
            Some(&Value::string(r#"say "hi" \ bye \"#))
        );
        assert!(
            parsed
                .get_dict("solvers")
                .is_some_and(|d| d.contains_key(r#""U\.*""#))
        );
        let second = parsed.to_foam_string();
        assert_eq!(first, second);
    }

    #[test]
    fn reports_line_of_missing_semicolon() {
        let error = parse("a 1;\nb 2\n").unwrap_err();
        assert_eq!(error.line, 2);
        assert!(error.message.contains("missing ';'"));
    }

    #[test]
    fn rejects_unbalanced_braces() {
        assert!(parse("a { b 1;").is_err());
        assert!(parse("}").is_err());
    }
}
