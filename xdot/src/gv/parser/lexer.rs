//! The Lexer implementation for the GraphViz file format.

use super::error::{ParseError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    EOF,
    /// A plain identifier or a numeral.
    Identifier,
    /// A double-quoted string, with the escapes resolved.
    QuotedString,
    /// A '<' ... '>' string, including the outer brackets.
    HtmlString,
    GraphKW,
    NodeKW,
    EdgeKW,
    DigraphKW,
    StrictKW,
    SubgraphKW,
    Equal,
    Colon,
    Comma,
    Semicolon,
    Plus,
    ArrowRight,
    ArrowLine,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
}

impl TokenKind {
    /// \returns true if the token can be used as a name or a value.
    pub fn is_id(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::QuotedString
                | TokenKind::HtmlString
        )
    }

    pub fn is_edge_op(&self) -> bool {
        matches!(self, TokenKind::ArrowRight | TokenKind::ArrowLine)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column of the first character.
    pub column: usize,
    /// Byte offset of the first character.
    pub offset: usize,
}

impl Token {
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EOF
    }
}

// The location of a character in the input: (line, column, offset).
type Location = (usize, usize, usize);

#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    // The index of the current character.
    pos: usize,
    pub ch: char,
    offset: usize,
    line: usize,
    column: usize,
    peeked: Option<Token>,
}

impl Lexer {
    pub fn from_string(input: &str) -> Self {
        let chars = input.chars().collect();
        Lexer::new(chars)
    }

    pub fn new(input: Vec<char>) -> Self {
        let ch = input.first().copied().unwrap_or('\0');
        Self {
            input,
            pos: 0,
            ch,
            offset: 0,
            line: 1,
            column: 1,
            peeked: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.input.len()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    fn location(&self) -> Location {
        (self.line, self.column, self.offset)
    }

    fn peek_char(&self) -> char {
        self.input.get(self.pos + 1).copied().unwrap_or('\0')
    }

    /// Move to the next character, and update the line and column counters.
    pub fn read_char(&mut self) {
        if !self.has_next() {
            return;
        }
        if self.ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.offset += self.ch.len_utf8();
        self.pos += 1;
        self.ch = self.input.get(self.pos).copied().unwrap_or('\0');
    }

    fn skip_line(&mut self) {
        while self.has_next() && self.ch != '\n' {
            self.read_char();
        }
    }

    // Skips whitespace, line comments ('//' and '#') and block comments. A
    // block comment that is never closed swallows the rest of the input.
    fn skip_whitespace_and_comments(&mut self) {
        while self.has_next() {
            if self.ch.is_whitespace() {
                self.read_char();
            } else if self.ch == '#' {
                self.skip_line();
            } else if self.ch == '/' && self.peek_char() == '/' {
                self.skip_line();
            } else if self.ch == '/' && self.peek_char() == '*' {
                // Consume the '/*'.
                self.read_char();
                self.read_char();
                while self.has_next() {
                    if self.ch == '*' && self.peek_char() == '/' {
                        self.read_char();
                        self.read_char();
                        break;
                    }
                    self.read_char();
                }
            } else {
                break;
            }
        }
    }

    fn make_token(&self, kind: TokenKind, text: String, loc: Location) -> Token {
        Token {
            kind,
            text,
            line: loc.0,
            column: loc.1,
            offset: loc.2,
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while self.has_next() && (self.ch.is_alphanumeric() || self.ch == '_') {
            result.push(self.ch);
            self.read_char();
        }
        result
    }

    fn read_digits(&mut self, result: &mut String) {
        while self.has_next() && self.ch.is_ascii_digit() {
            result.push(self.ch);
            self.read_char();
        }
    }

    // numeral: [0-9]* ('.' [0-9]*)? ([eE] [+-]? [0-9]+)?
    fn read_number(&mut self) -> String {
        let mut result = String::new();
        self.read_digits(&mut result);

        if self.has_next() && self.ch == '.' {
            result.push(self.ch);
            self.read_char();
            self.read_digits(&mut result);
        }

        if self.has_next() && (self.ch == 'e' || self.ch == 'E') {
            // Only treat this as an exponent if digits follow.
            let next = self.peek_char();
            let after_sign = self.input.get(self.pos + 2).copied();
            let has_exponent = next.is_ascii_digit()
                || ((next == '+' || next == '-')
                    && after_sign.map_or(false, |c| c.is_ascii_digit()));
            if has_exponent {
                result.push(self.ch);
                self.read_char();
                if self.ch == '+' || self.ch == '-' {
                    result.push(self.ch);
                    self.read_char();
                }
                self.read_digits(&mut result);
            }
        }
        result
    }

    fn read_string(&mut self) -> Result<Token> {
        let loc = self.location();
        let mut result = String::new();
        // Consume the opening quote.
        self.read_char();
        loop {
            if !self.has_next() {
                return Err(ParseError::UnterminatedString {
                    line: loc.0,
                    column: loc.1,
                });
            }
            match self.ch {
                '"' => {
                    self.read_char();
                    break;
                }
                '\\' => {
                    // Consume the escape character.
                    self.read_char();
                    if !self.has_next() {
                        continue;
                    }
                    let escaped = match self.ch {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        c => c,
                    };
                    result.push(escaped);
                    self.read_char();
                }
                c => {
                    result.push(c);
                    self.read_char();
                }
            }
        }
        Ok(self.make_token(TokenKind::QuotedString, result, loc))
    }

    // Reads a '<' .. '>' string. Brackets may nest. The content is not
    // validated.
    fn read_html_string(&mut self) -> Result<Token> {
        let loc = self.location();
        let mut result = String::new();
        let mut depth = 0;
        loop {
            if !self.has_next() {
                return Err(ParseError::UnterminatedHtml {
                    line: loc.0,
                    column: loc.1,
                });
            }
            match self.ch {
                '<' => depth += 1,
                '>' => depth -= 1,
                _ => {}
            }
            result.push(self.ch);
            self.read_char();
            if depth == 0 {
                break;
            }
        }
        Ok(self.make_token(TokenKind::HtmlString, result, loc))
    }

    fn lex_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();
        let loc = self.location();

        if !self.has_next() {
            return Ok(self.make_token(TokenKind::EOF, String::new(), loc));
        }

        let single = match self.ch {
            '[' => Some(TokenKind::OpenBracket),
            ']' => Some(TokenKind::CloseBracket),
            '{' => Some(TokenKind::OpenBrace),
            '}' => Some(TokenKind::CloseBrace),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            ';' => Some(TokenKind::Semicolon),
            '=' => Some(TokenKind::Equal),
            '+' => Some(TokenKind::Plus),
            _ => None,
        };
        if let Some(kind) = single {
            let text = self.ch.to_string();
            self.read_char();
            return Ok(self.make_token(kind, text, loc));
        }

        match self.ch {
            '-' => {
                let next = self.peek_char();
                if next == '>' || next == '-' {
                    self.read_char();
                    self.read_char();
                    let kind = if next == '>' {
                        TokenKind::ArrowRight
                    } else {
                        TokenKind::ArrowLine
                    };
                    let text = format!("-{}", next);
                    return Ok(self.make_token(kind, text, loc));
                }
                if next.is_ascii_digit() || next == '.' {
                    self.read_char();
                    let num = format!("-{}", self.read_number());
                    return Ok(self.make_token(TokenKind::Identifier, num, loc));
                }
                Err(ParseError::UnexpectedChar {
                    ch: self.ch,
                    line: loc.0,
                    column: loc.1,
                })
            }
            '"' => self.read_string(),
            '<' => self.read_html_string(),
            c if c.is_ascii_digit()
                || (c == '.' && self.peek_char().is_ascii_digit()) =>
            {
                let num = self.read_number();
                Ok(self.make_token(TokenKind::Identifier, num, loc))
            }
            c if c.is_alphabetic() || c == '_' => {
                let name = self.read_identifier();
                let kind = match name.as_str() {
                    "graph" => TokenKind::GraphKW,
                    "node" => TokenKind::NodeKW,
                    "edge" => TokenKind::EdgeKW,
                    "digraph" => TokenKind::DigraphKW,
                    "strict" => TokenKind::StrictKW,
                    "subgraph" => TokenKind::SubgraphKW,
                    _ => TokenKind::Identifier,
                };
                Ok(self.make_token(kind, name, loc))
            }
            c => Err(ParseError::UnexpectedChar {
                ch: c,
                line: loc.0,
                column: loc.1,
            }),
        }
    }

    /// \returns the next token, or a token of kind EOF at the end of the
    /// input.
    pub fn next_token(&mut self) -> Result<Token> {
        if let Some(tok) = self.peeked.take() {
            return Ok(tok);
        }
        self.lex_token()
    }

    /// \returns the next token without consuming it.
    pub fn peek_token(&mut self) -> Result<&Token> {
        let tok = match self.peeked.take() {
            Some(tok) => tok,
            None => self.lex_token()?,
        };
        let tok: &Token = self.peeked.insert(tok);
        Ok(tok)
    }

    /// Lex the whole input. The last token is the EOF token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let done = tok.is_eof();
            tokens.push(tok);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::from_string(input);
        let tokens = lexer.tokenize().unwrap();
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            kinds("[]{},:;=+ -> --"),
            vec![
                TokenKind::OpenBracket,
                TokenKind::CloseBracket,
                TokenKind::OpenBrace,
                TokenKind::CloseBrace,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Semicolon,
                TokenKind::Equal,
                TokenKind::Plus,
                TokenKind::ArrowRight,
                TokenKind::ArrowLine,
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(
            kinds("strict graph digraph node edge subgraph Graph"),
            vec![
                TokenKind::StrictKW,
                TokenKind::GraphKW,
                TokenKind::DigraphKW,
                TokenKind::NodeKW,
                TokenKind::EdgeKW,
                TokenKind::SubgraphKW,
                TokenKind::Identifier,
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn numbers() {
        let mut lexer = Lexer::from_string("12 1.5 .25 3e10 2.5E-3 -7 7east");
        let texts: Vec<String> = lexer
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(
            texts,
            vec!["12", "1.5", ".25", "3e10", "2.5E-3", "-7", "7", "east", ""]
        );
    }

    #[test]
    fn string_escapes() {
        let mut lexer = Lexer::from_string(r#""a\"b\\c\nd\te\qf""#);
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::QuotedString);
        assert_eq!(tok.text, "a\"b\\c\nd\teqf");
    }

    #[test]
    fn html_strings_nest() {
        let mut lexer = Lexer::from_string("<<b>bold</b>> x");
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::HtmlString);
        assert_eq!(tok.text, "<<b>bold</b>>");
        assert_eq!(lexer.next_token().unwrap().text, "x");
    }

    #[test]
    fn comments() {
        let program = "// line\n# hash\n a /* block \n */ b /* never closed";
        let mut lexer = Lexer::from_string(program);
        let a = lexer.next_token().unwrap();
        let b = lexer.next_token().unwrap();
        assert_eq!((a.text.as_str(), a.line, a.column), ("a", 3, 2));
        assert_eq!((b.text.as_str(), b.line, b.column), ("b", 4, 5));
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = Lexer::from_string("a -> b");
        assert_eq!(lexer.peek_token().unwrap().text, "a");
        assert_eq!(lexer.peek_token().unwrap().text, "a");
        assert_eq!(lexer.next_token().unwrap().text, "a");
        assert_eq!(lexer.peek_token().unwrap().kind, TokenKind::ArrowRight);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::ArrowRight);
        assert_eq!(lexer.next_token().unwrap().text, "b");
    }

    #[test]
    fn errors() {
        let err = Lexer::from_string("a\n  @").tokenize().unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedChar {
                ch: '@',
                line: 2,
                column: 3
            }
        );

        let err = Lexer::from_string("x \"abc").tokenize().unwrap_err();
        assert_eq!(err, ParseError::UnterminatedString { line: 1, column: 3 });

        let err = Lexer::from_string("<a<b>").tokenize().unwrap_err();
        assert_eq!(err, ParseError::UnterminatedHtml { line: 1, column: 1 });

        let err = Lexer::from_string("a - b").tokenize().unwrap_err();
        assert!(err.is_lexical());
        assert_eq!((err.line(), err.column()), (1, 3));
    }

    #[test]
    fn offsets_count_bytes() {
        let mut lexer = Lexer::from_string("\"é\" b");
        let _ = lexer.next_token().unwrap();
        let b = lexer.next_token().unwrap();
        assert_eq!(b.offset, 5);
        assert_eq!(b.column, 5);
    }
}
