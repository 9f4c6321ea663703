use crate::tokens::Token;
use crate::tokens::TokenKind;

const BLOCK_TAG_START: &str = "{%";
const BLOCK_TAG_END: &str = "%}";
const VARIABLE_TAG_START: &str = "{{";
const VARIABLE_TAG_END: &str = "}}";
const COMMENT_TAG_START: &str = "{#";
const COMMENT_TAG_END: &str = "#}";

pub struct Lexer<'src> {
    source: &'src str,
    start: usize,
    current: usize,
    line: usize,
}

impl<'src> Lexer<'src> {
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            start: 0,
            current: 0,
            line: 1,
        }
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.start = self.current;
            let line = self.line;

            let kind = match self.peek() {
                '{' => match self.peek_next() {
                    '%' => self.lex_django_construct(BLOCK_TAG_END, TokenKind::Block),
                    '{' => self.lex_django_construct(VARIABLE_TAG_END, TokenKind::Variable),
                    '#' => self.lex_django_construct(COMMENT_TAG_END, TokenKind::Comment),
                    _ => self.lex_text(),
                },
                _ => self.lex_text(),
            };

            tokens.push(Token::new(kind, line));
        }

        tokens
    }

    fn lex_django_construct(
        &mut self,
        end: &str,
        kind_fn: impl FnOnce(String) -> TokenKind,
    ) -> TokenKind {
        self.consume_n(2);
        let content_start = self.current;
        let line = self.line;

        if let Some(text) = self.consume_until(end) {
            self.consume_n(2);
            return kind_fn(text);
        }

        // Unterminated: only the rest of the line belongs to the error.
        self.current = content_start;
        self.line = line;
        self.synchronize();
        TokenKind::Error(self.source[content_start..self.current].trim().to_string())
    }

    fn lex_text(&mut self) -> TokenKind {
        let text_start = self.current;

        // A lone `{` that does not open a construct belongs to the text.
        self.consume();
        while !self.is_at_end() {
            let rest = &self.source[self.current..];
            if rest.starts_with(BLOCK_TAG_START)
                || rest.starts_with(VARIABLE_TAG_START)
                || rest.starts_with(COMMENT_TAG_START)
            {
                break;
            }
            self.consume();
        }

        TokenKind::Text(self.source[text_start..self.current].to_string())
    }

    #[inline]
    fn peek(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next().unwrap_or('\0')
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    #[inline]
    fn consume(&mut self) {
        if let Some(ch) = self.source[self.current..].chars().next() {
            if ch == '\n' {
                self.line += 1;
            }
            self.current += ch.len_utf8();
        }
    }

    fn consume_n(&mut self, count: usize) {
        for _ in 0..count {
            self.consume();
        }
    }

    fn consume_until(&mut self, delimiter: &str) -> Option<String> {
        let offset = self.current;

        while self.current < self.source.len() {
            if self.source[self.current..].starts_with(delimiter) {
                return Some(self.source[offset..self.current].trim().to_string());
            }
            self.consume();
        }

        None
    }

    fn synchronize(&mut self) {
        const SYNC_POINTS: &[u8] = b"{\n\r";

        while !self.is_at_end() {
            if SYNC_POINTS.contains(&self.source.as_bytes()[self.current]) {
                return;
            }
            self.consume();
        }
    }
}
