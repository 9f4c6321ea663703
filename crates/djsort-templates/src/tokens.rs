use crate::quotes::split_on_whitespace;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Block(String),
    Comment(String),
    /// A `{%`, `{{` or `{#` that never found its closing delimiter.
    Error(String),
    Text(String),
    Variable(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    line: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self { kind, line }
    }

    /// Convenience constructor for a `{% ... %}` token, mostly for tag tests.
    #[must_use]
    pub fn block(contents: &str) -> Self {
        Self::new(TokenKind::Block(contents.trim().to_string()), 1)
    }

    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// 1-based line the token starts on.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn contents(&self) -> &str {
        match &self.kind {
            TokenKind::Block(s)
            | TokenKind::Comment(s)
            | TokenKind::Error(s)
            | TokenKind::Text(s)
            | TokenKind::Variable(s) => s,
        }
    }

    /// Split the contents on whitespace, keeping quoted strings together.
    #[must_use]
    pub fn split_contents(&self) -> Vec<String> {
        split_on_whitespace(self.contents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_contents() {
        let token = Token::block(r#" anchor name "Full name" "#);
        assert_eq!(
            token.split_contents(),
            vec!["anchor", "name", r#""Full name""#]
        );
    }

    #[test]
    fn test_contents() {
        let variable = Token::new(TokenKind::Variable("user.name".to_string()), 3);
        assert_eq!(variable.contents(), "user.name");
        assert_eq!(variable.line(), 3);
    }
}
