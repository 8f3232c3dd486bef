/// Miscellaneous parser utilities.
///
/// This chunk contains small shared parsing helpers that don’t cleanly fit into
/// “decl” or “types” (identifier parsing, string literals, token text).
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier(&mut self) -> Result<Ident, CompileError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("Expected identifier")),
        }
    }

    fn identifier_spanned(&mut self) -> Result<Spanned<Ident>, CompileError> {
        let span = self.current_span();
        let name = self.identifier()?;
        Ok(Spanned::new(name, span))
    }

    fn identifier_list(&mut self) -> Result<Vec<Ident>, CompileError> {
        let mut idents = vec![self.identifier()?];
        while self.match_punct(PunctuationId::Comma) {
            idents.push(self.identifier()?);
        }
        Ok(idents)
    }

    fn string_literal(&mut self, msg: &str) -> Result<String, CompileError> {
        match &self.peek().kind {
            TokenKind::String(s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            _ => Err(self.unexpected(msg)),
        }
    }
}

/// Source-like text for a token, used to rebuild array length expressions.
fn token_text(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Keyword(id) => syncmock_core::lang::keywords::as_str(*id).to_string(),
        TokenKind::Punctuation(id) => punctuation::as_str(*id).to_string(),
        TokenKind::Ident(s) | TokenKind::Number(s) | TokenKind::Rune(s) => s.clone(),
        TokenKind::String(s) => format!("{s:?}"),
        TokenKind::Eof => String::new(),
    }
}
