/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `peek_at`, `advance`)
/// - Matching / expecting keywords and punctuation
/// - Statement terminators (`expect_semi`, `skip_semicolons`)
/// - Skipping balanced token runs (`skip_balanced`)
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// Return the token `offset` positions ahead, clamped to the trailing `Eof`.
    fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is an identifier.
    fn check_ident(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Ident(_))
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<&Token, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(msg))
        }
    }

    /// Build an "expected X, found Y" error at the current token.
    fn unexpected(&self, msg: &str) -> CompileError {
        CompileError::syntax(
            format!("{}, found {}", msg, self.peek().kind.describe()),
            self.peek().span,
        )
    }

    /// Consume a statement terminator.
    ///
    /// Go allows the semicolon to be omitted before a closing `)` or `}`, and the lexer inserts one at EOF.
    fn expect_semi(&mut self, context: &str) -> Result<(), CompileError> {
        if self.match_punct(PunctuationId::Semicolon)
            || self.check_punct(PunctuationId::RParen)
            || self.check_punct(PunctuationId::RBrace)
            || self.is_at_end()
        {
            Ok(())
        } else {
            Err(self.unexpected(&format!("Expected ';' or newline after {context}")))
        }
    }

    fn skip_semicolons(&mut self) {
        while self.match_punct(PunctuationId::Semicolon) {}
    }

    /// Skip a bracketed run starting at the current opening token, through its matching closer.
    ///
    /// All three bracket kinds are tracked together, so a function literal inside a `var` initializer or a
    /// composite literal inside a body is skipped as a whole.
    fn skip_balanced(&mut self) -> Result<(), CompileError> {
        let open = self.current_span();
        let mut depth = 0usize;
        loop {
            match self.peek().kind.punctuation_id() {
                Some(PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace) => depth += 1,
                Some(PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return Ok(());
                    }
                }
                _ if self.is_at_end() => {
                    return Err(CompileError::syntax("Unclosed bracket".to_string(), open)
                        .with_note("the matching closing bracket was never found"));
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip tokens until a top-level declaration keyword that starts a new line.
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            let after_semi = self.pos > 0 && self.tokens[self.pos - 1].kind.is_punctuation(PunctuationId::Semicolon);
            if after_semi && self.at_decl_keyword() {
                return;
            }
            self.advance();
        }
    }

    fn at_decl_keyword(&self) -> bool {
        self.check_keyword(KeywordId::Type)
            || self.check_keyword(KeywordId::Func)
            || self.check_keyword(KeywordId::Var)
            || self.check_keyword(KeywordId::Const)
            || self.check_keyword(KeywordId::Import)
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Span of the most recently consumed token.
    fn previous_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    /// Span from `start` through the most recently consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous_span())
    }

    /// Return `true` if the token at `offset` can begin a type.
    fn starts_type_at(&self, offset: usize) -> bool {
        match &self.peek_at(offset).kind {
            TokenKind::Ident(_) => true,
            TokenKind::Keyword(id) => matches!(
                id,
                KeywordId::Func | KeywordId::Map | KeywordId::Chan | KeywordId::Struct | KeywordId::Interface
            ),
            TokenKind::Punctuation(id) => matches!(
                id,
                PunctuationId::Star | PunctuationId::LBracket | PunctuationId::LParen | PunctuationId::Arrow
            ),
            _ => false,
        }
    }

    /// Offset (from the current token) of the token just after the `]` matching a `[` at `open_offset`.
    fn offset_after_brackets(&self, open_offset: usize) -> usize {
        let mut depth = 0usize;
        let mut offset = open_offset;
        loop {
            let token = self.peek_at(offset);
            match token.kind.punctuation_id() {
                Some(PunctuationId::LBracket) => depth += 1,
                Some(PunctuationId::RBracket) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return offset + 1;
                    }
                }
                _ if matches!(token.kind, TokenKind::Eof) => return offset,
                _ => {}
            }
            offset += 1;
        }
    }
}
