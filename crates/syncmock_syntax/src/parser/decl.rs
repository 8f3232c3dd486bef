/// Declaration parsing.
///
/// This chunk parses the file header (package clause, imports) and top-level declarations:
/// - `type` specs, single or grouped, including type parameter lists and aliases
/// - `func` declarations and methods, with bodies skipped
/// - `var` / `const` declarations, which are consumed and dropped
impl<'a> Parser<'a> {
    // ========================================================================
    // File header
    // ========================================================================

    fn package_clause(&mut self) -> Result<Spanned<Ident>, CompileError> {
        if !self.match_keyword(KeywordId::Package) {
            return Err(self
                .unexpected("Expected package clause")
                .with_hint("every Go file starts with `package <name>`"));
        }
        let name = self.identifier_spanned()?;
        self.expect_semi("package clause")?;
        Ok(name)
    }

    /// Parse `import "path"`, `import alias "path"` or a grouped `import ( ... )`.
    fn import_decl(&mut self) -> Result<Vec<Spanned<ImportSpec>>, CompileError> {
        self.advance(); // consume 'import'
        let mut specs = Vec::new();
        if self.match_punct(PunctuationId::LParen) {
            self.skip_semicolons();
            while !self.check_punct(PunctuationId::RParen) {
                if self.is_at_end() {
                    return Err(self.unexpected("Expected ')' to close import group"));
                }
                specs.push(self.import_spec()?);
                self.expect_semi("import spec")?;
                self.skip_semicolons();
            }
            self.advance();
        } else {
            specs.push(self.import_spec()?);
        }
        self.expect_semi("import declaration")?;
        Ok(specs)
    }

    fn import_spec(&mut self) -> Result<Spanned<ImportSpec>, CompileError> {
        let start = self.current_span();
        let alias = match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            TokenKind::Punctuation(PunctuationId::Dot) => {
                self.advance();
                Some(".".to_string())
            }
            _ => None,
        };
        let path = self.string_literal("Expected import path")?;
        Ok(Spanned::new(ImportSpec { alias, path }, self.span_from(start)))
    }

    // ========================================================================
    // Top-level declarations
    // ========================================================================

    fn top_level_decl(&mut self) -> Result<Vec<Spanned<Declaration>>, CompileError> {
        if self.check_keyword(KeywordId::Type) {
            self.type_decl()
        } else if self.check_keyword(KeywordId::Func) {
            Ok(vec![self.func_decl()?])
        } else if self.check_keyword(KeywordId::Var) || self.check_keyword(KeywordId::Const) {
            self.skip_value_decl()?;
            Ok(Vec::new())
        } else if self.check_keyword(KeywordId::Import) {
            Err(CompileError::syntax(
                "Imports must appear before other declarations".to_string(),
                self.current_span(),
            ))
        } else {
            Err(self.unexpected("Expected declaration"))
        }
    }

    /// Parse `type Spec` or `type ( Spec; Spec )`.
    fn type_decl(&mut self) -> Result<Vec<Spanned<Declaration>>, CompileError> {
        self.advance(); // consume 'type'
        let mut decls = Vec::new();
        if self.match_punct(PunctuationId::LParen) {
            self.skip_semicolons();
            while !self.check_punct(PunctuationId::RParen) {
                if self.is_at_end() {
                    return Err(self.unexpected("Expected ')' to close type group"));
                }
                decls.push(self.type_spec()?);
                self.expect_semi("type spec")?;
                self.skip_semicolons();
            }
            self.advance();
        } else {
            decls.push(self.type_spec()?);
        }
        self.expect_semi("type declaration")?;
        Ok(decls)
    }

    fn type_spec(&mut self) -> Result<Spanned<Declaration>, CompileError> {
        let start = self.current_span();
        let name = self.identifier_spanned()?;
        let type_params = if self.at_type_param_list() {
            self.type_params()?
        } else {
            Vec::new()
        };
        let is_alias = self.match_punct(PunctuationId::Assign);
        let ty = self.parse_type()?;
        let spec = TypeSpec {
            name,
            type_params,
            is_alias,
            ty,
        };
        Ok(Spanned::new(Declaration::Type(spec), self.span_from(start)))
    }

    /// Decide whether a `[` after a type name opens a type parameter list rather than an array length.
    ///
    /// `type A [N]int` is an array; `type A[T any]`, `type A[K, V any]` and `type A[T ~int]` declare parameters.
    fn at_type_param_list(&self) -> bool {
        if !self.check_punct(PunctuationId::LBracket) || !matches!(self.peek_at(1).kind, TokenKind::Ident(_)) {
            return false;
        }
        match &self.peek_at(2).kind {
            TokenKind::Punctuation(PunctuationId::Comma | PunctuationId::Tilde) => true,
            TokenKind::Punctuation(PunctuationId::RBracket | PunctuationId::Dot) => false,
            _ => self.starts_type_at(2),
        }
    }

    /// Parse `[K comparable, V any]`.
    fn type_params(&mut self) -> Result<Vec<TypeParamDecl>, CompileError> {
        self.expect_punct(PunctuationId::LBracket, "Expected '['")?;
        let mut params = Vec::new();
        while !self.check_punct(PunctuationId::RBracket) {
            let names = self.identifier_list()?;
            let constraint = self.parse_constraint()?;
            params.push(TypeParamDecl { names, constraint });
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RBracket, "Expected ']' to close type parameters")?;
        if params.is_empty() {
            return Err(CompileError::syntax(
                "Empty type parameter list".to_string(),
                self.previous_span(),
            ));
        }
        Ok(params)
    }

    /// Parse `func [receiver] Name[TypeParams](params) results [body]`.
    fn func_decl(&mut self) -> Result<Spanned<Declaration>, CompileError> {
        let start = self.current_span();
        self.advance(); // consume 'func'

        let receiver = if self.check_punct(PunctuationId::LParen) {
            Some(self.receiver()?)
        } else {
            None
        };

        let name = self.identifier_spanned()?;
        let type_params = if self.check_punct(PunctuationId::LBracket) {
            self.type_params()?
        } else {
            Vec::new()
        };
        let signature = self.signature()?;

        let has_body = self.check_punct(PunctuationId::LBrace);
        if has_body {
            self.skip_balanced()?;
        }
        self.expect_semi("function declaration")?;

        let decl = FuncDecl {
            receiver,
            name,
            type_params,
            signature,
            has_body,
        };
        Ok(Spanned::new(Declaration::Func(decl), self.span_from(start)))
    }

    fn receiver(&mut self) -> Result<Receiver, CompileError> {
        let open = self.current_span();
        let mut params = self.param_list()?;
        if params.len() != 1 || params[0].names.len() > 1 {
            return Err(CompileError::syntax(
                "Method has multiple receivers".to_string(),
                self.span_from(open),
            ));
        }
        let param = params.remove(0);
        Ok(Receiver {
            name: param.names.into_iter().next(),
            ty: param.ty,
        })
    }

    /// Consume a `var` or `const` declaration without recording it.
    fn skip_value_decl(&mut self) -> Result<(), CompileError> {
        self.advance(); // consume 'var' / 'const'
        if self.check_punct(PunctuationId::LParen) {
            self.skip_balanced()?;
        } else {
            while !self.check_punct(PunctuationId::Semicolon) && !self.is_at_end() {
                if matches!(
                    self.peek().kind.punctuation_id(),
                    Some(PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace)
                ) {
                    self.skip_balanced()?;
                } else {
                    self.advance();
                }
            }
        }
        self.expect_semi("value declaration")
    }
}
