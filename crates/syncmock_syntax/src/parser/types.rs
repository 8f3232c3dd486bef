/// Type expression parsing.
///
/// This chunk parses Go's full type grammar: named, qualified and instantiated types, pointers, slices, arrays,
/// maps, channels, function types, struct and interface literals, and constraint unions.
///
/// ## Notes
/// - Parameter lists apply Go's grouping rule: in `(a, b int, c string)` the bare names `a` and `b` take the type
///   of the next typed entry; a list mixing named and unnamed entries is rejected.
/// - Array lengths are not evaluated; they are kept as source text.
impl<'a> Parser<'a> {
    // ========================================================================
    // Types
    // ========================================================================

    fn parse_type(&mut self) -> Result<Spanned<Type>, CompileError> {
        let start = self.current_span();
        let ty = match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                let base = if self.match_punct(PunctuationId::Dot) {
                    let member = self.identifier()?;
                    Type::Qualified { package: name, name: member }
                } else {
                    Type::Name(name)
                };
                if self.check_punct(PunctuationId::LBracket) {
                    let base = Spanned::new(base, self.span_from(start));
                    let args = self.type_args()?;
                    Type::Generic {
                        base: Box::new(base),
                        args,
                    }
                } else {
                    base
                }
            }
            TokenKind::Punctuation(PunctuationId::Star) => {
                self.advance();
                Type::Pointer(Box::new(self.parse_type()?))
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                self.advance();
                if self.match_punct(PunctuationId::RBracket) {
                    Type::Slice(Box::new(self.parse_type()?))
                } else {
                    let len = self.array_length()?;
                    Type::Array {
                        len,
                        elem: Box::new(self.parse_type()?),
                    }
                }
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect_punct(PunctuationId::RParen, "Expected ')' after parenthesized type")?;
                inner.node
            }
            TokenKind::Punctuation(PunctuationId::Arrow) => {
                self.advance();
                if !self.match_keyword(KeywordId::Chan) {
                    return Err(self.unexpected("Expected 'chan' after '<-'"));
                }
                Type::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(self.parse_type()?),
                }
            }
            TokenKind::Keyword(KeywordId::Chan) => {
                self.advance();
                let dir = if self.match_punct(PunctuationId::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Type::Chan {
                    dir,
                    elem: Box::new(self.parse_type()?),
                }
            }
            TokenKind::Keyword(KeywordId::Map) => {
                self.advance();
                self.expect_punct(PunctuationId::LBracket, "Expected '[' after 'map'")?;
                let key = self.parse_type()?;
                self.expect_punct(PunctuationId::RBracket, "Expected ']' after map key type")?;
                Type::Map {
                    key: Box::new(key),
                    value: Box::new(self.parse_type()?),
                }
            }
            TokenKind::Keyword(KeywordId::Func) => {
                self.advance();
                Type::Func(self.signature()?)
            }
            TokenKind::Keyword(KeywordId::Struct) => {
                self.advance();
                Type::Struct(self.struct_fields()?)
            }
            TokenKind::Keyword(KeywordId::Interface) => {
                self.advance();
                Type::Interface(self.interface_elems()?)
            }
            _ => return Err(self.unexpected("Expected type")),
        };
        Ok(Spanned::new(ty, self.span_from(start)))
    }

    /// Parse `[A, B]` after a generic type name.
    fn type_args(&mut self) -> Result<Vec<Spanned<Type>>, CompileError> {
        self.expect_punct(PunctuationId::LBracket, "Expected '['")?;
        let mut args = Vec::new();
        while !self.check_punct(PunctuationId::RBracket) {
            args.push(self.parse_type()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RBracket, "Expected ']' to close type arguments")?;
        if args.is_empty() {
            return Err(CompileError::syntax(
                "Expected at least one type argument".to_string(),
                self.previous_span(),
            ));
        }
        Ok(args)
    }

    /// Collect the tokens of an array length expression (after `[`, through `]`) as source text.
    fn array_length(&mut self) -> Result<String, CompileError> {
        let mut len = String::new();
        let mut depth = 0usize;
        loop {
            match &self.peek().kind {
                TokenKind::Punctuation(PunctuationId::RBracket) if depth == 0 => {
                    self.advance();
                    break;
                }
                TokenKind::Eof | TokenKind::Punctuation(PunctuationId::Semicolon) => {
                    return Err(self.unexpected("Expected ']' after array length"));
                }
                kind => {
                    match kind.punctuation_id() {
                        Some(PunctuationId::LParen | PunctuationId::LBracket) => depth += 1,
                        Some(PunctuationId::RParen | PunctuationId::RBracket) => depth = depth.saturating_sub(1),
                        _ => {}
                    }
                    len.push_str(&token_text(kind));
                    self.advance();
                }
            }
        }
        if len.is_empty() {
            return Err(CompileError::syntax("Expected array length".to_string(), self.previous_span()));
        }
        Ok(len)
    }

    /// Parse a constraint: a single type or a union of `~`-able terms.
    fn parse_constraint(&mut self) -> Result<Spanned<Type>, CompileError> {
        let start = self.current_span();
        let mut terms = vec![self.type_term()?];
        while self.match_punct(PunctuationId::Pipe) {
            terms.push(self.type_term()?);
        }
        if terms.len() == 1 && !terms[0].tilde {
            if let Some(term) = terms.pop() {
                return Ok(term.ty);
            }
        }
        Ok(Spanned::new(Type::Union(terms), self.span_from(start)))
    }

    fn type_term(&mut self) -> Result<TypeTerm, CompileError> {
        let tilde = self.match_punct(PunctuationId::Tilde);
        let ty = self.parse_type()?;
        Ok(TypeTerm { tilde, ty })
    }

    // ========================================================================
    // Signatures
    // ========================================================================

    /// Parse `(params) results`.
    fn signature(&mut self) -> Result<Signature, CompileError> {
        let params = self.param_list()?;
        let results = if self.check_punct(PunctuationId::LParen) {
            self.param_list()?
        } else if self.starts_type_at(0) {
            let ty = self.parse_type()?;
            vec![ParamField {
                names: Vec::new(),
                ty,
                variadic: false,
            }]
        } else {
            Vec::new()
        };
        Ok(Signature { params, results })
    }

    /// Parse a parenthesized parameter (or result) list and apply Go's grouping rule.
    fn param_list(&mut self) -> Result<Vec<ParamField>, CompileError> {
        let open = self.current_span();
        self.expect_punct(PunctuationId::LParen, "Expected '('")?;
        let mut raw = Vec::new();
        while !self.check_punct(PunctuationId::RParen) {
            raw.push(self.raw_param()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RParen, "Expected ')' to close parameter list")?;
        group_params(raw).map_err(|msg| CompileError::syntax(msg, self.span_from(open)))
    }

    fn raw_param(&mut self) -> Result<RawParam, CompileError> {
        if self.check_ident() && self.param_is_named() {
            let name = self.identifier()?;
            let variadic = self.match_punct(PunctuationId::Ellipsis);
            let ty = self.parse_type()?;
            return Ok(RawParam {
                name: Some(name),
                ty,
                variadic,
            });
        }
        let variadic = self.match_punct(PunctuationId::Ellipsis);
        let ty = self.parse_type()?;
        Ok(RawParam {
            name: None,
            ty,
            variadic,
        })
    }

    /// With an identifier at the cursor, decide whether it names a parameter whose type follows.
    ///
    /// `a []int` and `a [4]int` are named; `List[int]` is an unnamed instantiated type, recognised by what follows
    /// its closing bracket.
    fn param_is_named(&self) -> bool {
        match &self.peek_at(1).kind {
            TokenKind::Punctuation(PunctuationId::Ellipsis) => true,
            TokenKind::Punctuation(PunctuationId::Dot) => false,
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                if self.peek_at(2).kind.is_punctuation(PunctuationId::RBracket) {
                    return true;
                }
                let after = self.offset_after_brackets(1);
                self.starts_type_at(after)
            }
            _ => self.starts_type_at(1),
        }
    }

    // ========================================================================
    // Struct and interface bodies
    // ========================================================================

    fn struct_fields(&mut self) -> Result<Vec<StructField>, CompileError> {
        self.expect_punct(PunctuationId::LBrace, "Expected '{' after 'struct'")?;
        let mut fields = Vec::new();
        self.skip_semicolons();
        while !self.check_punct(PunctuationId::RBrace) {
            if self.is_at_end() {
                return Err(self.unexpected("Expected '}' to close struct"));
            }
            fields.push(self.struct_field()?);
            self.expect_semi("struct field")?;
            self.skip_semicolons();
        }
        self.advance();
        Ok(fields)
    }

    fn struct_field(&mut self) -> Result<StructField, CompileError> {
        let names = if self.check_ident() && !self.field_is_embedded() {
            self.identifier_list()?
        } else {
            Vec::new()
        };
        let ty = self.parse_type()?;
        let tag = match &self.peek().kind {
            TokenKind::String(tag) => {
                let tag = tag.clone();
                self.advance();
                Some(tag)
            }
            _ => None,
        };
        Ok(StructField { names, ty, tag })
    }

    /// With an identifier at the cursor, decide whether the field is embedded (`T`, `pkg.T`, `T[int]`).
    fn field_is_embedded(&self) -> bool {
        match &self.peek_at(1).kind {
            TokenKind::Punctuation(PunctuationId::Dot | PunctuationId::Semicolon | PunctuationId::RBrace)
            | TokenKind::String(_) => true,
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                if self.peek_at(2).kind.is_punctuation(PunctuationId::RBracket) {
                    return false;
                }
                let after = self.offset_after_brackets(1);
                !self.starts_type_at(after)
            }
            _ => false,
        }
    }

    fn interface_elems(&mut self) -> Result<Vec<InterfaceElem>, CompileError> {
        self.expect_punct(PunctuationId::LBrace, "Expected '{' after 'interface'")?;
        let mut elems = Vec::new();
        self.skip_semicolons();
        while !self.check_punct(PunctuationId::RBrace) {
            if self.is_at_end() {
                return Err(self.unexpected("Expected '}' to close interface"));
            }
            let elem = if self.check_ident() && self.peek_at(1).kind.is_punctuation(PunctuationId::LParen) {
                let name = self.identifier_spanned()?;
                let signature = self.signature()?;
                InterfaceElem::Method { name, signature }
            } else {
                InterfaceElem::Embedded(self.parse_constraint()?)
            };
            elems.push(elem);
            self.expect_semi("interface element")?;
            self.skip_semicolons();
        }
        self.advance();
        Ok(elems)
    }
}

/// Apply Go's parameter grouping rule to a raw entry list.
fn group_params(raw: Vec<RawParam>) -> Result<Vec<ParamField>, String> {
    if raw.iter().all(|p| p.name.is_none()) {
        return Ok(raw
            .into_iter()
            .map(|p| ParamField {
                names: Vec::new(),
                ty: p.ty,
                variadic: p.variadic,
            })
            .collect());
    }

    let mut fields = Vec::new();
    let mut pending = Vec::new();
    for param in raw {
        match (param.name, param.ty.node) {
            (Some(name), node) => {
                pending.push(name);
                fields.push(ParamField {
                    names: std::mem::take(&mut pending),
                    ty: Spanned::new(node, param.ty.span),
                    variadic: param.variadic,
                });
            }
            (None, Type::Name(name)) if !param.variadic => pending.push(name),
            (None, _) => return Err("Mixed named and unnamed parameters".to_string()),
        }
    }
    if !pending.is_empty() {
        return Err("Mixed named and unnamed parameters".to_string());
    }
    if fields.iter().rev().skip(1).any(|f| f.variadic) {
        return Err("Only the final parameter can be variadic".to_string());
    }
    Ok(fields)
}
