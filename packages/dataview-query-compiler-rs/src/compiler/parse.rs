const MAX_NESTING_DEPTH: usize = 64;
const MAX_TOKENS: usize = 2048;

/// A page query parsed by swc. Its positions are offsets into a source map,
/// so `start_pos` maps them back to byte offsets in `text`.
struct ParsedSource<'a> {
    text: &'a str,
    start_pos: BytePos,
    expr: Box<Expr>,
}

impl ParsedSource<'_> {
    fn offset(&self, pos: BytePos) -> usize {
        pos.0.saturating_sub(self.start_pos.0) as usize
    }

    fn slice(&self, span: Span) -> &str {
        self.text
            .get(self.offset(span.lo())..self.offset(span.hi()))
            .unwrap_or_default()
    }
}

/// Parses `source` as a script holding exactly one expression statement.
fn parse_source(source: &str) -> Result<ParsedSource<'_>, TranslateError> {
    let source_map = SourceMap::default();
    let file = source_map.new_source_file(FileName::Anon, source.to_string());
    let start_pos = file.start_pos;

    check_nesting(&file)?;

    let mut recovered = Vec::new();
    let script = parse_file_as_script(
        &file,
        Syntax::default(),
        EsVersion::latest(),
        None,
        &mut recovered,
    )
    .map_err(|error| syntax_error(error, start_pos))?;
    if let Some(error) = recovered.into_iter().next() {
        return Err(syntax_error(error, start_pos));
    }

    let mut statements = script.body.into_iter();
    let expr = match (statements.next(), statements.next()) {
        (Some(Stmt::Expr(statement)), None) => statement.expr,
        (None, _) => {
            return Err(TranslateError::Syntax {
                offset: source.len(),
                message: "expected an expression".to_string(),
            })
        }
        _ => {
            return Err(TranslateError::UnsupportedShape(
                "expected a single expression".to_string(),
            ))
        }
    };

    Ok(ParsedSource {
        text: source,
        start_pos,
        expr,
    })
}

fn syntax_error(error: swc_ecma_parser::error::Error, start_pos: BytePos) -> TranslateError {
    TranslateError::Syntax {
        offset: error.span().lo().0.saturating_sub(start_pos.0) as usize,
        message: error.kind().msg().into_owned(),
    }
}

/// Token pass ahead of the parse. The parser, the recognizers and the drop
/// of the finished tree all recurse once per nesting level, so input that
/// would nest too deeply is refused here. Closing a bracket restores the
/// depth it opened at; prefix operators, arrows, ternaries, assignments and
/// keywords only add to it.
fn check_nesting(file: &SourceFile) -> Result<(), TranslateError> {
    let lexer = Lexer::new(
        Syntax::default(),
        EsVersion::latest(),
        StringInput::from(file),
        None,
    );
    let mut open = Vec::new();
    let mut depth = 0usize;

    for (index, TokenAndSpan { token, span, .. }) in lexer.enumerate() {
        let offset = span.lo().0.saturating_sub(file.start_pos.0) as usize;
        if index >= MAX_TOKENS {
            return Err(TranslateError::Syntax {
                offset,
                message: format!("expression is longer than {MAX_TOKENS} tokens"),
            });
        }

        match token {
            Token::LParen | Token::LBracket | Token::LBrace | Token::DollarLBrace => {
                open.push(depth);
                depth += 1;
            }
            Token::RParen | Token::RBracket | Token::RBrace => {
                depth = open.pop().unwrap_or(0);
            }
            Token::Bang
            | Token::Tilde
            | Token::Arrow
            | Token::QuestionMark
            | Token::PlusPlus
            | Token::MinusMinus
            | Token::AssignOp(_)
            | Token::BinOp(BinOpToken::Add | BinOpToken::Sub | BinOpToken::Exp)
            | Token::Word(Word::Keyword(_)) => depth += 1,
            _ => {}
        }

        if depth > MAX_NESTING_DEPTH {
            return Err(TranslateError::Syntax {
                offset,
                message: format!("expression nests deeper than {MAX_NESTING_DEPTH} levels"),
            });
        }
    }

    Ok(())
}
