/// Parses a page query such as `dv.pages("#tag").where(p => ...).limit(5)`
/// into its root source and the calls applied to it, left to right.
pub fn extract_method_chain(
    source: &str,
    options: &TranslateOptions,
) -> Result<MethodChain, TranslateError> {
    let parsed = parse_source(source)?;
    chain_from_expr(&parsed, options)
}

fn chain_from_expr(
    parsed: &ParsedSource<'_>,
    options: &TranslateOptions,
) -> Result<MethodChain, TranslateError> {
    let root = unparen(&parsed.expr);
    if !matches!(root, Expr::Call(_)) {
        return Err(TranslateError::UnsupportedShape(format!(
            "expected a method call chain, found {}",
            describe(root)
        )));
    }

    let mut methods = Vec::new();
    let mut chain_source = String::new();
    let mut current = root;

    while let Expr::Call(call) = current {
        let (object, method) = call_target(call).and_then(member_name).ok_or_else(|| {
            TranslateError::UnsupportedShape(format!(
                "call at offset {} is not a method call",
                parsed.offset(call.span.lo())
            ))
        })?;

        let args = call
            .args
            .iter()
            .map(|arg| method_arg(arg, parsed))
            .collect::<Result<Vec<_>, _>>()?;
        let innermost = !matches!(object, Expr::Call(_));

        if method == options.root_accessor {
            if !innermost {
                return Err(TranslateError::UnsupportedMethod(format!(
                    "'{method}' may only open the chain"
                )));
            }
            chain_source = args.first().map(|arg| arg.text.clone()).unwrap_or_default();
        } else {
            methods.push(MethodCall {
                method: method.to_string(),
                args,
            });
        }

        if innermost {
            break;
        }
        current = object;
    }

    methods.reverse();
    Ok(MethodChain {
        source: chain_source,
        methods,
    })
}

/// Spread arguments are unwrapped to their operand.
fn method_arg(
    arg: &ExprOrSpread,
    parsed: &ParsedSource<'_>,
) -> Result<MethodArg, TranslateError> {
    let expr = unparen(&arg.expr);
    let text = match expr {
        Expr::Lit(Lit::Str(value)) => value.value.to_string(),
        Expr::Lit(Lit::Num(number)) => format_js_number(number.value),
        Expr::Tpl(tpl) => template_text(tpl).map(str::to_string).ok_or_else(|| {
            TranslateError::UnsupportedShape(
                "template substitutions are not supported".to_string(),
            )
        })?,
        _ => parsed.slice(expr.span()).to_string(),
    };

    Ok(MethodArg {
        text,
        node: Some(Box::new(expr.clone())),
    })
}

impl MethodArg {
    /// The parsed argument, re-parsed from `text` when it was not kept.
    fn expr(&self) -> Result<Cow<'_, Expr>, TranslateError> {
        match &self.node {
            Some(node) => Ok(Cow::Borrowed(node.as_ref())),
            None => parse_source(&self.text).map(|parsed| Cow::Owned(*parsed.expr)),
        }
    }
}
