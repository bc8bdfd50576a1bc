/// Translates a `where` / `filter` callback into a where-clause fragment.
fn recognize_predicate(arg: &MethodArg) -> Result<String, TranslateError> {
    let expr = arg.expr()?;
    let (param, body) = single_param_arrow(&expr).ok_or_else(|| {
        TranslateError::UnsupportedShape(format!(
            "predicate must be a single-parameter arrow function: {}",
            arg.text
        ))
    })?;

    Ok(translate_condition(body, param)?.to_fragment())
}

fn translate_condition(expr: &Expr, param: &str) -> Result<Predicate, TranslateError> {
    let expr = unparen(expr);
    if let Some(tags) = recognize_tag_membership(expr) {
        return Ok(tags);
    }

    match expr {
        Expr::Bin(bin) if matches!(bin.op, BinaryOp::LogicalAnd | BinaryOp::LogicalOr) => {
            let terms = logical_operands(bin)
                .into_iter()
                .map(|term| translate_condition(term, param))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(if bin.op == BinaryOp::LogicalAnd {
                Predicate::all(terms)
            } else {
                Predicate::any(terms)
            })
        }
        Expr::Unary(unary) if unary.op == UnaryOp::Bang => Ok(Predicate::Not(Box::new(
            translate_condition(&unary.arg, param)?,
        ))),
        Expr::Bin(bin) => {
            let op = comparison_operator(bin.op).ok_or_else(|| {
                TranslateError::UnsupportedShape(format!(
                    "operator '{:?}' is not a comparison",
                    bin.op
                ))
            })?;
            Ok(Predicate::Compare {
                left: translate_operand(&bin.left, param)?,
                op,
                right: translate_operand(&bin.right, param)?,
            })
        }
        Expr::Call(call) => {
            let (haystack, method) = call_target(call).and_then(member_name).ok_or_else(|| {
                TranslateError::UnsupportedShape("only method calls are supported".to_string())
            })?;
            match (method, call.args.as_slice()) {
                ("includes", [needle]) if needle.spread.is_none() => Ok(Predicate::Contains {
                    haystack: translate_operand(haystack, param)?,
                    needle: translate_operand(&needle.expr, param)?,
                }),
                _ => Err(TranslateError::UnsupportedShape(format!(
                    "method '{method}' with {} argument(s) in predicate",
                    call.args.len()
                ))),
            }
        }
        Expr::Member(_) | Expr::Lit(Lit::Bool(_)) => {
            Ok(Predicate::Truthy(translate_operand(expr, param)?))
        }
        other => Err(TranslateError::UnsupportedShape(format!(
            "{} is not a condition",
            describe(other)
        ))),
    }
}

/// Operands of a run of one logical operator, left to right. swc nests such
/// runs down the left side, which is walked with a loop.
fn logical_operands(bin: &BinExpr) -> Vec<&Expr> {
    let mut operands = vec![bin.right.as_ref()];
    let mut left = unparen(&bin.left);
    while let Expr::Bin(inner) = left {
        if inner.op != bin.op {
            break;
        }
        operands.push(inner.right.as_ref());
        left = unparen(&inner.left);
    }
    operands.push(left);
    operands.reverse();
    operands
}

fn comparison_operator(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::EqEqEq | BinaryOp::EqEq => Some("="),
        BinaryOp::NotEqEq | BinaryOp::NotEq => Some("!="),
        BinaryOp::Lt => Some("<"),
        BinaryOp::LtEq => Some("<="),
        BinaryOp::Gt => Some(">"),
        BinaryOp::GtEq => Some(">="),
        _ => None,
    }
}

fn translate_operand(expr: &Expr, param: &str) -> Result<Operand, TranslateError> {
    let expr = unparen(expr);
    if let Some(value) = string_value(expr) {
        return Ok(Operand::Literal(quote_string(value)));
    }

    match expr {
        Expr::Member(_) => field_path(expr, param).map(Operand::Field).ok_or_else(|| {
            TranslateError::UnsupportedShape(format!(
                "member access is not a field of '{param}'"
            ))
        }),
        Expr::Lit(Lit::Num(number)) => Ok(Operand::Literal(format_dql_number(number.value))),
        Expr::Unary(unary) if unary.op == UnaryOp::Minus => match unparen(&unary.arg) {
            Expr::Lit(Lit::Num(number)) => {
                Ok(Operand::Literal(format_dql_number(-number.value)))
            }
            _ => Err(TranslateError::UnsupportedShape(
                "negation of a non-literal".to_string(),
            )),
        },
        Expr::Lit(Lit::Bool(value)) => Ok(Operand::Literal(value.value.to_string())),
        Expr::Lit(Lit::Null(_)) => Ok(Operand::Literal("null".to_string())),
        Expr::Ident(ident) if &*ident.sym == "undefined" => {
            Ok(Operand::Literal("null".to_string()))
        }
        other => Err(TranslateError::UnsupportedShape(format!(
            "{} is not a field or literal",
            describe(other)
        ))),
    }
}

/// `param.a.b` → `a.b`. Every segment must be a plain word.
fn field_path(expr: &Expr, param: &str) -> Option<String> {
    let mut segments = Vec::new();
    let mut current = unparen(expr);
    while let Some((object, name)) = member_name(current) {
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return None;
        }
        segments.push(name);
        current = object;
    }

    if segments.is_empty() || identifier(current) != Some(param) {
        return None;
    }
    segments.reverse();
    Some(segments.join("."))
}
