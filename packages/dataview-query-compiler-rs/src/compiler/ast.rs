/// Strips any number of wrapping parentheses.
fn unparen(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    expr
}

/// Callee of a plain call; `None` for `super(...)` and `import(...)`.
fn call_target(call: &CallExpr) -> Option<&Expr> {
    match &call.callee {
        Callee::Expr(callee) => Some(unparen(callee)),
        _ => None,
    }
}

/// `object.name` and `object["name"]` as `(object, "name")`.
fn member_name(expr: &Expr) -> Option<(&Expr, &str)> {
    let Expr::Member(member) = unparen(expr) else {
        return None;
    };
    let name = match &member.prop {
        MemberProp::Ident(ident) => &*ident.sym,
        MemberProp::Computed(computed) => string_value(&computed.expr)?,
        _ => return None,
    };
    Some((unparen(&member.obj), name))
}

fn identifier(expr: &Expr) -> Option<&str> {
    match unparen(expr) {
        Expr::Ident(ident) => Some(&*ident.sym),
        _ => None,
    }
}

/// Cooked text of a template literal without substitutions.
fn template_text(tpl: &Tpl) -> Option<&str> {
    match tpl.quasis.as_slice() {
        [quasi] if tpl.exprs.is_empty() => quasi.cooked.as_deref(),
        _ => None,
    }
}

/// Decoded value of a string literal or a plain template literal.
fn string_value(expr: &Expr) -> Option<&str> {
    match unparen(expr) {
        Expr::Lit(Lit::Str(value)) => Some(&*value.value),
        Expr::Tpl(tpl) => template_text(tpl),
        _ => None,
    }
}

/// `p => body`, `(p) => body` and `(p) => { return body; }`.
fn single_param_arrow(expr: &Expr) -> Option<(&str, &Expr)> {
    let Expr::Arrow(arrow) = unparen(expr) else {
        return None;
    };
    if arrow.is_async || arrow.is_generator {
        return None;
    }
    let [Pat::Ident(param)] = arrow.params.as_slice() else {
        return None;
    };

    let body = match &*arrow.body {
        BlockStmtOrExpr::Expr(body) => body.as_ref(),
        BlockStmtOrExpr::BlockStmt(block) => match block.stmts.as_slice() {
            [Stmt::Return(ReturnStmt {
                arg: Some(body), ..
            })] => body.as_ref(),
            _ => return None,
        },
    };
    Some((&*param.id.sym, unparen(body)))
}

fn describe(expr: &Expr) -> &'static str {
    match expr {
        Expr::Ident(_) => "identifier",
        Expr::Lit(Lit::Str(_)) | Expr::Tpl(_) => "string literal",
        Expr::Lit(Lit::Num(_)) => "number literal",
        Expr::Lit(_) => "literal",
        Expr::Array(_) => "array literal",
        Expr::Object(_) => "object literal",
        Expr::Member(_) => "member access",
        Expr::Call(_) => "call",
        Expr::Arrow(_) | Expr::Fn(_) => "function",
        Expr::Unary(_) => "unary expression",
        Expr::Bin(_) => "binary expression",
        Expr::Paren(_) => "parenthesized expression",
        _ => "expression",
    }
}
