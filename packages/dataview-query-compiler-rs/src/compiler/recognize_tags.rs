/// Matches `["#a", "#b"].every(tag => <expr>.includes(tag))` and its `.some`
/// form, yielding one `contains(file.tags, ...)` per listed tag. Declines
/// with `None` so the caller can try the general predicate shapes.
fn recognize_tag_membership(expr: &Expr) -> Option<Predicate> {
    let Expr::Call(call) = unparen(expr) else {
        return None;
    };
    let (receiver, quantifier) = call_target(call).and_then(member_name)?;
    if quantifier != "every" && quantifier != "some" {
        return None;
    }

    let Expr::Array(array) = receiver else {
        return None;
    };
    let tags = array
        .elems
        .iter()
        .map(|element| match element {
            Some(ExprOrSpread { spread: None, expr }) => string_value(expr),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    if tags.is_empty() {
        return None;
    }

    let [callback] = call.args.as_slice() else {
        return None;
    };
    if callback.spread.is_some() {
        return None;
    }
    let (iteration_var, body) = single_param_arrow(&callback.expr)?;
    let Expr::Call(includes) = body else {
        return None;
    };
    let (_, method) = call_target(includes).and_then(member_name)?;
    let [needle] = includes.args.as_slice() else {
        return None;
    };
    if method != "includes"
        || needle.spread.is_some()
        || identifier(&needle.expr) != Some(iteration_var)
    {
        return None;
    }

    let terms = tags
        .into_iter()
        .map(|tag| Predicate::Contains {
            haystack: Operand::Field("file.tags".to_string()),
            needle: Operand::Literal(quote_string(tag)),
        })
        .collect();

    Some(if quantifier == "every" {
        Predicate::And(terms)
    } else {
        Predicate::Or(terms)
    })
}
