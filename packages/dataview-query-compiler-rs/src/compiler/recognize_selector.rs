/// `p => p.file.name` → `file.name`, as used by `map`, `sort` and `sortDesc`.
fn recognize_key_selector(arg: &MethodArg) -> Result<String, TranslateError> {
    selector_path(arg)
}

/// `p => p.tags` → `tags`. Only a single bare field can be flattened.
fn recognize_flat_map_selector(arg: &MethodArg) -> Result<String, TranslateError> {
    let path = selector_path(arg)?;
    if path.contains('.') {
        return Err(TranslateError::UnsupportedShape(format!(
            "flatMap selector must name a single field, found '{path}'"
        )));
    }
    Ok(path)
}

fn selector_path(arg: &MethodArg) -> Result<String, TranslateError> {
    let expr = arg.expr()?;
    let path = single_param_arrow(&expr).and_then(|(param, body)| field_path(body, param));

    path.ok_or_else(|| {
        TranslateError::UnsupportedShape(format!(
            "expected a field selector like `p => p.field`, found `{}`",
            arg.text
        ))
    })
}
