/// Lowers a dataviewjs page query to DQL with the default options.
/// `None` means the expression is outside the supported dialect.
pub fn translate(source: &str) -> Option<String> {
    translate_with_options(source, &TranslateOptions::default())
        .ok()
        .map(|translation| translation.query)
}

pub fn translate_with_options(
    source: &str,
    options: &TranslateOptions,
) -> Result<Translation, TranslateError> {
    let result =
        extract_method_chain(source, options).and_then(|chain| build_query(chain, options));
    if let Err(error) = &result {
        debug!(source, %error, "dataviewjs query is not translatable");
    }
    result
}

fn build_query(
    chain: MethodChain,
    options: &TranslateOptions,
) -> Result<Translation, TranslateError> {
    let mut ir = QueryIr::default();
    let mut messages = Vec::new();

    let root = chain.source.trim();
    if !root.is_empty() {
        if root.starts_with(options.tag_sigil) {
            ir.wheres.push(contains_tag(root));
        } else {
            ir.from = root.to_string();
        }
    }

    for call in &chain.methods {
        match call.method.as_str() {
            "where" | "filter" => ir.wheres.push(recognize_predicate(sole_argument(call)?)?),
            "map" => ir.select = Some(recognize_key_selector(sole_argument(call)?)?),
            "flatMap" => ir.flattens.push(recognize_flat_map_selector(sole_argument(call)?)?),
            "sort" => ir.sorts.push(sort_key(call)?),
            "sortDesc" => ir.sorts.push(SortKey {
                field: recognize_key_selector(sole_argument(call)?)?,
                direction: SortDirection::Desc,
            }),
            "limit" => match call.args.first().and_then(|arg| limit_value(&arg.text)) {
                Some(limit) => ir.limit = Some(limit),
                None => {
                    let text = call.args.first().map(|arg| arg.text.as_str()).unwrap_or("");
                    debug!(argument = text, "ignoring limit that is not a finite number");
                    messages.push(TranslateMessage::warning(format!(
                        "limit argument '{text}' is not a finite number; no LIMIT emitted"
                    )));
                }
            },
            other => return Err(TranslateError::UnsupportedMethod(other.to_string())),
        }
    }

    Ok(Translation {
        query: ir.to_query_string(),
        ir,
        chain,
        messages,
    })
}

fn sole_argument(call: &MethodCall) -> Result<&MethodArg, TranslateError> {
    match call.args.as_slice() {
        [arg] => Ok(arg),
        args => Err(TranslateError::UnsupportedShape(format!(
            "'{}' takes exactly one argument, found {}",
            call.method,
            args.len()
        ))),
    }
}

/// `sort(key)` or `sort(key, "asc" | "desc")`.
fn sort_key(call: &MethodCall) -> Result<SortKey, TranslateError> {
    let (selector, direction) = match call.args.as_slice() {
        [selector] => (selector, SortDirection::Asc),
        [selector, direction] => {
            let direction = match direction.text.as_str() {
                "asc" => SortDirection::Asc,
                "desc" => SortDirection::Desc,
                other => {
                    return Err(TranslateError::UnsupportedShape(format!(
                        "sort direction must be \"asc\" or \"desc\", found '{other}'"
                    )))
                }
            };
            (selector, direction)
        }
        args => {
            return Err(TranslateError::UnsupportedShape(format!(
                "'sort' takes a key selector and an optional direction, found {} arguments",
                args.len()
            )))
        }
    };

    Ok(SortKey {
        field: recognize_key_selector(selector)?,
        direction,
    })
}

/// Non-negative finite numbers, truncated toward zero.
fn limit_value(text: &str) -> Option<u64> {
    parse_js_number(text)
        .filter(|value| *value >= 0.0)
        .map(|value| value.trunc() as u64)
}
