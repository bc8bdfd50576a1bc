const MAX_NUMBER_OPTIONS: usize = 10_000;

/// Fields whose candidate values can be listed without running a query.
pub fn is_supported_field(field: &FieldInfo) -> bool {
    matches!(field.field_type, FieldType::Select | FieldType::Multi)
        && matches!(
            field.options.get("sourceType").and_then(Value::as_str),
            Some("ValuesList" | "ValuesListNotePath")
        )
}

/// Works out where the candidate values of `field` come from. Query-backed
/// sources are translated here; running the query is up to the caller.
pub fn resolve_option_source(
    field: &FieldInfo,
    options: &TranslateOptions,
) -> Result<OptionSource, FieldOptionsError> {
    match field.field_type {
        FieldType::Select | FieldType::Cycle | FieldType::Multi => {
            select_like_source(field, options)
        }
        FieldType::Number => number_range(field).map(|values| OptionSource::Values { values }),
        FieldType::File | FieldType::MultiFile => {
            let source = required_str(field, "dvQueryString")?;
            Ok(OptionSource::Query {
                query: translate_field_query(field, source, options)?,
                projection: QueryProjection::FilePaths,
            })
        }
        _ => Ok(OptionSource::Unsupported),
    }
}

/// Values stored in a note, one per line.
pub fn split_note_values(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}

fn select_like_source(
    field: &FieldInfo,
    options: &TranslateOptions,
) -> Result<OptionSource, FieldOptionsError> {
    let settings = field_options(field)?;
    let source_type = settings
        .get("sourceType")
        .and_then(Value::as_str)
        .ok_or_else(|| FieldOptionsError::MissingSourceType {
            field: field.name.clone(),
        })?;

    match source_type {
        "ValuesList" => {
            let values = settings
                .get("valuesList")
                .and_then(Value::as_object)
                .map(js_object_values)
                .unwrap_or_default();
            Ok(OptionSource::Values { values })
        }
        "ValuesFromDVQuery" => {
            let source = required_str(field, "valuesFromDVQuery")?;
            Ok(OptionSource::Query {
                query: translate_field_query(field, source, options)?,
                projection: QueryProjection::Values,
            })
        }
        "ValuesListNotePath" => Ok(OptionSource::NotePath {
            path: required_str(field, "valuesListNotePath")?.to_string(),
        }),
        other => Err(FieldOptionsError::UnknownSourceType {
            field: field.name.clone(),
            source_type: other.to_string(),
        }),
    }
}

fn field_options(field: &FieldInfo) -> Result<&Map<String, Value>, FieldOptionsError> {
    field
        .options
        .as_object()
        .ok_or_else(|| FieldOptionsError::MissingOptions {
            field: field.name.clone(),
        })
}

fn required_str<'a>(field: &'a FieldInfo, key: &str) -> Result<&'a str, FieldOptionsError> {
    field
        .options
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| FieldOptionsError::MissingOption {
            field: field.name.clone(),
            key: key.to_string(),
        })
}

fn translate_field_query(
    field: &FieldInfo,
    source: &str,
    options: &TranslateOptions,
) -> Result<String, FieldOptionsError> {
    translate_with_options(source, options)
        .map(|translation| translation.query)
        .map_err(|error| FieldOptionsError::Untranslatable {
            field: field.name.clone(),
            error,
        })
}

fn number_range(field: &FieldInfo) -> Result<Vec<String>, FieldOptionsError> {
    let invalid = |reason: &str| FieldOptionsError::InvalidNumberRange {
        field: field.name.clone(),
        reason: reason.to_string(),
    };
    let number = |key: &str| field.options.get(key).and_then(Value::as_f64);

    let (Some(min), Some(max), Some(step)) = (number("min"), number("max"), number("step")) else {
        return Err(invalid("min, max and step must all be numbers"));
    };
    if step <= 0.0 {
        return Err(invalid("step must be positive"));
    }
    if min > max {
        return Err(invalid("min is greater than max"));
    }

    let count = ((max - min) / step).floor() + 1.0;
    if count > MAX_NUMBER_OPTIONS as f64 {
        return Err(invalid("range produces too many values"));
    }

    let mut values = Vec::with_capacity(count as usize);
    let mut value = min;
    for _ in 0..count as usize {
        values.push(format_js_number(value));
        value += step;
    }
    Ok(values)
}

/// `Object.values` order: array-index keys ascending, then the rest in
/// insertion order.
fn js_object_values(map: &Map<String, Value>) -> Vec<String> {
    let mut indexed = Vec::new();
    let mut named = Vec::new();
    for (key, value) in map {
        match array_index(key) {
            Some(index) => indexed.push((index, value)),
            None => named.push(value),
        }
    }
    indexed.sort_by_key(|(index, _)| *index);

    indexed
        .into_iter()
        .map(|(_, value)| value)
        .chain(named)
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect()
}

fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|index| *index != u32::MAX)
}
