use napi_derive::napi;

use crate::model::FieldInfo;
use crate::{resolve_option_source, translate_with_options, TranslateOptions};

#[napi(js_name = "translateDvjsQuery")]
pub fn translate_dvjs_query(
    source: String,
    options_json: Option<String>,
) -> napi::Result<Option<String>> {
    let options = parse_options(options_json)?;
    Ok(translate_with_options(&source, &options)
        .ok()
        .map(|translation| translation.query))
}

#[napi(js_name = "resolveFieldOptionsJson")]
pub fn resolve_field_options_json(
    field_json: String,
    options_json: Option<String>,
) -> napi::Result<String> {
    let field: FieldInfo = serde_json::from_str(&field_json)
        .map_err(|err| napi::Error::from_reason(format!("invalid field JSON: {err}")))?;
    let options = parse_options(options_json)?;
    let source = resolve_option_source(&field, &options)
        .map_err(|err| napi::Error::from_reason(err.to_string()))?;

    serde_json::to_string(&source).map_err(|err| napi::Error::from_reason(err.to_string()))
}

fn parse_options(options_json: Option<String>) -> napi::Result<TranslateOptions> {
    match options_json {
        Some(json) => serde_json::from_str(&json)
            .map_err(|err| napi::Error::from_reason(format!("invalid options JSON: {err}"))),
        None => Ok(TranslateOptions::default()),
    }
}
