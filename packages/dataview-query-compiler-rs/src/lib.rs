use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashMap;
use swc_common::{BytePos, FileName, SourceFile, SourceMap, Span, Spanned};
use swc_ecma_ast::{
    BinExpr, BinaryOp, BlockStmtOrExpr, CallExpr, Callee, EsVersion, Expr, ExprOrSpread, Lit,
    MemberProp, Pat, ReturnStmt, Stmt, Tpl, UnaryOp,
};
use swc_ecma_parser::lexer::Lexer;
use swc_ecma_parser::token::{BinOpToken, Token, TokenAndSpan, Word};
use swc_ecma_parser::{parse_file_as_script, StringInput, Syntax};
use thiserror::Error;
use tracing::debug;

pub mod model;
#[cfg(feature = "node")]
mod node_bindings;

use model::{
    FieldInfo, FieldType, MethodArg, MethodCall, MethodChain, OptionSource, QueryIr,
    QueryProjection, SortDirection, SortKey,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslateOptions {
    /// Method that opens a chain and names its page source, `dv.pages(...)`.
    pub root_accessor: String,
    pub tag_sigil: char,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            root_accessor: "pages".to_string(),
            tag_sigil: '#',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Severity {
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslateMessage {
    pub severity: Severity,
    pub message: String,
}

impl TranslateMessage {
    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Translation {
    pub query: String,
    pub ir: QueryIr,
    pub chain: MethodChain,
    pub messages: Vec<TranslateMessage>,
}

include!("compiler/js_number.rs");
include!("compiler/ast.rs");
include!("compiler/parse.rs");
include!("compiler/chain.rs");
include!("compiler/predicate.rs");
include!("compiler/recognize_tags.rs");
include!("compiler/recognize_predicate.rs");
include!("compiler/recognize_selector.rs");
include!("compiler/query_ir.rs");
include!("compiler/translate.rs");
include!("compiler/field_options.rs");
include!("compiler/cache.rs");

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranslateError {
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldOptionsError {
    #[error("field '{field}' has no options")]
    MissingOptions { field: String },
    #[error("field '{field}' has no sourceType")]
    MissingSourceType { field: String },
    #[error("field '{field}' has unknown sourceType '{source_type}'")]
    UnknownSourceType { field: String, source_type: String },
    #[error("field '{field}' is missing option '{key}'")]
    MissingOption { field: String, key: String },
    #[error("field '{field}' query could not be translated: {error}")]
    Untranslatable {
        field: String,
        #[source]
        error: TranslateError,
    },
    #[error("field '{field}' has an invalid number range: {reason}")]
    InvalidNumberRange { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    include!("compiler/tests_internal.rs");
}
