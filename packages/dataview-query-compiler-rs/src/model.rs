use serde::{Deserialize, Serialize};
use serde_json::Value;

use swc_ecma_ast::Expr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodChain {
    /// First argument of the root accessor; empty means every page.
    pub source: String,
    pub methods: Vec<MethodCall>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<MethodArg>,
}

/// One call argument.
///
/// `text` is the decoded value of a string literal, the `String(n)` text of a
/// numeric literal, or the verbatim source of anything else. `node` holds
/// the parsed argument so recognizers can match on its shape; it is absent
/// for arguments built from serialized data and is re-parsed from `text`
/// on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodArg {
    pub text: String,
    #[serde(skip)]
    pub(crate) node: Option<Box<Expr>>,
}

impl MethodArg {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            node: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryIr {
    pub from: String,
    pub select: Option<String>,
    pub wheres: Vec<String>,
    pub sorts: Vec<SortKey>,
    pub groups: Vec<String>,
    pub flattens: Vec<String>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FieldType {
    Input,
    Number,
    Select,
    Cycle,
    Boolean,
    Date,
    DateTime,
    Time,
    Multi,
    File,
    MultiFile,
    Media,
    MultiMedia,
    Canvas,
    CanvasGroup,
    CanvasGroupLink,
    Formula,
    Lookup,
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "YAML")]
    Yaml,
    Object,
    ObjectList,
}

/// Field definition as exported by the metadata menu plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub options: Value,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum QueryProjection {
    /// Each result row is a candidate value.
    Values,
    /// Each result row is a page; its `path` is the candidate value.
    FilePaths,
}

/// Where the candidate values of a field come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OptionSource {
    Values {
        values: Vec<String>,
    },
    Query {
        query: String,
        projection: QueryProjection,
    },
    NotePath {
        path: String,
    },
    Unsupported,
}
