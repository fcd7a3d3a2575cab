use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Value of `output` and of every `select*` parameter on get-style calls.
///
/// `Omitted` leaves the key out of the request entirely, `Extend` asks for
/// every field of the related entity (`"extend"`), and `Fields` names the
/// fields to return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectQuery {
    #[default]
    Omitted,
    Extend,
    Fields(Vec<String>),
}

impl SelectQuery {
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectQuery::Fields(fields.into_iter().map(Into::into).collect())
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self, SelectQuery::Omitted)
    }
}

impl Serialize for SelectQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Only reachable when a field forgets `skip_serializing_if`.
            SelectQuery::Omitted => serializer.serialize_none(),
            SelectQuery::Extend => serializer.serialize_str("extend"),
            SelectQuery::Fields(fields) => fields.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SelectQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(SelectQuery::Omitted),
            Value::String(s) if s == "extend" => Ok(SelectQuery::Extend),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(D::Error::custom(format!(
                        "select field names must be strings, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(SelectQuery::Fields),
            other => Err(D::Error::custom(format!(
                "expected \"extend\" or a list of field names, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Parameters accepted by every `*.get` method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetParameters {
    #[serde(default, skip_serializing_if = "SelectQuery::is_omitted")]
    pub output: SelectQuery,
    #[serde(rename = "countOutput", default, skip_serializing_if = "is_false")]
    pub count_output: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub editable: bool,
    #[serde(rename = "excludeSearch", default, skip_serializing_if = "is_false")]
    pub exclude_search: bool,
    /// Exact-match filter: field name to a value or list of accepted values.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub filter: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "preservekeys", default, skip_serializing_if = "is_false")]
    pub preserve_keys: bool,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub search: Map<String, Value>,
    #[serde(rename = "searchByAny", default, skip_serializing_if = "is_false")]
    pub search_by_any: bool,
    #[serde(
        rename = "searchWildcardsEnabled",
        default,
        skip_serializing_if = "is_false"
    )]
    pub search_wildcards_enabled: bool,
    #[serde(rename = "sortfield", default, skip_serializing_if = "Vec::is_empty")]
    pub sort_field: Vec<String>,
    #[serde(rename = "sortorder", default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(rename = "startSearch", default, skip_serializing_if = "is_false")]
    pub start_search: bool,
}

/// Reference to an existing host group by id, as `host.create` expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupId {
    pub groupid: String,
}

impl GroupId {
    pub fn new(groupid: impl Into<String>) -> Self {
        Self {
            groupid: groupid.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateId {
    pub templateid: String,
}

impl TemplateId {
    pub fn new(templateid: impl Into<String>) -> Self {
        Self {
            templateid: templateid.into(),
        }
    }
}
