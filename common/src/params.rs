use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::models::present;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
    File,
    Array,
    Object,
    AllOf,
    AnyOf,
    OneOf,
}

/// Schema of one request parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeParam {
    #[serde(rename = "type")]
    pub param_type: ParamType,
    /// `Some(Value::Null)` is an explicit `"default": null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_schema: Option<Box<RecipeParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_schema: Option<IndexMap<String, RecipeParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<RecipeParam>>,
}

fn is_truthy(n: &Number) -> bool {
    n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan())
}

/// Build a starting value for `param`.
///
/// `None` means the parameter should be left out entirely, which only happens
/// for optional parameters when `check_required` is set (object members are
/// always evaluated that way). `Some(Value::Null)` is a real `null`.
pub fn default_value(param: &RecipeParam, check_required: bool) -> Option<Value> {
    if let Some(default) = &param.default {
        return Some(default.clone());
    }
    if check_required && !param.required {
        return None;
    }

    let value = match param.param_type {
        ParamType::String => param
            .enum_values
            .as_ref()
            .and_then(|values| values.first().cloned())
            .unwrap_or_else(|| Value::String(String::new())),
        ParamType::Number | ParamType::Integer => [&param.minimum, &param.maximum]
            .into_iter()
            .flatten()
            .find(|n| is_truthy(n))
            .map(|n| Value::Number(n.clone()))
            .unwrap_or_else(|| Value::from(0)),
        ParamType::Boolean => Value::Bool(false),
        ParamType::File => Value::Null,
        ParamType::Array => {
            let item = param
                .array_schema
                .as_deref()
                .and_then(|schema| default_value(schema, false))
                .unwrap_or(Value::Null);
            Value::Array(vec![item])
        }
        ParamType::Object => {
            let mut obj = serde_json::Map::new();
            for (key, schema) in param.object_schema.iter().flatten() {
                if let Some(value) = default_value(schema, true) {
                    obj.insert(key.clone(), value);
                }
            }
            Value::Object(obj)
        }
        ParamType::AllOf | ParamType::AnyOf | ParamType::OneOf => {
            return variant_default(param.variants.as_deref().unwrap_or_default());
        }
    };
    Some(value)
}

fn variant_default(variants: &[RecipeParam]) -> Option<Value> {
    let chosen = variants
        .iter()
        .find(|v| v.enum_values.is_some())
        .or_else(|| {
            variants
                .iter()
                .find(|v| v.default.as_ref().is_some_and(|d| !d.is_null()))
        })
        .or_else(|| variants.first());

    match chosen {
        Some(variant) => default_value(variant, false),
        None => Some(Value::Null),
    }
}
