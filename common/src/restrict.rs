use serde_json::{Map, Value};

use crate::models::{Recipe, RecipeTemplate};

/// Reserved key holding the names of properties dropped from an object.
pub const ADDITIONAL_PROPERTIES_KEY: &str = "_recipeui_additionalProperties";

/// Trailing element appended to arrays that reached the item budget.
pub const TRUNCATION_MARKER: &str = "...";

pub const DEFAULT_MAX_PROPERTIES: usize = 9;
pub const DEFAULT_MAX_ITEMS: usize = 3;

/// Per-node budgets applied while restricting a JSON tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestrictLimits {
    /// Original properties kept per object. The reserved key is extra.
    pub max_properties: usize,
    /// Elements kept per array. The truncation marker is extra.
    pub max_items: usize,
}

impl Default for RestrictLimits {
    fn default() -> Self {
        Self {
            max_properties: DEFAULT_MAX_PROPERTIES,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

/// Restrict a JSON tree with the default 9-property / 3-item budgets.
pub fn restrict(root: &Value) -> Value {
    restrict_with(root, &RestrictLimits::default())
}

/// Build a bounded copy of `root`.
///
/// - **objects**: the first `max_properties` properties are kept in order; the
///   names of the rest are listed under [`ADDITIONAL_PROPERTIES_KEY`].
/// - **arrays**: the first `max_items` elements are kept; when the original
///   had at least `max_items` elements, [`TRUNCATION_MARKER`] is appended.
/// - **scalars** are returned unchanged.
///
/// Only retained children are visited, and each nested object gets its own
/// budget. The output is not a fixed point: running it again treats the
/// reserved key and the marker as ordinary data.
pub fn restrict_with(root: &Value, limits: &RestrictLimits) -> Value {
    match root {
        Value::Object(map) => Value::Object(restrict_object(map, limits)),
        Value::Array(arr) => Value::Array(restrict_array(arr, limits)),
        _ => root.clone(),
    }
}

fn restrict_object(map: &Map<String, Value>, limits: &RestrictLimits) -> Map<String, Value> {
    let mut out = Map::new();
    let mut additional: Vec<Value> = Vec::new();

    for (count, (key, value)) in map.iter().enumerate() {
        if count >= limits.max_properties {
            additional.push(Value::String(key.clone()));
            continue;
        }
        out.insert(key.clone(), restrict_with(value, limits));
    }

    if !additional.is_empty() {
        out.insert(
            ADDITIONAL_PROPERTIES_KEY.to_string(),
            Value::Array(additional),
        );
    }
    out
}

fn restrict_array(arr: &[Value], limits: &RestrictLimits) -> Vec<Value> {
    let mut out: Vec<Value> = arr
        .iter()
        .take(limits.max_items)
        .map(|item| restrict_with(item, limits))
        .collect();

    if arr.len() >= limits.max_items {
        out.push(Value::String(TRUNCATION_MARKER.to_string()));
    }
    out
}

/// Restrict the replay of every template, leaving all other fields as they are.
pub fn restrict_templates(templates: &[RecipeTemplate]) -> Vec<RecipeTemplate> {
    restrict_templates_with(templates, &RestrictLimits::default())
}

pub fn restrict_templates_with(
    templates: &[RecipeTemplate],
    limits: &RestrictLimits,
) -> Vec<RecipeTemplate> {
    templates
        .iter()
        .map(|template| RecipeTemplate {
            replay: template.replay.as_ref().map(|r| restrict_with(r, limits)),
            ..template.clone()
        })
        .collect()
}

/// Copy of `recipe` with its templates restricted.
pub fn restrict_recipe(recipe: &Recipe, limits: &RestrictLimits) -> Recipe {
    Recipe {
        templates: recipe.templates.as_ref().map(|templates| {
            templates
                .as_deref()
                .map(|t| restrict_templates_with(t, limits))
        }),
        ..recipe.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object_with_keys(n: usize) -> Value {
        let mut map = Map::new();
        for i in 0..n {
            map.insert(format!("k{}", i), json!(i));
        }
        Value::Object(map)
    }

    fn keys(val: &Value) -> Vec<String> {
        val.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn small_object_unchanged() {
        let input = object_with_keys(8);
        let out = restrict(&input);
        assert_eq!(out, input);
        assert!(out.get(ADDITIONAL_PROPERTIES_KEY).is_none());
    }

    #[test]
    fn nine_properties_kept_without_reserved_key() {
        let input = object_with_keys(9);
        let out = restrict(&input);
        assert_eq!(out, input);
        assert!(out.get(ADDITIONAL_PROPERTIES_KEY).is_none());
    }

    #[test]
    fn ten_properties_drop_the_last() {
        let out = restrict(&object_with_keys(10));
        let mut expected: Vec<String> = (0..9).map(|i| format!("k{}", i)).collect();
        expected.push(ADDITIONAL_PROPERTIES_KEY.to_string());
        assert_eq!(keys(&out), expected);
        assert_eq!(out[ADDITIONAL_PROPERTIES_KEY], json!(["k9"]));
    }

    #[test]
    fn wide_object_lists_dropped_names_in_order() {
        let out = restrict(&object_with_keys(14));
        assert_eq!(out.as_object().unwrap().len(), 10);
        assert_eq!(
            out[ADDITIONAL_PROPERTIES_KEY],
            json!(["k9", "k10", "k11", "k12", "k13"])
        );
        assert_eq!(out["k8"], json!(8));
    }

    #[test]
    fn short_array_unchanged() {
        let input = json!([1, 2]);
        assert_eq!(restrict(&input), input);
    }

    #[test]
    fn array_of_three_gets_marker() {
        assert_eq!(restrict(&json!([1, 2, 3])), json!([1, 2, 3, "..."]));
    }

    #[test]
    fn long_array_truncated() {
        let input = json!({"x": 1, "y": [1, 2, 3, 4, 5]});
        assert_eq!(restrict(&input), json!({"x": 1, "y": [1, 2, 3, "..."]}));
    }

    #[test]
    fn nested_object_has_own_budget() {
        let input = json!({"a": object_with_keys(10), "b": true});
        let out = restrict(&input);
        assert!(out.get(ADDITIONAL_PROPERTIES_KEY).is_none());
        assert_eq!(out["a"][ADDITIONAL_PROPERTIES_KEY], json!(["k9"]));
        assert_eq!(out["a"].as_object().unwrap().len(), 10);
        assert_eq!(out["b"], json!(true));
    }

    #[test]
    fn array_elements_are_restricted() {
        let input = json!({
            "items": [object_with_keys(11), [1, 2, 3, 4], "s", object_with_keys(12)]
        });
        let out = restrict(&input);
        let items = out["items"].as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0][ADDITIONAL_PROPERTIES_KEY], json!(["k9", "k10"]));
        assert_eq!(items[1], json!([1, 2, 3, "..."]));
        assert_eq!(items[2], json!("s"));
        assert_eq!(items[3], json!("..."));
    }

    #[test]
    fn dropped_properties_are_not_visited() {
        let mut map = Map::new();
        for i in 0..9 {
            map.insert(format!("k{}", i), json!(null));
        }
        map.insert("deep".to_string(), json!([1, 2, 3, 4]));
        let out = restrict(&Value::Object(map));
        assert!(out.get("deep").is_none());
        assert_eq!(out[ADDITIONAL_PROPERTIES_KEY], json!(["deep"]));
    }

    #[test]
    fn scalars_pass_through() {
        for v in [json!("text"), json!(4.5), json!(false), json!(null)] {
            assert_eq!(restrict(&v), v);
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let input = json!({"y": [1, 2, 3, 4, 5], "o": object_with_keys(12)});
        let snapshot = input.clone();
        let _ = restrict(&input);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn second_pass_loses_recorded_names() {
        let once = restrict(&object_with_keys(10));
        let twice = restrict(&once);
        assert_ne!(once, twice);
        assert_eq!(
            twice[ADDITIONAL_PROPERTIES_KEY],
            json!([ADDITIONAL_PROPERTIES_KEY])
        );
    }

    #[test]
    fn second_pass_treats_marker_as_data() {
        let once = restrict(&json!([1, 2, 3, 4, 5]));
        assert_eq!(once, json!([1, 2, 3, "..."]));
        // The first marker is the fourth element and gets cut; a fresh one is appended.
        let twice = restrict(&once);
        assert_eq!(twice, json!([1, 2, 3, "..."]));

        let nested = restrict(&json!([[1, 2, 3, 4]]));
        assert_eq!(nested, json!([[1, 2, 3, "..."]]));
        assert_eq!(restrict(&nested), nested);
        assert_eq!(
            restrict(&json!({"a": ["x", "..."]})),
            json!({"a": ["x", "..."]})
        );
    }

    #[test]
    fn custom_limits() {
        let limits = RestrictLimits {
            max_properties: 1,
            max_items: 1,
        };
        let out = restrict_with(&json!({"a": [1, 2], "b": 2}), &limits);
        assert_eq!(out, json!({"a": [1, "..."], ADDITIONAL_PROPERTIES_KEY: ["b"]}));
    }

    #[test]
    fn templates_only_replay_changes() {
        let templates: Vec<RecipeTemplate> = serde_json::from_value(json!([
            {"title": "List pets", "requestBody": {"tags": [1, 2, 3, 4]}, "replay": {"output": [1, 2, 3, 4]}},
            {"title": "No replay", "description": "plain"}
        ]))
        .unwrap();
        let out = restrict_templates(&templates);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].replay, Some(json!({"output": [1, 2, 3, "..."]})));
        assert_eq!(out[0].extra["requestBody"], json!({"tags": [1, 2, 3, 4]}));
        assert_eq!(out[1], templates[1]);
        assert_eq!(templates[0].replay, Some(json!({"output": [1, 2, 3, 4]})));
    }

    #[test]
    fn null_template_fields_untouched() {
        let input = json!([{"title": "t", "description": null, "replay": null, "x": 1}]);
        let templates: Vec<RecipeTemplate> = serde_json::from_value(input.clone()).unwrap();
        let out = restrict_templates(&templates);
        assert_eq!(serde_json::to_value(&out).unwrap(), input);

        let recipe: Recipe = serde_json::from_value(json!({
            "title": "Pets",
            "project": null,
            "templates": null
        }))
        .unwrap();
        assert_eq!(restrict_recipe(&recipe, &RestrictLimits::default()), recipe);
    }

    #[test]
    fn recipe_templates_restricted() {
        let recipe: Recipe = serde_json::from_value(json!({
            "title": "Pets",
            "templates": [{"title": "t", "replay": [1, 2, 3, 4, 5]}]
        }))
        .unwrap();
        let out = restrict_recipe(&recipe, &RestrictLimits::default());
        assert_eq!(out.template_list()[0].replay, Some(json!([1, 2, 3, "..."])));
        assert_eq!(out.title, "Pets");
    }
}
