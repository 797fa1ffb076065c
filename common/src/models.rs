use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Deserialize a field that was present in the input, so an explicit `null`
/// stays distinguishable from a missing key.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A saved example of an API call. Only the replay is typed; every other
/// field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeTemplate {
    pub title: String,
    /// `Some(Value::Null)` is an explicit `"replay": null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub replay: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    /// Outer `None`: no `templates` key. `Some(None)`: `"templates": null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub templates: Option<Option<Vec<RecipeTemplate>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    pub fn template_list(&self) -> &[RecipeTemplate] {
        self.templates.as_ref().and_then(|t| t.as_deref()).unwrap_or_default()
    }
}

/// A collection file holds either a single recipe or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CollectionFile {
    Many(Vec<Recipe>),
    One(Recipe),
}

impl CollectionFile {
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            CollectionFile::Many(recipes) => recipes,
            CollectionFile::One(recipe) => std::slice::from_ref(recipe),
        }
    }

    pub fn map_recipes(&self, f: impl Fn(&Recipe) -> Recipe) -> CollectionFile {
        match self {
            CollectionFile::Many(recipes) => CollectionFile::Many(recipes.iter().map(f).collect()),
            CollectionFile::One(recipe) => CollectionFile::One(f(recipe)),
        }
    }
}

/// A template row as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredTemplate {
    #[sqlx(try_from = "String")]
    pub id: uuid::Uuid,
    pub recipe_title: String,
    pub title: String,
    pub slug: String,
    pub replay_json: Option<String>,
    pub template_json: String,
    pub created_at: Option<String>,
}
