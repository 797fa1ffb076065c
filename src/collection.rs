use std::path::Path;

use anyhow::Context;
use common::files::find_files_in_dir;
use common::models::{CollectionFile, Recipe};
use common::restrict::{restrict_recipe, RestrictLimits};
use common::text::to_snake_case;
use sqlx::SqlitePool;

pub struct CollectionOptions<'a> {
    pub filter: &'a str,
    pub limits: RestrictLimits,
    /// Rewrite each collection file with its restricted templates.
    pub write: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CollectionReport {
    pub files: usize,
    pub skipped: usize,
    pub recipes: usize,
    pub templates: usize,
}

/// Restrict every recipe collection found under `dir`, optionally rewriting
/// the files and storing the templates. Unreadable files are logged and skipped.
pub async fn process_collections(
    dir: &Path,
    opts: &CollectionOptions<'_>,
    pool: Option<&SqlitePool>,
) -> anyhow::Result<CollectionReport> {
    let mut report = CollectionReport::default();

    for path in find_files_in_dir(dir, opts.filter)? {
        let collection = match load_collection(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Skipping {}: {:#}", path.display(), e);
                report.skipped += 1;
                continue;
            }
        };

        let restricted = collection.map_recipes(|r| restrict_recipe(r, &opts.limits));
        report.files += 1;
        for recipe in restricted.recipes() {
            report.recipes += 1;
            report.templates += recipe.template_list().len();
            if let Some(pool) = pool {
                store_recipe(pool, recipe).await?;
            }
        }

        if opts.write {
            let json = serde_json::to_string_pretty(&restricted)?;
            std::fs::write(&path, json + "\n")
                .with_context(|| format!("writing {}", path.display()))?;
        }
        log::info!(
            "Restricted {} ({} recipes)",
            path.display(),
            restricted.recipes().len()
        );
    }

    Ok(report)
}

fn load_collection(path: &Path) -> anyhow::Result<CollectionFile> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

struct TemplateRow {
    slug: String,
    replay_json: Option<String>,
    template_json: String,
}

/// Store a recipe's templates, replacing whatever an earlier import left.
async fn store_recipe(pool: &SqlitePool, recipe: &Recipe) -> anyhow::Result<()> {
    let templates = recipe.template_list();
    let mut rows = Vec::with_capacity(templates.len());
    for template in templates {
        rows.push(TemplateRow {
            slug: to_snake_case(&template.title),
            replay_json: template
                .replay
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            template_json: serde_json::to_string(template)?,
        });
    }

    let params: Vec<db::InsertTemplateParams<'_>> = templates
        .iter()
        .zip(&rows)
        .map(|(template, row)| db::InsertTemplateParams {
            recipe_title: &recipe.title,
            title: &template.title,
            slug: &row.slug,
            replay_json: row.replay_json.as_deref(),
            template_json: &row.template_json,
        })
        .collect();
    db::replace_templates(pool, &recipe.title, &params).await?;
    Ok(())
}
