mod collection;

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::config::AppConfig;
use common::params::{default_value, RecipeParam};
use common::path::get_value_in_obj_path;
use common::restrict::restrict_with;
use serde_json::Value;

use crate::collection::{process_collections, CollectionOptions};

#[derive(Parser)]
#[command(name = "recipeui-collections")]
struct Args {
    #[arg(long, default_value = "recipeui.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a size-restricted copy of a JSON document (stdin when no file is given).
    Restrict { file: Option<PathBuf> },
    /// Restrict the templates of every recipe collection under a directory.
    Collection {
        dir: PathBuf,
        #[arg(long)]
        filter: Option<String>,
        /// Rewrite the collection files in place.
        #[arg(long)]
        write: bool,
        /// Store the restricted templates in the configured SQLite database.
        #[arg(long)]
        store: bool,
        /// Database path; implies `--store`.
        #[arg(long = "db")]
        db_path: Option<String>,
    },
    /// Print the value at a dotted path such as `.data.[0].name`.
    Get { file: PathBuf, path: String },
    /// Print the default value of a parameter schema.
    Defaults { file: PathBuf },
    /// Print one stored template by id.
    Template {
        id: String,
        #[arg(long = "db")]
        db_path: Option<String>,
    },
    /// List the stored templates of a recipe.
    Templates {
        recipe: String,
        /// Delete them instead of listing.
        #[arg(long)]
        clear: bool,
        #[arg(long = "db")]
        db_path: Option<String>,
    },
}

fn read_json(file: Option<&PathBuf>) -> anyhow::Result<Value> {
    let contents = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&contents)?)
}

fn print_json(val: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = AppConfig::load(&args.config)
        .with_context(|| format!("loading config {}", args.config))?;

    match args.command {
        Command::Restrict { file } => {
            let input = read_json(file.as_ref())?;
            print_json(&restrict_with(&input, &config.limits()))?;
        }
        Command::Collection {
            dir,
            filter,
            write,
            store,
            db_path,
        } => {
            let filter = filter.unwrap_or_else(|| config.collection_filter.clone());
            let pool = match db_path.or_else(|| store.then(|| config.db.clone())) {
                Some(path) => Some(db::init_pool(&path).await?),
                None => None,
            };
            let opts = CollectionOptions {
                filter: &filter,
                limits: config.limits(),
                write,
            };
            let report = process_collections(&dir, &opts, pool.as_ref()).await?;
            log::info!(
                "{} files, {} recipes, {} templates restricted ({} skipped)",
                report.files,
                report.recipes,
                report.templates,
                report.skipped
            );
        }
        Command::Get { file, path } => {
            let input = read_json(Some(&file))?;
            match get_value_in_obj_path(&input, &path) {
                Some(val) => print_json(val)?,
                None => anyhow::bail!("No value at path '{}'", path),
            }
        }
        Command::Defaults { file } => {
            let param: RecipeParam = serde_json::from_value(read_json(Some(&file))?)?;
            print_json(&default_value(&param, false).unwrap_or(Value::Null))?;
        }
        Command::Template { id, db_path } => {
            let pool = db::init_pool(db_path.as_deref().unwrap_or(&config.db)).await?;
            let stored = match db::get_template(&pool, &id).await? {
                Some(t) => t,
                None => anyhow::bail!("Template '{}' not found", id),
            };
            print_json(&serde_json::from_str(&stored.template_json)?)?;
        }
        Command::Templates {
            recipe,
            clear,
            db_path,
        } => {
            let pool = db::init_pool(db_path.as_deref().unwrap_or(&config.db)).await?;
            if clear {
                let removed = db::clear_templates(&pool, &recipe).await?;
                log::info!("Removed {} templates of '{}'", removed, recipe);
            } else {
                for t in db::list_templates(&pool, &recipe).await? {
                    println!("{}\t{}\t{}", t.id, t.slug, t.title);
                }
            }
            log::info!("{} templates stored in total", db::count_templates(&pool).await?);
        }
    }

    Ok(())
}
