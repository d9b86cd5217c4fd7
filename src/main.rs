//! item-catalog: command-line host for a markdown item vault.
//!
//! Every command prints JSON on stdout except `tree`, which prints an
//! indented outline unless `--json` is given.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use serde::Serialize;

use item_catalog::commands::{self, AppState, ItemForm};
use item_catalog::domain::{FilterMode, FolderFilterState, ItemQuery};
use item_catalog::{tree, FsDocumentStore, Settings};

/// Directory inside the vault holding settings and logs
const STATE_DIR: &str = ".item-catalog";

#[derive(Parser)]
#[command(name = "item-catalog")]
#[command(author, version, about = "Bookmark catalog kept as markdown documents")]
#[command(propagate_version = true)]
struct Cli {
    /// Vault directory
    vault: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List items, optionally under a folder prefix
    List { folder: Option<String> },

    /// Show the folder/item index
    Tree {
        #[arg(long)]
        json: bool,
    },

    /// Distinct tags across all items
    Tags,

    /// Known folders, empty ones included
    Folders,

    /// Filter items by text, tags and folders
    Search {
        /// Free-text search words
        text: Vec<String>,

        /// Selected tags (any of)
        #[arg(long = "tag", num_args = 1..)]
        tags: Vec<String>,

        /// Single active folder
        #[arg(long)]
        folder: Option<String>,

        /// Folders to include (any of)
        #[arg(long = "include", num_args = 1..)]
        include: Vec<String>,

        /// Folders to exclude; wins over everything else
        #[arg(long = "exclude", num_args = 1..)]
        exclude: Vec<String>,
    },

    /// Dashboard statistics
    Summary,

    /// Show one item
    Show { path: String },

    /// Create an item
    Add {
        title: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit the item at a path
    Update {
        path: String,

        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Remove an item
    Delete { path: String },
}

/// Editable item fields shared by `add` and `update`
#[derive(Args)]
struct FieldArgs {
    #[arg(long)]
    folder: Option<String>,

    #[arg(long)]
    link: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    tags: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long = "type")]
    item_type: Option<String>,

    #[arg(long)]
    banner: Option<String>,

    #[arg(long)]
    icon: Option<String>,
}

impl FieldArgs {
    fn into_form(self, title: Option<String>) -> ItemForm {
        ItemForm {
            title,
            folder: self.folder,
            link: self.link,
            description: self.description,
            tags: self.tags,
            item_type: self.item_type,
            banner: self.banner,
            icon: self.icon,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let state_dir = cli.vault.join(STATE_DIR);
    if let Err(e) = rolling_logger::init_logger(state_dir.join("logs"), "ItemCatalog") {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let settings = Settings::load(&state_dir.join("settings.json"))
        .await
        .map_err(|e| e.to_string())?;
    let state = AppState::new(Arc::new(FsDocumentStore::new(&cli.vault)), settings);
    info!("Opened vault {}", cli.vault.display());

    match cli.command {
        Command::List { folder } => print_json(&commands::list_items(&state, folder).await?),
        Command::Tree { json } => {
            let forest = commands::get_tree(&state).await?;
            if json {
                return print_json(&forest);
            }
            for (node, depth) in tree::flatten(&forest) {
                let indent = "  ".repeat(depth);
                if node.is_folder() {
                    let icon = node
                        .icon()
                        .unwrap_or_else(|| state.settings.folder_icon(node.path()));
                    println!("{}{} {} ({})", indent, icon, node.name(), node.item_count());
                } else {
                    println!("{}- {}", indent, node.name());
                }
            }
            Ok(())
        }
        Command::Tags => print_json(&commands::list_tags(&state).await?),
        Command::Folders => print_json(&commands::list_folders(&state).await?),
        Command::Search {
            text,
            tags,
            folder,
            include,
            exclude,
        } => {
            let query = build_query(text, tags, folder, include, exclude);
            print_json(&commands::search_items(&state, query).await?)
        }
        Command::Summary => print_json(&commands::get_summary(&state).await?),
        Command::Show { path } => match commands::get_item(&state, path.clone()).await? {
            Some(entry) => print_json(&entry),
            None => Err(format!("No item at {}", path)),
        },
        Command::Add { title, fields } => {
            commands::init_default_folder(&state).await?;
            let form = fields.into_form(Some(title));
            print_json(&commands::create_item(&state, form).await?)
        }
        Command::Update {
            path,
            title,
            fields,
        } => print_json(&commands::update_item(&state, path, fields.into_form(title)).await?),
        Command::Delete { path } => commands::delete_item(&state, path).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn build_query(
    text: Vec<String>,
    tags: Vec<String>,
    folder: Option<String>,
    include: Vec<String>,
    exclude: Vec<String>,
) -> ItemQuery {
    // Sets, not toggles: repeating a folder must not switch it back off
    let mut folders = FolderFilterState::new();
    for path in include {
        if !folders.include().contains(&path) {
            folders = folders.toggle(&path, FilterMode::Include);
        }
    }
    for path in exclude {
        if !folders.exclude().contains(&path) {
            folders = folders.toggle(&path, FilterMode::Exclude);
        }
    }

    let mut query = ItemQuery::new()
        .with_search(text.join(" "))
        .with_tags(tags)
        .with_folders(folders);
    if let Some(folder) = folder {
        query = query.with_folder(folder);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from([
            "item-catalog", "vault", "search", "rust", "book", "--tag", "a", "b", "--include", "Items",
            "--exclude", "Items/Old",
        ]);
        let Command::Search { text, tags, folder, include, exclude } = cli.command else {
            panic!("expected search");
        };
        let query = build_query(text, tags, folder, include, exclude);
        assert_eq!(query.search, "rust book");
        assert_eq!(query.selected_tags.len(), 2);
        assert!(query.folders.include().contains("Items"));
        assert!(query.folders.exclude().contains("Items/Old"));
        assert!(query.selected_folder.is_none());
    }

    #[test]
    fn test_repeated_folder_stays_included() {
        let query = build_query(
            vec![],
            vec![],
            None,
            vec!["A".into(), "A".into()],
            vec![],
        );
        assert!(query.folders.include().contains("A"));
    }

    #[test]
    fn test_parse_add_fields() {
        let cli = Cli::parse_from([
            "item-catalog", "vault", "add", "Tokio", "--folder", "Web", "--tags", "rust,async", "--type",
            "guide",
        ]);
        let Command::Add { title, fields } = cli.command else {
            panic!("expected add");
        };
        let form = fields.into_form(Some(title));
        assert_eq!(form.title.as_deref(), Some("Tokio"));
        assert_eq!(form.folder.as_deref(), Some("Web"));
        assert_eq!(form.tags.as_deref(), Some("rust,async"));
        assert_eq!(form.item_type.as_deref(), Some("guide"));
        assert!(form.link.is_none());
    }
}
