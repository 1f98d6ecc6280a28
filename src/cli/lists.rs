//! Saved list CLI commands

use clap::Subcommand;

use crate::audit::AuditLogger;
use crate::backend::SavedListsBackend;
use crate::display::{format_list_details, format_list_table};
use crate::error::{ForklyError, ForklyResult};
use crate::models::RestaurantId;
use crate::services::SavedListService;
use crate::storage::Storage;

/// Saved list subcommands
#[derive(Subcommand)]
pub enum ListCommands {
    /// List your saved lists
    List,
    /// Show a list and its restaurants
    Show {
        /// List name or ID
        list: String,
    },
    /// Create a new list
    Create {
        /// List name
        name: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Rename a list
    Rename {
        /// List name or ID
        list: String,
        /// New name
        new_name: String,
    },
    /// Delete a list
    Delete {
        /// List name or ID
        list: String,
    },
    /// Add a restaurant to a list
    Add {
        /// List name or ID
        list: String,
        /// Restaurant ID
        restaurant: String,
    },
    /// Remove a restaurant from a list
    Remove {
        /// List name or ID
        list: String,
        /// Restaurant ID
        restaurant: String,
    },
    /// Add a restaurant to a list, or remove it if already there
    Toggle {
        /// List name or ID
        list: String,
        /// Restaurant ID
        restaurant: String,
    },
    /// Record a visit to a restaurant
    Visit {
        /// Restaurant ID
        restaurant: String,
        /// Clear the visit instead
        #[arg(long)]
        undo: bool,
    },
    /// Save a restaurant to your "want to go" list
    Save {
        /// Restaurant ID
        restaurant: String,
    },
    /// Show which of your lists contain a restaurant
    Containing {
        /// Restaurant ID
        restaurant: String,
    },
}

fn parse_restaurant(raw: &str) -> ForklyResult<RestaurantId> {
    raw.trim().parse().map_err(|_| {
        ForklyError::Validation(format!(
            "Invalid restaurant ID: '{}'. Use the full ID shown by 'forkly nearby'",
            raw
        ))
    })
}

/// Handle a saved list command
pub async fn handle_lists_command<B: SavedListsBackend + ?Sized>(
    backend: &B,
    storage: &Storage,
    audit: &AuditLogger,
    cmd: ListCommands,
) -> ForklyResult<()> {
    let session = storage.require_session()?;
    let service = SavedListService::new(backend, &session).with_audit(audit);

    match cmd {
        ListCommands::List => {
            let lists = service.list().await?;
            print!("{}", format_list_table(&lists));
        }

        ListCommands::Show { list } => {
            let found = service.get(&list).await?;
            let items = service.items(&found).await?;
            print!("{}", format_list_details(&found, &items));
        }

        ListCommands::Create { name, description } => {
            let list = service.create(&name, description.as_deref()).await?;
            println!("Created list: {}", list.name);
            println!("  ID: {}", list.id);
        }

        ListCommands::Rename { list, new_name } => {
            let renamed = service.rename(&list, &new_name).await?;
            println!("Renamed list to: {}", renamed.name);
        }

        ListCommands::Delete { list } => {
            let deleted = service.delete(&list).await?;
            println!("Deleted list: {}", deleted.name);
        }

        ListCommands::Add { list, restaurant } => {
            let restaurant_id = parse_restaurant(&restaurant)?;
            let found = service.get(&list).await?;
            service.add(&found, restaurant_id).await?;
            println!("Added {} to {}", restaurant_id, found.name);
        }

        ListCommands::Remove { list, restaurant } => {
            let restaurant_id = parse_restaurant(&restaurant)?;
            let found = service.get(&list).await?;
            service.remove(&found, restaurant_id).await?;
            println!("Removed {} from {}", restaurant_id, found.name);
        }

        ListCommands::Toggle { list, restaurant } => {
            let restaurant_id = parse_restaurant(&restaurant)?;
            let found = service.get(&list).await?;
            if service.toggle_membership(&found, restaurant_id).await? {
                println!("Added {} to {}", restaurant_id, found.name);
            } else {
                println!("Removed {} from {}", restaurant_id, found.name);
            }
        }

        ListCommands::Visit { restaurant, undo } => {
            let restaurant_id = parse_restaurant(&restaurant)?;
            service.mark_visited(restaurant_id, !undo).await?;
            if undo {
                println!("Cleared visit to {}", restaurant_id);
            } else {
                println!("Marked {} as visited", restaurant_id);
            }
        }

        ListCommands::Save { restaurant } => {
            let restaurant_id = parse_restaurant(&restaurant)?;
            let list = service.save_for_later(restaurant_id).await?;
            println!("Saved {} to {}", restaurant_id, list.name);
        }

        ListCommands::Containing { restaurant } => {
            let restaurant_id = parse_restaurant(&restaurant)?;
            let lists = service.lists_containing(restaurant_id).await?;
            if lists.is_empty() {
                println!("{} is not in any of your lists.", restaurant_id);
            } else {
                print!("{}", format_list_table(&lists));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{signed_in, FakeBackend};
    use crate::config::ForklyPaths;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, AuditLogger) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ForklyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        let audit = AuditLogger::new(paths.audit_log());
        (temp_dir, storage, audit)
    }

    #[test]
    fn test_parse_restaurant() {
        let id = RestaurantId::new();
        assert_eq!(parse_restaurant(&id.as_uuid().to_string()).unwrap(), id);
        assert!(parse_restaurant("rst-1234").unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_requires_session() {
        let (_temp, storage, audit) = setup();
        let backend = FakeBackend::new();

        let err = handle_lists_command(&backend, &storage, &audit, ListCommands::List)
            .await
            .unwrap_err();
        assert!(matches!(err, ForklyError::NotSignedIn));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_is_journaled() {
        let (_temp, storage, audit) = setup();
        storage.session.save(&signed_in("ana99")).unwrap();
        let backend = FakeBackend::new();

        handle_lists_command(
            &backend,
            &storage,
            &audit,
            ListCommands::Create {
                name: "Date night".into(),
                description: None,
            },
        )
        .await
        .unwrap();

        let entries = audit.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_name.as_deref(), Some("Date night"));
    }
}
