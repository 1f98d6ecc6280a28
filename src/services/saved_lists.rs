//! Saved list service
//!
//! Business rules for the user's restaurant lists on top of the backend:
//! name validation and uniqueness, protection of system lists, membership
//! toggling, the "save for later" shortcut and visit tracking. Every
//! successful write is journaled.

use tracing::info;

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::backend::SavedListsBackend;
use crate::error::{ForklyError, ForklyResult};
use crate::models::saved_list::validate_list_name;
use crate::models::{AccountSession, ListId, RestaurantId, SavedList, SavedRestaurant, SystemListType};

/// Service for saved list management
pub struct SavedListService<'a, B: ?Sized> {
    backend: &'a B,
    session: &'a AccountSession,
    audit: Option<&'a AuditLogger>,
}

impl<'a, B: SavedListsBackend + ?Sized> SavedListService<'a, B> {
    /// Create a new saved list service acting for `session`
    pub fn new(backend: &'a B, session: &'a AccountSession) -> Self {
        Self {
            backend,
            session,
            audit: None,
        }
    }

    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    fn journal(&self, entry: AuditEntry) {
        if let Some(audit) = self.audit {
            audit.record(entry.by(self.session.account_id));
        }
    }

    /// All lists of the user, system lists first, then by name
    pub async fn list(&self) -> ForklyResult<Vec<SavedList>> {
        let mut lists = self.backend.fetch_lists(self.session).await?;
        lists.sort_by(|a, b| {
            b.is_system()
                .cmp(&a.is_system())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(lists)
    }

    /// Find a list by name (case-insensitive) or ID
    pub async fn find(&self, identifier: &str) -> ForklyResult<Option<SavedList>> {
        let identifier = identifier.trim();
        let lists = self.backend.fetch_lists(self.session).await?;

        let wanted = identifier.to_lowercase();
        if let Some(list) = lists.iter().find(|l| l.name.to_lowercase() == wanted) {
            return Ok(Some(list.clone()));
        }

        // Full UUID, or the short form shown in listings
        let parsed = identifier.parse::<ListId>().ok();
        Ok(lists
            .into_iter()
            .find(|l| Some(l.id) == parsed || l.id.to_string() == identifier))
    }

    /// Find a list or fail with `NotFound`
    pub async fn get(&self, identifier: &str) -> ForklyResult<SavedList> {
        self.find(identifier)
            .await?
            .ok_or_else(|| ForklyError::list_not_found(identifier))
    }

    /// Restaurants in a list, most recently added first
    pub async fn items(&self, list: &SavedList) -> ForklyResult<Vec<SavedRestaurant>> {
        let mut items = self.backend.fetch_list_items(self.session, list.id).await?;
        items.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        Ok(items)
    }

    /// Create a new list
    pub async fn create(&self, name: &str, description: Option<&str>) -> ForklyResult<SavedList> {
        let name = self.checked_name(name, None).await?;
        let description = description.map(str::trim).filter(|d| !d.is_empty());

        let list = self
            .backend
            .create_list(self.session, &name, description)
            .await?;

        info!(list = %list.id, name = %list.name, "list created");
        self.journal(
            AuditEntry::new(Operation::Create, EntityType::SavedList, list.id.to_string())
                .named(&list.name),
        );
        Ok(list)
    }

    /// Rename a user list
    pub async fn rename(&self, identifier: &str, new_name: &str) -> ForklyResult<SavedList> {
        let list = self.get(identifier).await?;
        if list.is_system() {
            return Err(ForklyError::SystemList(list.name));
        }

        let name = self.checked_name(new_name, Some(list.id)).await?;
        let renamed = self.backend.rename_list(self.session, list.id, &name).await?;

        self.journal(
            AuditEntry::new(Operation::Update, EntityType::SavedList, list.id.to_string())
                .named(&renamed.name)
                .with_details(&serde_json::json!({ "from": list.name, "to": renamed.name })),
        );
        Ok(renamed)
    }

    /// Delete a user list
    pub async fn delete(&self, identifier: &str) -> ForklyResult<SavedList> {
        let list = self.get(identifier).await?;
        if list.is_system() {
            return Err(ForklyError::SystemList(list.name));
        }

        self.backend.delete_list(self.session, list.id).await?;

        info!(list = %list.id, "list deleted");
        self.journal(
            AuditEntry::new(Operation::Delete, EntityType::SavedList, list.id.to_string())
                .named(&list.name),
        );
        Ok(list)
    }

    /// Add a restaurant to a list
    pub async fn add(&self, list: &SavedList, restaurant_id: RestaurantId) -> ForklyResult<()> {
        self.backend
            .add_to_list(self.session, list.id, restaurant_id)
            .await?;
        self.journal(
            AuditEntry::new(Operation::Create, EntityType::ListItem, restaurant_id.to_string())
                .named(&list.name),
        );
        Ok(())
    }

    /// Remove a restaurant from a list
    pub async fn remove(&self, list: &SavedList, restaurant_id: RestaurantId) -> ForklyResult<()> {
        self.backend
            .remove_from_list(self.session, list.id, restaurant_id)
            .await?;
        self.journal(
            AuditEntry::new(Operation::Delete, EntityType::ListItem, restaurant_id.to_string())
                .named(&list.name),
        );
        Ok(())
    }

    /// Add or remove depending on current membership
    ///
    /// Returns whether the restaurant is in the list afterwards.
    pub async fn toggle_membership(
        &self,
        list: &SavedList,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<bool> {
        let containing = self
            .backend
            .lists_containing(self.session, restaurant_id)
            .await?;

        if containing.contains(&list.id) {
            self.remove(list, restaurant_id).await?;
            Ok(false)
        } else {
            self.add(list, restaurant_id).await?;
            Ok(true)
        }
    }

    /// Add a restaurant to the "want to go" system list
    pub async fn save_for_later(&self, restaurant_id: RestaurantId) -> ForklyResult<SavedList> {
        let lists = self.backend.fetch_lists(self.session).await?;
        let want_to_go = lists
            .into_iter()
            .find(|l| l.system_type == Some(SystemListType::WantToGo))
            .ok_or_else(|| ForklyError::list_not_found(SystemListType::WantToGo.to_string()))?;

        self.add(&want_to_go, restaurant_id).await?;
        Ok(want_to_go)
    }

    /// Record or clear a visit
    pub async fn mark_visited(&self, restaurant_id: RestaurantId, visited: bool) -> ForklyResult<()> {
        self.backend
            .mark_visited(self.session, restaurant_id, visited)
            .await?;
        let operation = if visited {
            Operation::Create
        } else {
            Operation::Delete
        };
        self.journal(AuditEntry::new(
            operation,
            EntityType::Visit,
            restaurant_id.to_string(),
        ));
        Ok(())
    }

    /// Lists of the user that contain the restaurant
    pub async fn lists_containing(&self, restaurant_id: RestaurantId) -> ForklyResult<Vec<SavedList>> {
        let ids = self
            .backend
            .lists_containing(self.session, restaurant_id)
            .await?;
        let lists = self.list().await?;
        Ok(lists.into_iter().filter(|l| ids.contains(&l.id)).collect())
    }

    /// Validate a name and check it is free among the user's lists
    async fn checked_name(&self, name: &str, renaming: Option<ListId>) -> ForklyResult<String> {
        let name = validate_list_name(name).map_err(|e| ForklyError::Validation(e.to_string()))?;

        let lists = self.backend.fetch_lists(self.session).await?;
        let lowered = name.to_lowercase();
        if lists
            .iter()
            .any(|l| Some(l.id) != renaming && l.name.to_lowercase() == lowered)
        {
            return Err(ForklyError::Duplicate {
                entity_type: "List",
                identifier: name,
            });
        }
        Ok(name)
    }
}
