use super::Interaction;
use crate::error::{Result, ValidationError};
use crate::model::{User, ADMIN_USER};
use crate::store::CatalogStore;

/// User management for the administrator.
pub struct AdminScreen<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> AdminScreen<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    pub fn users(&self) -> Result<Vec<String>> {
        let catalog = self.store.load()?;
        Ok(catalog.users().iter().map(|u| u.name().to_string()).collect())
    }

    pub fn add_user(&self, name: &str) -> Result<()> {
        if name.is_empty() || name == ADMIN_USER {
            return Err(ValidationError::InvalidUsername.into());
        }

        let mut catalog = self.store.load()?;
        if catalog.contains(name) {
            return Err(ValidationError::DuplicateUser.into());
        }
        catalog.add_user(User::new(name));
        self.store.save(&catalog)?;

        tracing::info!(user = %name, "User added");
        Ok(())
    }

    /// Delete a user after confirmation. Returns `false` if declined.
    pub fn delete_user(&self, name: &str, ui: &mut dyn Interaction) -> Result<bool> {
        let mut catalog = self.store.load()?;
        if !catalog.contains(name) {
            return Err(ValidationError::UnknownUser(name.to_string()).into());
        }
        if !ui.confirm("Do you want to delete this user? This action cannot be reversed") {
            return Ok(false);
        }
        catalog.remove_user(name);
        self.store.save(&catalog)?;

        tracing::info!(user = %name, "User deleted");
        Ok(true)
    }
}
