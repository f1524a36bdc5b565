//! Admin user directory: paged listing, name search, and user CRUD.

use crate::form::FormPhase;
use kitchensink_core::api::{AdminApi, Page, UserPayload};
use kitchensink_core::error::{KitchensinkError, Result};
use kitchensink_core::profile::Profile;
use kitchensink_core::validation::validate_user_form;
use std::sync::Arc;

const DEFAULT_SORT: &str = "name,asc";

/// The admin console's view over the user list.
pub struct UserDirectory {
    api: Arc<dyn AdminApi>,
    page_size: u32,
    page: Option<Page<Profile>>,
    /// Present while in search mode; `None` means normal paging.
    search_results: Option<Vec<Profile>>,
    phase: FormPhase,
}

impl UserDirectory {
    pub fn new(api: Arc<dyn AdminApi>, page_size: u32) -> Self {
        Self {
            api,
            page_size,
            page: None,
            search_results: None,
            phase: FormPhase::default(),
        }
    }

    pub fn page(&self) -> Option<&Page<Profile>> {
        self.page.as_ref()
    }

    pub fn search_results(&self) -> Option<&[Profile]> {
        self.search_results.as_deref()
    }

    pub fn is_search_mode(&self) -> bool {
        self.search_results.is_some()
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Users currently on display, regardless of mode.
    pub fn visible_users(&self) -> &[Profile] {
        if let Some(results) = &self.search_results {
            results
        } else if let Some(page) = &self.page {
            &page.content
        } else {
            &[]
        }
    }

    /// Loads one page of the user list, leaving search mode.
    pub async fn load_page(&mut self, number: u32) -> Result<()> {
        let page = self
            .api
            .list_users(number, self.page_size, DEFAULT_SORT)
            .await?;
        self.search_results = None;
        self.page = Some(page);
        Ok(())
    }

    pub async fn next_page(&mut self) -> Result<()> {
        match &self.page {
            Some(page) if page.has_next() => self.load_page(page.number + 1).await,
            _ => Err(KitchensinkError::invalid_state("no next page")),
        }
    }

    pub async fn previous_page(&mut self) -> Result<()> {
        match &self.page {
            Some(page) if page.has_previous() => self.load_page(page.number - 1).await,
            _ => Err(KitchensinkError::invalid_state("no previous page")),
        }
    }

    /// Switches into search mode for `name`. An empty query is refused
    /// without a network call.
    pub async fn search(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(KitchensinkError::invalid_state(
                "a name is required to search",
            ));
        }
        let results = self.api.search_users(name.trim()).await?;
        self.search_results = Some(results);
        Ok(())
    }

    /// Leaves search mode and reloads the first page.
    pub async fn clear_search(&mut self) -> Result<()> {
        self.load_page(0).await
    }

    /// Validates and creates a user, then reloads the first page.
    pub async fn create_user(&mut self, user: &UserPayload) -> Result<Profile> {
        validate_payload(user)?;
        self.phase.begin()?;
        match self.api.create_user(user).await {
            Ok(created) => {
                tracing::info!("Created user {}", created.user_id);
                self.phase.succeed(format!("User '{}' created", created.name));
                self.load_page(0).await?;
                Ok(created)
            }
            Err(error) => {
                self.phase.fail(error.user_message());
                Err(error)
            }
        }
    }

    /// Validates and updates a user, then reloads the current page.
    pub async fn update_user(&mut self, user_id: &str, user: &UserPayload) -> Result<Profile> {
        validate_payload(user)?;
        self.phase.begin()?;
        match self.api.update_user(user_id, user).await {
            Ok(updated) => {
                self.phase.succeed(format!("User '{}' updated", updated.name));
                self.reload_current().await?;
                Ok(updated)
            }
            Err(error) => {
                self.phase.fail(error.user_message());
                Err(error)
            }
        }
    }

    /// Deletes a user and reloads the current page.
    pub async fn delete_user(&mut self, user_id: &str) -> Result<()> {
        self.phase.begin()?;
        match self.api.delete_user(user_id).await {
            Ok(()) => {
                tracing::info!("Deleted user {}", user_id);
                self.phase.succeed("User deleted");
                self.reload_current().await
            }
            Err(error) => {
                self.phase.fail(error.user_message());
                Err(error)
            }
        }
    }

    async fn reload_current(&mut self) -> Result<()> {
        let number = self.page.as_ref().map(|p| p.number).unwrap_or(0);
        self.load_page(number).await
    }
}

fn validate_payload(user: &UserPayload) -> Result<()> {
    validate_user_form(
        &user.name,
        &user.email,
        &user.phone_number,
        user.isd_code.as_deref(),
        user.date_of_birth.as_deref(),
        user.address.as_deref(),
        user.city.as_deref(),
        user.country.as_deref(),
    )
    .into_result()
}
