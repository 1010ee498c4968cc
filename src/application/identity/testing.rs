//! In-memory account store for unit tests

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    Account, AccountChanges, AccountRepositoryInterface, DomainError, DomainResult, Language,
    NewAccount, Role,
};
use crate::infrastructure::crypto::{hash_password_with_cost, MIN_HASH_COST};

pub const PASSWORD: &str = "pw";

pub fn account(id: i32, email: &str, role: &str, language: &str, is_active: bool) -> Account {
    Account {
        id,
        name: email.split('@').next().unwrap_or(email).to_string(),
        email: email.to_string(),
        password_hash: String::new(),
        is_active,
        role: Role {
            id: 0,
            name: role.to_string(),
            description: None,
        },
        language: Language {
            id: 0,
            code: language.to_string(),
            name: language.to_string(),
        },
        created_at: Utc::now(),
    }
}

/// Dictionaries are keyed by lowercased name/code; accounts by id.
pub struct InMemoryAccounts {
    roles: DashMap<String, Role>,
    languages: DashMap<String, Language>,
    accounts: DashMap<i32, Account>,
    account_counter: AtomicI32,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self {
            roles: DashMap::new(),
            languages: DashMap::new(),
            accounts: DashMap::new(),
            account_counter: AtomicI32::new(1),
        }
    }

    /// Roles {user, admin, superadmin}, languages {en, es, fr} and four
    /// accounts sharing [`PASSWORD`]: user@x, admin@x, root@x (superadmin)
    /// and off@x (inactive user).
    pub fn seeded() -> Self {
        let repo = Self::new();
        for (id, name) in (1..).zip(["user", "admin", "superadmin"]) {
            repo.roles.insert(
                name.to_string(),
                Role {
                    id,
                    name: name.to_string(),
                    description: None,
                },
            );
        }
        for (id, (code, name)) in (1..).zip([("en", "English"), ("es", "Español"), ("fr", "Français")]) {
            repo.languages.insert(
                code.to_string(),
                Language {
                    id,
                    code: code.to_string(),
                    name: name.to_string(),
                },
            );
        }

        for (email, role, active) in [
            ("user@x", "user", true),
            ("admin@x", "admin", true),
            ("root@x", "superadmin", true),
            ("off@x", "user", false),
        ] {
            repo.insert(email, repo.role(role).unwrap(), repo.language("en").unwrap(), active);
        }
        repo
    }

    fn role(&self, name: &str) -> Option<Role> {
        self.roles.get(&name.to_lowercase()).map(|r| r.value().clone())
    }

    fn language(&self, code: &str) -> Option<Language> {
        self.languages.get(&code.to_lowercase()).map(|l| l.value().clone())
    }

    fn insert(&self, email: &str, role: Role, language: Language, is_active: bool) -> Account {
        let id = self.account_counter.fetch_add(1, Ordering::SeqCst);
        let mut created = account(id, email, &role.name, &language.code, is_active);
        created.role = role;
        created.language = language;
        created.password_hash = hash_password_with_cost(PASSWORD, MIN_HASH_COST).unwrap();
        self.accounts.insert(id, created.clone());
        created
    }

    pub fn account_by_email(&self, email: &str) -> Option<Account> {
        self.accounts
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.value().clone())
    }

    pub fn account_by_id(&self, id: i32) -> Option<Account> {
        self.accounts.get(&id).map(|a| a.value().clone())
    }
}

impl Default for InMemoryAccounts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepositoryInterface for InMemoryAccounts {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Account>> {
        Ok(self.account_by_id(id))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        Ok(self.account_by_email(email))
    }

    async fn find_by_emails(&self, emails: &[&str]) -> DomainResult<Vec<Account>> {
        let mut found: Vec<Account> = self
            .accounts
            .iter()
            .filter(|entry| emails.contains(&entry.email.as_str()))
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|a| a.id);
        Ok(found)
    }

    /// Dictionary references must match exactly, like the SQL store.
    async fn create_account(&self, account: NewAccount) -> DomainResult<Account> {
        let role = self
            .roles
            .get(&account.role_name)
            .map(|r| r.value().clone())
            .ok_or(DomainError::NotFound("Role"))?;
        let language = self
            .languages
            .get(&account.language_code)
            .map(|l| l.value().clone())
            .ok_or(DomainError::NotFound("Language"))?;
        Ok(self.insert(&account.email, role, language, account.is_active))
    }

    async fn update_account(
        &self,
        id: i32,
        changes: AccountChanges,
    ) -> DomainResult<Option<Account>> {
        if !self.accounts.contains_key(&id) {
            return Ok(None);
        }

        // Resolve everything before touching the account
        let language = changes
            .language_code
            .as_deref()
            .map(|code| self.language(code).ok_or(DomainError::NotFound("Language")))
            .transpose()?;
        let role = changes
            .role_name
            .as_deref()
            .map(|name| self.role(name).ok_or(DomainError::NotFound("Role")))
            .transpose()?;

        let Some(mut target) = self.accounts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(flag) = changes.is_active {
            target.is_active = flag;
        }
        if let Some(language) = language {
            target.language = language;
        }
        if let Some(role) = role {
            target.role = role;
        }
        Ok(Some(target.value().clone()))
    }
}
