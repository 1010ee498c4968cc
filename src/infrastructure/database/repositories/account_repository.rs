use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::{
    Account, AccountChanges, AccountRepositoryInterface, DomainError, DomainResult, Language,
    NewAccount, Role,
};
use crate::infrastructure::database::entities::{language, role, user};

pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn role_model_to_domain(model: role::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
        description: model.description,
    }
}

fn language_model_to_domain(model: language::Model) -> Language {
    Language {
        id: model.id,
        code: model.code,
        name: model.name,
    }
}

fn account_from_parts(model: user::Model, role: role::Model, language: language::Model) -> Account {
    Account {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.hashed_password,
        is_active: model.is_active,
        role: role_model_to_domain(role),
        language: language_model_to_domain(language),
        created_at: model.created_at,
    }
}

async fn load_account<C: ConnectionTrait>(conn: &C, model: user::Model) -> DomainResult<Account> {
    let role = role::Entity::find_by_id(model.role_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            DomainError::Storage(format!(
                "role {} referenced by user {} is missing",
                model.role_id, model.id
            ))
        })?;
    let language = language::Entity::find_by_id(model.language_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            DomainError::Storage(format!(
                "language {} referenced by user {} is missing",
                model.language_id, model.id
            ))
        })?;

    Ok(account_from_parts(model, role, language))
}

// ── Dictionary lookups ──────────────────────────────────────────

/// Case-insensitive role lookup by name
pub async fn find_role_by_name<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> DomainResult<Option<role::Model>> {
    let found = role::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col((role::Entity, role::Column::Name))))
                .eq(name.to_lowercase()),
        )
        .one(conn)
        .await?;
    Ok(found)
}

/// Case-insensitive language lookup by code
pub async fn find_language_by_code<C: ConnectionTrait>(
    conn: &C,
    code: &str,
) -> DomainResult<Option<language::Model>> {
    let found = language::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col((
                language::Entity,
                language::Column::Code,
            ))))
            .eq(code.to_lowercase()),
        )
        .one(conn)
        .await?;
    Ok(found)
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AccountRepositoryInterface for AccountRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Account>> {
        match user::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(load_account(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        match model {
            Some(model) => Ok(Some(load_account(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_emails(&self, emails: &[&str]) -> DomainResult<Vec<Account>> {
        let models = user::Entity::find()
            .filter(user::Column::Email.is_in(emails.iter().copied()))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        let mut accounts = Vec::with_capacity(models.len());
        for model in models {
            accounts.push(load_account(&self.db, model).await?);
        }
        Ok(accounts)
    }

    async fn create_account(&self, account: NewAccount) -> DomainResult<Account> {
        let txn = self.db.begin().await?;

        let role = role::Entity::find()
            .filter(role::Column::Name.eq(&account.role_name))
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound("Role"))?;
        let language = language::Entity::find()
            .filter(language::Column::Code.eq(&account.language_code))
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound("Language"))?;

        let created = user::ActiveModel {
            name: Set(account.name),
            email: Set(account.email),
            hashed_password: Set(account.password_hash),
            is_active: Set(account.is_active),
            role_id: Set(role.id),
            language_id: Set(language.id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(account_from_parts(created, role, language))
    }

    async fn update_account(
        &self,
        id: i32,
        changes: AccountChanges,
    ) -> DomainResult<Option<Account>> {
        // Dropping `txn` on any early return rolls the whole change back.
        let txn = self.db.begin().await?;

        let Some(existing) = user::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(load_account(&txn, existing).await?));
        }

        let language = match changes.language_code.as_deref() {
            Some(code) => Some(
                find_language_by_code(&txn, code)
                    .await?
                    .ok_or(DomainError::NotFound("Language"))?,
            ),
            None => None,
        };
        let role = match changes.role_name.as_deref() {
            Some(name) => Some(
                find_role_by_name(&txn, name)
                    .await?
                    .ok_or(DomainError::NotFound("Role"))?,
            ),
            None => None,
        };

        let mut active: user::ActiveModel = existing.into();
        if let Some(flag) = changes.is_active {
            active.is_active = Set(flag);
        }
        if let Some(language) = &language {
            active.language_id = Set(language.id);
        }
        if let Some(role) = &role {
            active.role_id = Set(role.id);
        }

        let updated = active.update(&txn).await?;
        let account = load_account(&txn, updated).await?;
        txn.commit().await?;

        debug!(user_id = id, "Account changes committed");
        Ok(Some(account))
    }
}
