//! Idempotent seed routines
//!
//! Dictionaries (roles, languages) are committed first, example accounts in a
//! second transaction. Rows that already exist are left as they are.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use thiserror::Error;
use tracing::{debug, info};

use super::entities::{language, role, user};
use crate::infrastructure::crypto::hash_password_with_cost;

/// Role dictionary: `(name, description)`
pub const ROLES: [(&str, &str); 3] = [
    ("user", "Standard user"),
    ("admin", "Administrator"),
    ("superadmin", "Super administrator"),
];

/// Language dictionary: `(code, name)`
pub const LANGUAGES: [(&str, &str); 3] = [
    ("en", "English"),
    ("es", "Español"),
    ("fr", "Français"),
];

/// Demo account with its documented reference password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleAccount {
    pub name: &'static str,
    pub email: &'static str,
    pub role: &'static str,
    pub language: &'static str,
    pub password: &'static str,
    pub is_active: bool,
}

pub const EXAMPLE_ACCOUNTS: [ExampleAccount; 4] = [
    ExampleAccount {
        name: "User",
        email: "user@example.net",
        role: "user",
        language: "fr",
        password: "userPassword",
        is_active: true,
    },
    ExampleAccount {
        name: "Admin",
        email: "admin@example.net",
        role: "admin",
        language: "en",
        password: "adminPassword",
        is_active: true,
    },
    ExampleAccount {
        name: "Superadmin",
        email: "superadmin@example.net",
        role: "superadmin",
        language: "es",
        password: "superadminPassword",
        is_active: true,
    },
    ExampleAccount {
        name: "Inactive",
        email: "inactive@example.net",
        role: "user",
        language: "en",
        password: "inactivePassword",
        is_active: false,
    },
];

/// Reference password for a seeded example email
pub fn example_password(email: &str) -> Option<&'static str> {
    EXAMPLE_ACCOUNTS
        .iter()
        .find(|a| a.email == email)
        .map(|a| a.password)
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Failed to hash password for {email}: {reason}")]
    Hashing { email: &'static str, reason: String },

    #[error("Seed data references missing {kind} '{value}'")]
    MissingReference { kind: &'static str, value: &'static str },
}

/// Counts of rows inserted by one seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub roles: usize,
    pub languages: usize,
    pub accounts: usize,
}

async fn seed_roles<C: ConnectionTrait>(db: &C) -> Result<usize, DbErr> {
    let mut inserted = 0;
    for (name, description) in ROLES {
        let exists = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        role::ActiveModel {
            name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
            ..Default::default()
        }
        .insert(db)
        .await?;
        inserted += 1;
    }
    Ok(inserted)
}

async fn seed_languages<C: ConnectionTrait>(db: &C) -> Result<usize, DbErr> {
    let mut inserted = 0;
    for (code, name) in LANGUAGES {
        let exists = language::Entity::find()
            .filter(language::Column::Code.eq(code))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        language::ActiveModel {
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        inserted += 1;
    }
    Ok(inserted)
}

async fn seed_example_accounts<C: ConnectionTrait>(
    db: &C,
    bcrypt_cost: u32,
) -> Result<usize, SeedError> {
    let mut inserted = 0;
    for example in EXAMPLE_ACCOUNTS {
        let exists = user::Entity::find()
            .filter(user::Column::Email.eq(example.email))
            .one(db)
            .await?
            .is_some();
        if exists {
            debug!(email = example.email, "Example account already present");
            continue;
        }

        let role = role::Entity::find()
            .filter(role::Column::Name.eq(example.role))
            .one(db)
            .await?
            .ok_or(SeedError::MissingReference {
                kind: "role",
                value: example.role,
            })?;
        let language = language::Entity::find()
            .filter(language::Column::Code.eq(example.language))
            .one(db)
            .await?
            .ok_or(SeedError::MissingReference {
                kind: "language",
                value: example.language,
            })?;

        let hashed_password = hash_password_with_cost(example.password, bcrypt_cost).map_err(
            |e| SeedError::Hashing {
                email: example.email,
                reason: e.to_string(),
            },
        )?;

        user::ActiveModel {
            name: Set(example.name.to_string()),
            email: Set(example.email.to_string()),
            hashed_password: Set(hashed_password),
            is_active: Set(example.is_active),
            role_id: Set(role.id),
            language_id: Set(language.id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        inserted += 1;
    }
    Ok(inserted)
}

/// Seed roles and languages in one transaction.
pub async fn seed_dictionaries(db: &DatabaseConnection) -> Result<SeedReport, SeedError> {
    let txn = db.begin().await?;
    let roles = seed_roles(&txn).await?;
    let languages = seed_languages(&txn).await?;
    txn.commit().await?;

    Ok(SeedReport {
        roles,
        languages,
        accounts: 0,
    })
}

/// Seed the demo accounts. Requires the dictionaries to be present.
pub async fn seed_examples(db: &DatabaseConnection, bcrypt_cost: u32) -> Result<usize, SeedError> {
    let txn = db.begin().await?;
    let accounts = seed_example_accounts(&txn, bcrypt_cost).await?;
    txn.commit().await?;
    Ok(accounts)
}

/// Run every seed routine.
pub async fn run_seeds(
    db: &DatabaseConnection,
    include_examples: bool,
    bcrypt_cost: u32,
) -> Result<SeedReport, SeedError> {
    let mut report = seed_dictionaries(db).await?;
    if include_examples {
        report.accounts = seed_examples(db, bcrypt_cost).await?;
    }

    info!(
        roles = report.roles,
        languages = report.languages,
        accounts = report.accounts,
        "Seeding finished"
    );
    Ok(report)
}
