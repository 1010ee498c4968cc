//! Account use-cases: login, single-field and partial updates, self-service
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{Account, AccountChanges, AccountRepositoryInterface, DomainError, DomainResult};
use crate::infrastructure::crypto::{create_access_token, verify_password, JwtConfig};
use crate::infrastructure::database::seeds::{example_password, EXAMPLE_ACCOUNTS};

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub access_token: String,
    pub account: Account,
}

/// Partial update request. `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub is_active: Option<bool>,
    pub language: Option<String>,
    pub role: Option<String>,
}

/// Snapshot after a partial update
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub account: Account,
    /// Applied fields in the order `is_active`, `language`, `role`
    pub updated_fields: Vec<&'static str>,
}

/// Seeded demo account together with its reference password
#[derive(Debug, Clone)]
pub struct ExampleCredentials {
    pub account: Account,
    pub password: &'static str,
}

/// Orchestrates every account use-case.
///
/// Generic over `R: AccountRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct AccountService<R: AccountRepositoryInterface + ?Sized> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
}

impl<R: AccountRepositoryInterface + ?Sized> AccountService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check credentials and issue a token with the configured lifetime.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    /// The inactive check only runs once the password matched.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginResult> {
        let Some(account) = self.repo.find_by_email(email).await? else {
            return Err(DomainError::InvalidCredentials);
        };

        if !verify_password(password, &account.password_hash) {
            return Err(DomainError::InvalidCredentials);
        }

        if !account.is_active {
            warn!(user_id = account.id, "Login attempt on inactive account");
            return Err(DomainError::InactiveAccount);
        }

        let access_token = create_access_token(account.id, None, &self.jwt_config)
            .map_err(|e| DomainError::Token(e.to_string()))?;

        info!(user_id = account.id, "User logged in");
        Ok(LoginResult {
            access_token,
            account,
        })
    }

    // ── Single-field mutations ──────────────────────────────────

    pub async fn set_active(&self, account_id: i32, is_active: bool) -> DomainResult<Account> {
        let account = self
            .apply(
                account_id,
                AccountChanges {
                    is_active: Some(is_active),
                    ..Default::default()
                },
            )
            .await?;

        info!(user_id = account_id, is_active, "Account status changed");
        Ok(account)
    }

    pub async fn set_language(&self, account_id: i32, code: &str) -> DomainResult<Account> {
        let code = non_blank(code, "language")?;
        let account = self
            .apply(
                account_id,
                AccountChanges {
                    language_code: Some(code),
                    ..Default::default()
                },
            )
            .await?;

        info!(user_id = account_id, language = %account.language_code(), "Account language changed");
        Ok(account)
    }

    pub async fn set_role(&self, account_id: i32, role: &str) -> DomainResult<Account> {
        let role = non_blank(role, "role")?;
        let account = self
            .apply(
                account_id,
                AccountChanges {
                    role_name: Some(role),
                    ..Default::default()
                },
            )
            .await?;

        info!(user_id = account_id, role = %account.role_name(), "Account role changed");
        Ok(account)
    }

    // ── Partial update ──────────────────────────────────────────

    /// Apply every present field in one transaction.
    ///
    /// Checks run in a fixed order: target account, empty payload, blank
    /// language, blank role, then language and role resolution. Any failure
    /// leaves the account untouched.
    pub async fn patch(&self, account_id: i32, patch: AccountPatch) -> DomainResult<PatchOutcome> {
        if self.repo.find_by_id(account_id).await?.is_none() {
            return Err(DomainError::NotFound("User"));
        }

        if patch.is_active.is_none() && patch.language.is_none() && patch.role.is_none() {
            return Err(DomainError::EmptyPayload);
        }

        let language_code = patch
            .language
            .as_deref()
            .map(|code| non_blank(code, "language"))
            .transpose()?;
        let role_name = patch
            .role
            .as_deref()
            .map(|role| non_blank(role, "role"))
            .transpose()?;

        let mut updated_fields = Vec::with_capacity(3);
        if patch.is_active.is_some() {
            updated_fields.push("is_active");
        }
        if language_code.is_some() {
            updated_fields.push("language");
        }
        if role_name.is_some() {
            updated_fields.push("role");
        }

        let account = self
            .apply(
                account_id,
                AccountChanges {
                    is_active: patch.is_active,
                    language_code,
                    role_name,
                },
            )
            .await?;

        info!(user_id = account_id, fields = ?updated_fields, "Account partially updated");
        Ok(PatchOutcome {
            account,
            updated_fields,
        })
    }

    // ── Self-service ────────────────────────────────────────────

    /// Change the caller's own language. No role requirement.
    pub async fn update_own_language(&self, caller: &Account, code: &str) -> DomainResult<Account> {
        let code = non_blank(code, "language")?;
        let account = self
            .apply(
                caller.id,
                AccountChanges {
                    language_code: Some(code),
                    ..Default::default()
                },
            )
            .await?;

        info!(user_id = caller.id, language = %account.language_code(), "Own language changed");
        Ok(account)
    }

    // ── Demo data ───────────────────────────────────────────────

    /// Seeded example accounts that currently exist, with reference passwords.
    pub async fn example_accounts(&self) -> DomainResult<Vec<ExampleCredentials>> {
        let emails: Vec<&str> = EXAMPLE_ACCOUNTS.iter().map(|a| a.email).collect();
        let found = self.repo.find_by_emails(&emails).await?;

        Ok(found
            .into_iter()
            .filter_map(|account| {
                example_password(&account.email)
                    .map(|password| ExampleCredentials { account, password })
            })
            .collect())
    }

    async fn apply(&self, account_id: i32, changes: AccountChanges) -> DomainResult<Account> {
        self.repo
            .update_account(account_id, changes)
            .await?
            .ok_or(DomainError::NotFound("User"))
    }
}

fn non_blank(value: &str, field: &'static str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidFieldValue(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::identity::testing::{InMemoryAccounts, PASSWORD};

    fn service() -> (AccountService<InMemoryAccounts>, Arc<InMemoryAccounts>) {
        let repo = Arc::new(InMemoryAccounts::seeded());
        let jwt = JwtConfig::new("service-secret", "HS256", "60");
        (AccountService::new(repo.clone(), jwt), repo)
    }

    #[tokio::test]
    async fn login_issues_token_for_subject() {
        let (svc, repo) = service();
        let result = svc.login("admin@x", PASSWORD).await.unwrap();

        let subject = svc.jwt_config.codec().unwrap().verify(&result.access_token).unwrap();
        assert_eq!(subject, repo.account_by_email("admin@x").unwrap().id);
        assert_eq!(result.account.role_name(), "admin");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let (svc, _) = service();

        let wrong = svc.login("admin@x", "nope").await.unwrap_err();
        let unknown = svc.login("ghost@x", PASSWORD).await.unwrap_err();

        assert!(matches!(wrong, DomainError::InvalidCredentials));
        assert!(matches!(unknown, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn inactive_account_cannot_log_in() {
        let (svc, _) = service();
        let err = svc.login("off@x", PASSWORD).await.unwrap_err();
        assert!(matches!(err, DomainError::InactiveAccount));
    }

    #[tokio::test]
    async fn inactive_check_needs_the_right_password() {
        let (svc, _) = service();
        let err = svc.login("off@x", "nope").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_with_broken_settings_is_internal() {
        let repo = Arc::new(InMemoryAccounts::seeded());
        let svc = AccountService::new(repo, JwtConfig::new("s", "HS256", "soon"));

        let err = svc.login("admin@x", PASSWORD).await.unwrap_err();
        assert!(err.is_internal());
    }

    #[tokio::test]
    async fn empty_patch_is_rejected() {
        let (svc, _) = service();
        let err = svc.patch(1, AccountPatch::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::EmptyPayload));
    }

    #[tokio::test]
    async fn patch_resolves_language_case_insensitively() {
        let (svc, repo) = service();
        let outcome = svc
            .patch(
                1,
                AccountPatch {
                    language: Some("ES".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(outcome.updated_fields, vec!["language"]);
        assert_eq!(outcome.account.language_code(), "es");
        assert_eq!(repo.account_by_id(1).unwrap().language_code(), "es");
    }

    #[tokio::test]
    async fn patch_reports_fields_in_fixed_order() {
        let (svc, _) = service();
        let outcome = svc
            .patch(
                1,
                AccountPatch {
                    role: Some("admin".into()),
                    language: Some("fr".into()),
                    is_active: Some(false),
                },
            )
            .await
            .unwrap();

        assert_eq!(outcome.updated_fields, vec!["is_active", "language", "role"]);
        assert!(!outcome.account.is_active);
    }

    #[tokio::test]
    async fn missing_user_is_reported_before_payload_checks() {
        let (svc, _) = service();

        let err = svc.patch(9999, AccountPatch::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound("User")));

        let err = svc
            .patch(
                9999,
                AccountPatch {
                    language: Some("  ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("User")));
    }

    #[tokio::test]
    async fn blank_values_fail_before_dictionary_lookups() {
        let (svc, _) = service();

        let err = svc
            .patch(
                1,
                AccountPatch {
                    language: Some("  ".into()),
                    role: Some("".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidFieldValue("language")));

        let err = svc
            .patch(
                1,
                AccountPatch {
                    language: Some("xx".into()),
                    role: Some("".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidFieldValue("role")));
    }

    #[tokio::test]
    async fn unresolved_role_leaves_account_untouched() {
        let (svc, repo) = service();
        let err = svc
            .patch(
                1,
                AccountPatch {
                    is_active: Some(false),
                    language: Some("fr".into()),
                    role: Some("owner".into()),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound("Role")));
        let after = repo.account_by_id(1).unwrap();
        assert!(after.is_active);
        assert_eq!(after.language_code(), "en");
        assert_eq!(after.role_name(), "user");
    }

    #[tokio::test]
    async fn missing_user_wins_over_missing_language() {
        let (svc, _) = service();
        let err = svc
            .patch(
                9999,
                AccountPatch {
                    language: Some("xx".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("User")));
    }

    #[tokio::test]
    async fn single_field_mutations() {
        let (svc, _) = service();

        assert!(!svc.set_active(1, false).await.unwrap().is_active);
        assert_eq!(svc.set_role(1, "SuperAdmin").await.unwrap().role_name(), "superadmin");
        assert_eq!(svc.set_language(1, "Fr").await.unwrap().language_code(), "fr");

        assert!(matches!(
            svc.set_language(1, "de").await.unwrap_err(),
            DomainError::NotFound("Language")
        ));
        assert!(matches!(
            svc.set_active(404, true).await.unwrap_err(),
            DomainError::NotFound("User")
        ));
    }

    #[tokio::test]
    async fn own_language_update() {
        let (svc, repo) = service();
        let me = repo.account_by_email("user@x").unwrap();

        let updated = svc.update_own_language(&me, "es").await.unwrap();
        assert_eq!(updated.language_code(), "es");

        let err = svc.update_own_language(&me, "klingon").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Language")));
    }

    #[tokio::test]
    async fn examples_list_only_existing_accounts() {
        let (svc, _) = service();
        assert!(svc.example_accounts().await.unwrap().is_empty());
    }
}
