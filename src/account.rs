//! Account session — the identity collaborator.
//!
//! Holds at most one logged-in user and persists it under the user blob key
//! so the session survives restarts. Identity is simulated: any non-empty
//! credentials are accepted and produce the fixed demo user; there is no
//! password check and no server.

use crate::models::{Plan, UserAccount};
use crate::notify::{Notification, Notifier};
use crate::storage::{BlobStore, StorageError, USER_KEY};

/// Display name used when logging into an existing (simulated) account.
const DEMO_USER_NAME: &str = "João Silva";

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Required field missing: {field}")]
    MissingField { field: &'static str },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Holds the logged-in user, if any.
pub struct AccountStore {
    user: Option<UserAccount>,
    blobs: Box<dyn BlobStore>,
    notifier: Box<dyn Notifier>,
}

impl AccountStore {
    /// Restore the session from the blob store, if one was persisted.
    ///
    /// An unreadable user blob is treated as logged-out rather than an
    /// error, consistent with the medication store's reset-on-corruption.
    pub fn load(
        blobs: Box<dyn BlobStore>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self, StorageError> {
        let user = match blobs.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding corrupt persisted user record");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            user,
            blobs,
            notifier,
        })
    }

    pub fn current_user(&self) -> Option<&UserAccount> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Log into the simulated account. Both fields are required; the
    /// password is otherwise ignored.
    pub fn login(&mut self, email: &str, password: &str) -> Result<UserAccount, AccountError> {
        if let Err(e) = require(&[("email", email), ("password", password)]) {
            self.reject("Erro ao fazer login");
            return Err(e);
        }

        let user = UserAccount {
            id: "1".into(),
            name: DEMO_USER_NAME.into(),
            email: email.to_string(),
            plan: Plan::Free,
        };
        self.set_user(user.clone())?;

        self.notifier.notify(Notification::info(
            "Login realizado com sucesso",
            format!("Bem-vindo de volta, {}!", user.name),
        ));
        Ok(user)
    }

    /// Create the simulated account and log straight into it.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserAccount, AccountError> {
        if let Err(e) = require(&[("name", name), ("email", email), ("password", password)]) {
            self.reject("Erro ao criar conta");
            return Err(e);
        }

        let user = UserAccount {
            id: "1".into(),
            name: name.to_string(),
            email: email.to_string(),
            plan: Plan::Free,
        };
        self.set_user(user.clone())?;

        self.notifier.notify(Notification::info(
            "Conta criada com sucesso",
            format!("Bem-vindo ao {}, {name}!", crate::config::APP_NAME),
        ));
        Ok(user)
    }

    /// Drop the session and its persisted record.
    pub fn logout(&mut self) -> Result<(), AccountError> {
        self.user = None;
        self.blobs.remove(USER_KEY)?;
        self.notifier.notify(Notification::info(
            "Logout realizado com sucesso",
            "Você foi desconectado da sua conta",
        ));
        Ok(())
    }

    fn set_user(&mut self, user: UserAccount) -> Result<(), AccountError> {
        let raw = serde_json::to_string(&user).map_err(StorageError::from)?;
        self.blobs.put(USER_KEY, &raw)?;
        self.user = Some(user);
        Ok(())
    }

    fn reject(&self, title: &str) {
        self.notifier.notify(Notification::error(
            title,
            "Por favor, preencha todos os campos",
        ));
    }
}

fn require(fields: &[(&'static str, &str)]) -> Result<(), AccountError> {
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(AccountError::MissingField { field });
        }
    }
    Ok(())
}
