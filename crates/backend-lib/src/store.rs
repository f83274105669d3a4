// ============================
// signup-backend-lib/src/store.rs
// ============================
//! Account storage abstraction with in-memory and flat-file implementations.
use std::{fs, path::{Path, PathBuf}};
use tokio::fs as tokio_fs;
use async_trait::async_trait;
use dashmap::DashMap;
use crate::account::Account;
use crate::error::AppError;

/// Trait for account storage backends.
///
/// Accounts are keyed by normalized email. `create` must be an atomic
/// create-if-absent: concurrent creates for the same email may not both
/// succeed.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// Persist a new account; `AlreadyExists` if the email is taken
    async fn create(&self, account: Account) -> Result<(), AppError>;

    /// Overwrite an existing account; `NotFound` if it was never created
    async fn update(&self, account: Account) -> Result<(), AppError>;
}

/// In-memory implementation of the `AccountStore` trait.
/// The `DashMap` entry API gives per-key atomicity for create-if-absent.
#[derive(Clone, Default)]
pub struct MemoryStore {
    accounts: DashMap<String, Account>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        Ok(self.accounts.get(email).map(|entry| entry.value().clone()))
    }

    async fn create(&self, account: Account) -> Result<(), AppError> {
        match self.accounts.entry(account.email.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(AppError::AlreadyExists),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(account);
                Ok(())
            },
        }
    }

    async fn update(&self, account: Account) -> Result<(), AppError> {
        match self.accounts.get_mut(&account.email) {
            Some(mut entry) => {
                *entry = account;
                Ok(())
            },
            None => Err(AppError::NotFound),
        }
    }
}

/// Flat-file implementation of the `AccountStore` trait.
/// One JSON document per account under `<root>/accounts/`.
#[derive(Clone)]
pub struct FlatFileStore {
    root: PathBuf,
}

impl FlatFileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("accounts"))?;
        Ok(Self { root })
    }

    fn account_path(&self, email: &str) -> PathBuf {
        // Injective encoding: path-safe bytes pass through, everything else
        // (including `_`, the escape character) becomes `_XX` hex. Distinct
        // emails therefore never share a file.
        let mut file_name = String::with_capacity(email.len());
        for byte in email.bytes() {
            match byte {
                b'a'..=b'z' | b'0'..=b'9' | b'@' | b'.' | b'-' => file_name.push(byte as char),
                _ => file_name.push_str(&format!("_{byte:02x}")),
            }
        }
        self.root.join("accounts").join(format!("{file_name}.json"))
    }
}

#[async_trait]
impl AccountStore for FlatFileStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let path = self.account_path(email);

        let content = match tokio_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AppError::StoreUnavailable(err.to_string())),
        };

        let account: Account = serde_json::from_str(&content)?;
        Ok(Some(account))
    }

    async fn create(&self, account: Account) -> Result<(), AppError> {
        let path = self.account_path(&account.email);
        let json = serde_json::to_string_pretty(&account)?;

        // create_new makes the existence check and the create one atomic step
        let result = tokio_fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;

        match result {
            Ok(mut file) => {
                use tokio::io::AsyncWriteExt;
                file.write_all(json.as_bytes())
                    .await
                    .map_err(|err| AppError::StoreUnavailable(err.to_string()))?;
                Ok(())
            },
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(AppError::AlreadyExists)
            },
            Err(err) => Err(AppError::StoreUnavailable(err.to_string())),
        }
    }

    async fn update(&self, account: Account) -> Result<(), AppError> {
        let path = self.account_path(&account.email);

        if !path.exists() {
            return Err(AppError::NotFound);
        }

        let json = serde_json::to_string_pretty(&account)?;
        tokio_fs::write(&path, json)
            .await
            .map_err(|err| AppError::StoreUnavailable(err.to_string()))?;

        Ok(())
    }
}
