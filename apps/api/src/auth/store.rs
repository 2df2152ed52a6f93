//! Flat-file credential store.
//!
//! The whole map lives in memory behind a mutex and is rewritten to disk on
//! every signup. The lock is held across the read-modify-write so concurrent
//! signups cannot lose each other's records, and the file is replaced with an
//! atomic rename. Argon2 work runs on the blocking pool, outside the lock.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::AppError;
use crate::models::user::UserRecord;

type Users = BTreeMap<String, UserRecord>;

pub struct UserStore {
    path: PathBuf,
    users: Mutex<Users>,
}

impl UserStore {
    /// Opens the store at `path`. A missing file is an empty store; an
    /// unreadable or corrupt one fails startup rather than being overwritten.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let users: Users = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Users::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("User file {} is not valid JSON", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Users::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        info!("Loaded {} users from {}", users.len(), path.display());

        Ok(Self {
            path,
            users: Mutex::new(users),
        })
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    /// Registers a new user. Fails with `Conflict` if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AppError> {
        let password = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .context("Password hashing task failed")??;

        let mut users = self.users.lock().await;
        if users.contains_key(username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        users.insert(username.to_string(), UserRecord::new(hash));

        if let Err(e) = self.persist(&users).await {
            users.remove(username);
            return Err(AppError::Internal(e));
        }

        info!("Registered user '{username}'");
        Ok(())
    }

    /// Checks a username/password pair. Unknown users simply fail verification.
    pub async fn verify(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let hash = {
            let users = self.users.lock().await;
            users.get(username).map(|u| u.password_hash.clone())
        };
        let Some(hash) = hash else {
            return Ok(false);
        };
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .context("Password verification task failed")?
    }

    async fn persist(&self, users: &Users) -> Result<()> {
        let json = serde_json::to_vec_pretty(users)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &json))
            .await
            .context("User file writer task failed")?
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(anyhow!("Password hashing failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow!("Stored password hash is malformed: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
