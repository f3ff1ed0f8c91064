use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::account::Account;

/// On-disk shape of the account file: one JSON object holding the account
/// list and the currently selected account, if any. `currentAccount` stores
/// the full record; on load it is reduced back to its `type` label and
/// re-resolved against the list.
#[derive(Serialize, Deserialize, JsonSchema, Default)]
pub struct AccountsFile {
    #[serde(rename = "GitAccounts", default)]
    pub accounts: Vec<Account>,
    #[serde(
        rename = "currentAccount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current: Option<Account>,
}

/// The account registry: the ordered account list, the active selection, and
/// the file backing both. Every mutation writes the file before returning.
pub struct AccountConfig {
    accounts: Vec<Account>,
    current: Option<String>,
    path: PathBuf,
}

impl AccountConfig {
    pub fn read_or_create(path: PathBuf) -> Result<Self> {
        match fs::read_to_string(&path) {
            Ok(content) => {
                let stored: AccountsFile = serde_json::from_str(&content).with_context(|| {
                    format!("Account file {} is not valid JSON", path.display())
                })?;
                let mut config = Self {
                    accounts: stored.accounts,
                    current: stored.current.map(|account| account.kind),
                    path,
                };
                // A hand-edited file can leave the selection pointing at an
                // account that no longer exists. Clear it instead of trusting it.
                if let Some(kind) = config.current.clone() {
                    if config.lookup(&kind).is_none() {
                        debug!(%kind, "selected account missing from account list, clearing");
                        config.current = None;
                    }
                }
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let config = Self {
                    accounts: Vec::new(),
                    current: None,
                    path,
                };
                config.save()?;
                Ok(config)
            }
            Err(e) => {
                Err(e).with_context(|| format!("Could not read account file {}", path.display()))
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Could not create config directory {}", dir.display()))?;
        }
        let stored = AccountsFile {
            accounts: self.accounts.clone(),
            current: self.active().cloned(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)
            .with_context(|| format!("Could not write account file {}", self.path.display()))?;
        debug!(path = %self.path.display(), accounts = self.accounts.len(), "account file saved");
        Ok(())
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn lookup(&self, kind: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.kind == kind)
    }

    /// The active account, re-resolved by label on every call so a removed
    /// account can never be returned.
    pub fn active(&self) -> Option<&Account> {
        self.current.as_deref().and_then(|kind| self.lookup(kind))
    }

    /// Insert the account, replacing an existing one with the same label in
    /// place. The account becomes the active one.
    pub fn upsert(&mut self, account: Account) -> Result<&Account> {
        self.current = Some(account.kind.clone());
        let index = match self
            .accounts
            .iter()
            .position(|existing| existing.kind == account.kind)
        {
            Some(index) => {
                self.accounts[index] = account;
                index
            }
            None => {
                self.accounts.push(account);
                self.accounts.len() - 1
            }
        };
        self.save()?;
        Ok(&self.accounts[index])
    }

    /// Make the account with this label active. Returns `None` without
    /// touching any state when no such account exists.
    pub fn select(&mut self, kind: &str) -> Result<Option<&Account>> {
        let Some(index) = self.accounts.iter().position(|account| account.kind == kind) else {
            return Ok(None);
        };
        self.current = Some(kind.to_string());
        self.save()?;
        Ok(Some(&self.accounts[index]))
    }

    /// Delete the account with this label. Clears the active selection when
    /// it pointed at the removed account; otherwise the selection is kept.
    pub fn remove(&mut self, kind: &str) -> Result<Option<Account>> {
        let Some(index) = self.accounts.iter().position(|account| account.kind == kind) else {
            return Ok(None);
        };
        let removed = self.accounts.remove(index);
        if self.current.as_deref() == Some(kind) {
            self.current = None;
        }
        self.save()?;
        Ok(Some(removed))
    }
}
