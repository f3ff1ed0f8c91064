use anyhow::{bail, Context, Result};

use crate::account::{status_line, Account};
use crate::config::AccountConfig;
use crate::git::Git;

const NEW_ACCOUNT: &str = "> New account";

/// Prompt for the three identity fields, then upsert and switch to the
/// result. Submitting an empty value aborts without touching any state.
pub async fn add(kind: Option<String>, config: &mut AccountConfig) -> Result<()> {
    let kind = match kind {
        Some(kind) => kind,
        None => dialoguer::Input::new()
            .with_prompt("Account type (e.g. work, personal)")
            .allow_empty(true)
            .interact_text()
            .context("Error while prompting account type")?,
    };
    if kind.is_empty() {
        eprintln!("Account type is required.");
        return Ok(());
    }

    let username: String = dialoguer::Input::new()
        .with_prompt("Git username")
        .allow_empty(true)
        .interact_text()
        .context("Error while prompting username")?;
    if username.is_empty() {
        eprintln!("Username is required.");
        return Ok(());
    }

    let email: String = dialoguer::Input::new()
        .with_prompt("Git email")
        .allow_empty(true)
        .interact_text()
        .context("Error while prompting email")?;
    if email.is_empty() {
        eprintln!("Email is required.");
        return Ok(());
    }

    let account = config
        .upsert(Account {
            kind,
            username,
            email,
        })?
        .clone();
    println!("Switched to {} account: {}", account.kind, account.username);
    apply(&account);
    refresh(config);
    Ok(())
}

/// Switch the active account, either by the label given on the command line
/// or through a selection menu. An empty registry redirects into the add
/// flow; a cancelled menu changes nothing.
pub async fn switch(kind: Option<String>, config: &mut AccountConfig) -> Result<()> {
    if let Some(kind) = kind {
        let Some(account) = config.select(&kind)?.cloned() else {
            bail!("No account named `{kind}`");
        };
        println!("Switched to {} account: {}", account.kind, account.username);
        apply(&account);
        refresh(config);
        return Ok(());
    }

    if config.is_empty() {
        eprintln!("No accounts available. Please add an account first.");
        return add(None, config).await;
    }

    let mut options: Vec<String> = config
        .accounts()
        .iter()
        .map(|account| format!("{} ({} <{}>)", account.kind, account.username, account.email))
        .collect();
    options.push(NEW_ACCOUNT.to_string());

    let index = match dialoguer::FuzzySelect::new()
        .with_prompt("Select account type to switch")
        .items(&options)
        .default(0)
        .interact_opt()
        .context("Error while prompting account selection")?
    {
        Some(index) => index,
        None => return Ok(()),
    };

    if index == config.accounts().len() {
        return add(None, config).await;
    }

    let kind = config.accounts()[index].kind.clone();
    if let Some(account) = config.select(&kind)?.cloned() {
        println!("Switched to {} account: {}", account.kind, account.username);
        apply(&account);
        refresh(config);
    }
    Ok(())
}

/// Remove an account by label or through a selection menu. Removing the
/// active account leaves no account selected; the global git config is not
/// touched.
pub async fn remove(kind: Option<String>, config: &mut AccountConfig) -> Result<()> {
    if config.is_empty() {
        eprintln!("No accounts available to remove.");
        return Ok(());
    }

    let kind = match kind {
        Some(kind) => kind,
        None => {
            let options: Vec<String> = config
                .accounts()
                .iter()
                .map(|account| account.kind.clone())
                .collect();
            match dialoguer::FuzzySelect::new()
                .with_prompt("Select account type to remove")
                .items(&options)
                .interact_opt()
                .context("Error while prompting account selection")?
            {
                Some(index) => options[index].clone(),
                None => return Ok(()),
            }
        }
    };

    let was_active = config.active().map_or(false, |account| account.kind == kind);
    match config.remove(&kind)? {
        Some(_) if was_active => {
            println!("Removed current account and switched to no account.")
        }
        Some(removed) => println!("Removed account: {}", removed.kind),
        None => bail!("No account named `{kind}`"),
    }
    refresh(config);
    Ok(())
}

pub async fn list(config: &AccountConfig) -> Result<()> {
    if config.is_empty() {
        println!("No accounts configured.");
        return Ok(());
    }
    let active = config.active().map(|account| account.kind.clone());
    for account in config.accounts() {
        let marker = if active.as_deref() == Some(account.kind.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {} ({} <{}>)",
            account.kind, account.username, account.email
        );
    }
    Ok(())
}

pub async fn status(config: &AccountConfig) -> Result<()> {
    match config.active() {
        Some(account) => println!("Current Git account: {account}"),
        None => println!("No Git account logged in."),
    }
    Ok(())
}

/// Push the active identity into the global git config. Failure is a
/// warning only; the registry keeps its state either way.
fn apply(account: &Account) {
    match Git::default().set_global_identity(&account.username, &account.email) {
        Ok(()) => println!("Git global config updated successfully."),
        Err(err) => eprintln!("Failed to update Git global config: {err:#}"),
    }
}

fn refresh(config: &AccountConfig) {
    println!("{}", status_line(config.active()));
}
