use anyhow::{Context, Result};
use apicall_core::{Config, CredentialKey, ServiceId};
use inquire::{Password, PasswordDisplayMode, Text};

/// Prompt for every credential `service` needs and save them to the config file.
pub fn run(service: &str) -> Result<()> {
    let id = ServiceId::try_from(service)?;

    // File values only: anything coming from the environment stays there.
    let mut config = Config::load_file()?;

    for key in id.credential_keys() {
        let value = prompt(*key)?;
        config.set_credential(*key, value);
    }

    let path = config.save()?;
    println!("Saved {id} credentials to {}", path.display());

    Ok(())
}

fn prompt(key: CredentialKey) -> Result<String> {
    let message = format!("{}:", key.label());
    let help = format!("Overridden at runtime by ${}", key.env_var());

    let value = if key.is_secret() {
        Password::new(&message)
            .with_help_message(&help)
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
    } else {
        Text::new(&message).with_help_message(&help).prompt()
    };

    value.with_context(|| format!("Failed to read {}", key.label()))
}
