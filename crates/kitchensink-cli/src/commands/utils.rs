use anyhow::{Context, Result};
use kitchensink_core::profile::Profile;
use kitchensink_core::update_request::UpdateRequest;
use kitchensink_infrastructure::{ClientConfig, KitchensinkPaths, RestClient, SessionStore};
use std::io::{BufRead, Write};
use std::sync::Arc;

/// Shared wiring for every command: config, persisted session, client.
pub struct ClientContext {
    pub client: Arc<RestClient>,
    pub session: SessionStore,
}

impl ClientContext {
    pub fn connect() -> Result<Self> {
        let config = ClientConfig::load().context("Failed to load client configuration")?;
        let session = SessionStore::with_file(KitchensinkPaths::session_file()?);
        let client = Arc::new(RestClient::new(&config, session.clone())?);
        Ok(Self { client, session })
    }
}

/// Reads one trimmed line from stdin after printing `label`.
pub fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

pub fn print_profile(profile: &Profile) {
    println!("User ID:    {}", profile.user_id);
    println!("Name:       {}", profile.name);
    println!("Email:      {}", profile.email);
    println!(
        "Phone:      {} {}",
        profile.isd_code.as_deref().unwrap_or(""),
        profile.phone_number
    );
    if let Some(dob) = &profile.date_of_birth {
        println!("Born:       {dob}");
    }
    if let Some(address) = &profile.address {
        println!("Address:    {address}");
    }
    if let Some(city) = &profile.city {
        println!("City:       {city}");
    }
    if let Some(country) = &profile.country {
        println!("Country:    {country}");
    }
    println!("Role:       {:?}", profile.role);
    println!(
        "Registered: {}",
        profile.registration_date.format("%Y-%m-%d")
    );
}

pub fn print_requests(requests: &[UpdateRequest]) {
    if requests.is_empty() {
        println!("No update requests.");
        return;
    }
    for request in requests {
        println!(
            "{}  [{:?}] {}: {} -> {}",
            request.id,
            request.status,
            request.field_name,
            request.old_value.as_deref().unwrap_or("(empty)"),
            request.new_value.as_deref().unwrap_or("(empty)"),
        );
        if let Some(reason) = &request.rejection_reason {
            println!("          rejected: {reason}");
        }
    }
}
