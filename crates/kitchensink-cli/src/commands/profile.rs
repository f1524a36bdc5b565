use super::utils::{ClientContext, print_profile, prompt};
use anyhow::{Result, bail};
use clap::Subcommand;
use kitchensink_application::ProfileEditSession;
use kitchensink_core::profile::ProfileField;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show a profile (your own by default)
    Show {
        /// View another user's profile (admins see an editable view)
        #[arg(long)]
        user: Option<String>,
    },
    /// Edit profile fields; admin edits apply immediately, your own
    /// edits raise approval requests
    Update {
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// ISD dialing code for --phone (defaults to +91)
        #[arg(long)]
        isd: Option<String>,
        /// Date of birth in DD-MM-YYYY
        #[arg(long)]
        dob: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Change the email address (requires an OTP sent to the new one)
    ChangeEmail {
        new_email: String,
        #[arg(long)]
        user: Option<String>,
    },
}

pub async fn run(action: ProfileAction) -> Result<()> {
    let ctx = ClientContext::connect()?;
    let acting = ctx.session.require()?;

    match action {
        ProfileAction::Show { user } => {
            let user_id = user.unwrap_or_else(|| acting.user_id.clone());
            let edit = ProfileEditSession::open(ctx.client.clone(), &acting, &user_id).await?;
            print_profile(edit.profile());
            if !edit.update_requests().is_empty() {
                println!();
                println!("Pending update requests:");
                super::utils::print_requests(edit.update_requests());
            }
        }
        ProfileAction::Update {
            user,
            name,
            phone,
            isd,
            dob,
            address,
            city,
            country,
        } => {
            let user_id = user.unwrap_or_else(|| acting.user_id.clone());
            let mut edit =
                ProfileEditSession::open(ctx.client.clone(), &acting, &user_id).await?;

            let fields: Vec<(ProfileField, Option<String>)> = vec![
                (ProfileField::Name, name),
                (ProfileField::PhoneNumber, phone),
                (ProfileField::DateOfBirth, dob),
                (ProfileField::Address, address),
                (ProfileField::City, city),
                (ProfileField::Country, country),
            ];
            if fields.iter().all(|(_, value)| value.is_none()) {
                bail!("nothing to update; pass at least one field flag");
            }

            for (field, value) in fields {
                let Some(value) = value else { continue };
                edit.begin_edit(field)?;
                let isd_code = (field == ProfileField::PhoneNumber)
                    .then_some(isd.as_deref())
                    .flatten();
                if let Err(error) = edit.stage_current(&value, isd_code).await {
                    for (field, message) in edit.field_errors().iter() {
                        eprintln!("❌ {field}: {message}");
                    }
                    return Err(error.into());
                }
            }

            if edit.pending().has_pending() {
                edit.save_all().await?;
            }
            if let Some(message) = edit.phase().message() {
                println!("✅ {message}");
            }
        }
        ProfileAction::ChangeEmail { new_email, user } => {
            let user_id = user.unwrap_or_else(|| acting.user_id.clone());
            let mut edit =
                ProfileEditSession::open(ctx.client.clone(), &acting, &user_id).await?;

            edit.begin_email_change(&new_email)?;
            edit.request_email_otp().await?;
            println!("📧 An OTP has been sent to {new_email}.");

            let otp = prompt("Enter OTP")?;
            edit.confirm_email_change(&otp).await?;
            if edit.pending().has_pending() {
                edit.save_all().await?;
            }
            if let Some(message) = edit.phase().message() {
                println!("✅ {message}");
            }
        }
    }
    Ok(())
}
