use super::utils::{ClientContext, print_requests};
use anyhow::Result;
use clap::Subcommand;
use kitchensink_application::{ModerationQueue, UserDirectory};
use kitchensink_core::api::UserPayload;

const PAGE_SIZE: u32 = 10;

#[derive(Subcommand)]
pub enum AdminAction {
    /// Manage the user directory
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Review pending update requests
    Requests {
        #[command(subcommand)]
        action: ModerationAction,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// List users one page at a time
    List {
        /// Zero-based page number
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Search users by name
    Search { name: String },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        isd: Option<String>,
        #[arg(long)]
        dob: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Replace a user's details
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        isd: Option<String>,
        #[arg(long)]
        dob: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Delete a user
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ModerationAction {
    /// List all pending update requests
    List,
    /// Approve a request, applying its value
    Approve { id: String },
    /// Reject a request with a reason
    Reject {
        id: String,
        #[arg(long)]
        reason: String,
    },
}

pub async fn run(action: AdminAction) -> Result<()> {
    let ctx = ClientContext::connect()?;
    ctx.session.require()?;

    match action {
        AdminAction::Users { action } => users(ctx, action).await,
        AdminAction::Requests { action } => moderation(ctx, action).await,
    }
}

async fn users(ctx: ClientContext, action: UserAction) -> Result<()> {
    let mut directory = UserDirectory::new(ctx.client.clone(), PAGE_SIZE);

    match action {
        UserAction::List { page } => {
            directory.load_page(page).await?;
            print_listing(&directory);
        }
        UserAction::Search { name } => {
            directory.search(&name).await?;
            let results = directory.visible_users();
            if results.is_empty() {
                println!("No users matching '{name}'.");
            }
            for profile in results {
                print_row(profile);
            }
        }
        UserAction::Create {
            name,
            email,
            phone,
            isd,
            dob,
            address,
            city,
            country,
        } => {
            let payload = payload(name, email, phone, isd, dob, address, city, country);
            let created = directory.create_user(&payload).await?;
            println!("✅ Created user {} ({}).", created.name, created.user_id);
        }
        UserAction::Update {
            id,
            name,
            email,
            phone,
            isd,
            dob,
            address,
            city,
            country,
        } => {
            let payload = payload(name, email, phone, isd, dob, address, city, country);
            let updated = directory.update_user(&id, &payload).await?;
            println!("✅ Updated user {} ({}).", updated.name, updated.user_id);
        }
        UserAction::Delete { id } => {
            directory.delete_user(&id).await?;
            println!("✅ Deleted user {id}.");
        }
    }
    Ok(())
}

async fn moderation(ctx: ClientContext, action: ModerationAction) -> Result<()> {
    let mut queue = ModerationQueue::new(ctx.client.clone());

    match action {
        ModerationAction::List => {
            queue.refresh().await?;
            print_requests(queue.requests());
        }
        ModerationAction::Approve { id } => {
            queue.approve(&id).await?;
            println!("✅ Request approved and applied.");
        }
        ModerationAction::Reject { id, reason } => {
            queue.reject(&id, &reason).await?;
            println!("✅ Request rejected.");
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn payload(
    name: String,
    email: String,
    phone: String,
    isd: Option<String>,
    dob: Option<String>,
    address: Option<String>,
    city: Option<String>,
    country: Option<String>,
) -> UserPayload {
    UserPayload {
        name,
        email,
        phone_number: phone,
        isd_code: isd,
        date_of_birth: dob,
        address,
        city,
        country,
        role: None,
    }
}

fn print_listing(directory: &UserDirectory) {
    for profile in directory.visible_users() {
        print_row(profile);
    }
    if let Some(page) = directory.page() {
        println!(
            "Page {}/{} ({} users total)",
            page.number + 1,
            page.total_pages.max(1),
            page.total_elements
        );
    }
}

fn print_row(profile: &kitchensink_core::profile::Profile) {
    println!(
        "{}  {:<24} {:<30} {} {}",
        profile.user_id,
        profile.name,
        profile.email,
        profile.isd_code.as_deref().unwrap_or(""),
        profile.phone_number
    );
}
