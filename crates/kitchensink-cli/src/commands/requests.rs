use super::utils::{ClientContext, print_requests};
use anyhow::Result;
use clap::Subcommand;
use kitchensink_application::ProfileEditSession;

#[derive(Subcommand)]
pub enum RequestAction {
    /// List your update requests and their review status
    List,
    /// Withdraw one of your pending update requests
    Revoke {
        /// Request ID as shown by `requests list`
        id: String,
    },
}

pub async fn run(action: RequestAction) -> Result<()> {
    let ctx = ClientContext::connect()?;
    let acting = ctx.session.require()?;
    let mut edit =
        ProfileEditSession::open(ctx.client.clone(), &acting, &acting.user_id).await?;

    match action {
        RequestAction::List => print_requests(edit.update_requests()),
        RequestAction::Revoke { id } => {
            edit.revoke_request(&id).await?;
            println!("✅ Update request revoked.");
        }
    }
    Ok(())
}
