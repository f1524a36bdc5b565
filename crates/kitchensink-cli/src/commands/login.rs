use super::utils::{ClientContext, prompt};
use anyhow::Result;
use kitchensink_application::LoginFlow;

/// Requests a login OTP, reads it from stdin, and caches the session.
pub async fn run(email: &str) -> Result<()> {
    let ctx = ClientContext::connect()?;
    let mut flow = LoginFlow::new(ctx.client.clone(), ctx.session.clone());

    flow.request_otp(email).await?;
    println!("📧 An OTP has been sent to {email}.");

    let otp = prompt("Enter OTP")?;
    let role = flow.verify(&otp).await?;

    println!("✅ Logged in as {email} ({role:?}).");
    if role.is_admin() {
        println!("   Admin commands are available under `kitchensink admin`.");
    }
    Ok(())
}

pub fn logout() -> Result<()> {
    let ctx = ClientContext::connect()?;
    if ctx.session.clear() {
        println!("✅ Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

pub fn whoami() -> Result<()> {
    let ctx = ClientContext::connect()?;
    match ctx.session.get() {
        Some(session) => {
            println!("{} <{}> ({:?})", session.name, session.email, session.role);
            println!("User ID: {}", session.user_id);
        }
        None => println!("Not logged in."),
    }
    Ok(())
}
