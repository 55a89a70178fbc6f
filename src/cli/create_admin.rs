use crate::services::AuthService;
use crate::services::crypto::{GENERATED_PASSWORD_LENGTH, generate_password};
use crate::types::internal::Role;

/// Create an administrator account
///
/// When no password is given a random one is generated and printed once.
pub async fn create_admin(
    auth_service: &AuthService,
    username: &str,
    email: &str,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let generated = password.is_none();
    let password = password.unwrap_or_else(|| generate_password(GENERATED_PASSWORD_LENGTH));

    let user = auth_service
        .create_account(username, email, &password, Role::Admin)
        .await?;

    tracing::info!(user_id = %user.id, "Admin account created from CLI");
    println!("Admin account created");
    println!("  id:       {}", user.id);
    println!("  username: {}", user.username);
    println!("  email:    {}", user.email);
    if generated {
        println!("  password: {}", password);
        println!("\nStore this password now. It will not be shown again.");
    }
    Ok(())
}
