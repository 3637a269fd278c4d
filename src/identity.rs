//! Identity collaborator contract

use async_trait::async_trait;

/// External identity/session collaborator gating all storage access.
///
/// The core only consumes what the view renders: the signed-in user's
/// display identifier and a sign-out action. Credential handling,
/// multi-factor, and group policy all live behind this seam.
#[async_trait]
pub trait IdentitySession: Send + Sync {
    /// Display identifier of the signed-in user (typically the login email).
    fn display_id(&self) -> &str;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), String>;
}
