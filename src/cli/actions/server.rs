use crate::{
    accesso,
    accesso::identity::IdentityStore,
    cli::{actions::Action, globals::GlobalArgs},
};
use anyhow::Result;
use std::time::Duration;
use tracing::info;

/// Handle the server action
/// # Errors
/// Returns an error if a user spec is malformed or the server fails to start
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            users,
            session_ttl,
        } => {
            let identities = IdentityStore::from_specs(&users)?;

            info!("Seeded {} identities", identities.len());

            let globals = GlobalArgs::new(Duration::from_secs(session_ttl));

            accesso::new(port, identities, globals).await?;
        }
    }

    Ok(())
}
