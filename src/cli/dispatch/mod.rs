use crate::cli::actions::Action;
use anyhow::Result;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        users: matches
            .get_many::<String>("user")
            .map(|users| users.cloned().collect())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --user"))?,
        session_ttl: matches
            .get_one::<u64>("session-ttl")
            .copied()
            .unwrap_or(3600),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_handler_builds_server_action() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "accesso",
            "--port",
            "9000",
            "--user",
            "alice:wonderland",
            "--session-ttl",
            "300",
        ]);

        let Action::Server {
            port,
            users,
            session_ttl,
        } = handler(&matches)?;

        assert_eq!(port, 9000);
        assert_eq!(users, vec!["alice:wonderland".to_string()]);
        assert_eq!(session_ttl, 300);

        Ok(())
    }
}
