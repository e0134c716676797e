use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn validator_user_spec() -> ValueParser {
    ValueParser::from(move |spec: &str| -> std::result::Result<String, String> {
        match spec.split_once(':') {
            Some((username, password)) if !username.is_empty() && !password.is_empty() => {
                Ok(spec.to_string())
            }
            _ => Err("user spec must be username:password".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("accesso")
        .about("Session based authentication and access control")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("ACCESSO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("user")
                .short('u')
                .long("user")
                .help("Seed user as username:password, repeat for more users")
                .env("ACCESSO_USERS")
                .action(clap::ArgAction::Append)
                .value_delimiter(',')
                .required(true)
                .value_parser(validator_user_spec()),
        )
        .arg(
            Arg::new("session-ttl")
                .long("session-ttl")
                .help("Seconds before a session expires")
                .default_value("3600")
                .env("ACCESSO_SESSION_TTL")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("ACCESSO_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
