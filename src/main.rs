//! Login Checker - verify credentials through the configured login checkers.

use std::env;
use std::io::{self, BufRead};
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use login_checker::checkers::ProgressiveChecker;
use login_checker::config::Settings;
use login_checker::error::LoginError;
use login_checker::session::{LoginService, Session};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

/// Subcommands understood by the binary.
#[derive(Debug, PartialEq)]
enum Command {
    Verify(String),
    Exists(String),
    Digest(String),
    Check,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{} {}", NAME, VERSION);
        return ExitCode::SUCCESS;
    }

    let parsed = parse_command(&args).and_then(|c| get_config_path(&args).map(|p| (c, p)));
    let (command, config_path) = match parsed {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run '{} --help' for usage.", NAME);
            return ExitCode::from(2);
        }
    };

    let settings = match Settings::load(&config_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&settings) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Starting {} v{}", NAME, VERSION);
    info!("Configuration loaded from: {}", config_path);

    match run(command, &settings) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(code = e.code(), error = %e, "Login check failed");
            eprintln!("{}: {}", e.code(), e);
            ExitCode::FAILURE
        }
    }
}

/// Run a subcommand; `Ok(false)` is a negative answer rather than an error.
fn run(command: Command, settings: &Settings) -> Result<bool, LoginError> {
    let service = || LoginService::from_settings(settings);
    let mut session = Session::anonymous();

    match command {
        Command::Check => check_accounts(settings),
        Command::Verify(username) => {
            let password = read_password()?;
            let verified = service()?.verify_password(&mut session, &password, Some(&username))?;
            println!("{}", if verified { "valid" } else { "invalid" });
            Ok(verified)
        }
        Command::Exists(username) => {
            let exists = service()?.user_exists(&session, Some(&username))?;
            println!("{}", if exists { "exists" } else { "unknown" });
            Ok(exists)
        }
        Command::Digest(username) => {
            let digest = service()?.password_digest(&session, Some(&username))?;
            println!("{}", digest);
            Ok(true)
        }
    }
}

/// Report accounts that no configured checker can handle.
fn check_accounts(settings: &Settings) -> Result<bool, LoginError> {
    let checker = ProgressiveChecker::from_settings(settings)?;

    for (login_type, kind) in checker.registry().describe() {
        println!("login type {:<16} -> {}", login_type, kind);
    }

    let problems = checker.audit_accounts()?;
    for problem in &problems {
        println!("unroutable account {}", problem);
    }

    if problems.is_empty() {
        println!("all accounts routable");
    }
    Ok(problems.is_empty())
}

/// Read the password from the first line of stdin.
fn read_password() -> Result<String, LoginError> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Print help message.
fn print_help() {
    println!(
        r#"{} {}
Verify user credentials through the configured login checkers.

USAGE:
    {} [OPTIONS] <COMMAND>

COMMANDS:
    verify <USERNAME>      Check the password read from stdin
    exists <USERNAME>      Check whether the user has an account
    digest <USERNAME>      Print the stored password digest
    check                  List accounts no login checker can handle

OPTIONS:
    -c, --config <PATH>    Path to configuration file
                           [default: /etc/login-checker/config.toml]
    -h, --help             Print help information
    -V, --version          Print version information
"#,
        NAME, VERSION, NAME
    );
}

/// Get configuration file path from command line arguments.
fn get_config_path(args: &[String]) -> Result<String, String> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--config" || arg == "-c" {
            return iter
                .next()
                .cloned()
                .ok_or_else(|| format!("Option '{}' requires a path", arg));
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Ok(path.to_string());
        }
    }
    Ok("/etc/login-checker/config.toml".to_string())
}

/// Extract the subcommand and its argument.
///
/// Only the options listed in the help text are skipped; anything else,
/// including a username that starts with `-`, counts as positional.
fn parse_command(args: &[String]) -> Result<Command, String> {
    let mut positional = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                iter.next()
                    .ok_or_else(|| format!("Option '{}' requires a path", arg))?;
            }
            "--help" | "-h" | "--version" | "-V" => {}
            a if a.starts_with("--config=") => {}
            a => positional.push(a),
        }
    }

    match positional.as_slice() {
        ["verify", user] => Ok(Command::Verify(user.to_string())),
        ["exists", user] => Ok(Command::Exists(user.to_string())),
        ["digest", user] => Ok(Command::Digest(user.to_string())),
        ["check"] => Ok(Command::Check),
        [] => Err("No command given".to_string()),
        [cmd, ..] => Err(format!("Unknown command or wrong arguments: '{}'", cmd)),
    }
}

/// Initialize logging based on settings.
fn init_logging(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    // Logs go to stderr so command output on stdout stays parseable.
    match settings.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(io::stderr))
                .init();
        }
    }

    Ok(())
}
