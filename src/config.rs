use std::net::SocketAddr;
use std::path::PathBuf;

use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand, ValueEnum};

use crate::generator::{DEFAULT_LENGTH, MAX_LENGTH, MIN_LENGTH};

#[derive(Debug, Parser)]
#[command(name = "passmint", version, about = "Generate, score and keep random passwords")]
pub struct Cli {
    /// Log output format
    #[arg(long, env = "LOGGER", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service
    Serve(ServeArgs),

    /// Print one generated password
    Generate(GenerateArgs),

    /// Print a strong password holding every character class
    Suggest,

    /// Rate an existing password
    Score {
        #[arg(allow_hyphen_values = true)]
        password: String,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "PASSMINT_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// JSON file holding saved passwords
    #[arg(long, env = "PASSMINT_STORE", default_value = "saved_passwords.json")]
    pub store: PathBuf,
}

#[derive(Debug, Clone, clap::Args)]
pub struct GenerateArgs {
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_LENGTH,
        value_parser = clap::value_parser!(u16).range(MIN_LENGTH as i64..=MAX_LENGTH as i64).map(usize::from)
    )]
    pub length: usize,

    /// Include digits (0-9)
    #[arg(short, long)]
    pub digits: bool,

    /// Include special characters (!@#$%)
    #[arg(short, long)]
    pub special: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults_match_minimal_form() {
        let cli = Cli::try_parse_from(["passmint", "generate"]).unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.length, 16);
                assert!(!args.digits);
                assert!(!args.special);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_generate_length_out_of_range() {
        assert!(Cli::try_parse_from(["passmint", "generate", "--length", "7"]).is_err());
        assert!(Cli::try_parse_from(["passmint", "generate", "-l", "33"]).is_err());
        assert!(Cli::try_parse_from(["passmint", "generate", "-l", "32", "-d", "-s"]).is_ok());
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "passmint",
            "--log-format",
            "json",
            "serve",
            "--bind",
            "127.0.0.1:8080",
            "--store",
            "/tmp/pw.json",
        ])
        .unwrap();

        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind.port(), 8080);
                assert_eq!(args.store, PathBuf::from("/tmp/pw.json"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_score_accepts_leading_hyphen() {
        let cli = Cli::try_parse_from(["passmint", "score", "-Ab1!xyzw"]).unwrap();
        match cli.command {
            Command::Score { password } => assert_eq!(password, "-Ab1!xyzw"),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
