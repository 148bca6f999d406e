//! CLI argument parsing using clap derive

use clap::Parser;
use std::path::PathBuf;

/// Report a service's last-run outcome to the shared status directory
#[derive(Parser, Debug)]
#[command(name = "service-status")]
#[command(author, version)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Name of the service
    pub service_name: String,

    /// Exit code of the service
    pub exit_code: i64,

    /// Project root holding .env.json (defaults to the parent of the binary's directory)
    #[arg(long, env = "SERVICE_STATUS_ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file to read instead of <root>/.env.json
    #[arg(long, env = "SERVICE_STATUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keep integer configuration values typed instead of collapsing them to strings
    #[arg(long)]
    pub typed_values: bool,

    /// Fail when the configuration's "version" does not match the schema version
    #[arg(long)]
    pub check_version: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_describes_the_command() {
        let about = Cli::command().get_about().map(|s| s.to_string());
        assert_eq!(
            about.as_deref(),
            Some("Report a service's last-run outcome to the shared status directory")
        );
    }

    #[test]
    fn parses_positionals() {
        let cli = Cli::try_parse_from(["service-status", "build", "137"]).unwrap();
        assert_eq!(cli.service_name, "build");
        assert_eq!(cli.exit_code, 137);
        assert!(!cli.verbose);
    }

    #[test]
    fn accepts_negative_exit_codes() {
        let cli = Cli::try_parse_from(["service-status", "build", "-1"]).unwrap();
        assert_eq!(cli.exit_code, -1);
    }

    #[test]
    fn rejects_non_integer_exit_code() {
        assert!(Cli::try_parse_from(["service-status", "build", "ok"]).is_err());
    }

    #[test]
    fn parses_options() {
        let cli = Cli::try_parse_from([
            "service-status",
            "--root",
            "/opt/project",
            "--check-version",
            "--typed-values",
            "-v",
            "deploy",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/opt/project")));
        assert!(cli.check_version);
        assert!(cli.typed_values);
        assert!(cli.verbose);
    }
}
