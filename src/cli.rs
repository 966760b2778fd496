//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// Manage DigitalOcean droplets and SSH keys
#[derive(Parser, Debug)]
#[command(name = "fisherman", version, about, long_about = None)]
pub struct Args {
    /// Credential file (defaults to $FISHERMAN_CONFIG or ~/.fish)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the credential file)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

// Ids, sizes and regions stay strings here so that malformed values are
// reported through the same error path as every other gateway failure.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List all droplets
    Droplets,

    /// Show a single droplet
    Info { id: String },

    /// Request a new droplet
    Create {
        name: String,
        /// Size id or slug (e.g. 512mb)
        #[arg(long)]
        size: String,
        /// Image id
        #[arg(long)]
        image: String,
        /// Region id or slug (e.g. nyc2)
        #[arg(long)]
        region: String,
        /// SSH key ids to install
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
        /// Enable backups
        #[arg(long)]
        backups: bool,
        /// Enable private networking
        #[arg(long)]
        private_networking: bool,
    },

    /// Destroy a droplet (irreversible)
    Destroy {
        id: String,
        /// Wipe the disk before releasing it
        #[arg(long)]
        scrub: bool,
    },

    /// Resize a droplet
    Resize {
        id: String,
        /// Size id or slug
        #[arg(long)]
        size: String,
    },

    /// Reboot a droplet
    Reboot { id: String },

    /// Rebuild a droplet from an image, keeping its IP address
    Rebuild {
        id: String,
        #[arg(long)]
        image: String,
    },

    /// Power off a droplet
    Off { id: String },

    /// Power on a droplet
    On { id: String },

    /// Snapshot a droplet
    Snapshot {
        id: String,
        #[arg(long)]
        name: String,
    },

    /// Restore a droplet from an image
    Restore {
        id: String,
        #[arg(long)]
        image: String,
    },

    /// List SSH keys, or print one key's public material
    Keys { id: Option<String> },

    /// Upload a public key file
    AddKey { name: String, path: PathBuf },

    /// Remove an SSH key
    RemoveKey { id: String },

    /// Write the credential file
    Configure {
        #[arg(long)]
        client_id: String,
        #[arg(long)]
        api_key: String,
        /// Alternate API base URL
        #[arg(long)]
        api_url: Option<String>,
    },

    /// List known size slugs
    Sizes,

    /// List known region slugs
    Regions,
}

impl Command {
    /// Whether this command talks to the API
    pub fn needs_client(&self) -> bool {
        !matches!(self, Command::Configure { .. } | Command::Sizes | Command::Regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_parses_comma_separated_keys() {
        let args = Args::parse_from([
            "fisherman", "create", "web-1", "--size", "512mb", "--image", "100", "--region",
            "nyc2", "--keys", "1,2", "--backups",
        ]);
        match args.command {
            Command::Create { name, keys, backups, private_networking, .. } => {
                assert_eq!(name, "web-1");
                assert_eq!(keys, vec!["1", "2"]);
                assert!(backups);
                assert!(!private_networking);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from(["fisherman", "reboot", "42", "--timeout", "5"]);
        assert_eq!(args.timeout, Some(5));
        assert!(args.command.needs_client());
    }

    #[test]
    fn test_zero_timeout_flag_rejected() {
        let result = Args::try_parse_from(["fisherman", "droplets", "--timeout", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_local_commands_need_no_client() {
        let args = Args::parse_from(["fisherman", "sizes"]);
        assert!(!args.command.needs_client());
    }
}
