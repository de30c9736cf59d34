use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use devpair::commands::{
    decode_pair_command, friend_status_command, inspect_dump_command, legacy_pair_hash_command,
    pair_id_command, temp_pair_id_command, validate_pair_command,
};
use devpair::{init_tracing, load_config_or_default, resolve_dump_dir};

/// Device pairing and chat friend-status CLI.
///
/// This CLI is a thin wrapper around `devpair-core` (exposed in code as `devpair_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "devpair",
    version,
    about = "Device pair identity and chat friend-status detection",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive the canonical pair ID for two devices (argument order does not matter).
    PairId {
        /// First device (ip:port, IP, device name, or number).
        device_a: String,

        /// Second device.
        device_b: String,

        /// Order tokens as integers instead of strings.
        #[arg(long, default_value_t = false)]
        numeric_order: bool,

        /// Emit JSON instead of the bare ID.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Decode a pair ID into its two device numbers (min, max).
    DecodePair {
        pair_id: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Check that a pair ID decodes and is sorted; exits non-zero otherwise.
    ValidatePair { pair_id: String },

    /// Print a fresh temporary pair ID for a pair still being set up.
    TempPairId,

    /// Print the MD5 key older pair rows were stored under.
    LegacyPairHash { device_a: String, device_b: String },

    /// Classify the friend status from the latest UI dump of a device.
    FriendStatus {
        /// Device serial (e.g. 192.168.5.76:5555).
        #[arg(long)]
        serial: String,

        /// Directory holding ui_dump_<serial>_*.xml captures. Defaults to `debug_dumps`.
        #[arg(long)]
        dump_dir: Option<String>,

        /// Classifier config file (JSON, or YAML by extension).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the wait before retrying the dump lookup.
        #[arg(long)]
        wait_ms: Option<u64>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Classify a specific UI dump file.
    InspectDump {
        /// Path to the dump XML.
        #[arg(long)]
        file: PathBuf,

        /// Classifier config file (JSON, or YAML by extension).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::PairId { device_a, device_b, numeric_order, json } => {
            pair_id_command(&device_a, &device_b, numeric_order, json)?
        }
        Command::DecodePair { pair_id, json } => decode_pair_command(&pair_id, json)?,
        Command::ValidatePair { pair_id } => validate_pair_command(&pair_id)?,
        Command::TempPairId => temp_pair_id_command()?,
        Command::LegacyPairHash { device_a, device_b } => {
            legacy_pair_hash_command(&device_a, &device_b)?
        }
        Command::FriendStatus { serial, dump_dir, config, wait_ms, json } => {
            let config = load_config_or_default(config.as_deref(), wait_ms)?;
            let dump_dir = resolve_dump_dir(dump_dir.as_deref());
            friend_status_command(&serial, &dump_dir, config, json)?
        }
        Command::InspectDump { file, config, json } => {
            let config = load_config_or_default(config.as_deref(), None)?;
            inspect_dump_command(&file, config, json)?
        }
    }

    Ok(())
}
