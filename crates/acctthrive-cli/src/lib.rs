#![forbid(unsafe_code)]
//! `acctthrive` operator CLI over the referral ledger state file.

mod commands;
mod output;

use acctthrive_core::{
    resolve_acctthrive_config_path, resolve_acctthrive_state_dir, ConfigPathScope, ExitCode,
    MachineError, ENV_ACCTTHRIVE_LOG_JSON, ENV_ACCTTHRIVE_LOG_LEVEL,
};
use acctthrive_model::ProgramConfig;
use acctthrive_referrals::{LedgerError, DEFAULT_RECENT_LIMIT};
use clap::{error::ErrorKind, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode as ProcessExitCode;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser)]
#[command(name = "acctthrive")]
#[command(about = "Acctthrive referral ledger CLI", version)]
#[command(
    after_help = "Environment:\n  ACCTTHRIVE_LOG_LEVEL   Log filter (default: warn)\n  ACCTTHRIVE_LOG_JSON    Emit logs as JSON lines\n  ACCTTHRIVE_CONFIG      Program config file\n  ACCTTHRIVE_STATE_DIR   Directory holding the ledger state file"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    /// Directory holding the ledger state file.
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    /// Program config (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Get or create the referral account for a user.
    Account { user_id: String },
    /// Exit 0 when the code belongs to an account.
    ValidateCode { code: String },
    /// Record that a user signed up with a referral code.
    Refer { code: String, referred_user_id: String },
    /// Apply a confirmed deposit (USD) for a referred user.
    Deposit {
        user_id: String,
        #[arg(allow_hyphen_values = true)]
        amount_usd: String,
    },
    Stats { user_id: String },
    Recent {
        user_id: String,
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },
    /// Convert between USD and NGN at the configured rate.
    Convert {
        #[arg(long, conflicts_with = "ngn", required_unless_present = "ngn")]
        usd: Option<String>,
        #[arg(long)]
        ngn: Option<String>,
    },
    /// Print the effective program config and resolved paths.
    Config,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Account { .. } => "account",
            Self::ValidateCode { .. } => "validate-code",
            Self::Refer { .. } => "refer",
            Self::Deposit { .. } => "deposit",
            Self::Stats { .. } => "stats",
            Self::Recent { .. } => "recent",
            Self::Convert { .. } => "convert",
            Self::Config => "config",
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub(crate) json: bool,
}

pub(crate) struct CliContext {
    pub(crate) output: OutputMode,
    pub(crate) config: ProgramConfig,
    pub(crate) config_path: PathBuf,
    pub(crate) state_dir: PathBuf,
}

#[derive(Debug)]
pub(crate) struct CliError {
    pub(crate) exit_code: ExitCode,
    pub(crate) machine: MachineError,
}

impl CliError {
    pub(crate) fn internal(message: String) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", &message),
        }
    }

    pub(crate) fn validation(code: &str, message: &str) -> Self {
        Self {
            exit_code: ExitCode::Validation,
            machine: MachineError::new(code, message),
        }
    }

    fn usage(message: &str) -> Self {
        Self {
            exit_code: ExitCode::Usage,
            machine: MachineError::new("usage_error", message),
        }
    }
}

impl From<LedgerError> for CliError {
    fn from(err: LedgerError) -> Self {
        Self {
            exit_code: err.exit_code(),
            machine: MachineError::new(err.code(), &err.to_string()),
        }
    }
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code as u8)
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError {
                    exit_code: ExitCode::Usage,
                    machine: MachineError::new("usage_error", "invalid command line arguments")
                        .with_detail("error", &err.to_string()),
                });
            }
        },
    };
    init_tracing();

    let command = cli
        .command
        .ok_or_else(|| CliError::usage("missing command; see --help"))?;
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| resolve_acctthrive_config_path(ConfigPathScope::User));
    let config = load_program_config(&config_path, cli.config.is_some())?;
    let ctx = CliContext {
        output: OutputMode { json: cli.json },
        config,
        config_path,
        state_dir: cli.state.unwrap_or_else(resolve_acctthrive_state_dir),
    };

    debug!(
        command = command.name(),
        state_dir = %ctx.state_dir.display(),
        config_path = %ctx.config_path.display(),
        "dispatching command"
    );
    match command {
        Commands::Account { user_id } => commands::account(&ctx, &user_id),
        Commands::ValidateCode { code } => commands::validate_code(&ctx, &code),
        Commands::Refer {
            code,
            referred_user_id,
        } => commands::refer(&ctx, &code, &referred_user_id),
        Commands::Deposit {
            user_id,
            amount_usd,
        } => commands::deposit(&ctx, &user_id, &amount_usd),
        Commands::Stats { user_id } => commands::stats(&ctx, &user_id),
        Commands::Recent { user_id, limit } => commands::recent(&ctx, &user_id, limit),
        Commands::Convert { usd, ngn } => commands::convert(&ctx, usd.as_deref(), ngn.as_deref()),
        Commands::Config => commands::show_config(&ctx),
    }
}

/// Reads the program config. A missing file falls back to defaults unless
/// the path was given explicitly.
fn load_program_config(path: &Path, explicit: bool) -> Result<ProgramConfig, CliError> {
    let config = match std::fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<ProgramConfig>(&raw).map_err(|e| {
            CliError::validation("config_error", &format!("{}: {e}", path.display()))
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => {
            ProgramConfig::default()
        }
        Err(e) => {
            return Err(CliError::validation(
                "config_error",
                &format!("failed to read {}: {e}", path.display()),
            ))
        }
    };
    config
        .validate()
        .map_err(|e| CliError::validation("config_error", &e.to_string()))?;
    Ok(config)
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing() {
    let filter = std::env::var(ENV_ACCTTHRIVE_LOG_LEVEL)
        .ok()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if env_bool(ENV_ACCTTHRIVE_LOG_JSON, false) {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    if installed.is_err() {
        eprintln!("tracing subscriber already installed");
    }
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
    }
}
