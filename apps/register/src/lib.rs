//! # Quick Mart Register
//!
//! The register application: command line, configuration, state, commands
//! and the interactive shell.
//!
//! ## Module Organization
//! ```text
//! quickmart_register/
//! ├── lib.rs          ◄─── You are here (args, tracing, run)
//! ├── shell.rs        ◄─── Interactive menu over any BufRead/Write pair
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Layered configuration
//! │   ├── clock.rs    ◄─── Wall clock (fixed in tests)
//! │   ├── session.rs  ◄─── Customer tier + cart of one transaction
//! │   └── register.rs ◄─── RegisterState (inventory, receipts, counter)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── inventory.rs◄─── list_inventory
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── checkout.rs ◄─── Checkout protocol
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize tracing (stderr, RUST_LOG or "warn,quickmart=info")      │
//! │  2. Load configuration: defaults → TOML → env → flags                   │
//! │  3. Open register: load inventory, recover transaction counter          │
//! │  4. Run the shell on stdin/stdout until the operator quits              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::{ApiError, ApiResult};
use shell::Shell;
use state::{ConfigOverrides, RegisterConfig, RegisterState, SystemClock};

/// Command line of the register binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "quickmart-register", version, about = "Quick Mart point-of-sale register")]
pub struct Args {
    /// Inventory file, one `Name: qty, $regular, $member, Taxable` per line
    pub inventory: PathBuf,

    /// Directory receipts are written to
    #[arg(long, value_name = "DIR")]
    pub receipts_dir: Option<PathBuf>,

    /// Sales tax rate, as a fraction (0.065) or a percentage (6.5%)
    #[arg(long, value_name = "RATE")]
    pub tax_rate: Option<String>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE", env = "QUICKMART_CONFIG")]
    pub config: Option<PathBuf>,

    /// Store name shown in the banner
    #[arg(long, value_name = "NAME")]
    pub store_name: Option<String>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config.clone(),
            store_name: self.store_name.clone(),
            tax_rate: self.tax_rate.clone(),
            receipts_dir: self.receipts_dir.clone(),
        }
    }
}

/// Runs the register until the operator quits.
///
/// ## Errors
/// - `ValidationError` if the configuration is invalid
/// - `PersistenceFailure` if the inventory cannot be read or the receipt
///   directory cannot be scanned
/// - `Internal` if the terminal itself fails
pub fn run(args: Args) -> ApiResult<()> {
    init_tracing();

    let config = RegisterConfig::load(&args.overrides())?;
    let mut state = RegisterState::open(config, &args.inventory, Box::new(SystemClock))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut state, stdin.lock(), stdout.lock())
        .run()
        .map_err(|e| ApiError::internal(format!("Terminal I/O failed: {}", e)))?;

    info!("Register closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command
/// - `RUST_LOG=quickmart=trace` - Trace the quickmart crates only
/// - Default: warnings, plus INFO for the quickmart crates
///
/// Logs go to stderr so they never interleave with the shell's prompts.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,quickmart=info"));

    // A second init (tests calling run twice) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
