//! # State Module
//!
//! State owned by the running register.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  main.rs                                                                │
//! │  └── RegisterConfig::load ──► RegisterState::open ──► Shell::run        │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  RegisterConfig  │  │  RegisterState   │  │  Session             │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  store_name      │  │  inventory       │  │  customer tier       │  │
//! │  │  tax_rate        │  │  files           │  │  cart                │  │
//! │  │  receipts_dir    │  │  counter, clock  │  │                      │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  One process, one register, one cart at a time. State is passed by     │
//! │  `&mut` into every command.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod clock;
mod config;
mod register;
mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, ConfigOverrides, ConfigResult, RegisterConfig, DEFAULT_CONFIG_FILE};
pub use register::RegisterState;
pub use session::Session;
