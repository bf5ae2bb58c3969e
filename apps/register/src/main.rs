//! # Quick Mart Register Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  $ quickmart-register inventory.txt --tax-rate 6.5%                     │
//! │                                                                         │
//! │  main.rs ────► parse Args, hand off to quickmart_register::run          │
//! │  lib.rs ─────► tracing, config, RegisterState, Shell                    │
//! │                                                                         │
//! │  Exit status 0 when the operator quits, 1 on a start-up failure.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;
use quickmart_register::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    match quickmart_register::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.message);
            ExitCode::FAILURE
        }
    }
}
