//! Differential harness CLI.
//!
//! `run` executes a seeded campaign against the host libc reference and
//! writes markdown/JSON reports; `show` regenerates and prints a single
//! case for debugging a reported failure.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tprintf_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use tprintf_harness::{CampaignConfig, CampaignReport, Case, run_campaign, run_case};

#[derive(Parser)]
#[command(name = "harness", about = "Differential snprintf conformance harness")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a seeded differential campaign.
    Run {
        /// Number of generated cases.
        #[arg(long, default_value_t = 1000)]
        cases: usize,
        /// Root seed (decimal, or hex with 0x prefix; underscores allowed).
        #[arg(long, default_value = "0xDEAD_BEEF")]
        seed: String,
        /// Capacity large enough to never truncate a generated case.
        #[arg(long, default_value_t = 4096)]
        capacity: usize,
        /// Write a markdown report here (a .json sibling is written too).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Write JSONL structured logs here.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Regenerate and print one case.
    Show {
        /// Root seed (decimal, or hex with 0x prefix; underscores allowed).
        #[arg(long, default_value = "0xDEAD_BEEF")]
        seed: String,
        /// Case index within the seeded stream.
        #[arg(long)]
        index: usize,
    },
}

/// Parse a seed given as decimal or `0x`-prefixed hex, ignoring underscores.
fn parse_seed(s: &str) -> Result<u64, String> {
    let cleaned = s.replace('_', "");
    let parsed = if let Some(hex) = cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)
    } else {
        cleaned.parse()
    };
    parsed.map_err(|e| format!("invalid seed '{s}': {e}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            cases,
            seed,
            capacity,
            report,
            log,
        } => {
            let seed = parse_seed(&seed)?;
            let config = CampaignConfig {
                seed,
                cases,
                ample_capacity: capacity,
            };
            eprintln!("running {cases} cases, seed {seed:#x}, ample capacity {capacity}");

            let result = run_campaign(&config);

            if let Some(path) = log {
                let mut emitter = LogEmitter::to_file(&path, &format!("{seed:#x}"))?;
                emitter.emit(LogLevel::Info, "campaign_start")?;
                for failure in &result.failures {
                    let entry = LogEntry::new("", LogLevel::Error, "case_divergence")
                        .with_case(
                            failure.case.index,
                            String::from_utf8_lossy(&failure.case.template).into_owned(),
                        )
                        .with_outcome(Outcome::Fail);
                    emitter.emit_entry(entry)?;
                }
                emitter.emit(LogLevel::Info, "campaign_end")?;
                emitter.flush()?;
            }

            let summary = CampaignReport::from_result("snprintf differential campaign", seed, &result);
            if let Some(path) = report {
                std::fs::write(&path, summary.to_markdown())?;
                let json_path = path.with_extension("json");
                std::fs::write(&json_path, summary.to_json())?;
                eprintln!("report written to {} and {}", path.display(), json_path.display());
            } else {
                println!("{}", summary.to_markdown());
            }

            eprintln!(
                "{} passed, {} failed of {}",
                result.passed,
                result.failed(),
                result.total
            );
            if result.failed() > 0 {
                return Err(format!("{} case(s) diverged from host libc", result.failed()).into());
            }
            Ok(())
        }
        Command::Show { seed, index } => {
            let seed = parse_seed(&seed)?;
            let case = Case::generate(seed, index);
            println!("template: {:?}", String::from_utf8_lossy(&case.template));
            println!("args:     {:?}", case.args);
            match tprintf_core::format_to_vec(&case.template, &case.arg_values()) {
                Ok(bytes) => println!("engine:   {:?}", String::from_utf8_lossy(&bytes)),
                Err(err) => println!("engine:   error: {err}"),
            }
            match tprintf_harness::host_render_full(&case.template, &case.args) {
                Ok(bytes) => println!("host:     {:?}", String::from_utf8_lossy(&bytes)),
                Err(err) => println!("host:     error: {err}"),
            }
            match run_case(&case, 4096) {
                Ok(()) => println!("outcome:  matches host libc at every swept capacity"),
                Err(issue) => println!("outcome:  {issue:?}"),
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seed_accepts_decimal_and_hex() {
        assert_eq!(parse_seed("42").unwrap(), 42);
        assert_eq!(parse_seed("0xDEAD_BEEF").unwrap(), 0xDEAD_BEEF);
        assert_eq!(parse_seed("0Xff").unwrap(), 0xFF);
        assert!(parse_seed("zebra").is_err());
    }
}
