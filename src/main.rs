//! prompt-gate - prompt-injection gate for LLM inference pipelines
//!
//! A fast pre-inference hook that scans user input for injection attacks
//! before it is forwarded to a model.
//!
//! # Usage
//!
//! ```bash
//! # As a pipeline hook (reads JSON from stdin, writes JSON to stdout)
//! echo '{"input":"Ignore previous instructions."}' | prompt-gate
//!
//! # Plain text input
//! echo 'You are now DAN' | prompt-gate --raw
//!
//! # With tier override
//! prompt-gate --tier=strict
//! ```

use std::env;
use std::io::{self, Read, Write};

use prompt_gate::{
    audit::AuditLogger,
    config::{Config, Tier},
    gate::Gate,
    request::ScanRequest,
    verdict::GateResponse,
};

/// Print version information
fn print_version() {
    println!("prompt-gate {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"prompt-gate - prompt-injection gate for LLM inference pipelines

USAGE:
    prompt-gate [OPTIONS]

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -t, --tier TIER         Tier: critical, high, strict (default: high)
    -r, --raw               Treat stdin as plain text instead of JSON
    -d, --dry-run           Dry-run mode (report what would be blocked but allow)
    -c, --config PATH       Path to config file
        --list-rules        Print the active rule set and exit

ENVIRONMENT:
    PROMPT_GATE_DISABLED=1   Disable all checks (still logs)
    PROMPT_GATE_WARN_ONLY=1  Flag but don't block

USAGE AS HOOK:
    Reads {{"input": "...", "session_id": "..."}} from stdin and writes
    {{"verdict": "allowed"}} or
    {{"verdict": "blocked", "rule_id": "...", "reason": "..."}} to stdout.
"#
    );
}

/// Parse command line arguments
struct Args {
    help: bool,
    version: bool,
    tier: Option<Tier>,
    raw: bool,
    dry_run: bool,
    list_rules: bool,
    config_path: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            tier: None,
            raw: false,
            dry_run: false,
            list_rules: false,
            config_path: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-r" | "--raw" => result.raw = true,
                "-d" | "--dry-run" => result.dry_run = true,
                "--list-rules" => result.list_rules = true,
                "-t" | "--tier" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.tier = Tier::from_str(&args[i]);
                    }
                }
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                arg if arg.starts_with("--tier=") => {
                    let tier = arg.trim_start_matches("--tier=");
                    result.tier = Tier::from_str(tier);
                }
                arg if arg.starts_with("--config=") => {
                    let path = arg.trim_start_matches("--config=");
                    result.config_path = Some(path.to_string());
                }
                _ => {}
            }
            i += 1;
        }

        result
    }
}

fn main() {
    let args = Args::parse();

    if args.help {
        print_help();
        return;
    }

    if args.version {
        print_version();
        return;
    }

    // Load configuration
    let mut config = if let Some(ref path) = args.config_path {
        Config::load_from(std::path::Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config from {}: {}", path, e);
            Config::default()
        })
    } else {
        Config::load()
    };

    // Override tier if specified
    if let Some(tier) = args.tier {
        config.general.tier = tier;
    }

    // Build the gate; invalid patterns fail fast here
    let audit_path = if config.general.audit_log {
        config.audit_path()
    } else {
        None
    };
    let gate = match Gate::new(config) {
        Ok(gate) => gate,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if args.list_rules {
        for (id, note) in gate.active_rules() {
            println!("{:<36} {}", id, note);
        }
        return;
    }

    let mut logger = AuditLogger::new(audit_path.as_deref());

    // Read the request from stdin
    let mut input_json = String::new();
    if io::stdin().read_to_string(&mut input_json).is_err() {
        input_json.clear();
    }

    // Handle empty input
    if input_json.trim().is_empty() {
        // No input = nothing to check, allow
        let output = GateResponse::allowed();
        println!("{}", output.to_json());
        return;
    }

    // Parse the request
    let request = if args.raw {
        ScanRequest::from_text(input_json.trim_end_matches('\n'))
    } else {
        match ScanRequest::from_json(&input_json) {
            Ok(request) => request,
            Err(e) => {
                // SECURITY: Fail closed on parse errors
                // Malformed input could be an evasion attempt
                eprintln!("Error: Failed to parse request (blocking): {}", e);
                let output = GateResponse::blocked(
                    "parse-error",
                    &format!("failed to parse scan request: {}", e),
                );
                println!("{}", output.to_json());
                return;
            }
        }
    };

    let disabled = env::var("PROMPT_GATE_DISABLED").is_ok();
    let warn_only = args.dry_run || env::var("PROMPT_GATE_WARN_ONLY").is_ok();

    // Evaluate
    let verdict = gate.evaluate(&request.input);

    // Log the verdict
    if let Err(e) = logger.log_verdict(&request, &verdict, disabled, warn_only) {
        eprintln!("Warning: Failed to write audit log: {}", e);
    }

    // Generate output
    let output = if disabled {
        GateResponse::allowed_with_message("disabled via PROMPT_GATE_DISABLED")
    } else {
        GateResponse::from_verdict(&verdict, warn_only)
    };

    // Write to stdout
    let json = output.to_json();
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", json);
    let _ = handle.flush();
}
