// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::env;
use std::path::PathBuf;

use wiregen_cli::generator::{GenOptions, Generator};
use wiregen::ByteOrder;

fn main() {
    // Initialize tracing for diagnostics
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "generate" => match parse_options(&args[2..]) {
            Ok(options) => {
                if let Err(e) = run_generate(options) {
                    eprintln!("[ERROR] {:#}", e);
                    std::process::exit(1);
                }
            }
            Err(msg) => {
                eprintln!("[ERROR] {}", msg);
                print_help();
                std::process::exit(1);
            }
        },
        "--help" | "-h" | "help" => {
            print_help();
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_help();
            std::process::exit(1);
        }
    }
}

fn parse_options(args: &[String]) -> Result<GenOptions, String> {
    let mut schema_path = None;
    let mut output = None;
    let mut byte_order = ByteOrder::Little;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--endian" => {
                let value = iter.next().ok_or("--endian requires a value")?;
                byte_order = ByteOrder::parse(value)
                    .ok_or_else(|| format!("Invalid byte order: {} (expected little|big)", value))?;
            }
            "-o" | "--output" => {
                let value = iter.next().ok_or("--output requires a path")?;
                output = Some(PathBuf::from(value));
            }
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            other => {
                if schema_path.replace(PathBuf::from(other)).is_some() {
                    return Err("Only one schema file may be given".to_string());
                }
            }
        }
    }

    let schema_path = schema_path.ok_or("Missing schema file")?;
    Ok(GenOptions {
        schema_path,
        output,
        byte_order,
    })
}

fn run_generate(options: GenOptions) -> anyhow::Result<()> {
    tracing::info!("Initializing generator");
    let generator = Generator::new(options);

    let report = generator.generate()?;
    report.summary();

    Ok(())
}

fn print_help() {
    println!("wiregen v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE:");
    println!("    wiregen <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    generate <schema>  Generate C decoders from a YAML/JSON type schema");
    println!("    help               Print this help message");
    println!();
    println!("OPTIONS (generate):");
    println!("    --endian <little|big>  Byte order for all multi-byte reads (default: little)");
    println!("    -o, --output <path>    Write the translation unit here (default: stdout)");
    println!();
    println!("EXAMPLES:");
    println!("    wiregen generate packet.yaml -o packet_unmarshal.c");
    println!("    wiregen generate packet.yaml --endian big");
    println!();
}
