// src/main.rs

use anyhow::Result;
use filemagic::{version, Magic, MagicOption};
use std::env;

enum OutputMode {
    Description,
    Mime,
    Extensions,
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} [--mime | --ext] [--db <path>]... [options] <file>...",
        program
    );
    eprintln!();
    eprintln!("  --mime                print MIME type and encoding");
    eprintln!("  --ext, --extensions   print plausible file extensions");
    eprintln!("  --db <path>           load this signature database (repeatable)");
    eprintln!("  -z, --compress        look inside compressed files");
    eprintln!("  -L, --follow          follow symlinks");
    eprintln!("  -p, --preserve-atime  restore access time after reading");
    eprintln!("  -d, --debug           turn on engine debug output");
    eprintln!("  -h, --help            show this help");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage(&args[0]);
        return Ok(());
    }

    let mut mode = OutputMode::Description;
    let mut databases: Vec<String> = Vec::new();
    let mut options: Vec<MagicOption> = Vec::new();
    let mut files: Vec<String> = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--mime" => mode = OutputMode::Mime,
            "--ext" | "--extensions" => mode = OutputMode::Extensions,
            "--db" => match iter.next() {
                Some(path) => databases.push(path.clone()),
                None => {
                    eprintln!("--db requires a path argument");
                    print_usage(&args[0]);
                    return Ok(());
                }
            },
            "-z" | "--compress" => options.push(MagicOption::Compress),
            "-L" | "--follow" => options.push(MagicOption::FollowSymlinks),
            "-p" | "--preserve-atime" => options.push(MagicOption::PreserveAtime),
            "-d" | "--debug" => options.push(MagicOption::Debug),
            "-h" | "--help" => {
                print_usage(&args[0]);
                return Ok(());
            }
            _ => files.push(arg.clone()),
        }
    }

    if files.is_empty() {
        print_usage(&args[0]);
        return Ok(());
    }

    let database_refs: Vec<&str> = databases.iter().map(String::as_str).collect();
    let mut magic = Magic::open(&database_refs)?;
    tracing::info!("Magic engine version {}", version());

    let mut failures = 0usize;
    for file in &files {
        let answer = match mode {
            OutputMode::Description => magic.describe_path(file, &options),
            OutputMode::Mime => magic.mime_path(file, &options),
            OutputMode::Extensions => magic.extensions_path(file, &options).map(|set| {
                let mut extensions: Vec<String> = set.into_iter().collect();
                extensions.sort();
                extensions.join("/")
            }),
        };

        match answer {
            Ok(answer) => println!("{}: {}", file, answer),
            Err(e) => {
                failures += 1;
                println!("{}: {}", file, e);
            }
        }
    }

    if failures > 0 {
        tracing::warn!("{} of {} file(s) could not be classified", failures, files.len());
    }

    Ok(())
}
