//! Simple command that prints sequential identifiers, with optional alternate
//! renderings and a per-identifier field breakdown

use std::{env, io, io::Write, process::ExitCode};

struct Options {
    count: usize,
    format: Format,
    fields: bool,
}

enum Format {
    Hyphenated,
    Simple,
    Braced,
    Uppercase,
}

fn main() -> io::Result<ExitCode> {
    let mut args = env::args();
    let program = args.next();
    let options = match parse_args(args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!(
                "Usage: {} [-n count] [-f d|s|b|u] [-v]",
                program.as_deref().unwrap_or("seqid")
            );
            eprintln!("  -n count   number of identifiers to print");
            eprintln!("  -f format  d: hyphenated, s: simple, b: braced, u: uppercase");
            eprintln!("  -v         also print the decoded fields");
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..options.count {
        let id = seqid::seqid();
        match options.format {
            Format::Hyphenated => writeln!(buf, "{}", id)?,
            Format::Simple => writeln!(buf, "{}", id.encode_simple())?,
            Format::Braced => writeln!(buf, "{}", id.encode_braced())?,
            Format::Uppercase => writeln!(buf, "{:X}", id)?,
        }
        if options.fields {
            writeln!(
                buf,
                "  timestamp: {}  machine: {:08x}  pid: {}  random: {:08x}",
                id.timestamp(),
                id.machine(),
                id.pid(),
                id.random()
            )?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options {
        count: 1,
        format: Format::Hyphenated,
        fields: false,
    };
    let mut count_seen = false;
    let mut format_seen = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" => {
                if count_seen {
                    return Err("option 'n' given more than once".to_owned());
                }
                count_seen = true;
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                options.count = c;
            }
            "-f" => {
                if format_seen {
                    return Err("option 'f' given more than once".to_owned());
                }
                format_seen = true;
                let Some(f_arg) = args.next() else {
                    return Err("argument to option 'f' missing".to_owned());
                };
                options.format = match f_arg.as_str() {
                    "d" => Format::Hyphenated,
                    "s" => Format::Simple,
                    "b" => Format::Braced,
                    "u" => Format::Uppercase,
                    _ => return Err(format!("invalid argument to option 'f': '{}'", f_arg)),
                };
            }
            "-v" => options.fields = true,
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    Ok(options)
}
