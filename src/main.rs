//! pawnix - Pawn highlighter and search/replace tool

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use tracing_subscriber::EnvFilter;

use pawnix::completion;
use pawnix::error::{PawnixError, Result};
use pawnix::render::{caret_line, render_block};
use pawnix::search::{self, Pattern, ReplaceScope};
use pawnix::{Config, Document, Highlighter};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Parsed command line
struct Args {
    positional: Vec<String>,
    case_sensitive: Option<bool>,
    whole_word: Option<bool>,
    no_color: bool,
    one: bool,
}

impl Args {
    fn parse(raw: impl Iterator<Item = String>) -> Result<Self> {
        let mut args = Args {
            positional: Vec::new(),
            case_sensitive: None,
            whole_word: None,
            no_color: false,
            one: false,
        };
        for arg in raw {
            match arg.as_str() {
                "-c" | "--case-sensitive" => args.case_sensitive = Some(true),
                "-w" | "--whole-word" => args.whole_word = Some(true),
                "--no-color" => args.no_color = true,
                "--one" => args.one = true,
                flag if flag.starts_with("--") => {
                    return Err(PawnixError::Message(format!("unknown option: {}", flag)));
                }
                _ => args.positional.push(arg),
            }
        }
        Ok(args)
    }

    fn pattern(&self, source: &str, config: &Config) -> Pattern {
        Pattern::new(source)
            .with_case_sensitive(self.case_sensitive.unwrap_or(config.case_sensitive))
            .with_whole_word(self.whole_word.unwrap_or(config.whole_word))
    }
}

fn run() -> Result<()> {
    let mut raw = env::args().skip(1);
    let Some(command) = raw.next() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "--help" | "-h" => {
            print_usage();
            return Ok(());
        }
        "--version" | "-V" => {
            print_version();
            return Ok(());
        }
        _ => {}
    }

    let args = Args::parse(raw)?;
    let mut config = Config::load();
    if args.no_color {
        config.color = false;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match (command.as_str(), args.positional.as_slice()) {
        ("highlight", [file]) => highlight(&mut out, Path::new(file), &config)?,
        ("search", [pattern, file]) => {
            let pattern = args.pattern(pattern, &config);
            find(&mut out, &pattern, Path::new(file), &config)?;
        }
        ("replace", [pattern, replacement, file]) => {
            let pattern = args.pattern(pattern, &config);
            let scope = if args.one { ReplaceScope::One } else { ReplaceScope::All };
            let mut doc = Document::from_file(Path::new(file))?;
            let count = search::replace(&mut doc, &pattern, replacement, scope)?;
            write!(out, "{}", doc.to_text())?;
            eprintln!("{} replacement(s)", count);
        }
        ("goto", [line, file]) => {
            let line = parse_number(line)?;
            let mut doc = Document::from_file(Path::new(file))?;
            if let Some(idx) = doc.go_to_line(line) {
                let text = doc.block(idx).map(|b| b.text()).unwrap_or_default();
                writeln!(out, "{}:{}: {}", line, doc.cursor(), text)?;
            }
        }
        ("complete", [prefix]) => {
            for candidate in completion::complete(prefix) {
                writeln!(out, "{}", candidate)?;
            }
        }
        ("complete", [file, line, column]) => {
            let mut doc = Document::from_file(Path::new(file))?;
            let idx = doc
                .go_to_line(parse_number(line)?)
                .ok_or_else(|| PawnixError::Message(format!("no line {} in {}", line, file)))?;
            let width = doc.block(idx).map_or(0, |block| block.char_len());
            let column = parse_number(column)?.saturating_sub(1).min(width);
            doc.set_cursor(doc.block_start(idx) + column);
            for candidate in completion::complete_at(&doc) {
                writeln!(out, "{}", candidate)?;
            }
        }
        _ => {
            return Err(PawnixError::Message(format!(
                "bad arguments for '{}', see --help",
                command
            )))
        }
    }

    out.flush()?;
    Ok(())
}

fn parse_number(arg: &str) -> Result<usize> {
    arg.parse()
        .map_err(|_| PawnixError::Message(format!("not a number: {}", arg)))
}

fn highlight<W: Write>(out: &mut W, path: &Path, config: &Config) -> Result<()> {
    let mut doc = Document::from_file(path)?;
    let results = Highlighter::new().highlight_all(&mut doc);
    for (block, result) in doc.blocks().iter().zip(&results) {
        let runs = result.resolved(block.char_len());
        render_block(out, block.text(), &runs, &[], config)?;
    }
    Ok(())
}

fn find<W: Write>(out: &mut W, pattern: &Pattern, path: &Path, config: &Config) -> Result<()> {
    let mut doc = Document::from_file(path)?;
    let count = search::highlight_matches(&mut doc, pattern)?;

    for m in doc.selections() {
        let Some(block) = doc.block(m.block_index) else {
            continue;
        };
        let column = m.start - doc.block_start(m.block_index);
        let prefix = format!("{}:{}: ", m.block_index + 1, column + 1);
        let local = column..column + m.length;
        write!(out, "{}", prefix)?;
        render_block(out, block.text(), &[], std::slice::from_ref(&local), config)?;
        writeln!(out, "{}{}", " ".repeat(prefix.len()), caret_line(block.text(), local))?;
    }

    eprintln!("{} match(es)", count);
    Ok(())
}

fn print_usage() {
    println!("pawnix {} - Pawn highlighter and search/replace", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: pawnix COMMAND [OPTIONS] ARGS...");
    println!();
    println!("Commands:");
    println!("  highlight FILE                     Print FILE with syntax colors");
    println!("  search PATTERN FILE                List regex matches of PATTERN");
    println!("  replace PATTERN REPLACEMENT FILE   Print FILE with matches replaced");
    println!("  goto LINE FILE                     Print the start offset of LINE");
    println!("  complete PREFIX                    List keywords starting with PREFIX");
    println!("  complete FILE LINE COL             List keywords for the word before LINE:COL");
    println!();
    println!("Options:");
    println!("  -c, --case-sensitive  Match letter case exactly");
    println!("  -w, --whole-word      Whole-word search flag");
    println!("      --one             Replace only the first match");
    println!("      --no-color        Disable colored output");
    println!("  -h, --help            Show this help message");
    println!("  -V, --version         Show version information");
    println!();
    println!("Settings are read from ~/.pawnix.toml; RUST_LOG controls logging.");
}

fn print_version() {
    println!("pawnix {}", env!("CARGO_PKG_VERSION"));
}
