//! rgrep: grep-style line matching built on the regrip engine

use regrip::Regex;
use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use structopt::StructOpt;
use walkdir::WalkDir;

#[derive(Debug, StructOpt)]
#[structopt(name = "rgrep", about = "Search for lines matching a regular expression.")]
struct Opt {
    /// Interpret the pattern as an extended regular expression.
    #[structopt(short = "E", long = "extended-regexp")]
    extended: bool,

    /// Search every regular file under each path, recursively.
    #[structopt(short = "r", long = "recursive")]
    recursive: bool,

    /// The pattern to search for.
    pattern: String,

    /// Files (or, with -r, directory trees) to search.
    /// With no paths, a single line is read from standard input.
    #[structopt(parse(from_os_str))]
    paths: Vec<PathBuf>,
}

fn main() {
    let opt = Opt::from_args();
    if !opt.extended {
        eprintln!("rgrep: only extended regular expressions are supported; pass -E");
        process::exit(1);
    }
    if opt.recursive && opt.paths.is_empty() {
        eprintln!("rgrep: at least one path is required with --recursive");
        process::exit(1);
    }
    let regex = match Regex::new(&opt.pattern) {
        Ok(re) => re,
        Err(err) => {
            eprintln!("rgrep: {}: {}", opt.pattern, err);
            process::exit(1);
        }
    };
    match run(&opt, &regex) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("rgrep: {}", err);
            process::exit(2);
        }
    }
}

/// Dispatch on the target mode. \return whether any line matched.
fn run(opt: &Opt, regex: &Regex) -> io::Result<bool> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let matched = if opt.recursive {
        let mut any = false;
        for root in &opt.paths {
            any |= grep_tree(regex, root, &mut out)?;
        }
        any
    } else if opt.paths.is_empty() {
        grep_stdin(regex, &mut out)?
    } else {
        // Prefix output with the file name only when several files are
        // being searched, as grep does.
        let with_names = opt.paths.len() > 1;
        let mut any = false;
        for path in &opt.paths {
            any |= grep_file(regex, path, with_names, &mut out)?;
        }
        any
    };
    out.flush()?;
    Ok(matched)
}

/// Read a single line from standard input and match it once.
fn grep_stdin(regex: &Regex, out: &mut impl Write) -> io::Result<bool> {
    let mut line = Vec::new();
    io::stdin().lock().read_until(b'\n', &mut line)?;
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if regex.is_match(&line) {
        out.write_all(&line)?;
        out.write_all(b"\n")?;
        return Ok(true);
    }
    Ok(false)
}

/// Match every line of one file, writing matched lines to `out`.
fn grep_file(
    regex: &Regex,
    path: &Path,
    with_name: bool,
    out: &mut impl Write,
) -> io::Result<bool> {
    let mut contents = fs::read(path)?;
    if contents.is_empty() {
        return Ok(false);
    }
    // Drop the final line terminator so it does not produce a phantom
    // empty line; interior empty lines are preserved.
    if contents.last() == Some(&b'\n') {
        contents.pop();
    }
    let mut any = false;
    for line in contents.split(|&b| b == b'\n') {
        if regex.is_match(line) {
            any = true;
            if with_name {
                write!(out, "{}:", path.display())?;
            }
            out.write_all(line)?;
            out.write_all(b"\n")?;
        }
    }
    Ok(any)
}

/// Walk a directory tree depth-first, matching within every regular file.
/// Every matched line is prefixed with its file path.
fn grep_tree(regex: &Regex, root: &Path, out: &mut impl Write) -> io::Result<bool> {
    let mut any = false;
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            any |= grep_file(regex, entry.path(), true, out)?;
        }
    }
    Ok(any)
}
