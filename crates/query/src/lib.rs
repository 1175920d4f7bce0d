//! Input for the interactive binaries. Each query first consumes the next command line argument,
//! if there is one, and only prompts on stderr once the arguments run out. This way a session can
//! be replayed by passing the same answers as arguments.
//!
//! An invalid answer given as an argument is fatal, since there is nobody to ask again. An invalid
//! answer typed at the prompt is reported and asked for again.

use std::cell::RefCell;
use std::fmt::Display;
use std::io::{stderr, stdin, Write};

thread_local! {
    static ARGV: RefCell<std::iter::Skip<std::env::Args>> = RefCell::new(std::env::args().skip(1));
}

/// Asks for a value that may be left blank, in which case this returns `None`.
pub fn optional<S, E: Display>(
    prompt: &str,
    mut parser: impl FnMut(&str) -> Result<S, E>,
) -> Option<S> {
    raw(&format!("{prompt} (optional)"), |x| {
        if x.is_empty() {
            Ok(None)
        } else {
            parser(x).map(Some)
        }
    })
}

/// Asks for a value, using `default` when the answer is blank.
pub fn with_default<S, E: Display>(
    prompt: &str,
    default: &str,
    mut parser: impl FnMut(&str) -> Result<S, E>,
) -> S {
    raw(&format!("{prompt} (default: {default})"), |x| {
        if x.is_empty() {
            parser(default)
        } else {
            parser(x)
        }
    })
}

pub fn yes_no(prompt: &str) -> bool {
    with_default(prompt, "y", |response| {
        if response.starts_with('y') || response.starts_with('n') {
            Ok(response.starts_with('y'))
        } else {
            Err(format!(
                "unrecognized response '{response}'. Should be '(y)es' or '(n)o'"
            ))
        }
    })
}

/// Asks for a value with no default. The answer is trimmed before it is parsed.
pub fn raw<S, E: Display>(prompt: &str, mut parser: impl FnMut(&str) -> Result<S, E>) -> S {
    if let Some(arg) = ARGV.with(|argv| argv.borrow_mut().next()) {
        match parser(arg.trim()) {
            Ok(res) => {
                eprintln!("{prompt}: {arg}");
                return res;
            }
            Err(e) => {
                eprintln!("{prompt}: {arg}\n{e:#}");
                std::process::exit(1);
            }
        }
    }

    loop {
        eprint!("{prompt}: ");
        // A failed flush only delays the prompt.
        stderr().flush().ok();
        let mut input = String::new();
        match stdin().read_line(&mut input) {
            Ok(0) => {
                eprintln!("\nNo more input");
                std::process::exit(1);
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading for prompt {prompt}: {e}");
                std::process::exit(1);
            }
        }
        match parser(input.trim()) {
            Ok(res) => return res,
            Err(e) => eprintln!("Invalid input: {e:#}. Try again"),
        }
    }
}

/// Parses with [`std::str::FromStr`], for use as the parser of a query.
pub fn parse<T: std::str::FromStr>(s: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    s.parse::<T>().map_err(|e| anyhow::anyhow!("{e}"))
}
