use std::io::{self, BufRead, Write};

pub fn input(prompt: &str) -> io::Result<String> {
    read_input(&mut io::stdin().lock(), &mut io::stdout(), prompt)
}

/// Reads one line after showing `prompt`. A closed input is an
/// `UnexpectedEof` error, never an empty answer.
pub fn read_input<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> io::Result<String> {
    let mut line = String::new();
    write!(writer, "{prompt}")?;
    writer.flush()?;
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        ));
    }
    Ok(line)
}

pub fn is_end_of_input(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<io::Error>()
        .is_some_and(|error| error.kind() == io::ErrorKind::UnexpectedEof)
}

pub fn str_to_bool(str: &str) -> Option<bool> {
    match str.trim().to_ascii_lowercase().as_str() {
        "" | "y" | "yes" | "yeah" | "yea" | "true" | "on" => Some(true),
        "n" | "no" | "nope" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Splits a command line into its verb and the remaining words.
pub fn split_command(line: &str) -> Option<(String, Vec<&str>)> {
    let mut parts = line.split_ascii_whitespace();
    let command = parts.next()?.to_ascii_lowercase();
    Some((command, parts.collect()))
}
