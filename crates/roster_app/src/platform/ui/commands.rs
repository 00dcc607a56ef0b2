use thiserror::Error;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetName(String),
    Check(String),
    Next,
    Choose,
    Back,
    Scroll(usize),
    More,
    Refresh,
    Select(usize),
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command {0:?} (type `help`)")]
    Unknown(String),
    #[error("`{0}` expects a row number")]
    MissingIndex(&'static str),
    #[error("{0:?} is not a row number")]
    BadIndex(String),
}

/// Text arguments are kept as typed, apart from the single separating space,
/// so `name` and `check` see leading and trailing whitespace.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = match line.trim_start().split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (line.trim(), ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "name" => Ok(Command::SetName(rest.to_string())),
        "check" => Ok(Command::Check(rest.to_string())),
        "next" => Ok(Command::Next),
        "choose" => Ok(Command::Choose),
        "back" => Ok(Command::Back),
        "scroll" => parse_index("scroll", rest).map(Command::Scroll),
        "select" => parse_index("select", rest).map(Command::Select),
        "more" => Ok(Command::More),
        "refresh" | "retry" => Ok(Command::Refresh),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn parse_index(command: &'static str, rest: &str) -> Result<usize, ParseError> {
    let raw = rest.trim();
    if raw.is_empty() {
        return Err(ParseError::MissingIndex(command));
    }
    raw.parse()
        .map_err(|_| ParseError::BadIndex(raw.to_string()))
}
