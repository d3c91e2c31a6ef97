/// A concept picked either by its 1-based position in `list` or by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Index(usize),
    Title(String),
}

impl Selector {
    fn parse(raw: &str) -> Self {
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => Selector::Index(n),
            _ => Selector::Title(raw.to_string()),
        }
    }

    /// Resolve against the selectable titles; unknown selections pass through as titles.
    /// A number outside the list is tried as a title before giving up.
    pub fn resolve(&self, titles: &[String]) -> Option<String> {
        match self {
            Selector::Index(n) => n
                .checked_sub(1)
                .and_then(|i| titles.get(i))
                .or_else(|| {
                    let raw = n.to_string();
                    titles.iter().find(|title| **title == raw)
                })
                .cloned(),
            Selector::Title(title) => Some(title.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Know(Selector),
    ForgetAll,
    Target(Selector),
    Submit,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  list              show the available concepts
  know <n|title>    toggle a concept you already know
  forget-all        clear the known concepts
  target <n|title>  choose the concept you want to learn
  submit            request a learning path
  help              show this help
  quit              exit";

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match (word.to_ascii_lowercase().as_str(), rest) {
        ("list" | "ls", _) => Command::List,
        ("know" | "k", arg) if !arg.is_empty() => Command::Know(Selector::parse(arg)),
        ("forget-all", _) => Command::ForgetAll,
        ("target" | "t", arg) if !arg.is_empty() => Command::Target(Selector::parse(arg)),
        ("submit" | "go", _) => Command::Submit,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit" | "q", _) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}
