//! REPL command parsing.

/// A parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the query and run a search.
    Search(String),
    /// Set the raw author filter ("name1,name2"); empty clears it.
    Authors(String),
    /// Set the raw published period ("yyyy-mm-dd,yyyy-mm-dd"); empty clears it.
    Published(String),
    /// Judge the current collection against the active query.
    Judge,
    /// Re-print the current collection.
    List,
    /// Show the engine option label.
    Info,
    /// Dump request metrics in Prometheus text format.
    Stats,
    /// Show the command summary.
    Help,
    /// Leave the program.
    Quit,
    /// Unrecognized input.
    Invalid(String),
}

impl Command {
    /// Parse an input line into a command.
    ///
    /// The argument text is forwarded raw; the engine owns validation
    /// of queries and filters.
    pub fn parse(input: &str) -> Self {
        let line = input.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "search" | "s" => Command::Search(rest.to_string()),
            "authors" | "a" => Command::Authors(rest.to_string()),
            "published" | "p" => Command::Published(rest.to_string()),
            "judge" | "j" => Command::Judge,
            "list" | "ls" => Command::List,
            "info" => Command::Info,
            "stats" => Command::Stats,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Invalid(line.to_string()),
        }
    }
}

/// The command summary printed by `help`.
pub const HELP: &str = "\
commands:
  search <query>      run a search (alias: s)
  authors <names>     set author filter, comma-separated (alias: a)
  published <period>  set published period, yyyy-mm-dd,yyyy-mm-dd (alias: p)
  judge               judge the current results (alias: j)
  list                re-print the current results (alias: ls)
  info                show the engine option
  stats               dump request metrics
  help                show this summary (alias: ?)
  quit                leave (aliases: exit, q)";
