use std::path::PathBuf;

use extractor_core::CandidateId;

pub const HELP_TEXT: &str = "\
Commands:
  add <file>...        select PDF files (each one is checked)
  drop <file>...       select files, silently ignoring anything that is not a PDF
  remove <name>|#<id>  remove a selected file
  list                 show the selected files
  submit               upload the selection for processing
  download             save extracted_data.xlsx after a successful run
  cleanup              ask the server to prune old sessions
  status               show what the client is doing
  help                 show this text
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Vec<PathBuf>),
    Drop(Vec<PathBuf>),
    Remove(RemoveTarget),
    List,
    Submit,
    Download,
    Cleanup,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    Id(CandidateId),
    Name(String),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "add" | "a" => Command::Add(paths(rest, "add")?),
        "drop" => Command::Drop(paths(rest, "drop")?),
        "remove" | "rm" => Command::Remove(remove_target(rest)?),
        "list" | "ls" => Command::List,
        "submit" | "process" => Command::Submit,
        "download" => Command::Download,
        "cleanup" => Command::Cleanup,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command `{other}`. Type `help` for a list.")),
    };
    Ok(Some(command))
}

fn paths(rest: &str, command: &str) -> Result<Vec<PathBuf>, String> {
    let words = split_words(rest)?;
    if words.is_empty() {
        return Err(format!("Usage: {command} <file>..."));
    }
    Ok(words.into_iter().map(PathBuf::from).collect())
}

fn remove_target(rest: &str) -> Result<RemoveTarget, String> {
    if rest.is_empty() {
        return Err("Usage: remove <name>|#<id>".to_string());
    }
    if let Some(id) = rest.strip_prefix('#') {
        return id
            .parse()
            .map(RemoveTarget::Id)
            .map_err(|_| format!("`{rest}` is not a file number"));
    }
    let name = rest.trim_matches('"');
    Ok(RemoveTarget::Name(name.to_string()))
}

/// Whitespace-separated words; double quotes group a word containing spaces.
fn split_words(input: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut started = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                started = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if started {
                    words.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }

    if in_quotes {
        return Err("Unterminated quote".to_string());
    }
    if started {
        words.push(current);
    }
    Ok(words)
}
