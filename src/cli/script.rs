//! Shell command language.
//!
//! One command per line. Positions are 1-based, matching the `#n` labels in
//! the queue panel. Blank lines and lines starting with `#` are ignored.

use crate::error::{Error, Result};
use crate::model::TrackId;
use crate::player::PanelKey;

pub const HELP: &str = "\
Commands:
  add <id>...          queue catalog tracks (duplicates are ignored)
  remove <pos>         remove the track at a queue position
  move <from> <to>     move a queued track
  order <id>...        replace the whole queue with this order
  clear                empty the queue
  play <pos>           play a queued track
  track <id>           play a catalog track directly
  next | prev          skip using the queue, else the engine
  finish               let the current track end
  stop                 stop the engine
  peek                 show the queue's next and previous tracks
  open | close | toggle
                       queue panel visibility
  key <name> | esc     send a key to the queue panel
  show                 print the queue panel
  help                 this text
  quit                 leave the shell";

/// A parsed shell command. Positions are converted to 0-based indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(Vec<TrackId>),
    Remove(usize),
    Move { from: usize, to: usize },
    Order(Vec<TrackId>),
    Clear,
    Play(usize),
    Track(TrackId),
    Next,
    Previous,
    Finish,
    Stop,
    Peek,
    OpenPanel,
    ClosePanel,
    TogglePanel,
    Key(PanelKey),
    Show,
    Help,
    Quit,
}

/// Parse one line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<ShellCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match name.to_ascii_lowercase().as_str() {
        "add" => ShellCommand::Add(ids(&args, line_no, "add")?),
        "remove" | "rm" => ShellCommand::Remove(single_position(&args, line_no)?),
        "move" | "mv" => {
            let [from, to] = args[..] else {
                return Err(Error::script(line_no, "usage: move <from> <to>"));
            };
            ShellCommand::Move {
                from: position(from, line_no)?,
                to: position(to, line_no)?,
            }
        }
        "order" => ShellCommand::Order(ids(&args, line_no, "order")?),
        "clear" => no_args(&args, line_no, ShellCommand::Clear)?,
        "play" => ShellCommand::Play(single_position(&args, line_no)?),
        "track" => {
            let [id] = args[..] else {
                return Err(Error::script(line_no, "usage: track <id>"));
            };
            ShellCommand::Track(TrackId::new(id))
        }
        "next" => no_args(&args, line_no, ShellCommand::Next)?,
        "prev" | "previous" => no_args(&args, line_no, ShellCommand::Previous)?,
        "finish" => no_args(&args, line_no, ShellCommand::Finish)?,
        "stop" => no_args(&args, line_no, ShellCommand::Stop)?,
        "peek" => no_args(&args, line_no, ShellCommand::Peek)?,
        "open" => no_args(&args, line_no, ShellCommand::OpenPanel)?,
        "close" => no_args(&args, line_no, ShellCommand::ClosePanel)?,
        "toggle" => no_args(&args, line_no, ShellCommand::TogglePanel)?,
        "esc" | "escape" => no_args(&args, line_no, ShellCommand::Key(PanelKey::Escape))?,
        "key" => {
            let [key] = args[..] else {
                return Err(Error::script(line_no, "usage: key <name>"));
            };
            ShellCommand::Key(PanelKey::from_name(key))
        }
        "show" | "ls" => no_args(&args, line_no, ShellCommand::Show)?,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => {
            return Err(Error::script(
                line_no,
                format!("unknown command '{}' (try 'help')", other),
            ));
        }
    };
    Ok(Some(command))
}

/// Parse a whole script, stopping at the first bad line.
pub fn parse_script(contents: &str) -> Result<Vec<ShellCommand>> {
    let mut commands = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        if let Some(command) = parse_line(line, i + 1)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

fn no_args(args: &[&str], line_no: usize, command: ShellCommand) -> Result<ShellCommand> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(Error::script(line_no, "command takes no arguments"))
    }
}

fn ids(args: &[&str], line_no: usize, name: &str) -> Result<Vec<TrackId>> {
    if args.is_empty() {
        return Err(Error::script(line_no, format!("usage: {} <id>...", name)));
    }
    Ok(args.iter().map(|id| TrackId::new(*id)).collect())
}

fn single_position(args: &[&str], line_no: usize) -> Result<usize> {
    let [pos] = args[..] else {
        return Err(Error::script(line_no, "expected one queue position"));
    };
    position(pos, line_no)
}

fn position(word: &str, line_no: usize) -> Result<usize> {
    let pos: usize = word
        .parse()
        .map_err(|_| Error::script(line_no, format!("'{}' is not a queue position", word)))?;
    pos.checked_sub(1)
        .ok_or_else(|| Error::script(line_no, "queue positions start at 1"))
}
