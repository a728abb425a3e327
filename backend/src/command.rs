use std::str::FromStr;

use thiserror::Error;
use vibetracks_core::domain::{Song, SongId};
use vibetracks_core::services::SortKey;

/// A song named on the command line: either its id or its position in the
/// list as last shown (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRef(String);

impl SongRef {
  /// Exact id match wins; otherwise a number is taken as a list position.
  pub fn resolve(&self, view: &[Song]) -> Option<SongId> {
    if let Some(song) = view.iter().find(|s| s.id.as_str() == self.0) {
      return Some(song.id.clone());
    }
    let pos: usize = self.0.trim_start_matches('#').parse().ok()?;
    view.get(pos.checked_sub(1)?).map(|s| s.id.clone())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  List,
  Sort(SortKey),
  Order,
  Genres,
  Add,
  Edit(SongRef),
  Delete(SongRef),
  Insights,
  Refresh,
  Help,
  Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
  #[error("unknown command `{0}` (type `help`)")]
  Unknown(String),
  #[error("usage: {0}")]
  Usage(&'static str),
  #[error("unknown sort key `{0}` (title, artist, added)")]
  SortKey(String),
}

impl FromStr for Command {
  type Err = CommandError;

  fn from_str(line: &str) -> Result<Self, Self::Err> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
      return Err(CommandError::Usage("help"));
    };
    let arg = words.next();

    let cmd = match head.to_ascii_lowercase().as_str() {
      "list" | "ls" => Command::List,
      "sort" => {
        let key = arg.ok_or(CommandError::Usage("sort <title|artist|added>"))?;
        Command::Sort(key.parse().map_err(|_| CommandError::SortKey(key.to_string()))?)
      }
      "order" => Command::Order,
      "genres" => Command::Genres,
      "add" => Command::Add,
      "edit" => Command::Edit(SongRef(arg.ok_or(CommandError::Usage("edit <id|#>"))?.to_string())),
      "delete" | "rm" => Command::Delete(SongRef(arg.ok_or(CommandError::Usage("delete <id|#>"))?.to_string())),
      "insights" => Command::Insights,
      "refresh" => Command::Refresh,
      "help" | "?" => Command::Help,
      "quit" | "exit" | "q" => Command::Quit,
      other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(cmd)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use vibetracks_core::domain::song::demo_collection;

  #[test]
  fn parses_commands_and_aliases() {
    assert_eq!("list".parse(), Ok(Command::List));
    assert_eq!("  LS ".parse(), Ok(Command::List));
    assert_eq!("sort artist".parse(), Ok(Command::Sort(SortKey::Artist)));
    assert_eq!("sort added".parse(), Ok(Command::Sort(SortKey::AddedAt)));
    assert_eq!("rm cob1".parse(), Ok(Command::Delete(SongRef("cob1".into()))));
    assert_eq!("q".parse(), Ok(Command::Quit));
  }

  #[test]
  fn reports_usage_errors() {
    assert_eq!("sort".parse::<Command>(), Err(CommandError::Usage("sort <title|artist|added>")));
    assert_eq!("sort bpm".parse::<Command>(), Err(CommandError::SortKey("bpm".into())));
    assert_eq!("edit".parse::<Command>(), Err(CommandError::Usage("edit <id|#>")));
    assert_eq!("play".parse::<Command>(), Err(CommandError::Unknown("play".into())));
  }

  #[test]
  fn id_match_takes_precedence_over_position() {
    // demo ids: cob1, cob2, 1
    let view = demo_collection(0);
    assert_eq!(SongRef("1".into()).resolve(&view), Some(SongId::from("1")));
    assert_eq!(SongRef("#1".into()).resolve(&view), Some(view[0].id.clone()));
    assert_eq!(SongRef("2".into()).resolve(&view), Some(view[1].id.clone()));
    assert_eq!(SongRef("cob2".into()).resolve(&view), Some(SongId::from("cob2")));
  }

  #[test]
  fn unknown_refs_resolve_to_none() {
    let view = demo_collection(0);
    assert_eq!(SongRef("0".into()).resolve(&view), None);
    assert_eq!(SongRef("9".into()).resolve(&view), None);
    assert_eq!(SongRef("nope".into()).resolve(&view), None);
  }
}
