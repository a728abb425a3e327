use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

/// Line-oriented terminal adapter: everything the session shows goes out
/// through here, every answer comes back as one line.
pub struct Console<R, W> {
  lines: Lines<R>,
  out: W,
}

pub type StdConsole = Console<BufReader<Stdin>, Stdout>;

impl StdConsole {
  pub fn stdio() -> Self {
    Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
  }
}

impl<R, W> Console<R, W>
where
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  pub fn new(reader: R, out: W) -> Self {
    Self { lines: reader.lines(), out }
  }

  /// Writes `text`, adding a trailing newline if it has none.
  pub async fn say(&mut self, text: &str) -> io::Result<()> {
    self.out.write_all(text.as_bytes()).await?;
    if !text.ends_with('\n') {
      self.out.write_all(b"\n").await?;
    }
    self.out.flush().await
  }

  /// Shows `label` and reads one line. `None` once input is exhausted.
  pub async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
    self.out.write_all(label.as_bytes()).await?;
    self.out.flush().await?;
    let line = self.lines.next_line().await?;
    Ok(line.map(|l| l.trim_end_matches('\r').to_string()))
  }

  pub fn into_output(self) -> W {
    self.out
  }
}
