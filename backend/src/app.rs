use std::io;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, warn};
use vibetracks_core::domain::{Genre, SongId};
use vibetracks_core::ports::{ArtService, Clock, InsightService, SuggestionService};
use vibetracks_core::services::{Draft, FormError, RoundOutcome, Session, SubmitOutcome};

use crate::command::{Command, SongRef};
use crate::infrastructure::console::Console;
use crate::infrastructure::interrupts::Interrupts;
use crate::view;

/// Interactive loop over one [`Session`].
pub struct App<I, S, A, C, R, W>
where
  I: InsightService,
  S: SuggestionService,
  A: ArtService,
  C: Clock,
{
  session: Session<I, S, A, C>,
  console: Console<R, W>,
  interrupts: Interrupts,
  /// Ctrl-C seen while no prompt was waiting; answered by the next prompt.
  interrupted: bool,
}

enum FormChoice {
  Save,
  EditAgain,
  Cancel,
}

impl<I, S, A, C, R, W> App<I, S, A, C, R, W>
where
  I: InsightService,
  S: SuggestionService,
  A: ArtService,
  C: Clock,
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  pub fn new(session: Session<I, S, A, C>, console: Console<R, W>, interrupts: Interrupts) -> Self {
    Self { session, console, interrupts, interrupted: false }
  }

  pub fn into_parts(self) -> (Session<I, S, A, C>, Console<R, W>) {
    (self.session, self.console)
  }

  /// Runs until `quit`, Ctrl-C at the prompt or end of input.
  pub async fn run(&mut self) -> io::Result<()> {
    self.console.say("VibeTracks. Type `help` for commands.").await?;
    self.show_list().await?;

    if !self.session.store().is_empty() {
      self.console.say("Analyzing your vibe...").await?;
    }
    if let Some(outcome) = self.session.refresh_if_needed().await {
      self.report_round(outcome).await?;
    }

    while let Some(line) = self.read_line("vibetracks> ").await? {
      if line.trim().is_empty() {
        continue;
      }
      match line.parse::<Command>() {
        Ok(Command::Quit) => break,
        Ok(cmd) => self.execute(cmd).await?,
        Err(e) => self.console.say(&e.to_string()).await?,
      }
    }
    Ok(())
  }

  async fn execute(&mut self, cmd: Command) -> io::Result<()> {
    debug!(?cmd, "Executing command");
    match cmd {
      Command::List => self.show_list().await,
      Command::Sort(key) => {
        self.session.set_sort_key(key);
        self.show_list().await
      }
      Command::Order => {
        self.session.toggle_sort_order();
        self.show_list().await
      }
      Command::Genres => {
        let chart = view::render_genre_chart(&self.session.genre_stats());
        self.console.say(&chart).await
      }
      Command::Add => self.add().await,
      Command::Edit(song) => self.edit(&song).await,
      Command::Delete(song) => self.delete(&song).await,
      Command::Insights => self.show_insights().await,
      Command::Refresh => {
        self.console.say("Analyzing your vibe...").await?;
        let outcome = self.session.refresh_insights().await;
        self.report_round(outcome).await
      }
      Command::Help => self.console.say(view::HELP).await,
      Command::Quit => Ok(()),
    }
  }

  async fn show_list(&mut self) -> io::Result<()> {
    let songs = self.session.songs_sorted();
    let text = view::render_song_list(&songs, self.session.sort_key(), self.session.sort_order());
    self.console.say(&text).await
  }

  async fn show_insights(&mut self) -> io::Result<()> {
    let text = view::render_insights(
      self.session.insights(),
      self.session.insights_loading(),
      self.session.store().is_empty(),
    );
    self.console.say(&text).await
  }

  async fn report_round(&mut self, outcome: RoundOutcome) -> io::Result<()> {
    match outcome {
      RoundOutcome::AlreadyRunning => self.console.say("Insights are already loading.").await,
      RoundOutcome::Failed(errors) => {
        for e in &errors {
          self.console.say(&format!("Could not refresh insights: {e}")).await?;
        }
        self.show_insights().await
      }
      RoundOutcome::Skipped | RoundOutcome::Updated => self.show_insights().await,
    }
  }

  fn resolve(&self, song: &SongRef) -> Option<SongId> {
    song.resolve(&self.session.songs_sorted())
  }

  async fn add(&mut self) -> io::Result<()> {
    if self.session.art_generating() {
      return self.console.say("Cover art is still being generated.").await;
    }
    if let Err(e) = self.session.open_add() {
      return self.console.say(&e.to_string()).await;
    }
    self.console.say("New song").await?;
    self.run_form().await
  }

  async fn edit(&mut self, song: &SongRef) -> io::Result<()> {
    let Some(id) = self.resolve(song) else {
      return self.console.say("No such song.").await;
    };
    if self.session.art_generating() {
      return self.console.say("Cover art is still being generated.").await;
    }
    if let Err(e) = self.session.open_edit(&id) {
      return self.console.say(&e.to_string()).await;
    }
    self.console.say("Edit song (empty input keeps the current value)").await?;
    self.run_form().await
  }

  async fn delete(&mut self, song: &SongRef) -> io::Result<()> {
    let Some(id) = self.resolve(song) else {
      return self.console.say("No such song.").await;
    };
    let Some(target) = self.session.store().get(&id).cloned() else {
      return self.console.say("No such song.").await;
    };

    let question = format!("Delete \"{}\" by {}?", target.title, target.artist);
    if !self.confirm(&question).await? {
      return self.console.say("Kept.").await;
    }
    if self.session.delete(&id).await {
      self.console.say("Deleted.").await?;
      self.show_insights().await?;
    }
    Ok(())
  }

  async fn run_form(&mut self) -> io::Result<()> {
    loop {
      let Some(current) = self.session.form().draft().cloned() else {
        return Ok(());
      };
      let Some(draft) = self.fill_draft(current).await? else {
        return self.abandon_form().await;
      };
      self.console.say(&view::render_draft(&draft)).await?;
      if let Some(slot) = self.session.draft_mut() {
        *slot = draft.clone();
      }

      match self.ask_choice().await? {
        None | Some(FormChoice::Cancel) => return self.abandon_form().await,
        Some(FormChoice::EditAgain) => continue,
        Some(FormChoice::Save) => {}
      }

      if let Err(e) = draft.validate() {
        self.console.say(&format!("Cannot save: {e}")).await?;
        continue;
      }

      self.console.say("Generating cover art...").await?;
      match self.submit().await {
        Ok(outcome) => {
          let verb = match outcome {
            SubmitOutcome::Added(_) => "Added",
            SubmitOutcome::Updated(_) => "Updated",
          };
          self.console.say(&format!("{verb} \"{}\".", draft.title.trim())).await?;
          return self.show_insights().await;
        }
        Err(FormError::Validation(e)) => {
          self.console.say(&format!("Cannot save: {e}")).await?;
        }
        Err(e) => {
          self.console.say(&format!("Cannot save: {e}")).await?;
          if self.session.form().is_open() {
            return self.abandon_form().await;
          }
          return Ok(());
        }
      }
    }
  }

  /// Submits the form. Ctrl-C is reported but ignored while the cover is
  /// being generated.
  async fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
    let art = self.session.art_flag();
    let submit = self.session.submit_form();
    tokio::pin!(submit);

    loop {
      tokio::select! {
        biased;
        () = self.interrupts.next() => {
          if !art.is_set() {
            self.interrupted = true;
            continue;
          }
          let notice = "Cover art is being generated; cancel is disabled until it finishes.";
          if let Err(e) = self.console.say(notice).await {
            warn!(error = %e, "Cannot write to console");
          }
        }
        outcome = &mut submit => return outcome,
      }
    }
  }

  /// One line of input. `None` at end of input or on Ctrl-C.
  async fn read_line(&mut self, label: &str) -> io::Result<Option<String>> {
    if std::mem::take(&mut self.interrupted) {
      self.console.say("").await?;
      return Ok(None);
    }
    tokio::select! {
      biased;
      () = self.interrupts.next() => {
        self.console.say("").await?;
        Ok(None)
      }
      line = self.console.prompt(label) => line,
    }
  }

  /// Yes/no question, defaulting to no.
  async fn confirm(&mut self, question: &str) -> io::Result<bool> {
    let answer = self.read_line(&format!("{question} [y/N] ")).await?;
    Ok(matches!(answer.as_deref().map(str::trim), Some("y" | "Y" | "yes" | "Yes")))
  }

  /// Prompts for each field. `None` if input ran out.
  async fn fill_draft(&mut self, mut draft: Draft) -> io::Result<Option<Draft>> {
    let Some(title) = self.ask_field("Title", &draft.title).await? else {
      return Ok(None);
    };
    let Some(artist) = self.ask_field("Artist", &draft.artist).await? else {
      return Ok(None);
    };
    let Some(spotify_url) = self.ask_field("Spotify URL", &draft.spotify_url).await? else {
      return Ok(None);
    };
    self.console.say(&view::render_genre_choices()).await?;
    let Some(genre) = self.ask_field("Genre", &draft.genre).await? else {
      return Ok(None);
    };

    draft.title = title;
    draft.artist = artist;
    draft.spotify_url = spotify_url;
    draft.genre = match genre.parse::<Genre>() {
      Ok(known) => known.to_string(),
      Err(_) => genre,
    };
    Ok(Some(draft))
  }

  async fn ask_field(&mut self, label: &str, current: &str) -> io::Result<Option<String>> {
    let prompt = if current.is_empty() { format!("{label}: ") } else { format!("{label} [{current}]: ") };
    let Some(answer) = self.read_line(&prompt).await? else {
      return Ok(None);
    };
    let answer = answer.trim();
    Ok(Some(if answer.is_empty() { current.to_string() } else { answer.to_string() }))
  }

  async fn ask_choice(&mut self) -> io::Result<Option<FormChoice>> {
    loop {
      let Some(answer) = self.read_line("[s]ave, [e]dit again or [c]ancel? ").await? else {
        return Ok(None);
      };
      match answer.trim().to_ascii_lowercase().as_str() {
        "" | "s" | "save" => return Ok(Some(FormChoice::Save)),
        "e" | "edit" => return Ok(Some(FormChoice::EditAgain)),
        "c" | "cancel" => return Ok(Some(FormChoice::Cancel)),
        _ => {}
      }
    }
  }

  async fn abandon_form(&mut self) -> io::Result<()> {
    match self.session.cancel_form() {
      Ok(()) => self.console.say("Cancelled.").await,
      Err(e) => self.console.say(&e.to_string()).await,
    }
  }
}
