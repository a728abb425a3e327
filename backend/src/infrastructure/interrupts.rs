use tokio::signal;
use tokio::sync::mpsc;
use tracing::warn;

/// Ctrl-C presses, delivered to whoever is waiting for input.
///
/// One listener lives for the whole session, so an interrupt is never
/// swallowed by a handler nobody polls.
pub struct Interrupts {
  rx: mpsc::UnboundedReceiver<()>,
}

impl Interrupts {
  /// Forwards SIGINT / Ctrl-C. Must be called inside a tokio runtime.
  pub fn ctrl_c() -> Self {
    let (tx, interrupts) = Self::channel();
    tokio::spawn(async move {
      loop {
        if let Err(e) = signal::ctrl_c().await {
          warn!(error = %e, "Cannot listen for Ctrl-C");
          break;
        }
        if tx.send(()).is_err() {
          break;
        }
      }
    });
    interrupts
  }

  /// Interrupts fed by hand.
  pub fn channel() -> (mpsc::UnboundedSender<()>, Self) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, Self { rx })
  }

  /// Resolves on the next interrupt. Never resolves once the source is gone.
  pub async fn next(&mut self) {
    if self.rx.recv().await.is_none() {
      std::future::pending::<()>().await;
    }
  }
}
