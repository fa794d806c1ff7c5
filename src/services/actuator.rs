//! Fire-and-forget bridge to the LED contest indicator.
//!
//! Request handlers never talk to the hardware link directly: commands are
//! handed to a dedicated task over a one-way channel, so a stalled or
//! unreachable indicator can never delay scoring or clock responses.

use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Commands understood by the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorCommand {
    /// Full-brightness "contest live" display.
    ShowIdle,
    /// Dimmed "contest paused" display.
    ShowPaused,
    /// Strobe acknowledging a correct answer.
    SignalCorrect,
    /// Strobe acknowledging a wrong answer.
    SignalIncorrect,
}

/// Transport to the physical indicator.
///
/// The wire protocol and its reconnect-on-failure policy live entirely behind
/// this trait; callers only see a command either applied or failed.
pub trait LedLink: Send {
    /// Apply one command to the hardware.
    fn apply(&mut self, command: IndicatorCommand) -> BoxFuture<'_, anyhow::Result<()>>;
}

/// Link that only logs commands; used when no hardware is attached.
#[derive(Debug, Default)]
pub struct LogLink;

impl LedLink for LogLink {
    fn apply(&mut self, command: IndicatorCommand) -> BoxFuture<'_, anyhow::Result<()>> {
        Box::pin(async move {
            debug!(?command, "indicator command (log link)");
            Ok(())
        })
    }
}

/// Cloneable handle used by services to signal the indicator.
///
/// Every method queues the command and returns immediately; failures inside
/// the link are logged by the worker task and never reach the caller.
#[derive(Clone)]
pub struct ActuatorHandle {
    tx: mpsc::UnboundedSender<IndicatorCommand>,
}

impl ActuatorHandle {
    /// Show the "contest live" display.
    pub fn show_idle(&self) {
        self.dispatch(IndicatorCommand::ShowIdle);
    }

    /// Show the "contest paused" display.
    pub fn show_paused(&self) {
        self.dispatch(IndicatorCommand::ShowPaused);
    }

    /// Flash the correct-answer signal.
    pub fn signal_correct(&self) {
        self.dispatch(IndicatorCommand::SignalCorrect);
    }

    /// Flash the wrong-answer signal.
    pub fn signal_incorrect(&self) {
        self.dispatch(IndicatorCommand::SignalIncorrect);
    }

    fn dispatch(&self, command: IndicatorCommand) {
        if self.tx.send(command).is_err() {
            warn!(?command, "actuator task is gone; dropping indicator command");
        }
    }

    /// Handle wired to a plain receiver instead of a worker task, letting
    /// tests assert which commands were fired.
    #[cfg(test)]
    pub(crate) fn test_pair() -> (Self, mpsc::UnboundedReceiver<IndicatorCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

/// Spawn the worker task owning the link and return the handle feeding it.
pub fn spawn(mut link: Box<dyn LedLink>) -> ActuatorHandle {
    let (tx, mut rx) = mpsc::unbounded_channel::<IndicatorCommand>();

    tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            if let Err(err) = link.apply(command).await {
                warn!(?command, error = %err, "indicator command failed");
            }
        }
        debug!("actuator task stopping; all handles dropped");
    });

    ActuatorHandle { tx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    struct FlakyLink {
        applied: Arc<AtomicUsize>,
    }

    impl LedLink for FlakyLink {
        fn apply(&mut self, command: IndicatorCommand) -> BoxFuture<'_, anyhow::Result<()>> {
            let applied = self.applied.clone();
            Box::pin(async move {
                if command == IndicatorCommand::SignalIncorrect {
                    anyhow::bail!("link dropped");
                }
                applied.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        }
    }

    #[tokio::test]
    async fn link_failures_never_reach_the_caller() {
        let applied = Arc::new(AtomicUsize::new(0));
        let handle = spawn(Box::new(FlakyLink {
            applied: applied.clone(),
        }));

        handle.signal_incorrect();
        handle.signal_correct();
        handle.show_idle();

        // Give the worker a chance to drain the queue.
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert_eq!(applied.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn commands_arrive_in_dispatch_order() {
        let (handle, mut rx) = ActuatorHandle::test_pair();
        handle.show_idle();
        handle.signal_correct();
        handle.show_paused();

        assert_eq!(rx.recv().await, Some(IndicatorCommand::ShowIdle));
        assert_eq!(rx.recv().await, Some(IndicatorCommand::SignalCorrect));
        assert_eq!(rx.recv().await, Some(IndicatorCommand::ShowPaused));
    }
}
