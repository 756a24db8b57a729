use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::session::{QuizOutcome, QuizSession, SessionStep, TickOutcome};

/// Input event for a session driven over a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Select(usize),
    Advance,
    Back,
    Tick,
}

/// Applies commands to `session` in arrival order until it finishes.
///
/// Returns `None` when every sender is dropped first, which abandons the
/// attempt without scoring it.
pub async fn drive(
    mut session: QuizSession,
    mut commands: mpsc::Receiver<SessionCommand>,
) -> Option<QuizOutcome> {
    while let Some(command) = commands.recv().await {
        match command {
            SessionCommand::Select(choice) => {
                if let Err(err) = session.select_option(choice) {
                    warn!(%err, choice, "selection rejected");
                }
            }
            SessionCommand::Advance => match session.commit_and_advance() {
                Ok(SessionStep::Advanced { index }) => debug!(index, "advanced"),
                Ok(SessionStep::Finished(outcome)) => return Some(outcome),
                Err(err) => warn!(%err, "advance rejected"),
            },
            SessionCommand::Back => {
                session.go_back();
            }
            SessionCommand::Tick => match session.tick() {
                TickOutcome::TimedOut(outcome) => return Some(outcome),
                TickOutcome::Running { .. } | TickOutcome::Idle => {}
            },
        }
    }

    debug!(
        answered = session.answers().len(),
        "session abandoned before completion"
    );
    None
}

/// Sends a [`SessionCommand::Tick`] every `period` until the receiving side
/// goes away. The first tick fires one full period after spawning.
pub fn spawn_ticker(commands: mpsc::Sender<SessionCommand>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            interval.tick().await;
            if commands.send(SessionCommand::Tick).await.is_err() {
                break;
            }
        }
    })
}
