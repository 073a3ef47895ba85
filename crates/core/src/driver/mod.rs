//! Timer-driven playback loop.
//!
//! A single tokio task owns the [`Session`]. Commands arrive over a channel
//! and timer ticks come from an interval that is only polled while playing,
//! so both are applied one at a time in arrival order. Dropping the
//! [`PlaybackHandle`] aborts the task together with its timer.

use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::{Frame, PlaybackCommand, RaceError, Result, Session};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Consumer of frames. Owns all drawing.
pub trait Renderer: Send + 'static {
    fn render(&mut self, frame: &Frame);
}

impl<F> Renderer for F
where
    F: FnMut(&Frame) + Send + 'static,
{
    fn render(&mut self, frame: &Frame) {
        self(frame)
    }
}

#[derive(Debug)]
enum Control {
    Command(PlaybackCommand),
    Shutdown,
}

/// Command surface of a running playback loop.
#[derive(Debug)]
pub struct PlaybackHandle {
    controls: mpsc::UnboundedSender<Control>,
    task: Option<JoinHandle<Session>>,
}

impl PlaybackHandle {
    pub fn toggle(&self) -> Result<()> {
        self.send(Control::Command(PlaybackCommand::Toggle))
    }

    pub fn set_year(&self, year: i32) -> Result<()> {
        self.send(Control::Command(PlaybackCommand::SetYear(year)))
    }

    /// Stops the loop after pending commands and hands the session back.
    pub async fn shutdown(mut self) -> Result<Session> {
        let _ = self.controls.send(Control::Shutdown);
        let task = self.task.take().ok_or(RaceError::PlaybackClosed)?;
        task.await
            .map_err(|err| RaceError::msg(format!("playback task failed: {err}")))
    }

    fn send(&self, control: Control) -> Result<()> {
        self.controls
            .send(control)
            .map_err(|_| RaceError::PlaybackClosed)
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            tracing::debug!("aborting playback loop");
            task.abort();
        }
    }
}

/// Spawns the playback loop on the current tokio runtime. The renderer gets
/// the current frame right away and one frame per command or tick after.
pub fn spawn_playback<R: Renderer>(session: Session, renderer: R, period: Duration) -> PlaybackHandle {
    let (controls, receiver) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(session, renderer, period.max(MIN_PERIOD), receiver));
    PlaybackHandle {
        controls,
        task: Some(task),
    }
}

async fn run<R: Renderer>(
    mut session: Session,
    mut renderer: R,
    period: Duration,
    mut controls: mpsc::UnboundedReceiver<Control>,
) -> Session {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.reset();

    renderer.render(&session.frame());

    loop {
        tokio::select! {
            biased;
            control = controls.recv() => match control {
                Some(Control::Command(command)) => {
                    let was_playing = session.is_playing();
                    let frame = session.apply(command);
                    if !was_playing && frame.playback.is_playing {
                        ticker.reset();
                    }
                    renderer.render(&frame);
                }
                Some(Control::Shutdown) | None => break,
            },
            _ = ticker.tick(), if session.is_playing() => {
                let frame = session.tick();
                tracing::debug!(year = frame.year(), playing = frame.playback.is_playing, "tick");
                renderer.render(&frame);
            }
        }
    }

    tracing::debug!(year = session.state().current_year, "playback loop finished");
    session
}
