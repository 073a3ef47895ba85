use serde::{Deserialize, Serialize};

use crate::config::YearRange;

/// Cursor of the race: which year is shown and whether the timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_year: i32,
    pub is_playing: bool,
    pub progress_percent: f64,
}

impl PlaybackState {
    /// Stopped at the first year of `range`.
    pub fn initial(range: YearRange) -> Self {
        Self::at(range, range.first, false)
    }

    fn at(range: YearRange, current_year: i32, is_playing: bool) -> Self {
        Self {
            current_year,
            is_playing,
            progress_percent: range.progress_percent(current_year),
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::initial(YearRange::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackCommand {
    /// Play/pause. At or past the last year it rewinds to the first year
    /// before flipping.
    Toggle,
    /// One timer period elapsed.
    Tick,
    /// Jump to a year; clamped into the range, play state untouched.
    SetYear(i32),
}

/// Pure transition function of the playback state machine.
pub fn transition(state: PlaybackState, command: PlaybackCommand, range: YearRange) -> PlaybackState {
    match command {
        PlaybackCommand::Toggle => {
            let year = if state.current_year >= range.last {
                range.first
            } else {
                state.current_year
            };
            PlaybackState::at(range, year, !state.is_playing)
        }
        PlaybackCommand::Tick if !state.is_playing => state,
        PlaybackCommand::Tick if state.current_year >= range.last => {
            PlaybackState::at(range, state.current_year, false)
        }
        PlaybackCommand::Tick => PlaybackState::at(range, state.current_year + 1, true),
        PlaybackCommand::SetYear(year) => {
            PlaybackState::at(range, range.clamp(year), state.is_playing)
        }
    }
}

/// Outcome of applying one command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub previous: PlaybackState,
    pub current: PlaybackState,
}

impl Transition {
    pub fn year_changed(&self) -> bool {
        self.previous.current_year != self.current.current_year
    }

    pub fn started(&self) -> bool {
        !self.previous.is_playing && self.current.is_playing
    }

    pub fn stopped(&self) -> bool {
        self.previous.is_playing && !self.current.is_playing
    }
}

/// Owns the only mutable playback state and applies [`transition`] to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackController {
    range: YearRange,
    state: PlaybackState,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(YearRange::default())
    }
}

impl PlaybackController {
    pub fn new(range: YearRange) -> Self {
        Self {
            range,
            state: PlaybackState::initial(range),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn apply(&mut self, command: PlaybackCommand) -> Transition {
        let previous = self.state;
        self.state = transition(previous, command, self.range);
        let outcome = Transition {
            previous,
            current: self.state,
        };
        if outcome.started() || outcome.stopped() {
            tracing::info!(
                year = self.state.current_year,
                playing = self.state.is_playing,
                ?command,
                "playback state changed"
            );
        }
        outcome
    }

    pub fn toggle(&mut self) -> Transition {
        self.apply(PlaybackCommand::Toggle)
    }

    pub fn tick(&mut self) -> Transition {
        self.apply(PlaybackCommand::Tick)
    }

    pub fn set_year(&mut self, year: i32) -> Transition {
        self.apply(PlaybackCommand::SetYear(year))
    }
}
