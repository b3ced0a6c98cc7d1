//! Explicit playback automaton for the day-of-year animation.
//!
//! The cursor only moves on `tick`, and only while playing; every transition
//! is an explicit call, the latest one wins. Days wrap around the 365-day
//! display year in both directions.

use crate::utils::error::{GeoError, Result};

const YEAR_DAYS: u32 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Stopped,
    PlayingForward,
    PlayingReverse,
}

#[derive(Debug, Clone)]
pub struct Animator {
    state: Playback,
    day: u32,
    step: u32,
}

impl Animator {
    pub fn new(start_day: u32, step: u32) -> Result<Self> {
        check_day(start_day)?;
        check_step(step)?;
        Ok(Self {
            state: Playback::Stopped,
            day: start_day,
            step,
        })
    }

    pub fn state(&self) -> Playback {
        self.state
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn play_forward(&mut self) {
        self.state = Playback::PlayingForward;
    }

    pub fn play_reverse(&mut self) {
        self.state = Playback::PlayingReverse;
    }

    pub fn stop(&mut self) {
        self.state = Playback::Stopped;
    }

    /// Jump the cursor without changing the playback state.
    pub fn seek(&mut self, day: u32) -> Result<()> {
        check_day(day)?;
        self.day = day;
        Ok(())
    }

    pub fn set_step(&mut self, step: u32) -> Result<()> {
        check_step(step)?;
        self.step = step;
        Ok(())
    }

    /// Advance the cursor one step in the playing direction, wrapping at the
    /// year boundary. A no-op while stopped. Returns the cursor after the
    /// move.
    pub fn tick(&mut self) -> u32 {
        match self.state {
            Playback::Stopped => {}
            Playback::PlayingForward => {
                self.day = (self.day - 1 + self.step) % YEAR_DAYS + 1;
            }
            Playback::PlayingReverse => {
                let back = self.step % YEAR_DAYS;
                self.day = (self.day - 1 + YEAR_DAYS - back) % YEAR_DAYS + 1;
            }
        }
        self.day
    }
}

fn check_day(day: u32) -> Result<()> {
    if !(1..=YEAR_DAYS).contains(&day) {
        return Err(GeoError::DomainError {
            field: "day_of_year",
            value: day.to_string(),
            reason: format!("animation day must be within [1, {}]", YEAR_DAYS),
        });
    }
    Ok(())
}

fn check_step(step: u32) -> Result<()> {
    if step == 0 {
        return Err(GeoError::DomainError {
            field: "step",
            value: step.to_string(),
            reason: "step must be at least one day".to_string(),
        });
    }
    Ok(())
}
