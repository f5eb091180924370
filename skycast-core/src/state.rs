//! The render state machine: one value describes everything the display
//! shows, and a generation counter decides which lookup gets to change it.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::model::WeatherReport;

/// How long an error banner stays visible before reverting to idle.
pub const ERROR_BANNER_TTL: Duration = Duration::from_secs(3);

/// Single source of truth for the display.
#[derive(Debug, Clone)]
pub enum RenderState {
    Idle,
    Loading,
    Result(WeatherReport),
    Error { message: String, since: Instant },
}

impl RenderState {
    pub fn is_error(&self) -> bool {
        matches!(self, RenderState::Error { .. })
    }
}

/// Token tying a lookup's completion to the state machine epoch in which it
/// started. A completion with an older token is stale and must not render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

#[derive(Debug)]
pub struct Session {
    state: RenderState,
    generation: u64,
    error_ttl: Duration,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: RenderState::Idle,
            generation: 0,
            error_ttl: ERROR_BANNER_TTL,
        }
    }

    /// Override the banner lifetime. Used by tests.
    pub fn with_error_ttl(mut self, ttl: Duration) -> Self {
        self.error_ttl = ttl;
        self
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Start a lookup: enter loading (clearing any visible error) and hand
    /// out the token its completion must present.
    pub fn begin_lookup(&mut self) -> Generation {
        self.generation += 1;
        self.state = RenderState::Loading;
        Generation(self.generation)
    }

    /// Apply a lookup outcome. Returns false and leaves the state untouched
    /// when the token is stale, i.e. a newer lookup has started since.
    pub fn complete(
        &mut self,
        generation: Generation,
        outcome: Result<WeatherReport, String>,
        now: Instant,
    ) -> bool {
        if generation.0 != self.generation {
            debug!(
                stale = generation.0,
                latest = self.generation,
                "dropping stale lookup completion"
            );
            return false;
        }

        self.state = match outcome {
            Ok(report) => RenderState::Result(report),
            Err(message) => RenderState::Error {
                message,
                since: now,
            },
        };
        true
    }

    /// Show an error without starting a lookup, e.g. for empty input.
    pub fn reject(&mut self, message: impl Into<String>, now: Instant) {
        self.state = RenderState::Error {
            message: message.into(),
            since: now,
        };
    }

    /// Expire an old error banner back to idle. The prior result, if any,
    /// is not restored.
    pub fn tick(&mut self, now: Instant) {
        if let RenderState::Error { since, .. } = &self.state
            && now.duration_since(*since) >= self.error_ttl
        {
            self.state = RenderState::Idle;
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
