use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Monotonic submission counter. A response is applied only while its
/// generation is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(&self) -> Self {
        Generation(self.0 + 1)
    }
}

#[derive(Debug)]
struct LiveRequest {
    generation: Generation,
    token: CancellationToken,
}

/// Single-slot register for the one live request.
///
/// Two guards work together: the token tells the boundary to stop, and the
/// generation lets the coordinator ignore anything that arrives anyway.
#[derive(Debug)]
pub struct CancellationRegistry {
    generation: Generation,
    live: Option<LiveRequest>,
}

impl Default for CancellationRegistry {
    fn default() -> Self {
        Self {
            generation: Generation(0),
            live: None,
        }
    }
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap-and-cancel. Installs a fresh token under a new generation and
    /// cancels the previous live token, returning its generation if there was one.
    pub fn supersede(&mut self) -> (Generation, CancellationToken, Option<Generation>) {
        let superseded = self.live.take().map(|old| {
            old.token.cancel();
            old.generation
        });

        self.generation = self.generation.next();
        let token = CancellationToken::new();
        self.live = Some(LiveRequest {
            generation: self.generation,
            token: token.clone(),
        });

        (self.generation, token, superseded)
    }

    /// Cancels the live request, if any. The generation moves on so the
    /// cancelled call's late response is treated as stale.
    pub fn cancel(&mut self) -> Option<Generation> {
        let live = self.live.take()?;
        live.token.cancel();
        self.generation = self.generation.next();
        Some(live.generation)
    }

    /// Called when a call resolves. Returns `true` (and frees the slot) only
    /// if `generation` is still current.
    pub fn settle(&mut self, generation: Generation) -> bool {
        if generation != self.generation {
            return false;
        }
        if matches!(&self.live, Some(live) if live.generation == generation) {
            self.live = None;
        }
        true
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }

    pub fn is_in_flight(&self) -> bool {
        self.live.is_some()
    }

    pub fn current(&self) -> Generation {
        self.generation
    }
}
