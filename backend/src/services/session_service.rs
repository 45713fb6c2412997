use std::sync::Arc;

use rand::Rng;
use shared::catalog::Slice;
use shared::shared_wheel_game::{
    ContentResponse, ContentStatus, SpinOutcome, SpinState, WheelSettleResponse,
    WheelStateResponse, WinTally,
};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use super::content_service::{ContentResolver, ResolvedContent};

/// Content state of the current result view.
#[derive(Debug, Clone)]
struct ContentEpisode {
    id: Option<Uuid>,
    status: ContentStatus,
    winner: Option<Slice>,
    content: Option<ResolvedContent>,
}

impl ContentEpisode {
    fn idle() -> Self {
        Self {
            id: None,
            status: ContentStatus::Idle,
            winner: None,
            content: None,
        }
    }

    fn loading(winner: Slice) -> Self {
        Self {
            id: Some(Uuid::new_v4()),
            status: ContentStatus::Loading,
            winner: Some(winner),
            content: None,
        }
    }
}

/// The single active session: wheel state, win tally and the content episode.
/// Every mutation goes through the methods below.
#[derive(Debug)]
pub struct Session {
    spin: SpinState,
    tally: WinTally,
    episode: ContentEpisode,
}

pub type SharedSession = Arc<Mutex<Session>>;

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            spin: SpinState::new(),
            tally: WinTally::new(),
            episode: ContentEpisode::idle(),
        }
    }

    pub fn shared() -> SharedSession {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn tally(&self) -> &WinTally {
        &self.tally
    }

    /// Starts a spin. A new spin discards whatever the result view showed.
    pub fn spin<R: Rng>(&mut self, catalog: &[Slice], rng: &mut R) -> Option<SpinOutcome> {
        let outcome = self.spin.trigger_spin(catalog, rng)?;
        self.episode = ContentEpisode::idle();
        Some(outcome)
    }

    /// Settles the pending spin and opens a loading episode for its winner.
    pub fn settle(&mut self) -> Option<(Slice, Uuid)> {
        let winner = self.spin.on_spin_settled(&mut self.tally)?;
        self.episode = ContentEpisode::loading(winner.clone());
        let id = self.episode.id?;
        Some((winner, id))
    }

    /// Stores resolved content. Accepted once per episode, and only while that
    /// episode is still the current one.
    pub fn commit_content(&mut self, episode: Uuid, content: ResolvedContent) -> bool {
        if self.episode.id != Some(episode) || self.episode.status != ContentStatus::Loading {
            return false;
        }
        self.episode.status = ContentStatus::Ready;
        self.episode.content = Some(content);
        true
    }

    /// Closes the result view; a resolution still in flight will be dropped.
    pub fn dismiss(&mut self) {
        self.episode = ContentEpisode::idle();
    }

    pub fn state_view(&self) -> WheelStateResponse {
        WheelStateResponse {
            rotation: self.spin.cumulative_rotation,
            is_spinning: self.spin.is_spinning,
            winner: self.spin.current_winner.clone(),
            tally: self.tally.clone(),
        }
    }

    pub fn content_view(&self) -> ContentResponse {
        let content = self.episode.content.clone();
        ContentResponse {
            status: self.episode.status,
            episode: self.episode.id,
            winner: self.episode.winner.clone(),
            tip: content.as_ref().map(|c| c.tip.clone()),
            image: content.and_then(|c| c.image),
        }
    }
}

/// Resolves content for an episode in the background and commits it. The
/// handle yields whether the commit was accepted.
pub fn spawn_resolution(
    session: SharedSession,
    resolver: Arc<ContentResolver>,
    episode: Uuid,
    winner: Slice,
) -> JoinHandle<bool> {
    tokio::spawn(async move {
        let content = resolver.resolve(&winner.name).await;
        let committed = session.lock().await.commit_content(episode, content);
        if committed {
            info!("Content ready for {} (episode {})", winner.name, episode);
        } else {
            debug!("Episode {} is no longer current, content for {} dropped", episode, winner.name);
        }
        committed
    })
}

/// Settle event: releases the spin gate right away and starts content
/// resolution without waiting for it.
pub async fn settle_and_resolve(
    session: &SharedSession,
    resolver: &Arc<ContentResolver>,
) -> Option<(WheelSettleResponse, JoinHandle<bool>)> {
    let (winner, episode, wins) = {
        let mut guard = session.lock().await;
        let (winner, episode) = guard.settle()?;
        let wins = guard.tally().wins(&winner.id);
        (winner, episode, wins)
    };

    info!("🎡 Wheel settled on {} ({} win(s) this session)", winner.name, wins);

    let handle = spawn_resolution(session.clone(), resolver.clone(), episode, winner.clone());
    Some((WheelSettleResponse { winner, wins, episode }, handle))
}
