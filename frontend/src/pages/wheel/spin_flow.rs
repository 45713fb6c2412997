use shared::constants::MAX_CONTENT_POLLS;
use shared::shared_wheel_game::{ContentResponse, ContentStatus};
use uuid::Uuid;

/// Settle POSTs tried before the page gives up on a spin.
pub const SETTLE_ATTEMPTS: u32 = 2;

/// Client-side spin gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinGate {
    Open,
    /// Closed from the click until the server confirms the settle.
    Turning,
    /// The server may still think the wheel is turning; only a reload helps.
    Stuck,
}

impl SpinGate {
    pub fn try_close(&mut self) -> bool {
        if *self != SpinGate::Open {
            return false;
        }
        *self = SpinGate::Turning;
        true
    }

    /// The spin was rejected or settled; the server is idle again.
    pub fn release(&mut self) {
        if *self == SpinGate::Turning {
            *self = SpinGate::Open;
        }
    }

    /// Every settle attempt failed. `server_spinning` is the server's own view
    /// when it could be fetched at all.
    pub fn settle_failed(&mut self, server_spinning: Option<bool>) {
        *self = match server_spinning {
            Some(false) => SpinGate::Open,
            _ => SpinGate::Stuck,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Pending,
    Ready,
    /// The episode will never turn ready from this page's point of view.
    Lost,
}

/// Tracks the content polls made for one settled episode.
#[derive(Debug, Clone)]
pub struct ContentPoll {
    episode: Uuid,
    polls: u32,
}

impl ContentPoll {
    pub fn new(episode: Uuid) -> Self {
        Self { episode, polls: 0 }
    }

    pub fn observe(&mut self, content: &ContentResponse) -> PollOutcome {
        self.polls += 1;

        // Reset or dismissed elsewhere, or a newer spin took over
        if content.episode != Some(self.episode) || content.status == ContentStatus::Idle {
            log::warn!("Episode {} is no longer current on the server", self.episode);
            return PollOutcome::Lost;
        }

        match content.status {
            ContentStatus::Ready => PollOutcome::Ready,
            _ if self.polls >= MAX_CONTENT_POLLS => {
                log::warn!("Gave up on episode {} after {} polls", self.episode, self.polls);
                PollOutcome::Lost
            }
            _ => PollOutcome::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: ContentStatus, episode: Option<Uuid>) -> ContentResponse {
        ContentResponse {
            status,
            episode,
            winner: None,
            tip: None,
            image: None,
        }
    }

    #[test]
    fn test_ready_episode_ends_polling() {
        let episode = Uuid::new_v4();
        let mut poll = ContentPoll::new(episode);
        assert_eq!(poll.observe(&response(ContentStatus::Loading, Some(episode))), PollOutcome::Pending);
        assert_eq!(poll.observe(&response(ContentStatus::Ready, Some(episode))), PollOutcome::Ready);
    }

    #[test]
    fn test_reset_session_loses_episode() {
        // After a reset the server reports an idle view with no episode at all
        let mut poll = ContentPoll::new(Uuid::new_v4());
        assert_eq!(poll.observe(&response(ContentStatus::Idle, None)), PollOutcome::Lost);
    }

    #[test]
    fn test_newer_episode_loses_polled_one() {
        let mut poll = ContentPoll::new(Uuid::new_v4());
        let other = Some(Uuid::new_v4());
        assert_eq!(poll.observe(&response(ContentStatus::Ready, other)), PollOutcome::Lost);
        assert_eq!(poll.observe(&response(ContentStatus::Loading, other)), PollOutcome::Lost);
    }

    #[test]
    fn test_polling_is_bounded() {
        let episode = Uuid::new_v4();
        let mut poll = ContentPoll::new(episode);
        let loading = response(ContentStatus::Loading, Some(episode));
        for _ in 1..MAX_CONTENT_POLLS {
            assert_eq!(poll.observe(&loading), PollOutcome::Pending);
        }
        assert_eq!(poll.observe(&loading), PollOutcome::Lost);
    }

    #[test]
    fn test_gate_blocks_second_click() {
        let mut gate = SpinGate::Open;
        assert!(gate.try_close());
        assert!(!gate.try_close());
        gate.release();
        assert!(gate.try_close());
    }

    #[test]
    fn test_failed_settle_keeps_gate_closed_while_server_spins() {
        let mut gate = SpinGate::Open;
        gate.try_close();
        gate.settle_failed(Some(true));
        assert_eq!(gate, SpinGate::Stuck);
        gate.release();
        assert!(!gate.try_close());

        let mut unreachable = SpinGate::Turning;
        unreachable.settle_failed(None);
        assert_eq!(unreachable, SpinGate::Stuck);
    }

    #[test]
    fn test_failed_settle_reopens_when_server_is_idle() {
        // The settle landed but its response was lost
        let mut gate = SpinGate::Turning;
        gate.settle_failed(Some(false));
        assert!(gate.try_close());
    }
}
