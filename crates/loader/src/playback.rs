// Playback session state machine: consumes the player's property feeds and
// drives transport-control state from a single control task.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Readiness of the current player item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemStatus {
    /// The player has not yet tried to load the item's media.
    #[default]
    Unknown,
    ReadyToPlay,
    Failed,
}

/// Description/reason pair surfaced when playback cannot proceed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackFailure {
    pub description: String,
    pub reason: String,
}

impl PlaybackFailure {
    pub fn new(description: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            reason: reason.into(),
        }
    }

    /// Produced when an asset's keys load but the asset itself reports not
    /// playable.
    pub fn not_playable() -> Self {
        Self::new(
            "Item cannot be played",
            "The contents of the resource at the specified URL are not playable.",
        )
    }
}

/// Item readiness as published on the status feed.
#[derive(Debug, Clone, Default)]
pub struct ItemState {
    pub status: ItemStatus,
    /// Populated when `status` is `Failed`.
    pub failure: Option<PlaybackFailure>,
}

/// How video is laid out within the surface's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoFillMode {
    /// Preserve aspect ratio, fit within bounds.
    #[default]
    ResizeAspect,
    /// Preserve aspect ratio, fill bounds.
    ResizeAspectFill,
    /// Stretch to bounds.
    Resize,
}

/// Effects the session drives on the shell. Every call happens on the
/// session's control task.
pub trait ControlSurface: Send {
    fn set_controls_enabled(&mut self, enabled: bool);
    fn show_play_button(&mut self);
    fn show_pause_button(&mut self);
    /// Binds the player's visual output to the video surface.
    fn attach_video_surface(&mut self);
    fn set_video_fill_mode(&mut self, mode: VideoFillMode);
    fn present_failure(&mut self, failure: &PlaybackFailure);
}

/// Transport commands the session issues to the playback engine.
pub trait PlayerTransport: Send {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek_to_start(&mut self);
}

/// Outcome of the asynchronous key-loading step for one asset, checked
/// before any item is attached.
#[derive(Debug, Clone)]
pub enum AssetPreparation {
    /// Keys loaded and the asset reported playable.
    Playable,
    /// A requested key failed to load.
    KeyLoadFailed(PlaybackFailure),
    /// Keys loaded but the asset is not playable.
    NotPlayable,
}

/// Sender halves of one item's property feeds, held by the playback engine.
pub struct PlayerFeeds {
    pub status: watch::Sender<ItemState>,
    pub rate: watch::Sender<f32>,
    pub current_item: watch::Sender<bool>,
    pub reached_end: mpsc::Sender<()>,
}

/// Receiver halves, consumed by the session's control task — one
/// subscription per observed property.
pub struct PlayerSubscriptions {
    pub status: watch::Receiver<ItemState>,
    pub rate: watch::Receiver<f32>,
    pub current_item: watch::Receiver<bool>,
    pub reached_end: mpsc::Receiver<()>,
}

/// Creates the feed/subscription pair for one player-item binding. Rebinding
/// to a new item means tearing the session down and creating a fresh pair:
/// stale feeds must never reach a live session.
pub fn player_channels() -> (PlayerFeeds, PlayerSubscriptions) {
    let (status_tx, status_rx) = watch::channel(ItemState::default());
    let (rate_tx, rate_rx) = watch::channel(0.0f32);
    let (item_tx, item_rx) = watch::channel(false);
    let (end_tx, end_rx) = mpsc::channel(4);
    (
        PlayerFeeds {
            status: status_tx,
            rate: rate_tx,
            current_item: item_tx,
            reached_end: end_tx,
        },
        PlayerSubscriptions {
            status: status_rx,
            rate: rate_rx,
            current_item: item_rx,
            reached_end: end_rx,
        },
    )
}

/// Pure control-state core. The control task feeds signals in; every effect
/// goes straight to the `ControlSurface`.
pub struct PlaybackState {
    surface: Box<dyn ControlSurface>,
    transport: Box<dyn PlayerTransport>,
    seek_to_zero_before_play: bool,
    rate: f32,
    status: ItemStatus,
}

impl PlaybackState {
    pub fn new(surface: Box<dyn ControlSurface>, transport: Box<dyn PlayerTransport>) -> Self {
        Self {
            surface,
            transport,
            seek_to_zero_before_play: false,
            rate: 0.0,
            status: ItemStatus::Unknown,
        }
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    fn is_playing(&self) -> bool {
        self.rate != 0.0
    }

    /// Exactly one of the two transport controls is shown, derived purely
    /// from the rate.
    fn sync_play_pause_buttons(&mut self) {
        if self.is_playing() {
            self.surface.show_pause_button();
        } else {
            self.surface.show_play_button();
        }
    }

    /// Disables the controls and surfaces the failure. They stay disabled
    /// until a new asset is prepared.
    pub fn fail(&mut self, failure: PlaybackFailure) {
        self.surface.set_controls_enabled(false);
        self.surface.present_failure(&failure);
    }

    /// Gate before attaching a new item: a failed key load or a non-playable
    /// asset surfaces the failure and nothing is attached. Returns whether
    /// attachment may proceed.
    pub fn on_asset_prepared(&mut self, preparation: AssetPreparation) -> bool {
        match preparation {
            AssetPreparation::Playable => {
                self.seek_to_zero_before_play = false;
                true
            }
            AssetPreparation::KeyLoadFailed(failure) => {
                self.fail(failure);
                false
            }
            AssetPreparation::NotPlayable => {
                self.fail(PlaybackFailure::not_playable());
                false
            }
        }
    }

    pub fn on_status(&mut self, state: &ItemState) {
        self.status = state.status;
        self.sync_play_pause_buttons();
        match state.status {
            ItemStatus::Unknown => self.surface.set_controls_enabled(false),
            ItemStatus::ReadyToPlay => self.surface.set_controls_enabled(true),
            ItemStatus::Failed => {
                self.fail(state.failure.clone().unwrap_or_default());
            }
        }
    }

    pub fn on_rate(&mut self, rate: f32) {
        self.rate = rate;
        self.sync_play_pause_buttons();
    }

    /// Item replacement completes asynchronously; presence lands here.
    pub fn on_current_item(&mut self, present: bool) {
        if present {
            self.surface.attach_video_surface();
            self.surface.set_video_fill_mode(VideoFillMode::ResizeAspect);
            self.sync_play_pause_buttons();
        } else {
            self.surface.set_controls_enabled(false);
        }
    }

    /// End of media: the next play command must rewind first.
    pub fn on_reached_end(&mut self) {
        self.seek_to_zero_before_play = true;
    }

    pub fn on_play(&mut self) {
        if self.seek_to_zero_before_play {
            self.seek_to_zero_before_play = false;
            self.transport.seek_to_start();
        }
        self.transport.play();
        self.surface.show_pause_button();
    }

    pub fn on_pause(&mut self) {
        self.transport.pause();
        self.surface.show_play_button();
    }
}

/// Commands the shell issues into the control task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Play,
    Pause,
}

/// Handle to a running playback session: command entry point plus teardown.
///
/// The session owns one item's subscriptions at a time. Tear it down (or
/// drop it) before binding the surface to a new item so stale signals never
/// fire against a torn-down session.
pub struct PlaybackSession {
    commands: mpsc::Sender<SessionCommand>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PlaybackSession {
    /// Spawns the control task. All `ControlSurface` and `PlayerTransport`
    /// calls happen on that single task.
    pub fn spawn(
        subscriptions: PlayerSubscriptions,
        surface: Box<dyn ControlSurface>,
        transport: Box<dyn PlayerTransport>,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::channel(8);
        let token = CancellationToken::new();
        let state = PlaybackState::new(surface, transport);
        let task = tokio::spawn(run_control_task(
            state,
            subscriptions,
            command_rx,
            token.clone(),
        ));
        Self {
            commands: command_tx,
            token,
            task: Some(task),
        }
    }

    pub fn play(&self) {
        if self.commands.try_send(SessionCommand::Play).is_err() {
            debug!("play command dropped, session is shutting down");
        }
    }

    pub fn pause(&self) {
        if self.commands.try_send(SessionCommand::Pause).is_err() {
            debug!("pause command dropped, session is shutting down");
        }
    }

    /// Cancels the subscriptions and waits for the control task to finish.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn run_control_task(
    mut state: PlaybackState,
    mut subscriptions: PlayerSubscriptions,
    mut commands: mpsc::Receiver<SessionCommand>,
    token: CancellationToken,
) {
    // Subscriptions deliver their current value up front, before any change
    // notification.
    let initial_status = subscriptions.status.borrow_and_update().clone();
    state.on_status(&initial_status);
    let initial_rate = *subscriptions.rate.borrow_and_update();
    state.on_rate(initial_rate);
    let initial_present = *subscriptions.current_item.borrow_and_update();
    state.on_current_item(initial_present);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("playback session torn down");
                break;
            }
            changed = subscriptions.status.changed() => match changed {
                Ok(()) => {
                    let item_state = subscriptions.status.borrow_and_update().clone();
                    state.on_status(&item_state);
                }
                Err(_) => break,
            },
            changed = subscriptions.rate.changed() => match changed {
                Ok(()) => {
                    let rate = *subscriptions.rate.borrow_and_update();
                    state.on_rate(rate);
                }
                Err(_) => break,
            },
            changed = subscriptions.current_item.changed() => match changed {
                Ok(()) => {
                    let present = *subscriptions.current_item.borrow_and_update();
                    state.on_current_item(present);
                }
                Err(_) => break,
            },
            end = subscriptions.reached_end.recv() => match end {
                Some(()) => state.on_reached_end(),
                None => break,
            },
            command = commands.recv() => match command {
                Some(SessionCommand::Play) => state.on_play(),
                Some(SessionCommand::Pause) => state.on_pause(),
                None => break,
            },
        }
    }
}
