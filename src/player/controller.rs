use crate::{info, types::Track, warning};

use super::port::{PlaybackEvent, PlaybackPort};

pub const DEFAULT_VOLUME: f64 = 0.7;

/// Transport state of the preview player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A track is selected but not producing sound, e.g. it has no preview.
    Loaded,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    pub transport: TransportState,
    /// Playhead in seconds.
    pub current_time: f64,
    /// Length of the loaded source in seconds, 0 while unknown.
    pub duration: f64,
    pub volume: f64,
    pub queue: Vec<Track>,
    /// Position in `queue` of the selected item, `None` when nothing is selected.
    pub current_index: Option<usize>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState {
            current_track: None,
            transport: TransportState::Idle,
            current_time: 0.0,
            duration: 0.0,
            volume: DEFAULT_VOLUME,
            queue: Vec::new(),
            current_index: None,
        }
    }
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.transport == TransportState::Playing
    }
}

/// Queue-driven state machine on top of a [`PlaybackPort`].
///
/// ```text
/// Idle ──play_track──▶ Loaded ──(preview available)──▶ Playing ◀──▶ Paused
///   ▲                                                     │
///   └──────────── end of last track in queue ─────────────┘
/// ```
pub struct PlaybackController<P: PlaybackPort> {
    port: P,
    state: PlaybackState,
}

impl<P: PlaybackPort> PlaybackController<P> {
    pub fn new(mut port: P) -> Self {
        let state = PlaybackState::default();
        port.set_volume(state.volume);
        PlaybackController { port, state }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Selects `track` and starts it if it has a preview source.
    ///
    /// Position and duration are reset either way. Without a preview the
    /// track is only shown as selected and the transport stays `Loaded`.
    /// A previously playing source is paused unless the new one took over.
    pub fn play_track(&mut self, track: Track) {
        let was_playing = self.state.is_playing();
        self.state.current_time = 0.0;
        self.state.duration = 0.0;
        self.state.transport = TransportState::Loaded;

        match track.preview_source() {
            Some(source) => {
                self.port.load(source);
                match self.port.play() {
                    Ok(()) => {
                        info!("Playing {} by {}", track.name, track.artist_names());
                        self.state.transport = TransportState::Playing;
                    }
                    Err(e) => warning!("Failed to play {}: {}", track.name, e),
                }
            }
            None => warning!("No preview available for {}", track.name),
        }

        if was_playing && self.state.transport == TransportState::Loaded {
            self.port.pause();
        }
        self.state.current_track = Some(track);
    }

    pub fn pause(&mut self) {
        if self.state.transport == TransportState::Playing {
            self.port.pause();
            self.state.transport = TransportState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state.transport != TransportState::Paused {
            return;
        }
        match self.port.play() {
            Ok(()) => self.state.transport = TransportState::Playing,
            Err(e) => warning!("Failed to resume playback: {}", e),
        }
    }

    /// Play/pause shortcut.
    pub fn toggle(&mut self) {
        if self.state.is_playing() {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Advances to the next queue item; no-op on the last one.
    ///
    /// With nothing selected the first queue item is next.
    pub fn next(&mut self) {
        let next = self.state.current_index.map_or(0, |i| i + 1);
        if next < self.state.queue.len() {
            self.select(next);
        }
    }

    /// Steps back to the previous queue item; no-op on the first one.
    pub fn previous(&mut self) {
        match self.state.current_index {
            Some(i) if i > 0 && i - 1 < self.state.queue.len() => self.select(i - 1),
            _ => {}
        }
    }

    /// Moves the playhead, clamped to the known length of the source.
    pub fn seek(&mut self, position: f64) {
        if self.state.current_track.is_none() || !position.is_finite() {
            return;
        }
        let upper = if self.state.duration > 0.0 {
            self.state.duration
        } else {
            f64::MAX
        };
        let position = position.clamp(0.0, upper);
        self.port.seek(position);
        self.state.current_time = position;
    }

    pub fn set_volume(&mut self, volume: f64) {
        if volume.is_nan() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.port.set_volume(volume);
        self.state.volume = volume;
    }

    pub fn add_to_queue(&mut self, track: Track) {
        self.state.queue.push(track);
    }

    /// Empties the queue. Whatever is playing keeps playing.
    pub fn clear_queue(&mut self) {
        self.state.queue.clear();
        self.state.current_index = None;
    }

    pub fn is_current_track(&self, track_id: &str) -> bool {
        self.state
            .current_track
            .as_ref()
            .is_some_and(|t| t.id == track_id)
    }

    /// Feeds a notification from the port into the state machine.
    pub fn handle_event(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::TimeUpdate(position) => self.state.current_time = position,
            PlaybackEvent::LoadedMetadata(duration) => self.state.duration = duration,
            PlaybackEvent::Ended => self.on_ended(),
        }
    }

    fn on_ended(&mut self) {
        if self.state.current_track.is_none() {
            return;
        }
        self.state.current_time = 0.0;

        let has_next = self
            .state
            .current_index
            .map_or(!self.state.queue.is_empty(), |i| {
                i + 1 < self.state.queue.len()
            });
        if has_next {
            self.next();
            return;
        }

        self.state.current_track = None;
        self.state.current_index = None;
        self.state.duration = 0.0;
        self.state.transport = TransportState::Idle;
    }

    fn select(&mut self, index: usize) {
        self.state.current_index = Some(index);
        let track = self.state.queue[index].clone();
        self.play_track(track);
    }
}
