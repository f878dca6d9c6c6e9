use std::fmt;

/// The audio output the playback controller drives.
///
/// In the browser this is an `<audio>` element; in tests it is a recorder.
/// Calls are synchronous and are never issued concurrently: the controller
/// owns its port and every transport command takes `&mut self`.
pub trait PlaybackPort {
    /// Points the output at a new source. Playback does not start yet.
    fn load(&mut self, source: &str);

    /// Starts or resumes output of the loaded source.
    ///
    /// May be refused, e.g. by an autoplay policy or an unreachable source.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    /// Moves the playhead to `position` seconds.
    fn seek(&mut self, position: f64);

    /// Sets the output volume, already clamped to `[0, 1]`.
    fn set_volume(&mut self, volume: f64);
}

/// Notifications the port reports back to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    /// Playhead moved to the given position in seconds.
    TimeUpdate(f64),
    /// Length of the loaded source became known, in seconds.
    LoadedMetadata(f64),
    /// The loaded source played to its end.
    Ended,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackError {
    Rejected(String),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::Rejected(reason) => write!(f, "playback rejected: {}", reason),
        }
    }
}

impl std::error::Error for PlaybackError {}
