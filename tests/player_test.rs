use spotiproxy::player::{
    DEFAULT_VOLUME, PlaybackController, PlaybackError, PlaybackEvent, PlaybackPort,
    TransportState,
};
use spotiproxy::types::{ArtistRef, Track};

#[derive(Debug, Clone, PartialEq)]
enum PortCall {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    Volume(f64),
}

// Records every call so tests can assert what reached the audio output
#[derive(Default)]
struct RecordingPort {
    calls: Vec<PortCall>,
    refuse_play: bool,
}

impl PlaybackPort for RecordingPort {
    fn load(&mut self, source: &str) {
        self.calls.push(PortCall::Load(source.to_string()));
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.calls.push(PortCall::Play);
        if self.refuse_play {
            Err(PlaybackError::Rejected("autoplay blocked".to_string()))
        } else {
            Ok(())
        }
    }

    fn pause(&mut self) {
        self.calls.push(PortCall::Pause);
    }

    fn seek(&mut self, position: f64) {
        self.calls.push(PortCall::Seek(position));
    }

    fn set_volume(&mut self, volume: f64) {
        self.calls.push(PortCall::Volume(volume));
    }
}

// Helper function to create a test track
fn create_test_track(id: &str, preview: Option<&str>) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {}", id),
        artists: vec![ArtistRef {
            id: format!("{}_artist", id),
            name: "The Testers".to_string(),
        }],
        duration_ms: 30_000,
        preview_url: preview.map(String::from),
        uri: format!("spotify:track:{}", id),
    }
}

fn controller() -> PlaybackController<RecordingPort> {
    PlaybackController::new(RecordingPort::default())
}

fn queued_controller(ids: &[&str]) -> PlaybackController<RecordingPort> {
    let mut player = controller();
    for id in ids {
        player.add_to_queue(create_test_track(id, Some(&format!("https://p.scdn.co/{}", id))));
    }
    player
}

#[test]
fn test_initial_state() {
    let player = controller();
    let state = player.state();

    assert_eq!(state.transport, TransportState::Idle);
    assert!(state.current_track.is_none());
    assert!(state.queue.is_empty());
    assert_eq!(state.current_index, None);
    assert_eq!(state.volume, DEFAULT_VOLUME);
    assert!(!state.is_playing());

    // the initial volume is pushed to the output
    assert_eq!(player.port().calls, vec![PortCall::Volume(DEFAULT_VOLUME)]);
}

#[test]
fn test_play_track_with_preview_starts_playback() {
    let mut player = controller();
    player.play_track(create_test_track("a", Some("https://p.scdn.co/a")));

    let state = player.state();
    assert_eq!(state.transport, TransportState::Playing);
    assert!(state.is_playing());
    assert_eq!(state.current_time, 0.0);
    assert!(player.is_current_track("a"));
    assert!(!player.is_current_track("b"));

    let calls = &player.port().calls;
    assert_eq!(
        calls[1..],
        [PortCall::Load("https://p.scdn.co/a".to_string()), PortCall::Play]
    );
}

#[test]
fn test_play_track_without_preview_stays_loaded() {
    let mut player = controller();
    player.play_track(create_test_track("t1", None));

    let state = player.state();
    assert_eq!(state.transport, TransportState::Loaded);
    assert!(!state.is_playing());
    assert_eq!(state.current_track.as_ref().map(|t| t.id.as_str()), Some("t1"));

    // nothing but the initial volume reached the output
    assert_eq!(player.port().calls.len(), 1);
}

#[test]
fn test_empty_preview_url_counts_as_missing() {
    let mut player = controller();
    player.play_track(create_test_track("t1", Some("")));

    assert_eq!(player.state().transport, TransportState::Loaded);
}

#[test]
fn test_switching_to_track_without_preview_pauses_output() {
    let mut player = controller();
    player.play_track(create_test_track("a", Some("https://p.scdn.co/a")));
    player.play_track(create_test_track("t1", None));

    assert_eq!(player.state().transport, TransportState::Loaded);
    assert!(player.is_current_track("t1"));
    assert_eq!(player.port().calls.last(), Some(&PortCall::Pause));
}

#[test]
fn test_switching_to_refused_track_pauses_output() {
    let mut player = controller();
    player.play_track(create_test_track("a", Some("https://p.scdn.co/a")));
    player.port_mut().refuse_play = true;
    player.play_track(create_test_track("b", Some("https://p.scdn.co/b")));

    assert_eq!(player.state().transport, TransportState::Loaded);
    assert_eq!(player.port().calls.last(), Some(&PortCall::Pause));
}

#[test]
fn test_switching_between_previews_does_not_pause() {
    let mut player = controller();
    player.play_track(create_test_track("a", Some("https://p.scdn.co/a")));
    player.play_track(create_test_track("b", Some("https://p.scdn.co/b")));

    assert!(!player.port().calls.contains(&PortCall::Pause));
    assert!(player.state().is_playing());
}

#[test]
fn test_refused_play_stays_loaded() {
    let mut player = PlaybackController::new(RecordingPort {
        refuse_play: true,
        ..Default::default()
    });
    player.play_track(create_test_track("a", Some("https://p.scdn.co/a")));

    assert_eq!(player.state().transport, TransportState::Loaded);
    assert!(player.is_current_track("a"));
}

#[test]
fn test_play_track_resets_position_and_duration() {
    let mut player = controller();
    player.play_track(create_test_track("a", Some("https://p.scdn.co/a")));
    player.handle_event(PlaybackEvent::LoadedMetadata(30.0));
    player.handle_event(PlaybackEvent::TimeUpdate(12.5));
    assert_eq!(player.state().current_time, 12.5);
    assert_eq!(player.state().duration, 30.0);

    player.play_track(create_test_track("b", Some("https://p.scdn.co/b")));
    assert_eq!(player.state().current_time, 0.0);
    assert_eq!(player.state().duration, 0.0);
}

#[test]
fn test_pause_and_resume() {
    let mut player = controller();

    // pause and resume do nothing while idle
    player.pause();
    player.resume();
    assert_eq!(player.state().transport, TransportState::Idle);

    player.play_track(create_test_track("a", Some("https://p.scdn.co/a")));
    player.pause();
    assert_eq!(player.state().transport, TransportState::Paused);
    assert_eq!(player.port().calls.last(), Some(&PortCall::Pause));

    // a second pause is a no-op
    let calls_before = player.port().calls.len();
    player.pause();
    assert_eq!(player.port().calls.len(), calls_before);

    player.resume();
    assert_eq!(player.state().transport, TransportState::Playing);
    assert_eq!(player.port().calls.last(), Some(&PortCall::Play));
}

#[test]
fn test_resume_does_not_start_a_loaded_track() {
    let mut player = controller();
    player.play_track(create_test_track("t1", None));
    player.resume();

    assert_eq!(player.state().transport, TransportState::Loaded);
}

#[test]
fn test_toggle() {
    let mut player = controller();
    player.play_track(create_test_track("a", Some("https://p.scdn.co/a")));

    player.toggle();
    assert_eq!(player.state().transport, TransportState::Paused);

    player.toggle();
    assert_eq!(player.state().transport, TransportState::Playing);
}

#[test]
fn test_set_volume_is_clamped() {
    let mut player = controller();

    for (input, expected) in [
        (0.5, 0.5),
        (-0.3, 0.0),
        (1.7, 1.0),
        (0.0, 0.0),
        (1.0, 1.0),
        (f64::INFINITY, 1.0),
        (f64::NEG_INFINITY, 0.0),
    ] {
        player.set_volume(input);
        assert_eq!(player.state().volume, expected, "input {}", input);
        assert_eq!(player.port().calls.last(), Some(&PortCall::Volume(expected)));
    }
}

#[test]
fn test_set_volume_ignores_nan() {
    let mut player = controller();
    player.set_volume(0.4);
    player.set_volume(f64::NAN);

    assert_eq!(player.state().volume, 0.4);
}

#[test]
fn test_set_volume_applies_while_paused() {
    let mut player = controller();
    player.play_track(create_test_track("a", Some("https://p.scdn.co/a")));
    player.pause();
    player.set_volume(0.2);

    assert_eq!(player.state().volume, 0.2);
    assert_eq!(player.state().transport, TransportState::Paused);
}

#[test]
fn test_next_walks_the_queue() {
    let mut player = queued_controller(&["a", "b", "c"]);

    player.next();
    assert_eq!(player.state().current_index, Some(0));
    assert!(player.is_current_track("a"));
    assert!(player.state().is_playing());

    player.next();
    assert_eq!(player.state().current_index, Some(1));
    assert!(player.is_current_track("b"));
}

#[test]
fn test_next_at_last_index_is_noop() {
    let mut player = queued_controller(&["a", "b"]);
    player.next();
    player.next();
    player.handle_event(PlaybackEvent::TimeUpdate(4.0));

    let before = player.state().clone();
    let calls_before = player.port().calls.len();
    player.next();

    assert_eq!(player.state(), &before);
    assert_eq!(player.port().calls.len(), calls_before);
}

#[test]
fn test_previous_at_first_index_is_noop() {
    let mut player = queued_controller(&["a", "b"]);
    player.next();

    let before = player.state().clone();
    player.previous();
    assert_eq!(player.state(), &before);
}

#[test]
fn test_previous_steps_back() {
    let mut player = queued_controller(&["a", "b", "c"]);
    player.next();
    player.next();
    player.next();
    assert!(player.is_current_track("c"));

    player.previous();
    assert_eq!(player.state().current_index, Some(1));
    assert!(player.is_current_track("b"));
    assert!(player.state().is_playing());
}

#[test]
fn test_next_and_previous_on_empty_queue() {
    let mut player = controller();
    player.next();
    player.previous();

    assert_eq!(player.state().current_index, None);
    assert_eq!(player.state().transport, TransportState::Idle);
}

#[test]
fn test_end_of_track_advances_to_next() {
    let mut player = queued_controller(&["A", "B"]);
    player.next();
    assert_eq!(player.state().current_index, Some(0));

    player.handle_event(PlaybackEvent::TimeUpdate(29.9));
    player.handle_event(PlaybackEvent::Ended);

    let state = player.state();
    assert_eq!(state.current_index, Some(1));
    assert!(player.is_current_track("B"));
    assert_eq!(state.transport, TransportState::Playing);
    assert_eq!(state.current_time, 0.0);
    assert_eq!(
        player.port().calls.last(),
        Some(&PortCall::Play),
        "B must be started"
    );
}

#[test]
fn test_end_of_last_track_goes_idle() {
    let mut player = queued_controller(&["A"]);
    player.next();
    player.handle_event(PlaybackEvent::TimeUpdate(29.9));
    player.handle_event(PlaybackEvent::Ended);

    let state = player.state();
    assert_eq!(state.transport, TransportState::Idle);
    assert!(state.current_track.is_none());
    assert_eq!(state.current_time, 0.0);
    assert_eq!(state.queue.len(), 1);
    assert_eq!(state.current_index, None);

    // the queue starts over from the top
    player.next();
    assert!(player.is_current_track("A"));
    assert_eq!(player.state().current_index, Some(0));
}

#[test]
fn test_end_of_track_outside_queue_starts_queue() {
    let mut player = queued_controller(&["A", "B"]);
    player.play_track(create_test_track("solo", Some("https://p.scdn.co/solo")));
    player.handle_event(PlaybackEvent::Ended);

    assert!(player.is_current_track("A"));
    assert_eq!(player.state().current_index, Some(0));
}

#[test]
fn test_end_without_track_is_ignored() {
    let mut player = controller();
    let before = player.state().clone();
    player.handle_event(PlaybackEvent::Ended);

    assert_eq!(player.state(), &before);
}

#[test]
fn test_seek_is_clamped_to_duration() {
    let mut player = controller();
    player.play_track(create_test_track("a", Some("https://p.scdn.co/a")));
    player.handle_event(PlaybackEvent::LoadedMetadata(30.0));

    player.seek(12.0);
    assert_eq!(player.state().current_time, 12.0);
    assert_eq!(player.port().calls.last(), Some(&PortCall::Seek(12.0)));

    player.seek(45.0);
    assert_eq!(player.state().current_time, 30.0);

    player.seek(-3.0);
    assert_eq!(player.state().current_time, 0.0);

    player.seek(f64::NAN);
    assert_eq!(player.state().current_time, 0.0);
    assert_eq!(player.port().calls.last(), Some(&PortCall::Seek(0.0)));
}

#[test]
fn test_seek_without_known_duration_only_clamps_below() {
    let mut player = controller();
    player.play_track(create_test_track("a", Some("https://p.scdn.co/a")));

    player.seek(20.0);
    assert_eq!(player.state().current_time, 20.0);
}

#[test]
fn test_seek_without_track_is_noop() {
    let mut player = controller();
    player.seek(5.0);

    assert_eq!(player.state().current_time, 0.0);
    assert_eq!(player.port().calls.len(), 1);
}

#[test]
fn test_clear_queue_keeps_playing() {
    let mut player = queued_controller(&["a", "b"]);
    player.next();
    player.clear_queue();

    let state = player.state();
    assert!(state.queue.is_empty());
    assert_eq!(state.current_index, None);
    assert_eq!(state.transport, TransportState::Playing);
    assert!(player.is_current_track("a"));
    assert_ne!(player.port().calls.last(), Some(&PortCall::Pause));
}

#[test]
fn test_add_to_queue_does_not_select() {
    let mut player = controller();
    player.add_to_queue(create_test_track("a", None));
    player.add_to_queue(create_test_track("b", None));

    let state = player.state();
    assert_eq!(state.queue.len(), 2);
    assert_eq!(state.queue[1].id, "b");
    assert_eq!(state.current_index, None);
    assert_eq!(state.transport, TransportState::Idle);
}

#[test]
fn test_track_without_preview_in_queue() {
    let mut player = controller();
    player.add_to_queue(create_test_track("a", None));
    player.add_to_queue(create_test_track("b", Some("https://p.scdn.co/b")));

    player.next();
    assert_eq!(player.state().transport, TransportState::Loaded);

    player.next();
    assert_eq!(player.state().transport, TransportState::Playing);
    assert!(player.is_current_track("b"));
}
