use std::path::{Path, PathBuf};
use std::time::Duration;

use proptest::prelude::*;

use super::*;
use crate::media::{LoadGeneration, MediaElement, MediaError, MediaEvent, PlayRequest};
use crate::playlist::{PlaylistError, Track};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(PathBuf),
    Play(PlayRequest),
    Pause,
    Seek(Duration),
}

/// Records every call; play requests and load generations are numbered from 1.
#[derive(Default)]
struct FakeMedia {
    calls: Vec<Call>,
    next_request: PlayRequest,
    generation: LoadGeneration,
}

impl FakeMedia {
    fn last_play(&self) -> Option<PlayRequest> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Play(r) => Some(*r),
            _ => None,
        })
    }

    fn seeks(&self) -> Vec<Duration> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Seek(d) => Some(*d),
                _ => None,
            })
            .collect()
    }
}

impl MediaElement for FakeMedia {
    fn load(&mut self, source: &Path) -> LoadGeneration {
        self.generation += 1;
        self.calls.push(Call::Load(source.to_path_buf()));
        self.generation
    }

    fn play(&mut self) -> PlayRequest {
        self.next_request += 1;
        self.calls.push(Call::Play(self.next_request));
        self.next_request
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.calls.push(Call::Seek(position));
    }
}

fn tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| Track {
            title: format!("Song {i}"),
            audio: PathBuf::from(format!("/music/{i}.mp3")),
            image: None,
        })
        .collect()
}

fn controller(n: usize) -> PlaybackController<FakeMedia> {
    PlaybackController::new(tracks(n), FakeMedia::default()).unwrap()
}

fn rejected(request: PlayRequest) -> MediaEvent {
    MediaEvent::PlayRejected {
        request,
        error: MediaError::Output("autoplay blocked".into()),
    }
}

fn metadata(c: &PlaybackController<FakeMedia>, secs: u64) -> MediaEvent {
    MediaEvent::MetadataLoaded {
        generation: c.media().generation,
        duration: Some(Duration::from_secs(secs)),
    }
}

fn time_update(c: &PlaybackController<FakeMedia>, secs: u64) -> MediaEvent {
    MediaEvent::TimeUpdate {
        generation: c.media().generation,
        position: Duration::from_secs(secs),
    }
}

/// The element ran out of audio for the latest load and play request.
fn ended(c: &PlaybackController<FakeMedia>) -> MediaEvent {
    MediaEvent::Ended {
        generation: c.media().generation,
        request: c.media().last_play().unwrap(),
    }
}

/// Request playback and have the element confirm it.
fn start_playing(c: &mut PlaybackController<FakeMedia>) {
    c.toggle_play();
    let request = c.media().last_play().unwrap();
    c.handle_event(MediaEvent::PlayStarted(request));
    assert!(c.is_playing());
}

#[test]
fn new_rejects_empty_track_list() {
    let result = PlaybackController::new(Vec::new(), FakeMedia::default());
    assert!(matches!(result, Err(PlaylistError::Empty)));
}

#[test]
fn new_loads_first_track_paused() {
    let c = controller(3);
    assert_eq!(c.current_index(), 0);
    assert!(!c.is_playing());
    assert_eq!(c.duration(), None);
    assert_eq!(c.media().calls, vec![Call::Load("/music/0.mp3".into())]);
}

#[test]
fn toggle_play_waits_for_the_element_to_confirm() {
    let mut c = controller(2);
    c.toggle_play();
    assert!(!c.is_playing());
    assert!(c.is_play_pending());

    c.handle_event(MediaEvent::PlayStarted(1));
    assert!(c.is_playing());
    assert!(!c.is_play_pending());

    c.toggle_play();
    assert!(!c.is_playing());
    assert_eq!(c.media().calls.last(), Some(&Call::Pause));
}

#[test]
fn rejected_play_twice_stays_paused() {
    let mut c = controller(2);

    c.toggle_play();
    c.handle_event(rejected(1));
    assert!(!c.is_playing());
    assert!(!c.is_play_pending());

    c.toggle_play();
    c.handle_event(rejected(2));
    assert!(!c.is_playing());
    assert!(!c.is_play_pending());
}

#[test]
fn stale_play_start_after_pause_is_ignored() {
    let mut c = controller(2);
    start_playing(&mut c);

    c.toggle_play();
    assert!(!c.is_playing());
    // A confirmation for an older request must not flip the flag back.
    c.handle_event(MediaEvent::PlayStarted(1));
    assert!(!c.is_playing());
}

#[test]
fn newer_request_supersedes_older_one() {
    let mut c = controller(2);
    c.toggle_play();
    c.toggle_play();
    assert_eq!(c.media().last_play(), Some(2));

    c.handle_event(rejected(1));
    assert!(c.is_play_pending());
    c.handle_event(MediaEvent::PlayStarted(2));
    assert!(c.is_playing());
}

#[test]
fn next_and_prev_wrap_around() {
    let mut c = controller(3);
    c.play_prev();
    assert_eq!(c.current_index(), 2);
    c.play_next();
    assert_eq!(c.current_index(), 0);
    c.play_next();
    c.play_next();
    c.play_next();
    assert_eq!(c.current_index(), 0);
}

#[test]
fn changing_track_while_paused_loads_without_playing() {
    let mut c = controller(3);
    c.handle_event(metadata(&c, 90));
    c.handle_event(time_update(&c, 30));

    c.play_next();
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.current_time(), Duration::ZERO);
    assert_eq!(c.duration(), None);
    assert_eq!(c.media().calls.last(), Some(&Call::Load("/music/1.mp3".into())));
    assert_eq!(c.media().last_play(), None);
}

#[test]
fn changing_track_while_playing_resumes_on_the_new_one() {
    let mut c = controller(3);
    start_playing(&mut c);

    c.play_next();
    assert_eq!(c.current_index(), 1);
    assert!(c.is_play_pending());
    let calls = &c.media().calls;
    assert_eq!(calls[calls.len() - 2], Call::Load("/music/1.mp3".into()));
    assert_eq!(calls[calls.len() - 1], Call::Play(2));

    c.handle_event(MediaEvent::PlayStarted(2));
    assert!(c.is_playing());
}

#[test]
fn rejected_resume_after_track_change_drops_to_paused() {
    let mut c = controller(3);
    start_playing(&mut c);

    c.play_prev();
    assert_eq!(c.current_index(), 2);
    c.handle_event(rejected(2));
    assert!(!c.is_playing());
    assert!(!c.is_play_pending());
}

#[test]
fn ended_advances_and_keeps_playing() {
    let mut c = controller(2);
    start_playing(&mut c);

    c.handle_event(ended(&c));
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.media().last_play(), Some(2));

    c.handle_event(MediaEvent::PlayStarted(2));
    c.handle_event(ended(&c));
    assert_eq!(c.current_index(), 0);
}

#[test]
fn end_of_previous_track_after_user_next_is_ignored() {
    let mut c = controller(3);
    start_playing(&mut c);
    let old_end = ended(&c);

    c.play_next();
    assert_eq!(c.current_index(), 1);
    c.handle_event(old_end.clone());
    assert_eq!(c.current_index(), 1);

    // Still ignored once the new track is confirmed.
    c.handle_event(MediaEvent::PlayStarted(2));
    c.handle_event(old_end);
    assert_eq!(c.current_index(), 1);
    assert!(c.is_playing());
}

#[test]
fn end_arriving_after_pause_keeps_the_track() {
    let mut c = controller(3);
    start_playing(&mut c);
    let end = ended(&c);

    c.toggle_play();
    c.handle_event(end.clone());
    assert_eq!(c.current_index(), 0);
    assert!(!c.is_playing());
    assert_eq!(c.media().last_play(), Some(1));

    // Pressing play again before the old end shows up does not skip either.
    c.toggle_play();
    c.handle_event(end);
    assert_eq!(c.current_index(), 0);
    c.handle_event(MediaEvent::PlayStarted(2));
    assert!(c.is_playing());
}

#[test]
fn end_before_play_is_confirmed_is_ignored() {
    let mut c = controller(2);
    c.toggle_play();
    c.handle_event(MediaEvent::Ended {
        generation: c.media().generation,
        request: 1,
    });
    assert_eq!(c.current_index(), 0);
}

#[test]
fn position_and_metadata_from_previous_load_are_dropped() {
    let mut c = controller(3);
    let old_metadata = metadata(&c, 300);
    let old_time = time_update(&c, 42);

    c.play_next();
    c.handle_event(old_metadata);
    c.handle_event(old_time);
    assert_eq!(c.duration(), None);
    assert_eq!(c.current_time(), Duration::ZERO);

    c.handle_event(metadata(&c, 120));
    c.handle_event(time_update(&c, 7));
    assert_eq!(c.duration(), Some(Duration::from_secs(120)));
    assert_eq!(c.current_time(), Duration::from_secs(7));
}

#[test]
fn seek_to_half_of_200s_requests_100s() {
    let mut c = controller(1);
    c.handle_event(metadata(&c, 200));

    assert_eq!(c.seek_to_fraction(0.5), Some(Duration::from_secs(100)));
    assert_eq!(c.media().seeks(), vec![Duration::from_secs(100)]);
    assert_eq!(c.current_time(), Duration::from_secs(100));
}

#[test]
fn seek_clamps_fraction_and_needs_a_known_duration() {
    let mut c = controller(1);
    assert_eq!(c.seek_to_fraction(0.5), None);
    assert!(c.media().seeks().is_empty());

    c.handle_event(metadata(&c, 60));
    assert_eq!(c.seek_to_fraction(1.7), Some(Duration::from_secs(60)));
    assert_eq!(c.seek_to_fraction(-0.2), Some(Duration::ZERO));
}

#[test]
fn seek_by_stays_within_the_track() {
    let mut c = controller(1);
    c.handle_event(metadata(&c, 20));
    c.handle_event(time_update(&c, 3));

    assert_eq!(c.seek_by(-5), Duration::ZERO);
    assert_eq!(c.seek_by(15), Duration::from_secs(15));
    assert_eq!(c.seek_by(15), Duration::from_secs(20));
}

#[test]
fn time_updates_never_exceed_duration() {
    let mut c = controller(1);
    c.handle_event(time_update(&c, 500));
    assert_eq!(c.current_time(), Duration::from_secs(500));

    c.handle_event(metadata(&c, 180));
    assert_eq!(c.current_time(), Duration::from_secs(180));

    c.handle_event(time_update(&c, 181));
    assert_eq!(c.current_time(), Duration::from_secs(180));
    assert_eq!(c.progress_ratio(), 1.0);
}

#[test]
fn progress_ratio_is_zero_until_duration_is_known() {
    let mut c = controller(1);
    c.handle_event(time_update(&c, 10));
    assert_eq!(c.progress_ratio(), 0.0);

    c.handle_event(metadata(&c, 40));
    assert!((c.progress_ratio() - 0.25).abs() < 1e-9);
}

#[test]
fn format_time_matches_player_display() {
    assert_eq!(format_time(f64::NAN), "00:00");
    assert_eq!(format_time(f64::INFINITY), "00:00");
    assert_eq!(format_time(65.0), "1:05");
    assert_eq!(format_time(0.0), "0:00");
    assert_eq!(format_time(59.99), "0:59");
    assert_eq!(format_time(3600.0), "60:00");
    assert_eq!(format_time(-4.0), "0:00");
}

proptest! {
    #[test]
    fn next_n_times_returns_to_start(n in 1usize..40, start in 0usize..40) {
        let mut c = controller(n);
        for _ in 0..(start % n) {
            c.play_next();
        }
        let origin = c.current_index();

        for _ in 0..n {
            c.play_next();
        }
        prop_assert_eq!(c.current_index(), origin);
    }

    #[test]
    fn prev_undoes_next(n in 1usize..40, start in 0usize..40) {
        let mut c = controller(n);
        for _ in 0..(start % n) {
            c.play_prev();
        }
        let origin = c.current_index();

        c.play_next();
        c.play_prev();
        prop_assert_eq!(c.current_index(), origin);
        prop_assert!(c.current_index() < n);
    }
}
