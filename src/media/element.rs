use std::path::Path;
use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::thread::spawn_audio_thread;
use super::types::{LoadGeneration, MediaCmd, MediaElement, MediaEvent, PlayRequest};

/// A `MediaElement` backed by `rodio`, running on a dedicated audio thread.
///
/// Events (time updates, metadata, ended, play outcomes) are delivered on the
/// `Sender` passed to [`RodioElement::new`].
pub struct RodioElement {
    tx: Sender<MediaCmd>,
    last_request: PlayRequest,
    last_generation: LoadGeneration,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioElement {
    pub fn new(events: Sender<MediaEvent>, audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<MediaCmd>();
        let audio_handle = spawn_audio_thread(rx, events, audio_settings);

        Self {
            tx,
            last_request: 0,
            last_generation: 0,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    fn send(&self, cmd: MediaCmd) {
        if let Err(e) = self.tx.send(cmd) {
            tracing::warn!(cmd = ?e.0, "audio thread is gone; dropping command");
        }
    }

    /// Fade out, stop the audio thread and wait for it to finish.
    pub fn quit_softly(&self, fade_out: Duration) {
        self.send(MediaCmd::Quit {
            fade_out_ms: u64::try_from(fade_out.as_millis()).unwrap_or(u64::MAX),
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                if h.join().is_err() {
                    tracing::error!("audio thread panicked");
                }
            }
        }
    }
}

impl MediaElement for RodioElement {
    fn load(&mut self, source: &Path) -> LoadGeneration {
        self.last_generation += 1;
        self.send(MediaCmd::Load {
            path: source.to_path_buf(),
            generation: self.last_generation,
        });
        self.last_generation
    }

    fn play(&mut self) -> PlayRequest {
        self.last_request += 1;
        self.send(MediaCmd::Play(self.last_request));
        self.last_request
    }

    fn pause(&mut self) {
        self.send(MediaCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.send(MediaCmd::Seek(position));
    }
}
