use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;

use super::sink::{create_sink_at, probe_duration};
use super::transport::Transport;
use super::types::{LoadGeneration, MediaCmd, MediaError, MediaEvent, PlayRequest};

/// Everything the audio thread owns. Only ever touched from that thread.
struct AudioThread {
    events: Sender<MediaEvent>,
    stream: Option<OutputStream>,
    source: Option<PathBuf>,
    sink: Option<Sink>,
    transport: Transport,
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<MediaCmd>,
    events: Sender<MediaEvent>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));
        let mut state = AudioThread {
            events,
            stream: None,
            source: None,
            sink: None,
            transport: Transport::default(),
        };

        loop {
            match rx.recv_timeout(tick) {
                Ok(MediaCmd::Load { path, generation }) => state.load(path, generation),
                Ok(MediaCmd::Play(request)) => state.play(request),
                Ok(MediaCmd::Pause) => state.pause(),
                Ok(MediaCmd::Seek(position)) => state.seek(position),
                Ok(MediaCmd::Quit { fade_out_ms }) => {
                    state.quit(fade_out_ms);
                    break;
                }
                Err(RecvTimeoutError::Timeout) => state.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("audio thread exiting");
    })
}

impl AudioThread {
    fn emit(&self, event: MediaEvent) {
        // The receiver only goes away during shutdown.
        let _ = self.events.send(event);
    }

    fn stop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn output(&mut self) -> Result<&OutputStream, MediaError> {
        if self.stream.is_none() {
            let mut stream = OutputStreamBuilder::open_default_stream()
                .map_err(|e| MediaError::Output(e.to_string()))?;
            // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
            // but noisy for a TUI app.
            stream.log_on_drop(false);
            self.stream = Some(stream);
        }
        self.stream
            .as_ref()
            .ok_or_else(|| MediaError::Output("no output stream".to_string()))
    }

    fn load(&mut self, path: PathBuf, generation: LoadGeneration) {
        self.stop_sink();
        self.transport.load(generation);

        let duration = probe_duration(&path);
        tracing::debug!(source = %path.display(), generation, ?duration, "loaded source");
        self.source = Some(path);

        self.emit(self.transport.time_update());
        self.emit(MediaEvent::MetadataLoaded {
            generation,
            duration,
        });
    }

    fn play(&mut self, request: PlayRequest) {
        match self.start(request) {
            Ok(()) => self.emit(MediaEvent::PlayStarted(request)),
            Err(error) => {
                tracing::debug!(request, %error, "play request declined");
                self.emit(MediaEvent::PlayRejected { request, error });
            }
        }
    }

    fn start(&mut self, request: PlayRequest) -> Result<(), MediaError> {
        if let Some(s) = self.sink.as_ref() {
            if !s.empty() {
                s.play();
                self.transport.resumed(request);
                return Ok(());
            }
        }

        let path = self.source.clone().ok_or(MediaError::NoSource)?;
        let start_at = self.transport.start_position();
        let sink = create_sink_at(self.output()?, &path, start_at)?;

        self.stop_sink();
        sink.play();
        self.sink = Some(sink);
        self.transport.started(request, start_at);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        self.transport.paused();
        self.emit(self.transport.time_update());
    }

    fn seek(&mut self, position: Duration) {
        let Some(path) = self.source.clone() else {
            return;
        };

        // Scrubbing: rebuild the sink and skip into the file. Without a sink yet,
        // the next play simply starts from the new position.
        let rebuilt = if self.sink.is_some() {
            let sink = self
                .output()
                .and_then(|stream| create_sink_at(stream, &path, position));
            match sink {
                Ok(sink) => Some(sink),
                Err(error) => {
                    tracing::warn!(%error, ?position, "seek failed; keeping current position");
                    return;
                }
            }
        } else {
            None
        };

        let play = self.transport.seeked(position);
        if let Some(sink) = rebuilt {
            self.stop_sink();
            if play {
                sink.play();
            }
            self.sink = Some(sink);
        }
        self.emit(self.transport.time_update());
    }

    fn tick(&mut self) {
        let drained = self.sink.as_ref().is_some_and(|s| s.empty());
        if let Some(event) = self.transport.tick(drained) {
            self.emit(event);
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(ref s) = self.sink {
            if self.transport.is_running() {
                // Fade out gently before stopping.
                fade_out_sink(s, fade_out_ms);
            }
            s.stop();
        }
        self.sink = None;
        self.transport.stop();
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
