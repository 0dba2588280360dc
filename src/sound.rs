/// Audio output.  Compiled only with the `sound` feature; without it the
/// game runs silent and this module does not exist.
///
/// Effects are rendered on demand and detached onto the mixer; the music
/// loop is rendered once, on first un-mute, and then paused and resumed.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use squeala_claw::audio;
use squeala_claw::entities::AudioEvent;

pub struct Sound {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
    pub sfx_on: bool,
    pub music_on: bool,
}

impl Sound {
    /// `None` when no output device is available; the game stays silent.
    pub fn init() -> Option<Sound> {
        let (stream, handle) = OutputStream::try_default().ok()?;
        Some(Sound {
            _stream: stream,
            handle,
            music: None,
            sfx_on: true,
            music_on: false,
        })
    }

    /// Fire-and-forget effect playback.
    pub fn play(&self, event: AudioEvent) {
        if !self.sfx_on {
            return;
        }
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.append(SamplesBuffer::new(1, audio::SAMPLE_RATE, audio::render(event)));
            sink.detach();
        }
    }

    pub fn toggle_sfx(&mut self) {
        self.sfx_on = !self.sfx_on;
    }

    pub fn toggle_music(&mut self) {
        self.music_on = !self.music_on;
        if self.music_on && self.music.is_none() {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                sink.set_volume(0.1);
                let samples = SamplesBuffer::new(1, audio::SAMPLE_RATE, audio::render_music());
                sink.append(samples.repeat_infinite());
                self.music = Some(sink);
            }
        }
        if let Some(music) = &self.music {
            if self.music_on {
                music.play();
            } else {
                music.pause();
            }
        }
    }
}
