use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired, AudioStatus};

const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.15;

struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Buzzer
/// Plays a square wave tone while the Chip-8 sound timer is running.
pub struct Buzzer {
    device: AudioDevice<SquareWave>,
}

impl Buzzer {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: TONE_HZ / spec.freq as f32,
            phase: 0.0,
            volume: VOLUME,
        })?;
        Ok(Buzzer { device })
    }

    /// Starts or stops the tone; repeated calls with the same value are no-ops
    pub fn set(&self, on: bool) {
        match (on, self.device.status()) {
            (true, AudioStatus::Paused) | (true, AudioStatus::Stopped) => self.device.resume(),
            (false, AudioStatus::Playing) => self.device.pause(),
            _ => {}
        }
    }
}
