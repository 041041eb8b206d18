//! Sound cues
//!
//! The core only triggers sounds; playback belongs to the host. Cues are
//! fire-and-forget: no return value, no errors back into the game.

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCue {
    /// Player picked up a coin
    BonusCollected,
    /// Looping background track, started with every session
    BackgroundMusic { volume: f32 },
}

/// Destination for sound cues
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Drops every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Logs cues instead of playing them (headless runs)
#[derive(Debug, Clone, Default)]
pub struct LogAudio {
    muted: bool,
    played: u32,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Cues played while unmuted
    pub fn played(&self) -> u32 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue) {
        if self.muted {
            return;
        }
        self.played += 1;
        match cue {
            AudioCue::BonusCollected => log::debug!("♪ coin"),
            AudioCue::BackgroundMusic { volume } => {
                log::debug!("♪ music (looped, volume {:.2})", volume)
            }
        }
    }
}

/// Records cues in order
impl AudioSink for Vec<AudioCue> {
    fn play(&mut self, cue: AudioCue) {
        self.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_log_audio_counts_nothing() {
        let mut audio = LogAudio::new();
        audio.play(AudioCue::BonusCollected);
        audio.set_muted(true);
        audio.play(AudioCue::BonusCollected);
        assert_eq!(audio.played(), 1);
    }

    #[test]
    fn test_vec_records_in_order() {
        let mut cues: Vec<AudioCue> = Vec::new();
        cues.play(AudioCue::BackgroundMusic { volume: 0.1 });
        cues.play(AudioCue::BonusCollected);
        assert_eq!(
            cues,
            vec![
                AudioCue::BackgroundMusic { volume: 0.1 },
                AudioCue::BonusCollected
            ]
        );
    }
}
