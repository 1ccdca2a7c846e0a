//! Single-slot ambient playback.
//!
//! At most one clip plays at a time. Starting a clip stops and rewinds the
//! one already playing; triggering the playing clip again stops it.

use crate::condition::SoundClip;

/// Which clip, if any, currently owns the audio slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackSlot {
    #[default]
    Idle,
    Playing(SoundClip),
}

/// Side effect the view must apply to its audio output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEffect {
    /// Pause the clip and reset it to the beginning.
    StopAndRewind(SoundClip),
    /// Start the clip, looping.
    Play(SoundClip),
}

impl PlaybackSlot {
    pub fn playing(&self) -> Option<SoundClip> {
        match self {
            PlaybackSlot::Idle => None,
            PlaybackSlot::Playing(clip) => Some(*clip),
        }
    }

    /// Give the slot to `clip`, displacing whatever was playing.
    pub fn start(&mut self, clip: SoundClip) -> Vec<PlaybackEffect> {
        let mut effects = Vec::with_capacity(2);
        match *self {
            PlaybackSlot::Playing(current) if current == clip => return effects,
            PlaybackSlot::Playing(current) => effects.push(PlaybackEffect::StopAndRewind(current)),
            PlaybackSlot::Idle => {}
        }
        effects.push(PlaybackEffect::Play(clip));
        *self = PlaybackSlot::Playing(clip);
        effects
    }

    /// Empty the slot.
    pub fn stop(&mut self) -> Vec<PlaybackEffect> {
        match std::mem::take(self) {
            PlaybackSlot::Idle => Vec::new(),
            PlaybackSlot::Playing(current) => vec![PlaybackEffect::StopAndRewind(current)],
        }
    }

    /// A click on `clip`'s trigger: stop it if it is the active clip, else start it.
    pub fn toggle(&mut self, clip: SoundClip) -> Vec<PlaybackEffect> {
        if self.playing() == Some(clip) {
            self.stop()
        } else {
            self.start(clip)
        }
    }

    /// [`toggle`](Self::toggle) and drive `sink` with the result.
    ///
    /// If the sink fails part way, the slot is set to whatever is actually
    /// audible after the effects that did succeed.
    pub fn toggle_on<S: AudioSink + ?Sized>(
        &mut self,
        clip: SoundClip,
        sink: &mut S,
    ) -> anyhow::Result<()> {
        let before = self.playing();
        let effects = self.toggle(clip);
        self.drive(before, effects, sink)
    }

    /// [`stop`](Self::stop) and drive `sink` with the result.
    pub fn stop_on<S: AudioSink + ?Sized>(&mut self, sink: &mut S) -> anyhow::Result<()> {
        let before = self.playing();
        let effects = self.stop();
        self.drive(before, effects, sink)
    }

    fn drive<S: AudioSink + ?Sized>(
        &mut self,
        before: Option<SoundClip>,
        effects: Vec<PlaybackEffect>,
        sink: &mut S,
    ) -> anyhow::Result<()> {
        let mut audible = before;
        for effect in effects {
            if let Err(e) = sink.apply(effect) {
                *self = audible.map_or(PlaybackSlot::Idle, PlaybackSlot::Playing);
                return Err(e);
            }
            audible = match effect {
                PlaybackEffect::Play(clip) => Some(clip),
                PlaybackEffect::StopAndRewind(_) => None,
            };
        }
        Ok(())
    }
}

/// Something that can actually make (or pretend to make) noise.
pub trait AudioSink {
    fn apply(&mut self, effect: PlaybackEffect) -> anyhow::Result<()>;
}
