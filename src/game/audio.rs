use enum_dispatch::enum_dispatch;
use std::io::{self, Write};

/// A sound effect to be played in response to a game event
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cue {
    /// The snake ate an apple
    Chomp,
    /// The snake died
    Crash,
}

#[enum_dispatch]
pub(crate) trait AudioSink {
    fn cue(&mut self, cue: Cue) -> io::Result<()>;
}

#[enum_dispatch(AudioSink)]
#[derive(Debug)]
pub(crate) enum Speaker {
    Bell,
    Silent,
}

impl Speaker {
    pub(crate) fn new(enabled: bool) -> Speaker {
        if enabled {
            Speaker::from(Bell::new(io::stdout()))
        } else {
            Speaker::from(Silent)
        }
    }

    /// Play `cue`.  Playback failures are logged and otherwise ignored.
    pub(crate) fn play(&mut self, cue: Cue) {
        if let Err(e) = self.cue(cue) {
            tracing::debug!(?cue, error = %e, "failed to play sound");
        }
    }
}

/// Rings the terminal bell: once for [`Cue::Chomp`], twice for
/// [`Cue::Crash`]
pub(crate) struct Bell {
    out: Box<dyn Write>,
}

impl Bell {
    pub(crate) fn new<W: Write + 'static>(out: W) -> Bell {
        Bell { out: Box::new(out) }
    }
}

impl std::fmt::Debug for Bell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bell").finish_non_exhaustive()
    }
}

impl AudioSink for Bell {
    fn cue(&mut self, cue: Cue) -> io::Result<()> {
        let rings: &[u8] = match cue {
            Cue::Chomp => b"\x07",
            Cue::Crash => b"\x07\x07",
        };
        self.out.write_all(rings)?;
        self.out.flush()
    }
}

/// Discards all cues
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Silent;

impl AudioSink for Silent {
    fn cue(&mut self, _cue: Cue) -> io::Result<()> {
        Ok(())
    }
}
