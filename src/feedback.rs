//! Feedback effects: short synthesized tones and haptic pulses keyed to game events.
//!
//! Game logic never probes the environment for audio or vibration support.
//! It emits a [`FeedbackEvent`] into whatever [`Feedback`] implementation the
//! host injected; environments without a sound device get [`NoopFeedback`].

use std::io::{self, Write};

/// Events that produce a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackEvent {
    Select,
    Move,
    Capture,
    Check,
    Checkmate,
    /// One shake pulse of the rock-paper-scissors countdown
    Shake,
    /// Rock-paper-scissors round won by the player
    RoundWon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
}

/// A single oscillator note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub frequency_hz: f32,
    /// Offset from the start of the cue
    pub start_ms: u32,
    pub duration_ms: u32,
}

impl Tone {
    const fn new(waveform: Waveform, frequency_hz: f32, start_ms: u32, duration_ms: u32) -> Self {
        Self {
            waveform,
            frequency_hz,
            start_ms,
            duration_ms,
        }
    }
}

/// What an event sounds and feels like.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub tones: Vec<Tone>,
    /// Vibration length, if any
    pub haptic_ms: Option<u32>,
}

impl Cue {
    /// Total length of the audible part.
    pub fn duration_ms(&self) -> u32 {
        self.tones
            .iter()
            .map(|t| t.start_ms + t.duration_ms)
            .max()
            .unwrap_or(0)
    }
}

/// Map an event to its cue. Stateless.
pub fn cue_for(event: FeedbackEvent) -> Cue {
    use Waveform::*;
    match event {
        FeedbackEvent::Select => Cue {
            tones: vec![Tone::new(Sine, 400.0, 0, 50)],
            haptic_ms: Some(20),
        },
        FeedbackEvent::Move => Cue {
            tones: vec![Tone::new(Triangle, 120.0, 0, 100)],
            haptic_ms: Some(50),
        },
        FeedbackEvent::Capture => Cue {
            tones: vec![Tone::new(Square, 100.0, 0, 150)],
            haptic_ms: Some(50),
        },
        FeedbackEvent::Check => Cue {
            tones: vec![Tone::new(Sine, 330.0, 0, 400)],
            haptic_ms: None,
        },
        // C5, E5, G5
        FeedbackEvent::Checkmate => Cue {
            tones: vec![
                Tone::new(Sine, 523.25, 0, 600),
                Tone::new(Sine, 659.25, 100, 600),
                Tone::new(Sine, 783.99, 200, 600),
            ],
            haptic_ms: Some(50),
        },
        FeedbackEvent::Shake => Cue {
            tones: vec![Tone::new(Sine, 100.0, 0, 100)],
            haptic_ms: Some(20),
        },
        FeedbackEvent::RoundWon => Cue {
            tones: vec![Tone::new(Sine, 440.0, 0, 300)],
            haptic_ms: None,
        },
    }
}

/// Injected capability for producing cues.
///
/// Implementations must swallow their own failures: a missing sound device
/// never interrupts play.
pub trait Feedback {
    fn emit(&mut self, event: FeedbackEvent);
}

/// For hosts with no audio or haptics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFeedback;

impl Feedback for NoopFeedback {
    fn emit(&mut self, _event: FeedbackEvent) {}
}

/// Rings the terminal bell for the loud cues (check, checkmate, round won).
///
/// The quiet cues have no terminal equivalent and are dropped.
pub struct TerminalBell<W: Write> {
    out: W,
    enabled: bool,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    fn rings_for(event: FeedbackEvent) -> bool {
        matches!(
            event,
            FeedbackEvent::Check | FeedbackEvent::Checkmate | FeedbackEvent::RoundWon
        )
    }
}

impl<W: Write> Feedback for TerminalBell<W> {
    fn emit(&mut self, event: FeedbackEvent) {
        if !self.enabled || !Self::rings_for(event) {
            return;
        }
        let cue = cue_for(event);
        tracing::trace!(?event, duration_ms = cue.duration_ms(), "bell");
        // A closed or redirected stdout is not worth interrupting a game for
        let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
    }
}

/// Keeps every emitted event in order.
#[derive(Debug, Default, Clone)]
pub struct RecordedFeedback {
    pub events: Vec<FeedbackEvent>,
}

impl RecordedFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<FeedbackEvent> {
        self.events.last().copied()
    }

    pub fn count(&self, event: FeedbackEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Feedback for RecordedFeedback {
    fn emit(&mut self, event: FeedbackEvent) {
        self.events.push(event);
    }
}
