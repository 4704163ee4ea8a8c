#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::error::{ControlError, ControlResult};

/// A decoded control event: a trigger or a single parameter update.
///
/// Times are milliseconds, levels and shapes are the raw values the host sent.
/// Clamping happens when the message is applied, not here.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EnvelopeMessage {
    Start,
    Stop,
    Attack(f32),
    Decay(f32),
    Sustain(f32),
    Release(f32),
    /// Set attack and release shape together.
    Shape(f32),
    AttackShape(f32),
    ReleaseShape(f32),
    Gain(f32),
}

impl EnvelopeMessage {
    /// Decode a named event. Parameter selectors need an argument; trigger
    /// selectors ignore one if present.
    pub fn from_selector(selector: &str, arg: Option<f32>) -> ControlResult<Self> {
        let msg: fn(f32) -> Self = match selector {
            "start" => return Ok(Self::Start),
            "stop" => return Ok(Self::Stop),
            "attack" => Self::Attack,
            "decay" => Self::Decay,
            "sustain" => Self::Sustain,
            "release" => Self::Release,
            "shape" => Self::Shape,
            "attackshape" => Self::AttackShape,
            "releaseshape" => Self::ReleaseShape,
            "gain" => Self::Gain,
            other => {
                log::debug!("rejecting unknown envelope selector '{other}'");
                return Err(ControlError::UnknownSelector {
                    selector: other.to_owned(),
                });
            }
        };

        match arg {
            Some(value) => Ok(msg(value)),
            None => Err(ControlError::MissingArgument {
                selector: msg(0.0).selector(),
            }),
        }
    }

    /// Like [`from_selector`](Self::from_selector), but a missing argument
    /// reads as 0, the way patching hosts fill in default float arguments.
    pub fn from_selector_or_default(selector: &str, arg: Option<f32>) -> ControlResult<Self> {
        Self::from_selector(selector, Some(arg.unwrap_or(0.0)))
    }

    /// The selector name that decodes back to this message kind.
    pub fn selector(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Attack(_) => "attack",
            Self::Decay(_) => "decay",
            Self::Sustain(_) => "sustain",
            Self::Release(_) => "release",
            Self::Shape(_) => "shape",
            Self::AttackShape(_) => "attackshape",
            Self::ReleaseShape(_) => "releaseshape",
            Self::Gain(_) => "gain",
        }
    }
}

/// Source of control messages drained by the audio thread once per block.
pub trait MessageReceiver {
    fn pop(&mut self) -> Option<EnvelopeMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<EnvelopeMessage> {
    fn pop(&mut self) -> Option<EnvelopeMessage> {
        Consumer::pop(self).ok()
    }
}
