//! Errors raised on the control surface.
//!
//! The envelope itself never fails: every parameter is clamped on the way in.
//! These cover decoding named control events and handing them to the audio
//! thread.

use thiserror::Error;

pub type ControlResult<T> = Result<T, ControlError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Selector does not name any envelope control.
    #[error("unknown envelope control '{selector}'")]
    UnknownSelector { selector: String },

    /// Parameter selector arrived without its numeric argument.
    #[error("control '{selector}' requires a numeric argument")]
    MissingArgument { selector: &'static str },

    /// The audio thread has not drained the control queue.
    #[error("envelope control queue is full, dropped {selector}")]
    QueueFull { selector: &'static str },
}
