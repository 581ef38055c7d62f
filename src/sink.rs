//! Channel for an external producer to feed flight samples into the engine.
//!
//! Create a pair with [`channel_samples`], hand the [`SampleSink`] to the
//! producer (any thread), and give the receiver to the engine. Samples are
//! applied on the next render tick, in the order they were sent.

use std::sync::mpsc::{Receiver, SendError, Sender};

use crate::data::channel::FlightChannel;

/// Messages sent over the channel to drive the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleCommand {
    /// Append a single value to a channel buffer.
    Push { channel: FlightChannel, value: f64 },
    /// Append a chunk of values, oldest first.
    PushMany {
        channel: FlightChannel,
        values: Vec<f64>,
    },
    /// Remove every stored value of a channel.
    Clear { channel: FlightChannel },
}

/// Convenience sender for feeding values into the engine.
#[derive(Clone)]
pub struct SampleSink {
    tx: Sender<SampleCommand>,
}

impl SampleSink {
    /// Send a single value.
    pub fn push(&self, channel: FlightChannel, value: f64) -> Result<(), SendError<SampleCommand>> {
        self.tx.send(SampleCommand::Push { channel, value })
    }

    /// Send a chunk of values (more efficient than value-by-value).
    pub fn push_many<I>(&self, channel: FlightChannel, values: I) -> Result<(), SendError<SampleCommand>>
    where
        I: Into<Vec<f64>>,
    {
        self.tx.send(SampleCommand::PushMany {
            channel,
            values: values.into(),
        })
    }

    #[inline]
    pub fn clear(&self, channel: FlightChannel) -> Result<(), SendError<SampleCommand>> {
        self.tx.send(SampleCommand::Clear { channel })
    }
}

/// Create a new channel pair: `(SampleSink, Receiver<SampleCommand>)`.
pub fn channel_samples() -> (SampleSink, Receiver<SampleCommand>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (SampleSink { tx }, rx)
}
