//! Channel plumbing between scans and decoder threads
//!
//! - [`Sender`] wraps a crossbeam channel and signals end-of-stream
//!   explicitly with [`Sender::close`].
//! - [`Receiver`] unwraps [`ChannelMessage`]s and remembers end-of-stream, so
//!   a consumer sees a plain `Option<T>` sequence.
//! - [`scan_shared`] runs one independent [`ChangeIterator`] per decoder
//!   configuration over a single shared capture buffer.

use crossbeam_channel::{
    Receiver as CrossbeamReceiver, SendError, Sender as CrossbeamSender, bounded,
};
use std::thread;
use tracing::{debug, info};

use crate::logic::{ChangeIterator, LogicConfig, LogicRecord};
use crate::{LogicError, Result};

/// Channel message wrapper for end-of-stream signaling
///
/// Dropping a cloned sender does not close a channel while other handles
/// exist, so producers send `EndOfStream` once they are done.
#[derive(Clone, Debug)]
pub enum ChannelMessage<T> {
    /// A data record
    Record(T),
    /// End-of-stream marker, no more data will be sent
    EndOfStream,
}

/// Sending half of a record channel
pub struct Sender<T> {
    inner: CrossbeamSender<ChannelMessage<T>>,
}

impl<T> Sender<T> {
    pub fn new(inner: CrossbeamSender<ChannelMessage<T>>) -> Self {
        Self { inner }
    }

    /// Send a record, handing it back if the receiver is gone
    pub fn send(&self, value: T) -> std::result::Result<(), SendError<T>> {
        self.inner
            .send(ChannelMessage::Record(value))
            .map_err(|SendError(msg)| match msg {
                ChannelMessage::Record(v) => SendError(v),
                ChannelMessage::EndOfStream => unreachable!("only records are sent here"),
            })
    }

    /// Signal end-of-stream; a receiver that already left is ignored
    pub fn close(&self) {
        let _ = self.inner.send(ChannelMessage::EndOfStream);
    }
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Single-channel receiver that hides the [`ChannelMessage`] wrapper
pub struct Receiver<T> {
    receiver: CrossbeamReceiver<ChannelMessage<T>>,
    eos: bool,
}

impl<T> Receiver<T> {
    pub fn new(receiver: CrossbeamReceiver<ChannelMessage<T>>) -> Self {
        Self {
            receiver,
            eos: false,
        }
    }

    /// Blocking receive.
    ///
    /// Returns `None` after end-of-stream or once every sender is gone, and
    /// keeps returning `None` from then on.
    pub fn recv(&mut self) -> Option<T> {
        if self.eos {
            return None;
        }
        match self.receiver.recv() {
            Ok(ChannelMessage::Record(value)) => Some(value),
            Ok(ChannelMessage::EndOfStream) | Err(_) => {
                self.eos = true;
                None
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.eos
    }
}

impl<T> Iterator for Receiver<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.recv()
    }
}

/// Create a bounded channel pair carrying [`ChannelMessage`]s
pub fn channel<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    let (tx, rx) = bounded(capacity);
    (Sender::new(tx), Receiver::new(rx))
}

/// Drain `records` into `sender`, then close it.
///
/// Stops early when the receiver has gone away. Returns the number of
/// records delivered.
pub fn feed<I>(records: I, sender: &Sender<I::Item>) -> usize
where
    I: IntoIterator,
{
    let mut sent = 0;
    for record in records {
        if sender.send(record).is_err() {
            debug!("Receiver disconnected after {} records", sent);
            return sent;
        }
        sent += 1;
    }
    sender.close();
    sent
}

/// Scan one capture buffer for several decoders at once.
///
/// Each config gets its own [`ChangeIterator`] on a producer thread and a
/// consumer thread running `consume(index, receiver)`. The buffer is only
/// borrowed; all threads finish before this returns. Results come back in
/// config order.
pub fn scan_shared<F, R>(
    data: &[u8],
    configs: &[LogicConfig],
    capacity: usize,
    consume: F,
) -> Result<Vec<R>>
where
    F: Fn(usize, Receiver<LogicRecord>) -> R + Sync,
    R: Send,
{
    let scans = configs
        .iter()
        .map(|config| config.scan(data))
        .collect::<Result<Vec<ChangeIterator<'_>>>>()?;

    info!(
        "Shared scan: {} decoders over {} bytes",
        scans.len(),
        data.len()
    );

    let consume = &consume;
    thread::scope(|scope| {
        let handles: Vec<_> = scans
            .into_iter()
            .zip(configs)
            .enumerate()
            .map(|(index, (scan, config))| {
                let (sender, receiver) = channel(capacity);
                let name = config.name();
                let producer = scope.spawn(move || {
                    let sent = feed(scan, &sender);
                    debug!("[{}] Producer finished after {} records", name, sent);
                });
                let consumer = scope.spawn(move || consume(index, receiver));
                (index, producer, consumer)
            })
            .collect();

        handles
            .into_iter()
            .map(|(index, producer, consumer)| {
                producer
                    .join()
                    .map_err(|_| LogicError::WorkerPanicked(index))?;
                consumer
                    .join()
                    .map_err(|_| LogicError::WorkerPanicked(index))
            })
            .collect()
    })
}
