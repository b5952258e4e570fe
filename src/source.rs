use crate::cancel::CancellationToken;
use crate::error::{Result, StatsError};
use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use std::io::{ErrorKind, Read};
use std::time::Duration;

/// Trait for a pull-based source of raw stream bytes
pub trait StreamSource {
    /// Fill `buf` with up to `buf.len()` bytes
    /// Returns 0 once the stream is exhausted
    fn read_chunk(&mut self, buf: &mut [u8], cancel: &CancellationToken) -> Result<usize>;

    /// Release the underlying resource; called once on every exit path of a run
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    /// Get a human-readable name for this source
    fn name(&self) -> &str {
        "source"
    }
}

impl<S: StreamSource + ?Sized> StreamSource for Box<S> {
    fn read_chunk(&mut self, buf: &mut [u8], cancel: &CancellationToken) -> Result<usize> {
        (**self).read_chunk(buf, cancel)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Source backed by any `std::io::Read` (file, stdin, socket, in-memory cursor)
pub struct ReaderSource<R: Read> {
    name: String,
    reader: Option<R>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader: Some(reader),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}

impl<R: Read> StreamSource for ReaderSource<R> {
    fn read_chunk(&mut self, buf: &mut [u8], cancel: &CancellationToken) -> Result<usize> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(0);
        };
        loop {
            if cancel.is_cancelled() {
                return Err(StatsError::Cancelled);
            }
            match reader.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        self.reader = None;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Source fed by a producer thread through a channel of byte blocks
///
/// The stream ends when every sender is dropped. A pending read waits in
/// `poll_interval` slices so cancellation is noticed promptly.
pub struct ChannelSource {
    receiver: Receiver<Vec<u8>>,
    block: Vec<u8>,
    offset: usize,
    poll_interval: Duration,
}

impl ChannelSource {
    /// Create a bounded channel and the source reading from it
    pub fn bounded(capacity: usize) -> (Sender<Vec<u8>>, Self) {
        let (sender, receiver) = channel::bounded(capacity);
        (sender, Self::new(receiver))
    }

    pub fn new(receiver: Receiver<Vec<u8>>) -> Self {
        Self {
            receiver,
            block: Vec::new(),
            offset: 0,
            poll_interval: Duration::from_millis(10),
        }
    }

    /// Set how often a blocked read re-checks for cancellation
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn copy_from_block(&mut self, buf: &mut [u8]) -> usize {
        let remaining = &self.block[self.offset..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.offset += n;
        n
    }
}

impl StreamSource for ChannelSource {
    fn read_chunk(&mut self, buf: &mut [u8], cancel: &CancellationToken) -> Result<usize> {
        if self.offset < self.block.len() {
            return Ok(self.copy_from_block(buf));
        }
        loop {
            if cancel.is_cancelled() {
                return Err(StatsError::Cancelled);
            }
            match self.receiver.recv_timeout(self.poll_interval) {
                Ok(block) if block.is_empty() => continue,
                Ok(block) => {
                    self.block = block;
                    self.offset = 0;
                    return Ok(self.copy_from_block(buf));
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Ok(0),
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        // Dropping the receiver makes further sends fail on the producer side
        self.receiver = channel::never();
        self.block = Vec::new();
        self.offset = 0;
        Ok(())
    }

    fn name(&self) -> &str {
        "channel"
    }
}
