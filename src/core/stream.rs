//! Lazy single-pass record streams
//!
//! A [`RecordStream`] is the receiving end of a bounded channel filled by a
//! background producer task. The channel holds a single item, so a producer
//! waits until its consumer has taken the previous record: that hand-off is
//! the only backpressure in the pipeline.
//!
//! Errors travel in-band. The first `Err` a stage sees is forwarded
//! downstream and the stage stops, so the consumer at the end of the chain
//! receives it exactly once.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use crate::error::{Error, Result};

/// Number of records a stage may hand off before blocking
pub const HANDOFF_CAPACITY: usize = 1;

/// A lazy, single-pass, non-restartable stream of records
pub struct RecordStream<T> {
    rx: mpsc::Receiver<Result<T>>,
}

/// Producer handle of a [`RecordStream`]
pub struct Emitter<T> {
    tx: mpsc::Sender<Result<T>>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter").field("closed", &self.tx.is_closed()).finish()
    }
}

impl<T> fmt::Debug for RecordStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStream").finish_non_exhaustive()
    }
}

impl<T> Emitter<T> {
    /// Hand a record to the consumer, waiting until it has room
    ///
    /// Returns `false` once the consumer is gone; producers should stop.
    pub async fn emit(&self, record: T) -> bool {
        self.tx.send(Ok(record)).await.is_ok()
    }

    /// Forward a fatal error to the consumer
    pub async fn fail(&self, err: Error) {
        if self.tx.send(Err(err)).await.is_err() {
            log::debug!("dropping pipeline error, consumer already gone");
        }
    }

    /// Whether the consumer has dropped its end
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<T: Send + 'static> RecordStream<T> {
    /// Start `produce` on a background task and stream what it emits
    ///
    /// An error returned by the producer becomes the last item of the stream.
    pub fn spawn<F, Fut>(produce: F) -> Self
    where
        F: FnOnce(Emitter<T>) -> Fut,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(HANDOFF_CAPACITY);
        let emitter = Emitter { tx };
        let on_error = emitter.clone();
        let producer = produce(emitter);
        tokio::spawn(async move {
            if let Err(err) = producer.await {
                on_error.fail(err).await;
            }
        });
        Self { rx }
    }

    /// Stream the records of an in-memory sequence
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        let records = records.into_iter();
        Self::spawn(move |out| async move {
            for record in records {
                if !out.emit(record).await {
                    break;
                }
            }
            Ok(())
        })
    }

    /// Apply `f` to every record on a separate stage, keeping order
    pub fn map<U, F>(self, f: F) -> RecordStream<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + 'static,
    {
        let mut input = self;
        RecordStream::spawn(move |out| async move {
            while let Some(record) = input.next().await {
                if !out.emit(f(record?)).await {
                    break;
                }
            }
            Ok(())
        })
    }
}

impl<T> RecordStream<T> {
    /// Wait for the next record; `None` once every producer has finished
    pub async fn next(&mut self) -> Option<Result<T>> {
        self.rx.recv().await
    }

    /// Drain the stream, stopping at the first error
    pub async fn collect_records(mut self) -> Result<Vec<T>> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await {
            records.push(record?);
        }
        Ok(records)
    }
}

impl<T> Stream for RecordStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
