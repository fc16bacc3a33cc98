/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIFO buffer queue with a single-servicer gate.
//!
//! Completions from any I/O worker push filled buffers into the queue; the
//! gate hands the *entire* pending batch to exactly one servicer at a time,
//! so the consumer sees packets in arrival order from a single thread while
//! other workers keep posting. Servicing inside the completion would
//! serialize receive with consume; a servicer per push would reorder packets
//! under contention. The gate avoids both.
//!
//! `push`, `start_service` and `end_service` must be called under the
//! owning receiver's lock. The returned [`ServiceBatch`] is owned by the
//! servicer and drained outside the lock.

use crate::buffer::LinkedBuffer;
use std::collections::VecDeque;
use std::mem;

/// FIFO of filled buffers awaiting the consumer, with the servicer gate.
#[derive(Debug, Default)]
pub struct SingleServerQueue {
    incoming: VecDeque<LinkedBuffer>,
    busy: bool,
}

/// The pending buffers handed to the current servicer.
///
/// Drained with [`service_next`](Self::service_next); buffers pushed while
/// a batch is being drained form the *next* batch, picked up by
/// [`SingleServerQueue::end_service`].
#[derive(Debug)]
pub struct ServiceBatch {
    buffers: VecDeque<LinkedBuffer>,
}

impl ServiceBatch {
    /// Takes the next buffer of the batch, in arrival order.
    pub fn service_next(&mut self) -> Option<LinkedBuffer> {
        self.buffers.pop_front()
    }

    /// Number of buffers left in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// True when the batch is drained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

impl SingleServerQueue {
    /// Creates an empty queue with no servicer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a filled buffer.
    ///
    /// Returns true iff a servicer is needed: nobody is currently draining
    /// the queue, so the caller should attempt [`start_service`](Self::start_service).
    pub fn push(&mut self, buffer: LinkedBuffer) -> bool {
        self.incoming.push_back(buffer);
        !self.busy
    }

    /// Attempts to become the servicer.
    ///
    /// Returns the pending batch when the caller wins the gate; `None` when
    /// another thread is already servicing (that thread will pick up the
    /// newly pushed buffers at its next `end_service`).
    pub fn start_service(&mut self) -> Option<ServiceBatch> {
        if self.busy {
            return None;
        }
        self.busy = true;
        Some(ServiceBatch {
            buffers: mem::take(&mut self.incoming),
        })
    }

    /// Finishes a batch.
    ///
    /// With `keep_servicing` true and more buffers pending, the caller
    /// remains the servicer and receives the next batch. Otherwise servicer
    /// status is released and `None` is returned; pending buffers (if any)
    /// wait for the next `push` to grant a new servicer.
    pub fn end_service(&mut self, keep_servicing: bool) -> Option<ServiceBatch> {
        if keep_servicing && !self.incoming.is_empty() {
            return Some(ServiceBatch {
                buffers: mem::take(&mut self.incoming),
            });
        }
        self.busy = false;
        None
    }

    /// Number of buffers waiting for the next batch.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.incoming.len()
    }
}
