/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Asynchronous UDP multicast packet receiver.
//!
//! The receiver joins a UDPv4 multicast group and cycles a fixed set of
//! [`LinkedBuffer`]s between the kernel and a [`PacketConsumer`]:
//!
//! ```text
//! idle pool ── start_receive ──▶ kernel recv ── handle_receive ──▶ queue
//!     ▲                                                             │
//!     └──────────────── service loop ── consume_buffer ◀────────────┘
//! ```
//!
//! At most one receive is outstanding at a time (the `read_in_progress`
//! gate); the queue's single-servicer gate guarantees in-order,
//! one-at-a-time consumer invocation even with completions landing on
//! multiple worker threads. The next receive is always posted *before* the
//! consumer runs, so a slow consumer delays later packets in its batch, not
//! the kernel refill.

use crate::buffer::{BufferPool, LinkedBuffer};
use crate::config::ReceiverConfig;
use crate::consumer::PacketConsumer;
use crate::error::ReceiverError;
use crate::queue::{ServiceBatch, SingleServerQueue};
use fastwire_core::LogLevel;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Monotone statistics, readable without taking the receiver lock.
#[derive(Debug, Default)]
struct Counters {
    no_buffer_available: AtomicUsize,
    packets_received: AtomicUsize,
    error_packets: AtomicUsize,
    empty_packets: AtomicUsize,
    packets_queued: AtomicUsize,
    batches_processed: AtomicUsize,
    packets_processed: AtomicUsize,
    bytes_received: AtomicUsize,
    bytes_processed: AtomicUsize,
    largest_packet: AtomicUsize,
}

/// State serialized by the receiver lock.
struct Shared {
    idle_pool: BufferPool,
    queue: SingleServerQueue,
    read_in_progress: bool,
}

struct Inner {
    socket: UdpSocket,
    consumer: Arc<dyn PacketConsumer>,
    shared: Mutex<Shared>,
    stopping: AtomicBool,
    shutdown: CancellationToken,
    counters: Counters,
}

/// Receives multicast datagrams and drives a [`PacketConsumer`].
///
/// Created running via [`start`](Self::start); receives packets until
/// [`stop`](Self::stop) is requested, the consumer asks to stop, or the
/// receiver is dropped and its tasks unwind.
pub struct MulticastReceiver {
    inner: Arc<Inner>,
}

impl MulticastReceiver {
    /// Binds, joins the multicast group, and starts receiving.
    ///
    /// Startup order: the socket is opened with address reuse, bound to
    /// `(listen_interface, port)`, the consumer's `receiver_started` runs,
    /// the group is joined via the listen interface, and `buffer_count`
    /// buffers of `buffer_size` bytes are pushed to the idle pool before
    /// the first receive is posted. Returns immediately; reception runs on
    /// the current tokio runtime (the shared I/O service).
    ///
    /// # Errors
    /// Returns [`ReceiverError`] if the configuration is invalid or any
    /// socket operation fails.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn start(
        config: ReceiverConfig,
        consumer: Arc<dyn PacketConsumer>,
    ) -> Result<Self, ReceiverError> {
        config.validate()?;

        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
        socket.set_reuse_address(true)?;
        socket.set_nonblocking(true)?;
        socket.bind(&config.bind_addr().into())?;
        let socket = UdpSocket::from_std(std::net::UdpSocket::from(socket))?;

        consumer.receiver_started();

        if consumer.want_log(LogLevel::Info) {
            consumer.log_message(
                LogLevel::Info,
                &format!(
                    "joining multicast group {} via interface {}:{}",
                    config.multicast_group, config.listen_interface, config.port
                ),
            );
        }
        socket.join_multicast_v4(config.multicast_group, config.listen_interface)?;
        debug!(
            group = %config.multicast_group,
            interface = %config.listen_interface,
            port = config.port,
            "multicast receiver started"
        );

        let inner = Arc::new(Inner {
            socket,
            consumer,
            shared: Mutex::new(Shared {
                idle_pool: BufferPool::new(),
                queue: SingleServerQueue::new(),
                read_in_progress: false,
            }),
            stopping: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
            counters: Counters::default(),
        });

        {
            let mut shared = inner.lock();
            for _ in 0..config.buffer_count {
                shared.idle_pool.push(LinkedBuffer::new(config.buffer_size));
            }
            Inner::start_receive(&inner, &mut shared);
        }

        Ok(Self { inner })
    }

    /// Requests a stop and cancels the outstanding receive.
    ///
    /// Returns immediately; in-flight completions still run, and the
    /// consumer may observe further callbacks while the pipeline drains.
    /// No new receives are posted once stopping is set.
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// True once a stop has been requested.
    #[must_use]
    pub fn is_stopping(&self) -> bool {
        self.inner.stopping.load(Ordering::Acquire)
    }

    /// How many times a completion found no idle buffer.
    ///
    /// A non-zero value means `buffer_count` is too small for the
    /// consumer's pace.
    #[must_use]
    pub fn no_buffer_available(&self) -> usize {
        self.inner.counters.no_buffer_available.load(Ordering::Relaxed)
    }

    /// How many receive completions have run, errors included.
    #[must_use]
    pub fn packets_received(&self) -> usize {
        self.inner.counters.packets_received.load(Ordering::Relaxed)
    }

    /// How many received packets carried an I/O error.
    #[must_use]
    pub fn packets_with_errors(&self) -> usize {
        self.inner.counters.error_packets.load(Ordering::Relaxed)
    }

    /// How many received datagrams were empty.
    #[must_use]
    pub fn empty_packets(&self) -> usize {
        self.inner.counters.empty_packets.load(Ordering::Relaxed)
    }

    /// How many packets have been queued for processing.
    #[must_use]
    pub fn packets_queued(&self) -> usize {
        self.inner.counters.packets_queued.load(Ordering::Relaxed)
    }

    /// How many batches the service loop has drained.
    #[must_use]
    pub fn batches_processed(&self) -> usize {
        self.inner.counters.batches_processed.load(Ordering::Relaxed)
    }

    /// How many queued packets have been taken up by the service loop.
    #[must_use]
    pub fn packets_processed(&self) -> usize {
        self.inner.counters.packets_processed.load(Ordering::Relaxed)
    }

    /// Total payload bytes received, empty and error packets excluded.
    #[must_use]
    pub fn bytes_received(&self) -> usize {
        self.inner.counters.bytes_received.load(Ordering::Relaxed)
    }

    /// Total payload bytes handed to the consumer.
    #[must_use]
    pub fn bytes_processed(&self) -> usize {
        self.inner.counters.bytes_processed.load(Ordering::Relaxed)
    }

    /// Size of the largest datagram received so far.
    #[must_use]
    pub fn largest_packet(&self) -> usize {
        self.inner.counters.largest_packet.load(Ordering::Relaxed)
    }

    /// Approximately how many bytes are waiting to be consumed, counting
    /// both the kernel socket queue and packets queued in user space.
    #[must_use]
    pub fn bytes_readable(&self) -> usize {
        self.inner.kernel_queue_bytes()
            + self.bytes_received().saturating_sub(self.bytes_processed())
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn stop(&self) {
        self.stopping.store(true, Ordering::Release);
        // cancels the receive in flight; its completion drains normally
        self.shutdown.cancel();
    }

    /// Posts the next receive if none is outstanding. Caller holds the lock.
    fn start_receive(inner: &Arc<Self>, shared: &mut Shared) {
        if shared.read_in_progress || inner.stopping.load(Ordering::Acquire) {
            return;
        }
        match shared.idle_pool.pop() {
            Some(buffer) => {
                shared.read_in_progress = true;
                let task = Arc::clone(inner);
                tokio::spawn(async move {
                    Self::run_receive(task, buffer).await;
                });
            }
            None => {
                inner
                    .counters
                    .no_buffer_available
                    .fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// One posted receive: awaits the datagram (or cancellation) and runs
    /// the completion.
    async fn run_receive(inner: Arc<Self>, mut buffer: LinkedBuffer) {
        let result = tokio::select! {
            received = inner.socket.recv_from(buffer.space_mut()) => {
                received.map(|(bytes, _sender)| bytes)
            }
            () = inner.shutdown.cancelled() => {
                Err(io::Error::new(io::ErrorKind::Interrupted, "receive canceled"))
            }
        };
        Self::handle_receive(&inner, result, buffer).await;
    }

    /// Receive completion: accounts the packet, routes the buffer, refills
    /// the kernel pipe, then services the queue if this task won the gate.
    async fn handle_receive(inner: &Arc<Self>, result: io::Result<usize>, mut buffer: LinkedBuffer) {
        let mut batch: Option<ServiceBatch> = None;
        let mut comm_error: Option<String> = None;
        {
            let mut shared = inner.lock();
            shared.read_in_progress = false;
            inner
                .counters
                .packets_received
                .fetch_add(1, Ordering::Relaxed);
            match result {
                Ok(bytes) if bytes > 0 => {
                    inner.counters.packets_queued.fetch_add(1, Ordering::Relaxed);
                    inner
                        .counters
                        .bytes_received
                        .fetch_add(bytes, Ordering::Relaxed);
                    inner
                        .counters
                        .largest_packet
                        .fetch_max(bytes, Ordering::Relaxed);
                    buffer.set_used(bytes);
                    if shared.queue.push(buffer) {
                        batch = shared.queue.start_service();
                    }
                }
                Ok(_) => {
                    // empty datagram, just recycle the buffer
                    inner.counters.empty_packets.fetch_add(1, Ordering::Relaxed);
                    shared.idle_pool.push(buffer);
                }
                Err(error) => {
                    inner.counters.error_packets.fetch_add(1, Ordering::Relaxed);
                    shared.idle_pool.push(buffer);
                    comm_error = Some(error.to_string());
                }
            }
        }

        if let Some(message) = comm_error {
            warn!(%message, "receive failed");
            if !inner.consumer.report_communication_error(&message).await {
                inner.stop();
            }
        }

        {
            // refill the kernel pipe before user work
            let mut shared = inner.lock();
            Self::start_receive(inner, &mut shared);
        }

        if let Some(batch) = batch {
            Self::service(inner, batch).await;
        }
    }

    /// Drains service batches until the gate releases this task.
    ///
    /// Idle buffers are returned in bulk at batch end; while a batch is in
    /// progress an exhausted pool shows up as `no_buffer_available`, which
    /// is the intended coarse backpressure.
    async fn service(inner: &Arc<Self>, mut batch: ServiceBatch) {
        loop {
            inner
                .counters
                .batches_processed
                .fetch_add(1, Ordering::Relaxed);
            let mut idle: Vec<LinkedBuffer> = Vec::new();

            while let Some(buffer) = batch.service_next() {
                inner
                    .counters
                    .packets_processed
                    .fetch_add(1, Ordering::Relaxed);
                if inner.stopping.load(Ordering::Acquire) {
                    // drained but neither consumed nor recycled
                    continue;
                }
                inner
                    .counters
                    .bytes_processed
                    .fetch_add(buffer.used(), Ordering::Relaxed);
                match inner.consumer.consume_buffer(buffer.bytes()).await {
                    Ok(true) => {}
                    Ok(false) => inner.stop(),
                    Err(error) => {
                        if !inner.consumer.report_decoding_error(&error.to_string()).await {
                            inner.stop();
                        }
                    }
                }
                idle.push(buffer);
            }

            let next = {
                let mut shared = inner.lock();
                shared.idle_pool.push_all(idle);
                Self::start_receive(inner, &mut shared);
                shared
                    .queue
                    .end_service(!inner.stopping.load(Ordering::Acquire))
            };
            match next {
                Some(handoff) => batch = handoff,
                None => break,
            }
        }
    }

    #[cfg(unix)]
    fn kernel_queue_bytes(&self) -> usize {
        use std::os::fd::AsRawFd;
        let mut pending: libc::c_int = 0;
        // SAFETY: FIONREAD reads the receive queue depth into an int
        let rc = unsafe {
            libc::ioctl(self.socket.as_raw_fd(), libc::FIONREAD as _, &mut pending)
        };
        if rc == 0 {
            pending.max(0) as usize
        } else {
            0
        }
    }

    #[cfg(not(unix))]
    fn kernel_queue_bytes(&self) -> usize {
        0
    }
}
