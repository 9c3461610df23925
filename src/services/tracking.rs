use std::sync::Arc;

use tokio::{
    sync::{mpsc, watch, Mutex},
    task::JoinHandle,
};

use crate::{
    models::{ContentSubmission, InteractionEvent, InteractionType},
    services::{providers::InteractionSink, retry::RetryExecutor},
};

/// Fire-and-forget recorder of user engagement
///
/// Events are queued on a bounded channel and delivered by a fixed pool of
/// workers. Callers never wait for delivery; when the queue is full the event
/// is dropped with a warning.
#[derive(Clone)]
pub struct InteractionTracker {
    queue_tx: mpsc::Sender<InteractionEvent>,
}

/// Handle for gracefully shutting down the tracking workers
pub struct TrackerHandle {
    shutdown_tx: watch::Sender<bool>,
    workers: Vec<JoinHandle<()>>,
}

impl TrackerHandle {
    /// Signals the workers to stop and waits for them to deliver everything still queued
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        tracing::info!(workers = self.workers.len(), "Interaction tracker shutdown signal sent");

        for worker in self.workers {
            if let Err(e) = worker.await {
                tracing::error!(error = %e, "Tracking worker panicked");
            }
        }

        tracing::info!("Interaction tracker stopped");
    }
}

impl InteractionTracker {
    /// Starts `workers` delivery tasks behind a queue holding `capacity` events
    pub fn spawn(
        sink: Arc<dyn InteractionSink>,
        executor: RetryExecutor,
        workers: usize,
        capacity: usize,
    ) -> (Self, TrackerHandle) {
        let worker_count = workers.max(1);
        let capacity = capacity.max(1);
        let (queue_tx, queue_rx) = mpsc::channel(capacity);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let queue_rx = Arc::new(Mutex::new(queue_rx));

        let workers = (0..worker_count)
            .map(|worker_id| {
                let sink = sink.clone();
                let executor = executor.clone();
                let queue_rx = queue_rx.clone();
                let shutdown_rx = shutdown_rx.clone();
                tokio::spawn(async move {
                    Self::worker_task(worker_id, sink, executor, queue_rx, shutdown_rx).await;
                })
            })
            .collect();

        tracing::info!(
            workers = worker_count,
            capacity,
            provider = sink.name(),
            "Interaction tracker started"
        );

        (
            Self { queue_tx },
            TrackerHandle {
                shutdown_tx,
                workers,
            },
        )
    }

    /// Queues an interaction for delivery, returning whether it was accepted
    pub fn track(
        &self,
        user_id: &str,
        content_id: &str,
        content: &ContentSubmission,
        interaction_type: InteractionType,
    ) -> bool {
        let event = InteractionEvent::new(user_id, content_id, content, interaction_type);

        match self.queue_tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::warn!(
                    user_id = %event.user_id,
                    content_id = %event.content_id,
                    "Tracking queue full, dropping interaction"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!("Interaction tracker stopped, dropping interaction");
                false
            }
        }
    }

    /// Delivers queued events until shutdown, then drains what is left
    async fn worker_task(
        worker_id: usize,
        sink: Arc<dyn InteractionSink>,
        executor: RetryExecutor,
        queue_rx: Arc<Mutex<mpsc::Receiver<InteractionEvent>>>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        tracing::debug!(worker_id, "Tracking worker started");

        loop {
            let next = {
                let mut rx = queue_rx.lock().await;
                tokio::select! {
                    biased;
                    event = rx.recv() => event,
                    _ = shutdown_rx.changed() => None,
                }
            };

            match next {
                Some(event) => Self::deliver(sink.as_ref(), &executor, event).await,
                None => break,
            }
        }

        let mut drained = 0;
        loop {
            let next = queue_rx.lock().await.try_recv().ok();
            match next {
                Some(event) => {
                    Self::deliver(sink.as_ref(), &executor, event).await;
                    drained += 1;
                }
                None => break,
            }
        }

        tracing::debug!(worker_id, drained, "Tracking worker stopped");
    }

    async fn deliver(sink: &dyn InteractionSink, executor: &RetryExecutor, event: InteractionEvent) {
        let event_ref = &event;
        let result = executor
            .execute("record_interaction", || async move { sink.record(event_ref).await })
            .await;

        match result {
            Ok(()) => tracing::debug!(
                user_id = %event.user_id,
                content_id = %event.content_id,
                interaction_type = ?event.interaction_type,
                "Interaction recorded"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                user_id = %event.user_id,
                content_id = %event.content_id,
                provider = sink.name(),
                "Dropping interaction after failed delivery"
            ),
        }
    }
}
