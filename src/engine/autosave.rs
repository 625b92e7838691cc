use {
    crate::data::{JournalSnapshot, JournalStorage},
    anyhow::{Context, Result},
    std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    },
    tokio::{
        sync::{mpsc, oneshot},
        task::JoinHandle,
        time::{Instant, sleep},
    },
};

#[cfg(debug_assertions)]
use crate::config::DF;

enum AutosaveRequest {
    Schedule(Box<JournalSnapshot>),
    Flush(oneshot::Sender<()>),
}

/// Debounced background writer. Each `schedule` restarts the quiet period; only the latest
/// snapshot is written once it elapses.
pub struct Autosaver {
    tx: mpsc::UnboundedSender<AutosaveRequest>,
    handle: JoinHandle<()>,
    saves: Arc<AtomicUsize>,
}

impl Autosaver {
    pub fn spawn(store: Arc<dyn JournalStorage>, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let saves = Arc::new(AtomicUsize::new(0));
        let handle = tokio::spawn(run(store, delay, rx, saves.clone()));
        Self { tx, handle, saves }
    }

    pub fn schedule(&self, snapshot: JournalSnapshot) -> Result<()> {
        self.tx
            .send(AutosaveRequest::Schedule(Box::new(snapshot)))
            .ok()
            .context("Autosave task has stopped")
    }

    /// Write any pending snapshot now and wait for it.
    pub async fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(AutosaveRequest::Flush(ack_tx))
            .ok()
            .context("Autosave task has stopped")?;
        ack_rx.await.context("Autosave task dropped the flush")
    }

    /// Number of snapshots written so far.
    pub fn saves_written(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }

    /// Flush what is pending and stop the task. Returns the total number of snapshots written.
    pub async fn shutdown(self) -> Result<usize> {
        drop(self.tx);
        self.handle.await.context("Autosave task panicked")?;
        Ok(self.saves.load(Ordering::Relaxed))
    }
}

async fn write_pending(
    store: &dyn JournalStorage,
    pending: &mut Option<Box<JournalSnapshot>>,
    saves: &AtomicUsize,
) {
    let Some(snapshot) = pending.take() else {
        return;
    };
    match store.replace_records(&snapshot).await {
        Ok(()) => {
            saves.fetch_add(1, Ordering::Relaxed);

            #[cfg(debug_assertions)]
            if DF.log_autosave {
                log::info!("AUTOSAVE: wrote {} trades", snapshot.trades.len());
            }
        }
        // Not retried
        Err(e) => log::error!("Autosave failed: {:#}", e),
    }
}

async fn run(
    store: Arc<dyn JournalStorage>,
    delay: Duration,
    mut rx: mpsc::UnboundedReceiver<AutosaveRequest>,
    saves: Arc<AtomicUsize>,
) {
    let mut pending: Option<Box<JournalSnapshot>> = None;
    let timer = sleep(delay);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            request = rx.recv() => match request {
                Some(AutosaveRequest::Schedule(snapshot)) => {
                    #[cfg(debug_assertions)]
                    if DF.log_autosave && pending.is_some() {
                        log::info!("AUTOSAVE: superseded pending snapshot");
                    }
                    pending = Some(snapshot);
                    timer.as_mut().reset(Instant::now() + delay);
                }
                Some(AutosaveRequest::Flush(ack)) => {
                    write_pending(store.as_ref(), &mut pending, &saves).await;
                    let _ = ack.send(());
                }
                None => {
                    write_pending(store.as_ref(), &mut pending, &saves).await;
                    break;
                }
            },
            _ = &mut timer, if pending.is_some() => {
                write_pending(store.as_ref(), &mut pending, &saves).await;
            }
        }
    }
}
