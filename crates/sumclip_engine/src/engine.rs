use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use sumclip_logging::{sumclip_debug, sumclip_info};
use tokio::runtime::Runtime;
use tokio::task::AbortHandle;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{BodyKind, EngineError, EngineEvent, RequestId};

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        path: String,
        kind: BodyKind,
    },
    Cancel {
        request_id: RequestId,
    },
}

/// Runs fetches on a background tokio runtime and reports completions.
///
/// Cancelled requests produce no event.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        sumclip_info!("engine backend {}", settings.base_url);
        let fetcher = ReqwestFetcher::new(settings).map_err(EngineError::Client)?;
        Self::with_fetcher(Arc::new(fetcher))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("sumclip-fetch")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("sumclip-engine".to_string())
            .spawn(move || run(runtime, fetcher, cmd_rx, event_tx))?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch(&self, request_id: RequestId, path: impl Into<String>, kind: BodyKind) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch {
            request_id,
            path: path.into(),
            kind,
        });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run(
    runtime: Runtime,
    fetcher: Arc<dyn Fetcher>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut tasks: HashMap<RequestId, AbortHandle> = HashMap::new();
    while let Ok(command) = cmd_rx.recv() {
        tasks.retain(|_, task| !task.is_finished());
        match command {
            EngineCommand::Fetch {
                request_id,
                path,
                kind,
            } => {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                let task = runtime.spawn(async move {
                    let result = fetcher.fetch(request_id, &path, kind).await;
                    let _ = event_tx.send(EngineEvent::FetchCompleted { request_id, result });
                });
                tasks.insert(request_id, task.abort_handle());
            }
            EngineCommand::Cancel { request_id } => {
                if let Some(task) = tasks.remove(&request_id) {
                    sumclip_debug!("aborting request {}", request_id);
                    task.abort();
                }
            }
        }
    }
    sumclip_debug!("engine command channel closed; shutting down");
    runtime.shutdown_background();
}
