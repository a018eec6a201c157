use super::message::AppMessage;
use crate::kernel::save::SavePayload;
use crate::kernel::services::ports::{SinkError, TemplateSink};
use std::io;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

pub struct SaveRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
    sink: Arc<Mutex<Box<dyn TemplateSink>>>,
    sink_name: &'static str,
}

impl SaveRuntime {
    pub fn new(tx: Sender<AppMessage>, sink: Box<dyn TemplateSink>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        let sink_name = sink.name();
        Ok(Self {
            runtime,
            tx,
            sink: Arc::new(Mutex::new(sink)),
            sink_name,
        })
    }

    pub fn sink_name(&self) -> &'static str {
        self.sink_name
    }

    /// 提交一次保存；结果以 `AppMessage::SaveFinished` 回传
    pub fn save(&self, payload: SavePayload) {
        let tx = self.tx.clone();
        let sink = Arc::clone(&self.sink);
        let sink_name = self.sink_name;
        self.runtime.spawn(async move {
            let result = tokio::task::spawn_blocking(move || submit(&sink, &payload)).await;

            let error = match result {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(e.to_string()),
                Err(e) => Some(e.to_string()),
            };
            match &error {
                None => tracing::info!(sink = sink_name, "template submitted"),
                Some(error) => {
                    tracing::error!(sink = sink_name, error = %error, "template submit failed")
                }
            }

            let _ = tx.send(AppMessage::SaveFinished {
                sink: sink_name,
                ok: error.is_none(),
                error,
            });
        });
    }
}

fn submit(sink: &Mutex<Box<dyn TemplateSink>>, payload: &SavePayload) -> Result<(), SinkError> {
    let mut sink = sink
        .lock()
        .map_err(|_| SinkError::Unavailable("sink lock poisoned".to_string()))?;
    sink.submit(payload)
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime.rs"]
mod tests;
