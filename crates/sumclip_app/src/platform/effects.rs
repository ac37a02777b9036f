use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sumclip_core::{BlobHandle, BlobId, ContentKind, Effect, FetchFailure, Msg, Payload, RequestId, Selection};
use sumclip_engine::{BodyKind, EngineEvent, EngineHandle, FailureKind, FetchError, FetchedBody};
use sumclip_logging::{sumclip_debug, sumclip_info, sumclip_warn};

/// Executes core effects against the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    pending: HashMap<RequestId, Selection>,
    images: ImageFiles,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, image_dir: Option<PathBuf>) -> Self {
        Self {
            engine,
            pending: HashMap::new(),
            images: ImageFiles::new(image_dir),
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch {
                    request_id,
                    slot,
                    descriptor,
                } => {
                    sumclip_info!("Fetch request_id={} slot={} path={}", request_id, slot, descriptor.path);
                    self.pending.insert(request_id, slot);
                    self.engine
                        .fetch(request_id, descriptor.path, map_kind(descriptor.content_kind));
                }
                Effect::CancelFetch { request_id } => {
                    self.pending.remove(&request_id);
                    self.engine.cancel(request_id);
                }
                Effect::ReleaseBlob { blob } => self.images.release(blob),
            }
        }
    }

    /// Waits up to `timeout` for the next engine completion.
    pub fn next_message(&mut self, timeout: Duration) -> Option<Msg> {
        let EngineEvent::FetchCompleted { request_id, result } = self.engine.recv_timeout(timeout)?;
        let Some(slot) = self.pending.remove(&request_id) else {
            sumclip_debug!("completion for unknown request {}", request_id);
            return None;
        };
        Some(Msg::FetchCompleted {
            request_id,
            slot,
            result: map_result(result),
        })
    }

    pub fn show_image(&mut self, handle: &BlobHandle) -> Option<PathBuf> {
        self.images.show(handle)
    }
}

fn map_kind(kind: ContentKind) -> BodyKind {
    match kind {
        ContentKind::Text => BodyKind::Text,
        ContentKind::Binary => BodyKind::Binary,
    }
}

fn map_result(result: Result<FetchedBody, FetchError>) -> Result<Payload, FetchFailure> {
    match result {
        Ok(FetchedBody::Text(text)) => Ok(Payload::Text(text)),
        Ok(FetchedBody::Binary(bytes)) => Ok(Payload::Binary(bytes)),
        Err(err) => Err(map_failure(err)),
    }
}

fn map_failure(err: FetchError) -> FetchFailure {
    match err.kind {
        FailureKind::HttpStatus(code) => FetchFailure::HttpStatus(code),
        FailureKind::Timeout => FetchFailure::Timeout,
        FailureKind::Decode => FetchFailure::Decode(err.message),
        FailureKind::InvalidUrl | FailureKind::Network | FailureKind::TooLarge { .. } => {
            FetchFailure::Transport(err.to_string())
        }
    }
}

/// Image files backing the handles currently on screen.
///
/// A file is written the first time its handle is shown and deleted when the
/// handle is released.
pub struct ImageFiles {
    dir: Option<PathBuf>,
    written: HashMap<BlobId, PathBuf>,
}

impl ImageFiles {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            written: HashMap::new(),
        }
    }

    pub fn show(&mut self, handle: &BlobHandle) -> Option<PathBuf> {
        if let Some(path) = self.written.get(&handle.id()) {
            return Some(path.clone());
        }
        let dir = self.dir.as_deref()?;
        match write_image(dir, handle) {
            Ok(path) => {
                self.written.insert(handle.id(), path.clone());
                Some(path)
            }
            Err(err) => {
                sumclip_warn!("Failed to write {} into {:?}: {}", handle.id(), dir, err);
                None
            }
        }
    }

    pub fn release(&mut self, blob: BlobId) {
        let Some(path) = self.written.remove(&blob) else {
            return;
        };
        if let Err(err) = fs::remove_file(&path) {
            sumclip_warn!("Failed to remove {:?}: {}", path, err);
        }
    }
}

fn write_image(dir: &Path, handle: &BlobHandle) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let name = format!(
        "{}-{}.{}",
        handle.id().get(),
        handle.slot().slot_name().to_ascii_lowercase(),
        image_extension(handle.bytes())
    );
    let path = dir.join(name);
    fs::write(&path, handle.bytes())?;
    Ok(path)
}

fn image_extension(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG") {
        "png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "jpg"
    } else if bytes.starts_with(b"GIF8") {
        "gif"
    } else if bytes.starts_with(b"<svg") || bytes.starts_with(b"<?xml") {
        "svg"
    } else {
        "bin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumclip_core::{BlobRegistry, MenuCategory, Tab};
    use tempfile::TempDir;

    fn registry_with(bytes: &'static [u8]) -> (BlobRegistry, BlobId) {
        let mut registry = BlobRegistry::new();
        let slot = Selection::new(MenuCategory::Infographic, Some(Tab::WordCloud)).unwrap();
        let (id, _) = registry.publish(slot, bytes::Bytes::from_static(bytes));
        (registry, id)
    }

    #[test]
    fn shown_image_is_written_once_and_removed_on_release() {
        let temp = TempDir::new().unwrap();
        let mut images = ImageFiles::new(Some(temp.path().join("images")));
        let (registry, id) = registry_with(b"\x89PNG data");
        let handle = registry.get(id).unwrap();

        let path = images.show(handle).expect("written");
        assert_eq!(path.extension().unwrap(), "png");
        assert!(path.file_name().unwrap().to_string_lossy().contains("wordcloud"));
        assert_eq!(fs::read(&path).unwrap(), b"\x89PNG data");
        assert_eq!(images.show(handle), Some(path.clone()));

        images.release(id);
        assert!(!path.exists());
        // Second release is a no-op.
        images.release(id);
    }

    #[test]
    fn no_directory_means_no_files() {
        let mut images = ImageFiles::new(None);
        let (registry, id) = registry_with(b"data");
        assert_eq!(images.show(registry.get(id).unwrap()), None);
    }

    #[test]
    fn engine_failures_map_to_core_taxonomy() {
        let status = FetchError {
            kind: FailureKind::HttpStatus(503),
            message: "503 Service Unavailable".into(),
        };
        assert_eq!(map_failure(status), FetchFailure::HttpStatus(503));

        let network = FetchError {
            kind: FailureKind::Network,
            message: "connection refused".into(),
        };
        assert!(matches!(map_failure(network), FetchFailure::Transport(_)));

        let decode = FetchError {
            kind: FailureKind::Decode,
            message: "empty image body".into(),
        };
        assert_eq!(
            map_failure(decode),
            FetchFailure::Decode("empty image body".to_string())
        );
    }
}
