//! Sumclip engine: backend requests and effect execution.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{check_binary, decode_text, DecodeError};
pub use engine::EngineHandle;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use types::{BodyKind, EngineError, EngineEvent, FailureKind, FetchError, FetchedBody, RequestId};
