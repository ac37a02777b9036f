use crate::{BlobId, RequestId, ResourceDescriptor, Selection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// GET `descriptor.path`; report back with `Msg::FetchCompleted` carrying the same
    /// `request_id` and `slot`.
    Fetch {
        request_id: RequestId,
        slot: Selection,
        descriptor: ResourceDescriptor,
    },
    /// The request was superseded. Aborting it is optional; its result is ignored anyway.
    CancelFetch { request_id: RequestId },
    /// The handle is no longer displayed and must be freed by the view layer.
    ReleaseBlob { blob: BlobId },
}
