use sumclip_logging::{sumclip_debug, sumclip_error, sumclip_warn};

use crate::{
    AppState, Effect, FetchFailure, FetchOutcome, Msg, Payload, RequestId, Selection,
    UnknownTabError,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_closed() {
        if msg != Msg::NoOp {
            sumclip_debug!("ignoring {:?} after teardown", msg);
        }
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::DashboardOpened => {
            let current = state.selection();
            select(&mut state, current)
        }
        Msg::MenuSelected(menu) => select(&mut state, Selection::first_of(menu)),
        Msg::TabSelected(tab) => match Selection::new(state.selection().menu(), Some(tab)) {
            Ok(next) => select(&mut state, next),
            Err(err) => {
                fault(&mut state, err);
                Vec::new()
            }
        },
        Msg::FetchCompleted {
            request_id,
            slot,
            result,
        } => complete(&mut state, request_id, slot, result),
        Msg::SessionReset => state.reset(),
        Msg::Teardown => {
            let effects = state.reset();
            state.close();
            effects
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Makes `next` the current selection and fetches it unless its outcome is
/// already known. Selecting the current slot again retries a failed fetch.
fn select(state: &mut AppState, next: Selection) -> Vec<Effect> {
    let previous = state.selection();
    let reselect = previous == next;
    let mut effects = Vec::new();

    if !reselect {
        // The previous slot's response can never become visible now.
        if let Some(request_id) = state.take_in_flight(previous) {
            sumclip_debug!("request {} for {} superseded by {}", request_id, previous, next);
            state.set_outcome(previous, FetchOutcome::Idle);
            effects.push(Effect::CancelFetch { request_id });
        }
        state.set_selection(next);
        state.mark_dirty();
    }

    let descriptor = match next.descriptor() {
        Ok(descriptor) => descriptor,
        Err(err) => {
            fault(state, err);
            return effects;
        }
    };

    let should_fetch = match state.cache().get(&next) {
        FetchOutcome::Idle => true,
        FetchOutcome::Error(_) => reselect,
        FetchOutcome::Loading | FetchOutcome::Success(_) => false,
    };
    if should_fetch {
        let request_id = state.begin_request(next);
        sumclip_debug!(
            "request {} for {}: GET {}",
            request_id,
            next,
            descriptor.path
        );
        effects.push(Effect::Fetch {
            request_id,
            slot: next,
            descriptor,
        });
        state.mark_dirty();
    }

    effects.extend(state.sync_display());
    effects
}

fn complete(
    state: &mut AppState,
    request_id: RequestId,
    slot: Selection,
    result: Result<Payload, FetchFailure>,
) -> Vec<Effect> {
    if slot != state.selection() {
        sumclip_debug!(
            "discarding request {} for {}: selection is now {}",
            request_id,
            slot,
            state.selection()
        );
        return Vec::new();
    }
    if state.in_flight(slot) != Some(request_id) {
        sumclip_debug!("discarding request {} for {}: not authoritative", request_id, slot);
        return Vec::new();
    }
    state.take_in_flight(slot);

    let expected = match slot.descriptor() {
        Ok(descriptor) => descriptor.content_kind,
        Err(err) => {
            fault(state, err);
            return Vec::new();
        }
    };
    let result = result.and_then(|payload| {
        if payload.content_kind() == expected {
            Ok(payload)
        } else {
            Err(FetchFailure::Decode(format!(
                "expected {:?} content, got {:?}",
                expected,
                payload.content_kind()
            )))
        }
    });

    let outcome = match result {
        Ok(payload) => FetchOutcome::Success(payload),
        Err(failure) => {
            sumclip_warn!("request {} for {} failed: {}", request_id, slot, failure);
            FetchOutcome::Error(format!("Failed to fetch {}", slot.slot_name()))
        }
    };
    state.set_outcome(slot, outcome);
    state.mark_dirty();
    state.sync_display()
}

fn fault(state: &mut AppState, err: UnknownTabError) {
    sumclip_error!("catalog/endpoint mismatch: {}", err);
    state.record_fault(err);
}
