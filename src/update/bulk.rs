//! Bulk edits of text content and frame names by node id
//!
//! Both edits run in two phases: every prior value is recorded before the
//! first write, so the undo batch always holds the true starting state. A
//! write the host rejects is logged and skipped; the rest of the batch still
//! applies.

use tracing::{debug, info, warn};

use crate::commands::Cmd;
use crate::fonts::write_text;
use crate::host::{Document, FontLoader, NodeKind};
use crate::messages::{FrameNameChange, TextChange, UiMessage};
use crate::model::{ChangeRecord, SessionState};

use super::{notify, selection::selection_changed};

/// Replace the text of each listed node; ids that are gone or not text are skipped
pub async fn apply_text_changes<H>(
    model: &mut SessionState,
    host: &mut H,
    changes: Vec<TextChange>,
) -> anyhow::Result<Cmd>
where
    H: Document + FontLoader,
{
    if changes.is_empty() {
        return Ok(Cmd::post(UiMessage::ApplySuccess { count: 0 }));
    }

    let mut batch = Vec::with_capacity(changes.len());
    for change in &changes {
        match host.resolve(&change.node_id).await {
            Some(NodeKind::Text) => {
                let original = host.characters(&change.node_id).unwrap_or_default();
                batch.push(ChangeRecord::text(change.node_id.clone(), original));
            }
            other => debug!("Skipping text change for {}: {:?}", change.node_id, other),
        }
    }
    model.undo.record(batch);

    let mut applied = 0;
    for change in &changes {
        if host.resolve(&change.node_id).await != Some(NodeKind::Text) {
            continue;
        }
        match write_text(host, &change.node_id, &change.new_text).await {
            Ok(_) => applied += 1,
            Err(e) => warn!("Skipping text change for {}: {:#}", change.node_id, e),
        }
    }

    info!("Applied {} of {} text change(s)", applied, changes.len());
    Ok(Cmd::batch(vec![
        notify(model, "Updated texts!"),
        selection_changed(model, host),
        Cmd::post(UiMessage::ApplySuccess { count: applied }),
    ]))
}

/// Rename each listed frame; ids that are gone or not frames are skipped
pub async fn apply_frame_name_changes<H>(
    model: &mut SessionState,
    host: &mut H,
    changes: Vec<FrameNameChange>,
) -> anyhow::Result<Cmd>
where
    H: Document + FontLoader,
{
    if changes.is_empty() {
        return Ok(Cmd::post(UiMessage::ApplySuccess { count: 0 }));
    }

    let mut batch = Vec::with_capacity(changes.len());
    for change in &changes {
        match host.resolve(&change.node_id).await {
            Some(NodeKind::Frame) => {
                let original = host.name(&change.node_id).unwrap_or_default();
                batch.push(ChangeRecord::frame_name(change.node_id.clone(), original));
            }
            other => debug!("Skipping rename of {}: {:?}", change.node_id, other),
        }
    }
    model.undo.record(batch);

    let mut applied = 0;
    for change in &changes {
        if host.resolve(&change.node_id).await != Some(NodeKind::Frame) {
            continue;
        }
        match host.set_name(&change.node_id, &change.new_name) {
            Ok(()) => applied += 1,
            Err(e) => warn!("Skipping rename of {}: {:#}", change.node_id, e),
        }
    }

    info!("Renamed {} of {} frame(s)", applied, changes.len());
    Ok(Cmd::batch(vec![
        notify(model, "Updated frame names!"),
        selection_changed(model, host),
        Cmd::post(UiMessage::ApplySuccess { count: applied }),
    ]))
}
