//! Undo of the last change batch

use tracing::{debug, info, warn};

use crate::commands::Cmd;
use crate::fonts::write_text;
use crate::host::{Document, FontLoader, NodeKind};
use crate::messages::UiMessage;
use crate::model::{ChangeKind, SessionState};

use super::{notify, selection::selection_changed};

/// Restore every record of the pending batch, then forget it.
///
/// The log is emptied before the first restore, so undo is one-shot. Records
/// whose node is gone or retyped are skipped, as are writes the host rejects;
/// every other record is still restored.
pub async fn undo_last_change<H>(model: &mut SessionState, host: &mut H) -> anyhow::Result<Cmd>
where
    H: Document + FontLoader,
{
    if !model.undo.can_undo() {
        return Ok(Cmd::post(UiMessage::HideUndo));
    }

    let batch = model.undo.take();
    let mut count = 0;
    for record in &batch {
        let restored = match (record.kind, host.resolve(&record.node_id).await) {
            (ChangeKind::Text, Some(NodeKind::Text)) => {
                write_text(host, &record.node_id, &record.original)
                    .await
                    .map(|_| ())
            }
            (ChangeKind::FrameName, Some(NodeKind::Frame)) => {
                host.set_name(&record.node_id, &record.original)
            }
            (kind, found) => {
                debug!(
                    "Skipping undo of {:?} on {}: node is {:?}",
                    kind, record.node_id, found
                );
                continue;
            }
        };
        match restored {
            Ok(()) => count += 1,
            Err(e) => warn!("Could not restore {}: {:#}", record.node_id, e),
        }
    }

    info!("Undid {} of {} change(s)", count, batch.len());
    let label = if count == 1 {
        "change undone"
    } else {
        "changes undone"
    };
    Ok(Cmd::batch(vec![
        notify(model, format!("{} {}!", count, label)),
        selection_changed(model, host),
        Cmd::post(UiMessage::UndoComplete),
    ]))
}
