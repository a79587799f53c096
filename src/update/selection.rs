//! Selection change handling

use crate::commands::Cmd;
use crate::host::Document;
use crate::messages::UiMessage;
use crate::model::{aggregate_selection, SessionState};

/// Post the current selection, grouped by outer frame, to the panel
pub fn selection_changed<H: Document>(model: &SessionState, host: &H) -> Cmd {
    let view = aggregate_selection(host, &model.config.no_frame_label);
    Cmd::post(UiMessage::SelectionChange {
        text_data: view.text_data,
        frame_data: view.frame_data,
    })
}
