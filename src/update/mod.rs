//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. Handlers mutate
//! the host document and the session model, then describe outward effects as
//! a [`Cmd`].

mod bulk;
mod replace;
mod search;
mod selection;
mod undo;

use tracing::{debug, error};

use crate::commands::Cmd;
use crate::host::{Document, FontLoader};
use crate::messages::{HostMsg, Msg, PanelMsg, UiMessage};
use crate::model::SessionState;

pub use bulk::{apply_frame_name_changes, apply_text_changes};
pub use replace::{replace_all, replace_single};
pub use search::{find_text, navigate, navigate_and_notify};
pub use selection::selection_changed;
pub use undo::undo_last_change;

/// Main update function - dispatches to sub-handlers
///
/// Never fails: an error from any handler is logged and reported to the
/// panel as `plugin-error`, and the session stays usable.
pub async fn update<H>(model: &mut SessionState, host: &mut H, msg: Msg) -> Cmd
where
    H: Document + FontLoader,
{
    debug!("update: {:?}", msg);
    match update_inner(model, host, msg).await {
        Ok(cmd) => cmd,
        Err(e) => {
            error!("plugin error: {:#}", e);
            Cmd::post(UiMessage::PluginError {
                message: format!("{:#}", e),
            })
        }
    }
}

async fn update_inner<H>(
    model: &mut SessionState,
    host: &mut H,
    msg: Msg,
) -> anyhow::Result<Cmd>
where
    H: Document + FontLoader,
{
    match msg {
        Msg::Panel(m) => update_panel(model, host, m).await,
        Msg::Host(HostMsg::SelectionChanged) => Ok(selection::selection_changed(model, host)),
    }
}

/// Handle requests from the panel
async fn update_panel<H>(
    model: &mut SessionState,
    host: &mut H,
    msg: PanelMsg,
) -> anyhow::Result<Cmd>
where
    H: Document + FontLoader,
{
    match msg {
        PanelMsg::FindText {
            query,
            is_case_sensitive,
        } => search::find_text(model, host, &query, is_case_sensitive),

        PanelMsg::Navigate { direction } => Ok(search::navigate(model, host, direction)),

        PanelMsg::ReplaceSingle {
            find_text,
            replace_text,
            is_case_sensitive,
        } => {
            replace::replace_single(model, host, &find_text, &replace_text, is_case_sensitive)
                .await
        }

        PanelMsg::ReplaceAll {
            find_text,
            replace_text,
            is_case_sensitive,
        } => {
            replace::replace_all(model, host, &find_text, &replace_text, is_case_sensitive).await
        }

        PanelMsg::ApplyChanges { data } => bulk::apply_text_changes(model, host, data).await,

        PanelMsg::ApplyFrameNameChanges { data } => {
            bulk::apply_frame_name_changes(model, host, data).await
        }

        PanelMsg::UndoLastChange => undo::undo_last_change(model, host).await,

        PanelMsg::Cancel => Ok(Cmd::Close),
    }
}

/// Toast, unless notifications are turned off
fn notify(model: &SessionState, text: impl Into<String>) -> Cmd {
    if model.config.notifications {
        Cmd::Notify(text.into())
    } else {
        Cmd::None
    }
}
