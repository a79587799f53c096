//! Search and match navigation

use tracing::debug;

use crate::commands::Cmd;
use crate::host::{Document, NodeKind};
use crate::messages::{Direction, UiMessage};
use crate::model::SessionState;
use crate::util::literal_regex;

/// Rebuild the match set from every text node containing `query`
pub fn find_text<H: Document>(
    model: &mut SessionState,
    host: &mut H,
    query: &str,
    case_sensitive: bool,
) -> anyhow::Result<Cmd> {
    let query = query.trim();
    if query.is_empty() {
        model.matches.clear();
        return Ok(Cmd::post(UiMessage::no_results()));
    }

    let regex = literal_regex(query, case_sensitive)?;
    let found = host.find_all(&mut |node| {
        node.kind == NodeKind::Text && node.characters.is_some_and(|text| regex.is_match(text))
    });
    debug!("find_text {:?}: {} match(es)", query, found.len());

    model.matches.replace(found);
    if model.matches.is_empty() {
        return Ok(Cmd::post(UiMessage::no_results()));
    }

    // Passive search: center the view but leave the selection alone
    Ok(navigate_and_notify(model, host, 0, false))
}

/// Step to the next/previous match, wrapping around. No-op without matches.
pub fn navigate<H: Document>(model: &mut SessionState, host: &mut H, direction: Direction) -> Cmd {
    match model.matches.step(direction) {
        Some(index) => navigate_and_notify(model, host, index, true),
        None => Cmd::None,
    }
}

/// Move the cursor to `index` and report the match there.
///
/// Matches that were deleted or stopped being text since the search are
/// dropped and the cursor is clamped; if none survive the panel gets a
/// zero-result reply.
pub fn navigate_and_notify<H: Document>(
    model: &mut SessionState,
    host: &mut H,
    index: usize,
    select: bool,
) -> Cmd {
    model.matches.set_cursor(index);
    let Some(current) = model.matches.current().cloned() else {
        return Cmd::post(UiMessage::no_results());
    };

    if host.kind(&current) != Some(NodeKind::Text) {
        let before = model.matches.len();
        model
            .matches
            .retain_and_clamp(index, |id| host.kind(id) == Some(NodeKind::Text));
        debug!("Dropped {} stale match(es)", before - model.matches.len());
    }

    let (Some(cursor), Some(current)) = (model.matches.cursor(), model.matches.current().cloned())
    else {
        return Cmd::post(UiMessage::no_results());
    };

    let node_text = host.characters(&current).unwrap_or_default();
    if select {
        host.set_selection(vec![current.clone()]);
    }

    Cmd::batch(vec![
        Cmd::ScrollIntoView(vec![current]),
        Cmd::post(UiMessage::NavigationUpdate {
            index: cursor,
            count: model.matches.len(),
            node_text,
        }),
    ])
}
