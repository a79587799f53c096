//! Single and document-wide replacement

use tracing::{debug, info, warn};

use crate::commands::Cmd;
use crate::fonts::write_text;
use crate::host::{Document, FontLoader, NodeKind};
use crate::messages::{UiMessage, UpdatedNode};
use crate::model::{ChangeRecord, SessionState};
use crate::util::{literal_regex, substitute};

fn replaced(count: usize, updated_node: Option<UpdatedNode>, all_replaced: Option<bool>) -> Cmd {
    Cmd::post(UiMessage::ReplaceSuccess {
        count,
        updated_node,
        all_replaced,
    })
}

/// Replace the first occurrence of `find` in the current match
pub async fn replace_single<H>(
    model: &mut SessionState,
    host: &mut H,
    find: &str,
    replacement: &str,
    case_sensitive: bool,
) -> anyhow::Result<Cmd>
where
    H: Document + FontLoader,
{
    let (Some(index), Some(id)) = (model.matches.cursor(), model.matches.current().cloned())
    else {
        return Ok(replaced(0, None, None));
    };
    if find.is_empty() || host.kind(&id) != Some(NodeKind::Text) {
        debug!("replace_single: nothing to replace at {}", id);
        return Ok(replaced(0, None, None));
    }

    let original = host.characters(&id).unwrap_or_default();
    let regex = literal_regex(find, case_sensitive)?;
    if !regex.is_match(&original) {
        return Ok(replaced(0, None, None));
    }

    let updated = substitute(&regex, &original, replacement, 1);
    model.undo.record(vec![ChangeRecord::text(id.clone(), original)]);
    write_text(host, &id, &updated).await?;

    let node_text = host.characters(&id).unwrap_or_default();
    Ok(replaced(
        1,
        Some(UpdatedNode {
            index,
            count: model.matches.len(),
            node_text,
        }),
        None,
    ))
}

/// Replace every occurrence of `find` in every text node of the page.
///
/// Targets come from a fresh scan of the document, not from the match set.
pub async fn replace_all<H>(
    model: &mut SessionState,
    host: &mut H,
    find: &str,
    replacement: &str,
    case_sensitive: bool,
) -> anyhow::Result<Cmd>
where
    H: Document + FontLoader,
{
    if find.is_empty() {
        return Ok(replaced(0, None, Some(true)));
    }

    let regex = literal_regex(find, case_sensitive)?;
    let targets = host.find_all(&mut |node| {
        node.kind == NodeKind::Text && node.characters.is_some_and(|text| regex.is_match(text))
    });
    if targets.is_empty() {
        return Ok(replaced(0, None, Some(true)));
    }

    let mut batch = Vec::with_capacity(targets.len());
    let mut writes = Vec::with_capacity(targets.len());
    for id in targets {
        let original = host.characters(&id).unwrap_or_default();
        writes.push((id.clone(), substitute(&regex, &original, replacement, 0)));
        batch.push(ChangeRecord::text(id, original));
    }
    model.undo.record(batch);
    // Match positions are stale as soon as the first write lands
    model.matches.clear();

    // A node that refuses the write is skipped; the rest of the batch still lands
    let mut written = 0;
    for (id, text) in &writes {
        match write_text(host, id, text).await {
            Ok(_) => written += 1,
            Err(e) => warn!("Skipping replacement in {}: {:#}", id, e),
        }
    }

    info!(
        "Replaced {:?} in {} of {} text node(s)",
        find,
        written,
        writes.len()
    );
    Ok(replaced(written, None, Some(true)))
}
