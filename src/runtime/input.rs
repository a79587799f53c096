//! Input line parsing
//!
//! Each input line is one JSON object: either a panel request (see
//! [`PanelMsg`]) or a host event that the document itself would raise.

use anyhow::Context;
use serde::Deserialize;

use crate::host::NodeId;
use crate::messages::PanelMsg;

/// Events raised on the host side of the session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum HostEvent {
    /// The user selected these nodes in the document
    Select { node_ids: Vec<NodeId> },
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Panel(PanelMsg),
    Host(HostEvent),
}

/// Parse one line of input
pub fn parse_input(line: &str) -> anyhow::Result<Input> {
    let value: serde_json::Value = serde_json::from_str(line).context("Input is not valid JSON")?;
    let kind = value
        .get("type")
        .and_then(|t| t.as_str())
        .context("Input has no \"type\" field")?
        .to_string();

    if kind == "select" {
        let event = serde_json::from_value(value).context("Invalid host event")?;
        return Ok(Input::Host(event));
    }
    let msg = serde_json::from_value(value)
        .with_context(|| format!("Invalid panel message of type {:?}", kind))?;
    Ok(Input::Panel(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_panel_message() {
        let input = parse_input(r#"{"type":"navigate","direction":"next"}"#).unwrap();
        assert!(matches!(input, Input::Panel(PanelMsg::Navigate { .. })));
    }

    #[test]
    fn test_parse_select_event() {
        let input = parse_input(r#"{"type":"select","nodeIds":["1:2","1:3"]}"#).unwrap();
        assert_eq!(
            input,
            Input::Host(HostEvent::Select {
                node_ids: vec![NodeId::new("1:2"), NodeId::new("1:3")]
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_input("{").is_err());
        assert!(parse_input(r#"{"query":"x"}"#).is_err());
        assert!(parse_input(r#"{"type":"explode"}"#).is_err());
        assert!(parse_input(r#"{"type":"navigate","direction":"sideways"}"#).is_err());
    }
}
