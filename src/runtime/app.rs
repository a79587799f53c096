//! Session driver
//!
//! Owns the session model and an in-memory document, feeds messages through
//! `update`, and performs the returned commands: panel messages become JSON
//! lines on the output, toasts go to stderr.

use anyhow::Context;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::commands::Cmd;
use crate::config::PluginConfig;
use crate::host::Document;
use crate::memory::MemoryDocument;
use crate::messages::{HostMsg, Msg, UiMessage};
use crate::model::SessionState;
use crate::update::update;

use super::input::{parse_input, HostEvent, Input};

pub struct App<W: Write> {
    model: SessionState,
    document: MemoryDocument,
    out: W,
    closed: bool,
}

impl<W: Write> App<W> {
    pub fn new(document: MemoryDocument, config: PluginConfig, out: W) -> Self {
        Self {
            model: SessionState::new(config),
            document,
            out,
            closed: false,
        }
    }

    /// Post the initial selection, as the host does when the panel opens
    pub fn start(&mut self) -> anyhow::Result<()> {
        self.dispatch(HostMsg::SelectionChanged.into())
    }

    /// Run one message through `update` and perform the resulting commands
    pub fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let selection_before = self.document.selection();
        let cmd = pollster::block_on(update(&mut self.model, &mut self.document, msg));
        self.process_cmd(cmd)?;

        // Programmatic selection changes notify like user ones
        if !self.closed && self.document.selection() != selection_before {
            let cmd = pollster::block_on(update(
                &mut self.model,
                &mut self.document,
                HostMsg::SelectionChanged.into(),
            ));
            self.process_cmd(cmd)?;
        }
        Ok(())
    }

    /// Handle one input line; malformed input is reported, not fatal
    pub fn handle_line(&mut self, line: &str) -> anyhow::Result<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        match parse_input(line) {
            Ok(Input::Panel(msg)) => self.dispatch(Msg::Panel(msg)),
            Ok(Input::Host(HostEvent::Select { node_ids })) => {
                self.document.set_selection(node_ids);
                self.dispatch(HostMsg::SelectionChanged.into())
            }
            Err(e) => {
                warn!("Ignoring input: {:#}", e);
                self.post(&UiMessage::PluginError {
                    message: format!("{:#}", e),
                })
            }
        }
    }

    /// Process input lines until the input ends or the session is closed
    pub fn run<R: BufRead>(&mut self, input: R) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            self.handle_line(&line)?;
            if self.closed {
                info!("Session closed");
                break;
            }
        }
        Ok(())
    }

    fn process_cmd(&mut self, cmd: Cmd) -> anyhow::Result<()> {
        match cmd {
            Cmd::None => {}
            Cmd::PostMessage(msg) => self.post(&msg)?,
            Cmd::ScrollIntoView(ids) => debug!("Scroll into view: {:?}", ids),
            Cmd::Notify(text) => {
                info!("Notify: {}", text);
                eprintln!("{}", text);
            }
            Cmd::Close => self.closed = true,
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd)?;
                }
            }
        }
        Ok(())
    }

    fn post(&mut self, msg: &UiMessage) -> anyhow::Result<()> {
        let line = serde_json::to_string(msg)?;
        writeln!(self.out, "{}", line).context("Failed to write panel message")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn model(&self) -> &SessionState {
        &self.model
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.document
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_document(self) -> MemoryDocument {
        self.document
    }
}
