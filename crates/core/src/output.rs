//! Output serializer: writes the protocol header and frames to the host

use crate::handle::BlockHandle;
use log::trace;
use rg_status_types::{Header, RenderRecord};
use std::io::{self, Write};
use std::sync::Arc;

/// Current render of every block that has something to show, in bar order
pub fn render_frame(blocks: &[Arc<BlockHandle>]) -> Vec<RenderRecord> {
    blocks.iter().filter_map(|handle| handle.render()).collect()
}

/// Writes the i3bar stream: a header, the opening of an endless array, then
/// one `,`-prefixed frame per line.
///
/// Identical consecutive frames are written once; the host redraws on every
/// line it receives.
pub struct OutputSerializer<W: Write> {
    writer: W,
    started: bool,
    last_frame: Option<String>,
}

impl<W: Write> OutputSerializer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            started: false,
            last_frame: None,
        }
    }

    /// Write the header, `[` and an empty first frame. Does nothing when
    /// already started.
    pub fn start(&mut self) -> io::Result<()> {
        if self.started {
            return Ok(());
        }

        let header = serde_json::to_string(&Header::default()).map_err(io::Error::from)?;
        self.writer.write_all(format!("{}\n[\n[]\n", header).as_bytes())?;
        self.writer.flush()?;
        self.started = true;
        Ok(())
    }

    /// Render all blocks and write the frame if it differs from the last one
    pub fn emit(&mut self, blocks: &[Arc<BlockHandle>]) -> io::Result<bool> {
        self.emit_frame(&render_frame(blocks))
    }

    /// Write a frame unless it equals the previous one. Returns whether a
    /// line was written.
    pub fn emit_frame(&mut self, frame: &[RenderRecord]) -> io::Result<bool> {
        self.start()?;

        let json = serde_json::to_string(frame).map_err(io::Error::from)?;
        if self.last_frame.as_deref() == Some(json.as_str()) {
            trace!("Frame unchanged, not emitting");
            return Ok(false);
        }

        self.writer.write_all(format!(",{}\n", json).as_bytes())?;
        self.writer.flush()?;
        self.last_frame = Some(json);
        Ok(true)
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
