//! TerminalRenderer: flushes rendered lines to a real terminal.
//!
//! This module intentionally keeps the drawing API small. Frames are full
//! redraws; at one small frame every 300ms there is nothing worth diffing.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::Print,
    terminal::{self, ClearType},
    QueueableCommand,
};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw a full frame, top-left anchored.
    pub fn draw(&mut self, lines: &[String]) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::Clear(ClearType::All))?;
        self.buf.queue(cursor::MoveTo(0, 0))?;
        for line in lines {
            self.buf.queue(Print(line))?;
            self.buf.queue(Print("\r\n"))?;
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
