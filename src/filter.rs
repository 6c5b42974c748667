use crate::collectors::network::{collect_rate, initial_sample, CounterSource};
use crate::error::{NetspeedError, Result};
use crate::models::{NetworkRate, StatusEntry};
use crate::protocol::splice::splice;
use crate::protocol::{parse_entries, render_line, Frame, HEADER_LINES};
use log::{debug, info};
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Sits between i3status and i3bar and adds the throughput segment to every
/// status line.
pub struct StatusFilter<R, W, S> {
    reader: R,
    writer: W,
    source: S,
    anchor: String,
}

impl<R, W, S> StatusFilter<R, W, S>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: CounterSource,
{
    pub fn new(reader: R, writer: W, source: S, anchor: impl Into<String>) -> Self {
        Self {
            reader,
            writer,
            source,
            anchor: anchor.into(),
        }
    }

    /// Run until the input ends. Returns `Ok` on a clean end of input and the
    /// first failure otherwise.
    pub async fn run(mut self) -> Result<()> {
        let mut last = initial_sample(&self.source).await?;
        self.echo_header().await?;

        let mut line = String::new();
        let mut index = 0usize;
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .await
                .map_err(NetspeedError::Input)?;
            if read == 0 {
                info!("Input closed after {} status lines", index);
                return Ok(());
            }

            let start = Instant::now();
            let frame = Frame::for_line(index);
            let payload = frame.payload(&line);

            let (rate, entries) = tokio::join!(collect_rate(&self.source, &mut last), async {
                parse_entries(payload)
            });
            let rate = rate?;
            let entries = entries?;
            debug!("Line {}: {} entries, {:?}", index, entries.len(), rate);
            if let Some(anchor) = entries.iter().find(|entry| entry.is_named(&self.anchor)) {
                debug!(
                    "Anchor {} instance={:?} color={:?} markup={:?}",
                    self.anchor,
                    anchor.instance(),
                    anchor.color(),
                    anchor.markup()
                );
            }

            let entries = annotate(entries, &self.anchor, rate)?;
            let output = render_line(frame, &entries)?;
            self.write_line(&output).await?;

            debug!("Line {} took: {} ms", index, start.elapsed().as_millis());
            index += 1;
        }
    }

    async fn echo_header(&mut self) -> Result<()> {
        let mut line = String::new();
        for number in 1..=HEADER_LINES {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .await
                .map_err(|source| NetspeedError::Header { line: number, source })?;
            if read == 0 {
                return Err(NetspeedError::Header {
                    line: number,
                    source: std::io::ErrorKind::UnexpectedEof.into(),
                });
            }
            self.writer
                .write_all(line.as_bytes())
                .await
                .map_err(NetspeedError::Output)?;
        }
        self.writer.flush().await.map_err(NetspeedError::Output)
    }

    async fn write_line(&mut self, output: &str) -> Result<()> {
        self.writer
            .write_all(output.as_bytes())
            .await
            .map_err(NetspeedError::Output)?;
        self.writer.write_all(b"\n").await.map_err(NetspeedError::Output)?;
        self.writer.flush().await.map_err(NetspeedError::Output)
    }
}

/// Add the throughput segment for `rate` in front of `anchor`.
pub fn annotate(entries: Vec<StatusEntry>, anchor: &str, rate: NetworkRate) -> Result<Vec<StatusEntry>> {
    let inserted = StatusEntry::from_full_text(&rate.to_string())?;
    Ok(splice(entries, anchor, inserted))
}
