// src/exec/stream.rs

//! Bounded line-oriented draining of a child output pipe.
//!
//! Each completed line goes to the sink immediately with its stream tag, so
//! operators see live progress rather than a batch at exit. Lines are capped
//! at [`MAX_LINE_BYTES`]: a longer line is delivered in cap-sized chunks
//! instead of being dropped or buffered without bound.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};

use crate::sink::{LogSink, StreamTag};

/// Upper bound on the bytes buffered for a single output line.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Drain `pipe` until EOF, logging every line to `sink` under `tag`.
///
/// Read errors are reported on the sink and end the drain; the pipe is
/// owned by this task and closed on return.
pub(crate) async fn drain<R>(pipe: R, tag: StreamTag, sink: LogSink)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(pipe);
    let mut line = Vec::with_capacity(8 * 1024);

    loop {
        match next_line(&mut reader, &mut line, MAX_LINE_BYTES).await {
            Ok(true) => {
                let text = strip_eol(&line);
                sink.stream(tag, &String::from_utf8_lossy(text));
            }
            Ok(false) => break,
            Err(err) => {
                sink.error(&format!("Error reading output: {err}"));
                break;
            }
        }
    }
}

/// Read one line (or one cap-sized chunk of an oversized line) into `line`.
///
/// Returns `Ok(true)` with `line` filled, or `Ok(false)` at EOF with nothing
/// left. A trailing fragment without a newline at EOF is still delivered.
async fn next_line<R>(reader: &mut R, line: &mut Vec<u8>, max: usize) -> io::Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    line.clear();

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(!line.is_empty());
        }

        let room = max - line.len();
        match available.iter().position(|&b| b == b'\n') {
            Some(pos) if pos <= room => {
                line.extend_from_slice(&available[..pos]);
                reader.consume(pos + 1);
                return Ok(true);
            }
            Some(_) | None if available.len() >= room => {
                // The cap is reached before the next newline; flush what we
                // have as a chunk and leave the rest for the next call.
                line.extend_from_slice(&available[..room]);
                reader.consume(room);
                return Ok(true);
            }
            _ => {
                let taken = available.len();
                line.extend_from_slice(available);
                reader.consume(taken);
            }
        }
    }
}

/// Trim a single trailing `\r` left over from CRLF line endings.
fn strip_eol(line: &[u8]) -> &[u8] {
    match line.last() {
        Some(b'\r') => &line[..line.len() - 1],
        _ => line,
    }
}
