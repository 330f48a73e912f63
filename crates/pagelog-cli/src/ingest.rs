//! Reading recorded console events.
//!
//! Events arrive as newline-delimited JSON, one `{"type": ..., "text": ...}`
//! object per line. A producer thread parses lines and pushes them into the
//! pipeline's event channel so the consumer sees them in file order.

use crate::error::{Result, ResultExt};
use pagelog::{EventSender, RawEvent};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Counters reported by the producer once the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Events delivered to the pipeline
    pub events: usize,
    /// Non-blank lines that could not be decoded
    pub skipped: usize,
}

/// Opens `--input`, or stdin when no path is given.
///
/// # Errors
///
/// Returns `FileNotFound` if the path does not exist.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead + Send>> {
    match path {
        Some(path) => {
            let file = File::open(path).with_path(path)?;
            debug!(path = %path.display(), "reading events from file");
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            debug!("reading events from stdin");
            Ok(Box::new(BufReader::new(io::stdin())))
        }
    }
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns the decoder error for malformed lines.
pub fn parse_line(line: &str) -> serde_json::Result<Option<RawEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Pushes every event from `reader` into `sender`, in order.
///
/// Lines that are not UTF-8 or not a valid event are logged and skipped.
/// Stops early if the consumer hangs up.
///
/// # Errors
///
/// Returns read errors from the underlying source.
pub fn forward<R: BufRead>(reader: R, sender: &EventSender) -> io::Result<IngestStats> {
    let mut stats = IngestStats::default();

    // Split on raw bytes so one bad line cannot end the stream.
    for (index, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let line = match std::str::from_utf8(&bytes) {
            Ok(line) => line,
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping line that is not UTF-8");
                stats.skipped += 1;
                continue;
            }
        };

        match parse_line(line) {
            Ok(Some(event)) => {
                if !sender.send(event) {
                    debug!("event consumer closed, stopping reader");
                    break;
                }
                stats.events += 1;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping undecodable event");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

/// Runs [`forward`] on a producer thread.
///
/// The sender is dropped when the thread finishes, which ends the stream.
pub fn spawn_reader<R>(reader: R, sender: EventSender) -> JoinHandle<io::Result<IngestStats>>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || forward(reader, &sender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelog::channel;
    use std::io::Cursor;

    #[test]
    fn parses_event_lines() {
        let event = parse_line(r#" {"type": "error", "text": "boom"} "#).unwrap();
        assert_eq!(event, Some(RawEvent::new("error", "boom")));
        assert_eq!(parse_line("   ").unwrap(), None);
        assert!(parse_line("not json").is_err());
    }

    #[test]
    fn forwards_in_order_and_counts_skips() {
        let input = Cursor::new(
            "{\"type\":\"log\",\"text\":\"one\"}\n\
             \n\
             garbage\n\
             {\"type\":\"warning\",\"text\":\"two\"}\n",
        );
        let (tx, stream) = channel();

        let stats = forward(input, &tx).unwrap();
        drop(tx);

        assert_eq!(stats, IngestStats { events: 2, skipped: 1 });
        let texts: Vec<String> = stream.map(|e| e.text).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[test]
    fn non_utf8_line_is_skipped_not_fatal() {
        let mut input = b"{\"type\":\"log\",\"text\":\"hello\"}\n".to_vec();
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(b"{\"type\":\"error\",\"text\":\"bad thing\"}\r\n");
        let (tx, stream) = channel();

        let stats = forward(Cursor::new(input), &tx).unwrap();
        drop(tx);

        assert_eq!(stats, IngestStats { events: 2, skipped: 1 });
        let events: Vec<RawEvent> = stream.collect();
        assert_eq!(
            events,
            [RawEvent::new("log", "hello"), RawEvent::new("error", "bad thing")]
        );
    }

    #[test]
    fn spawned_reader_closes_the_stream() {
        let input = Cursor::new("{\"type\":\"log\",\"text\":\"hi\"}\n");
        let (tx, stream) = channel();

        let handle = spawn_reader(input, tx);
        let events: Vec<RawEvent> = stream.collect();
        let stats = handle.join().unwrap().unwrap();

        assert_eq!(events, [RawEvent::new("log", "hi")]);
        assert_eq!(stats.events, 1);
    }

    #[test]
    fn missing_input_file_is_reported() {
        let err = open_input(Some(Path::new("/no/such/events.jsonl"))).err().unwrap();
        assert!(matches!(err, crate::error::CliError::FileNotFound(_)));
    }
}
