//! Holds back stderr output while the TUI owns the terminal.
//!
//! Log lines written through [`BufferedStderr`] are collected while buffering
//! is active and printed by [`drain`] once the terminal is restored.

use std::io;
use std::sync::{Mutex, MutexGuard};

use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, Layer};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Activate buffering. While active, writes are stored instead of printed.
pub fn activate() {
    *lock() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    lock().take().unwrap_or_default()
}

/// Write a message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn write_line(msg: String) {
    let mut guard = lock();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// `io::Write` sink for `tracing-subscriber` that routes through the buffer.
///
/// Use as `fmt::layer().with_writer(|| BufferedStderr)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BufferedStderr;

impl io::Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        for line in text.lines().filter(|l| !l.is_empty()) {
            write_line(line.to_string());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Log formatting layer writing through [`BufferedStderr`].
///
/// `ansi` should only be set when stderr is a terminal, otherwise redirected
/// output and buffered lines carry escape codes.
pub fn fmt_layer<S>(ansi: bool) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer().with_ansi(ansi).with_writer(|| BufferedStderr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Buffer state is process-wide, so everything runs in one test.
    #[test]
    fn test_buffer_collects_until_drained() {
        activate();
        write_line("first".to_string());
        BufferedStderr.write_all(b"second\nthird\n").unwrap();

        assert_eq!(drain(), vec!["first", "second", "third"]);
        assert!(drain().is_empty());

        // Plain layer leaves no escape codes in buffered log lines
        use tracing_subscriber::prelude::*;
        activate();
        let subscriber = tracing_subscriber::registry().with(fmt_layer(false));
        tracing::subscriber::with_default(subscriber, || tracing::warn!("plain line"));

        let lines = drain();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("plain line"));
        assert!(!lines[0].contains('\x1b'));
    }
}
