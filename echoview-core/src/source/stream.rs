//! `StreamSource` — wraps the whisper.cpp `stream` subprocess.
//!
//! ## Stream merge
//!
//! The original deployment ran the transcriber with its error stream
//! redirected into stdout, so initialisation chatter and transcripts arrive
//! as one line sequence. Here both pipes are drained by small reader
//! threads feeding a single bounded channel; `next_line` is a blocking
//! `recv` and the sequence ends when both pipes close. Interleaving across
//! the two streams is whatever the OS delivers, same as a shell-level
//! `2>&1`.
//!
//! The channel bound matters: when the consumer lags, the readers park on a
//! full channel, the OS pipes fill, and the transcriber stalls on write —
//! the same backpressure the original got from reading its pipe one line at
//! a time. The source never buffers more than a handful of lines ahead.

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EchoViewError, Result};
use crate::source::TranscriptSource;

/// Configuration for the transcriber subprocess.
///
/// Replaces the fixed shell command of the original deployment with named
/// fields; `Default` reproduces the observed invocation
/// (`./stream -m models/ggml-tiny.en.bin --step 4000 --length 8000 -c 0 -t 4 -ac 1024`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct StreamConfig {
    /// Path to the whisper.cpp `stream` binary.
    pub binary: PathBuf,
    /// Path to the ggml model file (`-m`).
    pub model: PathBuf,
    /// Audio step size in milliseconds (`--step`).
    pub step_ms: u32,
    /// Audio window length in milliseconds (`--length`).
    pub length_ms: u32,
    /// Capture device index (`-c`).
    pub capture_device: u32,
    /// Inference thread count (`-t`).
    pub threads: u32,
    /// Audio context size (`-ac`).
    pub audio_context: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            binary: "./stream".into(),
            model: "models/ggml-tiny.en.bin".into(),
            step_ms: 4_000,
            length_ms: 8_000,
            capture_device: 0,
            threads: 4,
            audio_context: 1_024,
        }
    }
}

impl StreamConfig {
    /// Argument vector passed to the `stream` binary.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-m".into(),
            self.model.display().to_string(),
            "--step".into(),
            self.step_ms.to_string(),
            "--length".into(),
            self.length_ms.to_string(),
            "-c".into(),
            self.capture_device.to_string(),
            "-t".into(),
            self.threads.to_string(),
            "-ac".into(),
            self.audio_context.to_string(),
        ]
    }
}

/// Lines held between the pipe readers and the consumer. Small, so a fast
/// transcriber stalls on its pipe instead of accumulating stale output in
/// process memory.
const LINE_CHANNEL_CAPACITY: usize = 16;

/// Blocking line source backed by a spawned subprocess.
#[derive(Debug)]
pub struct StreamSource {
    child: Child,
    lines: Receiver<String>,
    readers: Vec<JoinHandle<()>>,
}

impl StreamSource {
    /// Spawn the transcriber described by `config`.
    ///
    /// # Errors
    /// `EchoViewError::Spawn` if the process fails to start — this is fatal,
    /// the system cannot proceed without its line producer.
    pub fn spawn(config: &StreamConfig) -> Result<Self> {
        let mut command = Command::new(&config.binary);
        command.args(config.args());
        Self::from_command(command)
    }

    /// Spawn an arbitrary command as the line source.
    ///
    /// Stdout and stderr are piped and merged; stdin is closed.
    pub fn from_command(mut command: Command) -> Result<Self> {
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EchoViewError::Spawn {
                command: format!("{command:?}"),
                source,
            })?;

        let (tx, rx) = bounded(LINE_CHANNEL_CAPACITY);
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_line_reader("stdout", stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_line_reader("stderr", stderr, tx));
        }

        info!(command = ?command, "transcriber spawned");
        Ok(Self {
            child,
            lines: rx,
            readers,
        })
    }

    /// Reap the child after the line sequence has ended.
    ///
    /// Joins the reader threads, then waits for process exit.
    pub fn wait(self) -> Result<ExitStatus> {
        let Self {
            mut child,
            lines,
            readers,
        } = self;
        // Dropping the receiver unparks any reader still blocked on a full
        // channel so the joins below cannot hang.
        drop(lines);
        for reader in readers {
            let _ = reader.join();
        }
        let status = child.wait()?;
        info!(%status, "transcriber exited");
        Ok(status)
    }
}

impl TranscriptSource for StreamSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        // recv blocks until a line arrives; a recv error means every sender
        // hung up, i.e. both output pipes reached end-of-input.
        Ok(self.lines.recv().ok())
    }
}

fn spawn_line_reader<R: Read + Send + 'static>(
    name: &'static str,
    pipe: R,
    tx: Sender<String>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for line in BufReader::new(pipe).lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        // Consumer dropped the receiver; stop reading.
                        break;
                    }
                }
                Err(e) => {
                    warn!(stream = name, error = %e, "pipe read error — closing stream");
                    break;
                }
            }
        }
        debug!(stream = name, "pipe closed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn yields_lines_then_terminates() {
        let mut source =
            StreamSource::from_command(sh("printf 'one\\ntwo\\n'")).expect("spawn sh");

        assert_eq!(source.next_line().unwrap().as_deref(), Some("one"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("two"));
        assert_eq!(source.next_line().unwrap(), None);
        // Exhausted sources stay exhausted.
        assert_eq!(source.next_line().unwrap(), None);

        let status = source.wait().expect("wait for child");
        assert!(status.success());
    }

    #[test]
    fn merges_stderr_into_the_line_sequence() {
        let mut source =
            StreamSource::from_command(sh("echo out; echo err 1>&2")).expect("spawn sh");

        let mut lines = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            lines.push(line);
        }
        lines.sort();
        assert_eq!(lines, vec!["err".to_string(), "out".to_string()]);
        source.wait().expect("wait for child");
    }

    #[test]
    fn readers_apply_backpressure_instead_of_buffering_ahead() {
        let marker = std::env::temp_dir().join(format!(
            "echoview-backpressure-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&marker);

        // ~1.3 MB of output — far beyond the channel bound plus the OS pipe
        // buffer. The marker file records producer completion.
        let script = format!("seq 1 200000; : > {}", marker.display());
        let mut source = StreamSource::from_command(sh(&script)).expect("spawn sh");

        // Consume nothing: the producer must stall on its full pipe rather
        // than run to completion into process memory.
        std::thread::sleep(std::time::Duration::from_millis(1_000));
        assert!(
            !marker.exists(),
            "producer finished with zero lines consumed — the source read ahead"
        );

        let mut count = 0u32;
        while source.next_line().unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 200_000);
        assert!(marker.exists(), "producer should finish once drained");

        source.wait().expect("wait for child");
        let _ = std::fs::remove_file(&marker);
    }

    #[test]
    fn spawn_failure_is_fatal() {
        let config = StreamConfig {
            binary: "/nonexistent/echoview-transcriber".into(),
            ..StreamConfig::default()
        };
        let err = StreamSource::spawn(&config).expect_err("spawn should fail");
        assert!(matches!(err, EchoViewError::Spawn { .. }));
    }

    #[test]
    fn default_config_reproduces_observed_flags() {
        let args = StreamConfig::default().args();
        assert_eq!(
            args,
            vec![
                "-m",
                "models/ggml-tiny.en.bin",
                "--step",
                "4000",
                "--length",
                "8000",
                "-c",
                "0",
                "-t",
                "4",
                "-ac",
                "1024",
            ]
        );
    }

    #[test]
    fn config_deserializes_with_partial_overrides() {
        let config: StreamConfig =
            serde_json::from_str(r#"{"threads": 2, "model": "models/ggml-base.en.bin"}"#)
                .expect("deserialize config");
        assert_eq!(config.threads, 2);
        assert_eq!(config.model, PathBuf::from("models/ggml-base.en.bin"));
        // Untouched fields keep their defaults.
        assert_eq!(config.step_ms, 4_000);
        assert_eq!(config.audio_context, 1_024);
    }
}
