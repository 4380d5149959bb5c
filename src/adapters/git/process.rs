//! Running git with a time budget

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::core::ports::OracleError;

/// How often a running child is polled for completion
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Captured result of a finished process
#[derive(Debug)]
pub struct Captured {
    /// Exit status
    pub status: ExitStatus,
    /// Standard output
    pub stdout: Vec<u8>,
    /// Standard error
    pub stderr: Vec<u8>,
}

/// Run a command, killing it if it outlives `timeout`
///
/// Output pipes are drained on helper threads so a chatty child cannot
/// block on a full pipe while we wait for it.
pub fn run_with_timeout(mut command: Command, timeout: Duration) -> Result<Captured, OracleError> {
    let program = command.get_program().to_string_lossy().to_string();
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => OracleError::ExecutableNotFound(program.clone()),
            _ => OracleError::Io(err),
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_reader = thread::spawn(move || drain(stdout));
    let stderr_reader = thread::spawn(move || drain(stderr));

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {},
            Err(err) => {
                stop(&mut child, &program);
                return Err(OracleError::Io(err));
            },
        }
        if Instant::now() >= deadline {
            // The readers finish once the pipes close
            stop(&mut child, &program);
            return Err(OracleError::Timeout { timeout });
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(Captured {
        status,
        stdout: stdout_reader.join().unwrap_or_default(),
        stderr: stderr_reader.join().unwrap_or_default(),
    })
}

/// Kill and reap an abandoned child
fn stop(child: &mut Child, program: &str) {
    if let Err(err) = child.kill() {
        debug!("could not kill {program} (pid {}): {err}", child.id());
    }
    if let Err(err) = child.wait() {
        debug!("could not reap {program} (pid {}): {err}", child.id());
    }
}

fn drain<R: Read>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}
