use crate::error::{Error, Result};
use std::fs;
use std::io::{self, BufRead, BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Build the encode command:
/// `<ffmpeg> -stats -n -i <input> [-vf <filter>] <args...> <output>`
///
/// `-n` makes ffmpeg refuse to overwrite, so a racing output is never clobbered.
pub fn build_encode_cmd(
    encode_binary: &Path,
    input: &Path,
    output: &Path,
    video_filter: Option<&str>,
    args: &[String],
) -> Command {
    let mut cmd = Command::new(encode_binary);
    cmd.arg("-stats").arg("-n").arg("-i").arg(input);

    if let Some(filter) = video_filter.filter(|f| !f.is_empty()) {
        cmd.arg("-vf").arg(filter);
    }

    cmd.args(args);
    cmd.arg(output);
    cmd
}

/// Shell-quoted rendering of a command, for logs
pub fn format_encode_cmd(cmd: &Command) -> String {
    let parts: Vec<String> = std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect();

    shlex::try_join(parts.iter().map(String::as_str)).unwrap_or_else(|_| parts.join(" "))
}

/// Copy `reader` to `writer` one line at a time until EOF.
///
/// Each line is flushed so ffmpeg's progress shows up as it happens. Returns the
/// number of bytes copied; a read or write error ends the copy.
pub fn drain_lines<R: Read, W: Write>(reader: R, mut writer: W) -> io::Result<u64> {
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    let mut total = 0u64;

    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line)?;
        if n == 0 {
            break;
        }
        writer.write_all(&line)?;
        writer.flush()?;
        total += n as u64;
    }

    Ok(total)
}

fn spawn_drain<R, W>(name: &'static str, reader: R, writer: W) -> JoinHandle<()>
where
    R: Read + Send + 'static,
    W: Write + Send + 'static,
{
    thread::spawn(move || match drain_lines(reader, writer) {
        Ok(bytes) => debug!(stream = name, bytes, "drain finished"),
        Err(e) => warn!(stream = name, error = %e, "drain stopped early"),
    })
}

fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> io::Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return child.wait().map(Some);
    };

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            kill_tree(child);
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(WAIT_POLL_INTERVAL);
    }
}

// Anything the encoder forked still holds our pipes, so the whole group has to go
// or the drains never see EOF.
#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    // SAFETY: kill(2) takes no pointers; a negative pid addresses the process group
    // created for this child in `run_encode`.
    let ret = unsafe { libc::kill(-(child.id() as libc::pid_t), libc::SIGKILL) };
    if ret != 0 {
        debug!(error = %io::Error::last_os_error(), "group kill failed, killing child only");
        kill_child(child);
    }
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    kill_child(child);
}

fn kill_child(child: &mut Child) {
    // The child may have exited between try_wait and kill
    if let Err(e) = child.kill() {
        debug!(error = %e, "kill after timeout failed");
    }
}

fn remove_partial_output(output: &Path) {
    match fs::remove_file(output) {
        Ok(()) => info!(output = %output.display(), "removed partial output"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(
            output = %output.display(),
            error = %e,
            "failed to remove partial output"
        ),
    }
}

/// Run a prepared encode command to completion.
///
/// stdout and stderr of the child are drained on two threads into this process's
/// stdout and stderr. Both drains are joined before returning. With a timeout the
/// child runs in its own process group, and expiry kills that group. On a non-zero
/// exit or timeout the partial `output` is removed.
pub fn run_encode(
    mut cmd: Command,
    input: &Path,
    output: &Path,
    timeout: Option<Duration>,
) -> Result<()> {
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    #[cfg(unix)]
    if timeout.is_some() {
        // Own group, so a timeout can kill ffmpeg together with anything it spawned
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let program = PathBuf::from(cmd.get_program());
    let mut child = cmd
        .spawn()
        .map_err(|source| Error::SpawnFailure { program, source })?;

    let mut drains = Vec::with_capacity(2);
    if let Some(stdout) = child.stdout.take() {
        drains.push(spawn_drain("stdout", stdout, io::stdout()));
    }
    if let Some(stderr) = child.stderr.take() {
        drains.push(spawn_drain("stderr", stderr, io::stderr()));
    }

    let waited = wait_with_timeout(&mut child, timeout);

    for handle in drains {
        if handle.join().is_err() {
            warn!("drain thread panicked");
        }
    }

    let reason = match waited {
        Ok(Some(status)) if status.success() => return Ok(()),
        Ok(Some(status)) => status.to_string(),
        Ok(None) => format!(
            "timed out after {}s",
            timeout.map(|t| t.as_secs_f64()).unwrap_or_default()
        ),
        Err(e) => format!("failed to wait for encoder: {}", e),
    };

    remove_partial_output(output);
    Err(Error::RuntimeFailure {
        input: input.to_path_buf(),
        reason,
    })
}

/// Transcode `input` into `output` with the given codec arguments
pub fn convert(
    encode_binary: &Path,
    input: &Path,
    output: &Path,
    video_filter: Option<&str>,
    args: &[String],
    timeout: Option<Duration>,
) -> Result<()> {
    let cmd = build_encode_cmd(encode_binary, input, output, video_filter, args);
    info!(command = %format_encode_cmd(&cmd), "calling encoder");
    run_encode(cmd, input, output, timeout)
}
