/// Process spawning and deadline-bounded supervision
use crate::types::{EngineError, ExecutionResult, Result, TIMEOUT_SENTINEL};
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Grace period between SIGTERM and SIGKILL on deadline expiry.
const TERM_GRACE: Duration = Duration::from_millis(100);

/// Poll interval while waiting for the child to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Spawn `interpreter` on `script`, feed `stdin_data`, and wait until exit
/// or `timeout`, whichever comes first. Hitting the deadline terminates and
/// reaps the child before this returns, and the sentinel text fully
/// replaces whatever the child had already written.
pub fn run_with_deadline(
    interpreter: &[String],
    script: &Path,
    stdin_data: &str,
    timeout: Duration,
) -> Result<ExecutionResult> {
    let (program, args) = interpreter
        .split_first()
        .ok_or_else(|| EngineError::Config("empty interpreter command".to_string()))?;

    let start = Instant::now();
    let mut cmd = Command::new(program);
    cmd.args(args)
        .arg(script)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    // Give the child its own process group so deadline termination reaches
    // any grandchildren it spawned, not just the direct child.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        unsafe {
            cmd.pre_exec(|| {
                if libc::setpgid(0, 0) != 0 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }
    }

    let mut child = cmd.spawn().map_err(EngineError::Launch)?;
    let pid = child.id();
    log::debug!("spawned {} (pid {}) for {}", program, pid, script.display());

    // Drain both output streams on background threads so a chatty child
    // cannot fill a pipe buffer and stall the wait loop.
    let stdout_handle = spawn_reader(child.stdout.take());
    let stderr_handle = spawn_reader(child.stderr.take());

    // Feed stdin off-thread as well: a child that never reads its input
    // must still be supervised against the deadline. Write errors (broken
    // pipe from an early exit) are not execution failures.
    let stdin_handle = child.stdin.take().map(|mut stdin| {
        let data = stdin_data.as_bytes().to_vec();
        thread::spawn(move || {
            let _ = stdin.write_all(&data);
            // stdin closes when the handle drops
        })
    });

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = collect(stdout_handle);
                let stderr = collect(stderr_handle);
                if let Some(handle) = stdin_handle {
                    let _ = handle.join();
                }

                // Ordering contract: stdout first, then stderr, no
                // separator. Not chronological interleaving.
                let mut combined = String::from_utf8_lossy(&stdout).into_owned();
                combined.push_str(&String::from_utf8_lossy(&stderr));

                return Ok(ExecutionResult {
                    combined_output: combined,
                    timed_out: false,
                    exit_code: status.code(),
                    wall_time_ms: start.elapsed().as_millis() as u64,
                });
            }
            Ok(None) => {
                if start.elapsed() >= timeout {
                    log::info!("pid {} exceeded {:?} deadline, terminating", pid, timeout);
                    terminate(&mut child, pid);

                    // Join the readers so their pipe ends close, then
                    // discard the partial output: the sentinel replaces it.
                    let _ = collect(stdout_handle);
                    let _ = collect(stderr_handle);
                    if let Some(handle) = stdin_handle {
                        let _ = handle.join();
                    }

                    return Ok(ExecutionResult {
                        combined_output: TIMEOUT_SENTINEL.to_string(),
                        timed_out: true,
                        exit_code: None,
                        wall_time_ms: start.elapsed().as_millis() as u64,
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(EngineError::Io(e)),
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(stream: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    stream.map(|mut stream| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stream.read_to_end(&mut buffer);
            buffer
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Terminate the child's whole process group, gracefully then forcefully,
/// and reap so no zombie outlives the call.
fn terminate(child: &mut Child, pid: u32) {
    #[cfg(unix)]
    unsafe {
        libc::kill(-(pid as i32), libc::SIGTERM);
    }

    thread::sleep(TERM_GRACE);

    #[cfg(unix)]
    unsafe {
        libc::kill(-(pid as i32), libc::SIGKILL);
    }

    let _ = child.wait();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh() -> Vec<String> {
        vec!["sh".to_string()]
    }

    fn write_script(body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("runbox-exec-{}.sh", uuid::Uuid::new_v4()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn captures_stdout_then_stderr() {
        let script = write_script("printf out; printf err >&2");
        let result =
            run_with_deadline(&sh(), &script, "", Duration::from_secs(5)).unwrap();
        assert_eq!(result.combined_output, "outerr");
        assert!(!result.timed_out);
        assert_eq!(result.exit_code, Some(0));
        let _ = std::fs::remove_file(&script);
    }

    #[test]
    fn pipes_stdin_to_child() {
        let script = write_script("cat");
        let result =
            run_with_deadline(&sh(), &script, "hello stdin", Duration::from_secs(5)).unwrap();
        assert_eq!(result.combined_output, "hello stdin");
        let _ = std::fs::remove_file(&script);
    }

    #[test]
    fn deadline_replaces_output_with_sentinel() {
        let script = write_script("echo partial; sleep 30");
        let started = Instant::now();
        let result =
            run_with_deadline(&sh(), &script, "", Duration::from_millis(200)).unwrap();
        assert!(result.timed_out);
        assert_eq!(result.combined_output, TIMEOUT_SENTINEL);
        assert_eq!(result.exit_code, None);
        // The child was killed and reaped, not waited out.
        assert!(started.elapsed() < Duration::from_secs(10));
        let _ = std::fs::remove_file(&script);
    }

    #[test]
    fn missing_interpreter_is_a_launch_failure() {
        let script = write_script("true");
        let interpreter = vec!["runbox-no-such-interpreter".to_string()];
        let err =
            run_with_deadline(&interpreter, &script, "", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, EngineError::Launch(_)));
        let _ = std::fs::remove_file(&script);
    }

    #[test]
    fn nonzero_exit_is_a_result_not_an_error() {
        let script = write_script("printf oops >&2; exit 3");
        let result =
            run_with_deadline(&sh(), &script, "", Duration::from_secs(5)).unwrap();
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(result.combined_output, "oops");
        assert!(!result.timed_out);
        let _ = std::fs::remove_file(&script);
    }
}
