use std::io::{self, Write};
use std::os::unix::io::RawFd;
use std::process;

use crate::error::Error;

/// Run `work` with stdout and stderr redirected into a throwaway pipe, then
/// restore both streams.
///
/// Restoration runs on every exit path, including when `work` unwinds.
/// Failures before any descriptor has been redirected (duplicating the
/// current streams, creating the pipe) come back as [`Error::Os`] and leave
/// stdio untouched. A failed `dup2` after that point leaves the descriptor
/// table in an unknown state and aborts the process instead.
pub fn with_suppressed_output<R>(work: impl FnOnce() -> Result<R, Error>) -> Result<R, Error> {
    let _restore = Redirect::begin()?;

    work()
}

/// Saved descriptor state for one suppression scope: created once on entry,
/// consumed exactly once by `Drop` on exit.
struct Redirect {
    saved_stdout: RawFd,
    saved_stderr: RawFd,
    pipe_read: RawFd,
    pipe_write: RawFd,
}

impl Redirect {
    fn begin() -> Result<Self, Error> {
        flush();

        let saved_stdout = unsafe { libc::dup(libc::STDOUT_FILENO) };
        if saved_stdout < 0 {
            return Err(Error::last_os("dup stdout"));
        }

        let saved_stderr = unsafe { libc::dup(libc::STDERR_FILENO) };
        if saved_stderr < 0 {
            let err = Error::last_os("dup stderr");
            unsafe { libc::close(saved_stdout) };
            return Err(err);
        }

        let mut pipe: [libc::c_int; 2] = [0; 2];
        if unsafe { libc::pipe(pipe.as_mut_ptr()) } < 0 {
            let err = Error::last_os("pipe");
            unsafe {
                libc::close(saved_stdout);
                libc::close(saved_stderr);
            }
            return Err(err);
        }

        // past this point the descriptor table is being rewritten; failing
        // halfway leaves stdio in a state we cannot hand back to the caller
        if unsafe { libc::dup2(pipe[1], libc::STDOUT_FILENO) } < 0 {
            process::abort();
        }
        if unsafe { libc::dup2(pipe[1], libc::STDERR_FILENO) } < 0 {
            process::abort();
        }

        Ok(Self {
            saved_stdout,
            saved_stderr,
            pipe_read: pipe[0],
            pipe_write: pipe[1],
        })
    }
}

impl Drop for Redirect {
    fn drop(&mut self) {
        flush();

        unsafe {
            if libc::dup2(self.saved_stderr, libc::STDERR_FILENO) < 0 {
                process::abort();
            }
            if libc::dup2(self.saved_stdout, libc::STDOUT_FILENO) < 0 {
                process::abort();
            }

            libc::close(self.saved_stdout);
            libc::close(self.saved_stderr);
            libc::close(self.pipe_write);
            // kept open until here so writers inside the scope never see EPIPE
            libc::close(self.pipe_read);
        }
    }
}

fn flush() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}
