/// OS signal wiring — maps process signals onto the walker's controls.
///
/// | Signal            | Action                                  |
/// |-------------------|-----------------------------------------|
/// | `SIGUSR1`         | [`Walker::request_status`]              |
/// | `SIGUSR2`         | [`Walker::increase_depth`] by the step  |
/// | `SIGINT`/`SIGTERM`| [`CancelToken::cancel`]                 |
///
/// Signals are consumed on a dedicated thread through `signal-hook`'s
/// iterator, so no work happens inside an async-signal handler.
use findext_core::{CancelToken, Walker};

#[cfg(unix)]
pub use unix::install;

#[cfg(not(unix))]
pub use fallback::install;

#[cfg(unix)]
mod unix {
    use super::{CancelToken, Walker};
    use anyhow::Context;
    use signal_hook::consts::{SIGINT, SIGTERM, SIGUSR1, SIGUSR2};
    use signal_hook::iterator::{Handle, Signals};
    use std::thread;
    use tracing::{debug, warn};

    /// Running signal thread. Call [`SignalRelay::close`] once the walk is over.
    pub struct SignalRelay {
        handle: Handle,
        thread: Option<thread::JoinHandle<()>>,
    }

    impl SignalRelay {
        /// Stop listening and join the signal thread.
        pub fn close(mut self) {
            self.handle.close();
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }

    pub fn install(
        walker: Walker,
        cancel: CancelToken,
        depth_step: i64,
    ) -> anyhow::Result<SignalRelay> {
        let mut signals = Signals::new([SIGUSR1, SIGUSR2, SIGINT, SIGTERM])
            .context("failed to register signal handlers")?;
        let handle = signals.handle();

        let thread = thread::Builder::new()
            .name("findext-signals".into())
            .spawn(move || {
                for signal in signals.forever() {
                    match signal {
                        SIGUSR1 => {
                            if !walker.request_status() {
                                debug!("Status request already pending");
                            }
                        }
                        SIGUSR2 => {
                            walker.increase_depth(depth_step);
                        }
                        _ => {
                            warn!("Signal received, terminate...");
                            cancel.cancel();
                        }
                    }
                }
            })
            .context("failed to spawn signal thread")?;

        Ok(SignalRelay {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(not(unix))]
mod fallback {
    use super::{CancelToken, Walker};
    use tracing::debug;

    /// No signal thread on this platform; only the deadline applies.
    pub struct SignalRelay;

    impl SignalRelay {
        pub fn close(self) {}
    }

    pub fn install(
        _walker: Walker,
        _cancel: CancelToken,
        _depth_step: i64,
    ) -> anyhow::Result<SignalRelay> {
        debug!("Signal controls are only available on Unix");
        Ok(SignalRelay)
    }
}
