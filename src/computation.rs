use std::thread::{spawn, JoinHandle};
use std::time::Duration;

use egui::Context;

/// Work running on a background thread whose result is picked up by the UI loop.
pub enum Computation<T, E> {
    Empty,
    Computing(JoinHandle<(Context, Result<T, E>)>),
    Ok(T),
    Err(E)
}

impl<T, E> Computation<T, E> {
    /// Moves a finished thread's result into `Ok`/`Err`. Returns `true` on the
    /// frame the work completed.
    pub fn check_complete(&mut self) -> bool {
        let Computation::Computing(handle) = self else { return false };
        if !handle.is_finished() {
            return false;
        }

        let Computation::Computing(handle) = std::mem::replace(self, Computation::Empty) else { return false };
        match handle.join() {
            Ok((context, result)) => {
                *self = match result {
                    Ok(value) => Computation::Ok(value),
                    Err(error) => Computation::Err(error)
                };
                context.request_repaint();
            }
            Err(_) => log::error!("background task panicked"),
        }
        true
    }

    pub fn is_computing(&self) -> bool {
        matches!(self, Computation::Computing(_))
    }

    pub fn take_if_done(&mut self) -> Option<Result<T, E>> {
        match std::mem::replace(self, Computation::Empty) {
            Computation::Ok(value) => Some(Ok(value)),
            Computation::Err(error) => Some(Err(error)),
            other => { *self = other; None }
        }
    }

    /// `check_complete` followed by `take_if_done`.
    pub fn poll(&mut self) -> Option<Result<T, E>> {
        self.check_complete();
        self.take_if_done()
    }
}

impl<T: Send + 'static, E: Send + 'static> Computation<T, E> {
    pub fn begin<F: 'static + Send + FnOnce() -> Result<T, E>>(&mut self, ctx: Context, f: F) {
        *self = Computation::Computing(spawn(move || {
            let value = f();
            ctx.request_repaint_after(Duration::from_millis(100));
            (ctx, value)
        }))
    }
}

impl<T, E> Default for Computation<T, E> {
    fn default() -> Self {
        Computation::Empty
    }
}
