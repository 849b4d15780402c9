//! Paced reveal driver.
//!
//! Steps a session's draw to completion, sleeping one reveal interval after
//! every new number. The timer is injected: the browser build resolves a
//! `setTimeout` promise, tests use a recording fake.
//!
//! The session is borrowed only for the duration of each step, never across
//! a sleep, so the view stays free to read it (or record outcomes) while a
//! draw is running.

use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;

use crate::error::SessionError;
use crate::session::{Session, SessionStep};
use crate::types::DrawRecord;

/// Suspends the calling task for a while.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Start a draw on `session` and run it to completion.
///
/// `on_step` sees every step, after the session borrow is released. There is
/// no cancellation: once started, the draw always finishes.
pub async fn run_reveal<T, F>(
    session: &RefCell<Session>,
    timer: &T,
    mut on_step: F,
) -> Result<DrawRecord, SessionError>
where
    T: Timer,
    F: FnMut(&SessionStep),
{
    session.borrow_mut().start_draw()?;

    loop {
        let step = session.borrow_mut().advance_draw()?;
        on_step(&step);
        match step {
            SessionStep::Revealed { delay, .. } => timer.sleep(delay).await,
            SessionStep::Finished { record, .. } => return Ok(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::config::{DrawConfig, RevealTiming};
    use crate::money::Money;
    use crate::rng::DrawRng;

    /// Resolves immediately and keeps track of how long it was asked to wait.
    #[derive(Default)]
    struct FakeTimer {
        slept: Cell<Duration>,
        calls: Cell<u32>,
    }

    impl Timer for FakeTimer {
        fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
            self.slept.set(self.slept.get() + duration);
            self.calls.set(self.calls.get() + 1);
            std::future::ready(())
        }
    }

    #[test]
    fn test_six_of_49_sleeps_once_per_pick() {
        let session = RefCell::new(Session::with_rng(DrawRng::from_seed(7)));
        let timer = FakeTimer::default();
        let mut partials: Vec<Vec<u32>> = Vec::new();

        let record = pollster::block_on(run_reveal(&session, &timer, |step| {
            if let SessionStep::Revealed { numbers, .. } = step {
                partials.push(numbers.clone());
            }
        }))
        .unwrap();

        assert_eq!(record.numbers.len(), 6);
        assert!(record.numbers.windows(2).all(|w| w[0] < w[1]));
        assert!(record.numbers.iter().all(|&n| (1..=49).contains(&n)));
        assert_eq!(timer.calls.get(), 6);
        assert!(timer.slept.get() >= Duration::from_secs(6));
        assert_eq!(partials.len(), 6);

        let mut last = partials.last().unwrap().clone();
        last.sort_unstable();
        assert_eq!(last, record.numbers);
        assert!(!session.borrow().is_drawing());
    }

    #[test]
    fn test_session_readable_between_steps() {
        let session = RefCell::new(Session::with_rng(DrawRng::from_seed(3)));
        let timer = FakeTimer::default();
        let mut seen_drawing = 0;

        pollster::block_on(run_reveal(&session, &timer, |step| {
            if matches!(step, SessionStep::Revealed { .. }) {
                // The callback may read the session while the draw runs
                let s = session.borrow();
                assert!(s.is_drawing());
                seen_drawing += 1;
            }
        }))
        .unwrap();

        assert_eq!(seen_drawing, 6);
        assert_eq!(session.borrow().ledger().len(), 1);
    }

    #[test]
    fn test_custom_timing() {
        let s = Session::with_rng(DrawRng::from_seed(11)).with_timing(RevealTiming::from_millis(250));
        let session = RefCell::new(s);
        session
            .borrow_mut()
            .set_config(DrawConfig::new(4, 4, Money::from_cents(100)))
            .unwrap();
        let timer = FakeTimer::default();

        let record = pollster::block_on(run_reveal(&session, &timer, |_| {})).unwrap();
        assert_eq!(record.numbers, vec![1, 2, 3, 4]);
        assert_eq!(timer.slept.get(), Duration::from_millis(1000));
    }

    #[test]
    fn test_second_reveal_refused_while_running() {
        let session = RefCell::new(Session::with_rng(DrawRng::from_seed(5)));
        session.borrow_mut().start_draw().unwrap();
        let timer = FakeTimer::default();

        let result = pollster::block_on(run_reveal(&session, &timer, |_| {}));
        assert_eq!(result, Err(SessionError::DrawInProgress));
        assert_eq!(timer.calls.get(), 0);
    }
}
