use std::time::Duration;

use futures::{channel::oneshot, pin_mut, select, FutureExt};

/// Periodic task with an immediate first run.
///
/// Cancellation goes through the `cancel` channel: once the receiving end is
/// closed (or dropped), the loop stops before its next tick. Work started by
/// an earlier tick is not aborted.
pub async fn run_poller<F>(every: Duration, mut cancel: oneshot::Sender<()>, mut tick: F)
where
    F: FnMut(),
{
    let mut cancellation = cancel.cancellation().fuse();
    loop {
        tick();
        let delay = sleep_for(every).fuse();
        pin_mut!(delay);
        select! {
            _ = cancellation => return,
            _ = delay => (),
        }
    }
}

async fn sleep_for(d: Duration) {
    wasm_timer::Delay::new(d).await.expect("failed sleeping")
}

/// Logout teardown: stops both pollers, then notifies the owner.
///
/// Closing the cancellers should be unneeded as they close on drop, but
/// better safe than sorry; doing it before `on_logout` runs guarantees no
/// tick can fire once the owner starts tearing the page down. Fetches
/// already in flight are left to resolve into a dead scope.
pub fn stop_pollers_then<F>(
    users_canceller: &mut oneshot::Receiver<()>,
    feed_canceller: &mut oneshot::Receiver<()>,
    on_logout: F,
) where
    F: FnOnce(),
{
    users_canceller.close();
    feed_canceller.close();
    on_logout();
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        thread,
    };

    #[test]
    fn first_tick_fires_immediately() {
        let (cancel, mut canceller) = oneshot::channel();
        let ticks = Arc::new(AtomicUsize::new(0));
        let seen = ticks.clone();
        let poller = thread::spawn(move || {
            futures::executor::block_on(run_poller(Duration::from_secs(3600), cancel, move || {
                seen.fetch_add(1, Ordering::SeqCst);
            }))
        });
        thread::sleep(Duration::from_millis(50));
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        canceller.close();
        poller.join().expect("poller thread panicked");
    }

    #[test]
    fn cancelled_poller_stops_ticking() {
        let (cancel, mut canceller) = oneshot::channel();
        let ticks = Arc::new(AtomicUsize::new(0));
        let seen = ticks.clone();
        let poller = thread::spawn(move || {
            futures::executor::block_on(run_poller(Duration::from_millis(5), cancel, move || {
                seen.fetch_add(1, Ordering::SeqCst);
            }))
        });
        thread::sleep(Duration::from_millis(60));
        assert!(ticks.load(Ordering::SeqCst) >= 2);
        canceller.close();
        poller.join().expect("poller thread panicked");
        let after_cancel = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(60));
        assert_eq!(ticks.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn logout_cancels_both_pollers_before_the_callback() {
        let (users_cancel, mut users_canceller) = oneshot::channel::<()>();
        let (feed_cancel, mut feed_canceller) = oneshot::channel::<()>();
        let calls = std::cell::Cell::new(0);
        stop_pollers_then(&mut users_canceller, &mut feed_canceller, || {
            assert!(
                users_cancel.is_canceled(),
                "users poller was still live when the logout callback ran"
            );
            assert!(
                feed_cancel.is_canceled(),
                "feed poller was still live when the logout callback ran"
            );
            calls.set(calls.get() + 1);
        });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn logout_stops_a_running_poller() {
        let (cancel, mut canceller) = oneshot::channel();
        let (idle_cancel, mut idle_canceller) = oneshot::channel::<()>();
        drop(idle_cancel);
        let ticks = Arc::new(AtomicUsize::new(0));
        let seen = ticks.clone();
        let poller = thread::spawn(move || {
            futures::executor::block_on(run_poller(Duration::from_millis(5), cancel, move || {
                seen.fetch_add(1, Ordering::SeqCst);
            }))
        });
        thread::sleep(Duration::from_millis(30));
        stop_pollers_then(&mut canceller, &mut idle_canceller, || ());
        poller.join().expect("poller thread panicked");
        let after_logout = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(60));
        assert_eq!(ticks.load(Ordering::SeqCst), after_logout);
    }
}
