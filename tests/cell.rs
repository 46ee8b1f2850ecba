mod support;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use retry_once::TryOnceCell;
use support::flaky::{AttemptError, Flaky};

#[derive(Debug)]
struct Connection {
    id: usize,
}

#[test]
fn failed_init_is_retried_on_next_use() {
    let cell: TryOnceCell<Connection> = TryOnceCell::new();
    let flaky = Flaky::new(1);

    let first = cell.get_or_try_init(|| flaky.attempt().map(|()| Connection { id: 1 }));
    assert_eq!(first.unwrap_err(), AttemptError { attempt: 1 });
    assert!(cell.get().is_none());

    let second = cell
        .get_or_try_init(|| flaky.attempt().map(|()| Connection { id: 2 }))
        .unwrap();
    assert_eq!(second.id, 2);
    assert_eq!(cell.get().map(|c| c.id), Some(2));
}

#[test]
fn concurrent_init_runs_once_and_shares_value() {
    const THREADS: usize = 12;

    let cell = Arc::new(TryOnceCell::new());
    let inits = Arc::new(AtomicUsize::new(0));
    let start = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|n| {
            let cell = Arc::clone(&cell);
            let inits = Arc::clone(&inits);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                cell.get_or_try_init(|| {
                    inits.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, AttemptError>(Connection { id: n })
                })
                .unwrap()
            })
        })
        .collect();

    let values: Vec<Arc<Connection>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(inits.load(Ordering::SeqCst), 1);
    assert!(values.iter().all(|v| Arc::ptr_eq(v, &values[0])));
}

#[test]
fn get_or_init_after_failures() {
    let cell = TryOnceCell::new();
    assert_eq!(cell.get_or_try_init(|| Err::<u32, _>("down")), Err("down"));
    assert_eq!(*cell.get_or_init(|| 42), 42);
    assert_eq!(cell.get_or_try_init(|| Err("ignored")), Ok(Arc::new(42)));
}
