use std::sync::{Arc, Mutex};
use std::time::Duration;

use extractor_engine::ExpiryTimer;

fn recorder() -> (Arc<Mutex<Vec<u64>>>, impl Fn(u64) -> Box<dyn FnOnce() + Send>) {
    let fired = Arc::new(Mutex::new(Vec::new()));
    let sink = fired.clone();
    let make = move |id: u64| {
        let sink = sink.clone();
        Box::new(move || sink.lock().unwrap().push(id)) as Box<dyn FnOnce() + Send>
    };
    (fired, make)
}

#[tokio::test(start_paused = true)]
async fn fires_after_the_delay() {
    let (fired, make) = recorder();
    let mut timer = ExpiryTimer::new();

    timer.schedule(Duration::from_millis(5000), make(1));

    tokio::time::sleep(Duration::from_millis(4999)).await;
    assert!(fired.lock().unwrap().is_empty());

    tokio::time::sleep(Duration::from_millis(2)).await;
    tokio::task::yield_now().await;
    assert_eq!(*fired.lock().unwrap(), vec![1]);
}

#[tokio::test(start_paused = true)]
async fn rescheduling_cancels_the_previous_timer() {
    let (fired, make) = recorder();
    let mut timer = ExpiryTimer::new();

    timer.schedule(Duration::from_millis(5000), make(1));
    tokio::time::sleep(Duration::from_millis(3000)).await;
    timer.schedule(Duration::from_millis(5000), make(2));

    // The first deadline passes without firing.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    tokio::task::yield_now().await;
    assert!(fired.lock().unwrap().is_empty());

    // The window restarted at the second call.
    tokio::time::sleep(Duration::from_millis(2600)).await;
    tokio::task::yield_now().await;
    assert_eq!(*fired.lock().unwrap(), vec![2]);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_timer_cancels_it() {
    let (fired, make) = recorder();
    let mut timer = ExpiryTimer::new();
    timer.schedule(Duration::from_millis(10), make(1));
    drop(timer);

    tokio::time::sleep(Duration::from_millis(50)).await;
    tokio::task::yield_now().await;
    assert!(fired.lock().unwrap().is_empty());
}
