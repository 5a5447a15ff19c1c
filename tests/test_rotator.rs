use lizzy_review::messages::STATUS_MESSAGES;
use lizzy_review::rotator::{spawn_rotation, MessageRotator, RotatorFrame, DEFAULT_FADE, DEFAULT_INTERVAL};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn start_shows_first_message() {
    let mut r = MessageRotator::default();
    let frame = r.start();
    assert_eq!(frame.index, 0);
    assert!(frame.visible);
    assert_eq!(frame.message, STATUS_MESSAGES[0]);
    assert_eq!(r.len(), 5);
}

#[test]
fn one_interval_plus_fade_advances_to_next_message() {
    let mut r = MessageRotator::default();
    r.start();
    let frames = r.advance(DEFAULT_INTERVAL + DEFAULT_FADE);
    assert_eq!(
        frames,
        vec![
            RotatorFrame { index: 0, message: STATUS_MESSAGES[0], visible: false },
            RotatorFrame { index: 1, message: STATUS_MESSAGES[1], visible: true },
        ]
    );
    assert_eq!(r.current_index(), 1);
    assert!(r.is_visible());
}

#[test]
fn message_is_hidden_during_fade() {
    let mut r = MessageRotator::default();
    r.start();
    r.advance(ms(2600));
    assert!(!r.is_visible());
    assert_eq!(r.current_index(), 0);
    assert_eq!(r.time_until_next(), Some(ms(200)));
    r.advance(ms(200));
    assert!(r.is_visible());
    assert_eq!(r.current_index(), 1);
}

#[test]
fn five_cycles_wrap_around() {
    let mut r = MessageRotator::default();
    r.start();
    let frames = r.advance(DEFAULT_INTERVAL * 5 + DEFAULT_FADE);
    assert_eq!(frames.len(), 10);
    assert_eq!(r.current_index(), 0);
    assert!(r.is_visible());
}

#[test]
fn small_steps_match_one_big_step() {
    let mut stepped = MessageRotator::default();
    stepped.start();
    let mut frames = Vec::new();
    for _ in 0..140 {
        frames.extend(stepped.advance(ms(100)));
    }
    let mut jumped = MessageRotator::default();
    jumped.start();
    assert_eq!(jumped.advance(ms(14_000)), frames);
    assert_eq!(stepped.current_index(), jumped.current_index());
}

#[test]
fn stop_halts_rotation() {
    let mut r = MessageRotator::default();
    r.start();
    r.stop();
    assert!(!r.is_active());
    assert!(r.advance(ms(10_000)).is_empty());
    assert_eq!(r.current_index(), 0);
}

#[tokio::test(start_paused = true)]
async fn driver_emits_frames_until_stopped() {
    let frames: Arc<Mutex<Vec<RotatorFrame>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = frames.clone();
    let handle = spawn_rotation(MessageRotator::default(), move |f| sink.lock().unwrap().push(f));

    tokio::time::sleep(ms(2850)).await;
    {
        let seen = frames.lock().unwrap();
        assert_eq!(seen.len(), 3, "frames: {seen:?}");
        assert!(seen[0].visible && seen[0].index == 0);
        assert!(!seen[1].visible && seen[1].index == 0);
        assert!(seen[2].visible && seen[2].index == 1);
    }

    let rotator = handle.stop().await.expect("rotation task finished");
    assert!(!rotator.is_active());
    let count = frames.lock().unwrap().len();
    tokio::time::sleep(ms(10_000)).await;
    assert_eq!(frames.lock().unwrap().len(), count);
}

#[tokio::test(start_paused = true)]
async fn dropping_handle_cancels_rotation() {
    let frames: Arc<Mutex<Vec<RotatorFrame>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = frames.clone();
    let handle = spawn_rotation(MessageRotator::default(), move |f| sink.lock().unwrap().push(f));
    tokio::task::yield_now().await;
    drop(handle);
    tokio::time::sleep(ms(10_000)).await;
    assert!(frames.lock().unwrap().len() <= 1);
}
