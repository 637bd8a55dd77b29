use super::*;

#[test]
fn sixty_hertz_period() {
    let clock = FrameClock::new(60);
    assert_eq!(clock.period(), Some(Duration::from_secs(1) / 60));
}

#[test]
fn zero_rate_disables_pacing() {
    assert_eq!(FrameClock::new(0).period(), None);
    assert_eq!(FrameClock::unthrottled().period(), None);
}

#[test]
fn unthrottled_wait_returns_immediately() {
    let mut clock = FrameClock::unthrottled();
    let start = Instant::now();
    for _ in 0..1000 {
        clock.wait();
    }
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn wait_paces_frames() {
    let mut clock = FrameClock::new(200);
    let start = Instant::now();
    for _ in 0..4 {
        clock.wait();
    }
    assert!(start.elapsed() >= Duration::from_millis(15));
}
