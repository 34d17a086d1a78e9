use std::time::Duration;
use std::thread;
use rand::Rng;
use log::info;

/// Uniform pick in `[min_secs, max_secs]`. Bounds are checked by `ScrapeConfig::validate`.
pub fn random_delay_duration(min_secs: f64, max_secs: f64) -> Duration {
    if max_secs <= min_secs {
        return Duration::from_secs_f64(min_secs.max(0.0));
    }
    let mut rng = rand::thread_rng();
    Duration::from_secs_f64(rng.gen_range(min_secs..=max_secs))
}

pub fn random_request_delay(min_secs: f64, max_secs: f64) {
    let delay = random_delay_duration(min_secs, max_secs);
    if delay.is_zero() {
        return;
    }
    info!("Waiting for {:.2} seconds...", delay.as_secs_f64());
    thread::sleep(delay);
}
