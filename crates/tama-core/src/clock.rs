use chrono::Utc;

/// Wall-clock time as fractional epoch seconds, the unit `Pet::tick` and the
/// save file use.
pub fn now_epoch_secs() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
