/// Format a position in seconds as `m:ss`.
///
/// Unknown positions (NaN or infinite, e.g. a duration that has not loaded
/// yet) render as `00:00`. Minutes are not padded: `65.0` is `1:05`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "00:00".to_string();
    }
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
