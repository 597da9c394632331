/// User-facing message for a failed country lookup by `identifier` (code or name).
#[must_use]
pub fn error_message(status: u16, identifier: &str) -> String {
    match status {
        404 => format!("country \"{identifier}\" was not found"),
        429 => "too many requests; try again later".to_string(),
        500 | 502 | 503 | 504 => "country service is currently unavailable".to_string(),
        other => format!("country lookup failed (HTTP status {other})"),
    }
}
