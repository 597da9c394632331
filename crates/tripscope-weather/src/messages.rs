/// User-facing message for a failed weather lookup.
///
/// `city` is the name that was searched for, if the lookup was by name; it
/// only changes the wording of the not-found message.
#[must_use]
pub fn error_message(code: u16, city: Option<&str>) -> String {
    match code {
        401 => "invalid API key; check the OpenWeatherMap configuration".to_string(),
        404 => match city {
            Some(city) if !city.trim().is_empty() => {
                format!("city \"{city}\" was not found; check the spelling")
            }
            _ => "location not found; try a different location".to_string(),
        },
        429 => "too many requests; try again later".to_string(),
        500 | 502 | 503 | 504 => {
            "weather service is currently unavailable; try again later".to_string()
        }
        other => format!("weather lookup failed (code {other})"),
    }
}
