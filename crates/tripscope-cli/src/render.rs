//! Plain-text rendering of command results.

use std::fmt::Write as _;

use tripscope_country::{format_population, CountryProfile};
use tripscope_places::NearbySearch;
use tripscope_weather::WeatherReading;

use crate::explore::ExploreReport;

const NOT_AVAILABLE: &str = "not available";

pub(crate) fn render_explore(report: &ExploreReport) -> String {
    let mut out = render_weather(&report.weather);

    out.push('\n');
    match (&report.places, &report.places_error) {
        (Some(search), _) => out.push_str(&render_places(search)),
        (None, Some(err)) => {
            let _ = writeln!(out, "Places: unavailable ({err})");
        }
        (None, None) => out.push_str("Places: unavailable\n"),
    }

    out.push('\n');
    match (&report.country, &report.country_error) {
        (Some(profile), _) => out.push_str(&render_country(profile)),
        (None, Some(err)) => {
            let _ = writeln!(out, "Country: unavailable ({err})");
        }
        (None, None) => {
            let _ = writeln!(out, "Country: {NOT_AVAILABLE}");
        }
    }

    out
}

pub(crate) fn render_weather(reading: &WeatherReading) -> String {
    let mut out = String::new();

    let heading = match &reading.country_code {
        Some(cc) => format!("{}, {cc}", reading.location),
        None => reading.location.clone(),
    };
    let _ = writeln!(out, "{heading}");

    let description = reading.description.as_deref().unwrap_or("");
    let _ = write!(out, "  {}°C  {description}", whole_degrees(reading.temperature_c));
    if let Some(feels) = reading.feels_like_c {
        let _ = write!(out, " (feels like {}°C)", whole_degrees(feels));
    }
    out.push('\n');

    let mut details = Vec::new();
    if let Some(wind) = reading.wind_speed_ms {
        details.push(format!("wind {wind} m/s"));
    }
    if let Some(humidity) = reading.humidity_pct {
        details.push(format!("humidity {humidity}%"));
    }
    if let Some(pressure) = reading.pressure_hpa {
        details.push(format!("pressure {pressure} hPa"));
    }
    if !details.is_empty() {
        let _ = writeln!(out, "  {}", details.join("  "));
    }
    if let Some(at) = reading.observed_at {
        let _ = writeln!(out, "  observed {}", at.format("%Y-%m-%d %H:%M UTC"));
    }

    out
}

pub(crate) fn render_places(search: &NearbySearch) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Places within {} m of {}",
        search.radius_m, search.origin
    );

    if search.places.is_empty() {
        out.push_str("No places found nearby.\n");
    } else {
        let _ = writeln!(out, "{:<10}{:<20}NAME", "DIST", "CATEGORY");
        for nearby in &search.places {
            let place = &nearby.place;
            let distance = format!("{:.1} km", nearby.distance_km);
            let _ = writeln!(
                out,
                "{:<10}{:<20}{}",
                distance,
                capitalize(&place.category),
                place.name
            );
            if !place.address.is_empty() {
                let _ = writeln!(out, "{:<30}{}", "", place.address);
            }
            let _ = writeln!(out, "{:<30}{}", "", nearby.osm_link);
        }
    }

    if !search.failed_categories.is_empty() {
        let failed = search
            .failed_categories
            .iter()
            .map(|f| f.category.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "note: {} categor{} failed: {failed}",
            search.failed_categories.len(),
            if search.failed_categories.len() == 1 { "y" } else { "ies" }
        );
    }
    if search.rejected > 0 {
        let _ = writeln!(
            out,
            "note: {} result(s) dropped as malformed or with invalid coordinates",
            search.rejected
        );
    }

    out
}

pub(crate) fn render_country(profile: &CountryProfile) -> String {
    let mut out = String::new();

    match profile.native_name.as_deref() {
        Some(native) if native != profile.name => {
            let _ = writeln!(out, "{} ({native}) [{}]", profile.name, profile.code);
        }
        _ => {
            let _ = writeln!(out, "{} [{}]", profile.name, profile.code);
        }
    }

    let rows = [
        ("capital", profile.capital.clone()),
        ("population", Some(format_population(profile.population))),
        ("languages", profile.languages.clone()),
        ("currencies", profile.currencies.clone()),
        (
            "region",
            Some(profile.region.clone()).filter(|r| !r.is_empty()),
        ),
        ("calling code", profile.calling_code.clone()),
        ("flag", profile.flag_url.clone()),
    ];
    for (label, value) in rows {
        let _ = writeln!(
            out,
            "  {label:<14}{}",
            value.as_deref().unwrap_or(NOT_AVAILABLE)
        );
    }

    out
}

fn whole_degrees(celsius: f64) -> String {
    let rounded = celsius.round();
    // Avoid printing "-0".
    let rounded = if rounded.abs() < f64::EPSILON { 0.0 } else { rounded };
    format!("{rounded}")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
