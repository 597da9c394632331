use crate::error::PlacesError;
use crate::types::{NormalizedPlace, Point, RawPlaceRecord};

pub(crate) const UNNAMED_PLACE: &str = "unnamed place";
pub(crate) const DEFAULT_CATEGORY: &str = "point of interest";

/// Converts a raw search match into its display shape.
///
/// The label's first comma-separated segment becomes the name and the rest
/// the address.
///
/// # Errors
///
/// Returns [`PlacesError::InvalidCoordinates`] if latitude or longitude is
/// missing, unparsable, non-finite, or out of range.
pub fn normalize_place(raw: RawPlaceRecord) -> Result<NormalizedPlace, PlacesError> {
    let geometry = parse_geometry(&raw)?;
    let (name, address) = split_label(raw.display_name.as_deref());

    let category = raw
        .place_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    Ok(NormalizedPlace {
        name,
        address,
        category,
        geometry,
        osm_id: raw.osm_id,
        osm_type: raw.osm_type,
    })
}

/// Normalizes every record, dropping those with unusable coordinates.
///
/// Returns the surviving places in input order and the number rejected.
pub fn normalize_places(raws: Vec<RawPlaceRecord>) -> (Vec<NormalizedPlace>, usize) {
    let mut places = Vec::with_capacity(raws.len());
    let mut rejected = 0;

    for raw in raws {
        match normalize_place(raw) {
            Ok(place) => places.push(place),
            Err(e) => {
                tracing::warn!(error = %e, "dropping place with unusable coordinates");
                rejected += 1;
            }
        }
    }

    (places, rejected)
}

fn split_label(label: Option<&str>) -> (String, String) {
    let Some(label) = label else {
        return (UNNAMED_PLACE.to_string(), String::new());
    };

    let mut segments = label.split(',').map(str::trim);
    let name = segments
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(UNNAMED_PLACE)
        .to_string();
    let address = segments
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    (name, address)
}

fn parse_geometry(raw: &RawPlaceRecord) -> Result<Point, PlacesError> {
    let invalid = |reason: &str| PlacesError::InvalidCoordinates {
        osm_id: raw.osm_id,
        reason: reason.to_string(),
    };

    let lat = raw
        .lat
        .as_ref()
        .ok_or_else(|| invalid("missing latitude"))?
        .to_degrees()
        .ok_or_else(|| invalid("latitude is not a finite number"))?;
    let lon = raw
        .lon
        .as_ref()
        .ok_or_else(|| invalid("missing longitude"))?
        .to_degrees()
        .ok_or_else(|| invalid("longitude is not a finite number"))?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(invalid("coordinates out of range"));
    }

    Ok(Point { lon, lat })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
