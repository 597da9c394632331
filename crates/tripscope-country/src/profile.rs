//! Display-ready view of a [`Country`].

use serde::Serialize;

use crate::types::Country;

/// Flattened, preformatted country facts for rendering.
///
/// Fields are `None` when the source record has nothing to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryProfile {
    pub code: String,
    pub name: String,
    pub native_name: Option<String>,
    pub flag_url: Option<String>,
    pub capital: Option<String>,
    pub population: u64,
    pub languages: Option<String>,
    pub currencies: Option<String>,
    pub region: String,
    pub calling_code: Option<String>,
}

impl From<&Country> for CountryProfile {
    fn from(country: &Country) -> Self {
        Self {
            code: country.cca2.clone(),
            name: country.name.common.clone(),
            native_name: native_name(country),
            flag_url: country.flags.png.clone(),
            capital: country.capital.first().cloned(),
            population: country.population,
            languages: languages(country),
            currencies: currencies(country),
            region: region(country),
            calling_code: calling_code(country),
        }
    }
}

/// Common name in the first native language (ordered by language code).
fn native_name(country: &Country) -> Option<String> {
    country
        .name
        .native_name
        .values()
        .next()
        .and_then(|n| n.common.clone())
        .filter(|n| !n.is_empty())
}

fn languages(country: &Country) -> Option<String> {
    if country.languages.is_empty() {
        return None;
    }
    Some(
        country
            .languages
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// `"Euro (€), Swiss franc (Fr.)"`; the code stands in for a missing symbol.
fn currencies(country: &Country) -> Option<String> {
    if country.currencies.is_empty() {
        return None;
    }
    Some(
        country
            .currencies
            .iter()
            .map(|(code, currency)| {
                let name = currency.name.as_deref().unwrap_or(code);
                let symbol = currency
                    .symbol
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .unwrap_or(code);
                format!("{name} ({symbol})")
            })
            .collect::<Vec<_>>()
            .join(", "),
    )
}

fn region(country: &Country) -> String {
    match country.subregion.as_deref().filter(|s| !s.is_empty()) {
        Some(sub) if !country.region.is_empty() => format!("{}, {sub}", country.region),
        Some(sub) => sub.to_string(),
        None => country.region.clone(),
    }
}

/// Root plus the first suffix, e.g. `+49`. Countries sharing a root (like
/// `+1`) list many suffixes; only the first is shown.
fn calling_code(country: &Country) -> Option<String> {
    let root = country.idd.root.as_deref().filter(|r| !r.is_empty())?;
    let suffix = country.idd.suffixes.first().map_or("", String::as_str);
    Some(format!("{root}{suffix}"))
}

/// Groups digits in threes: `83240525` becomes `"83,240,525"`.
#[must_use]
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
