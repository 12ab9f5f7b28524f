// File: crates/demo/src/load.rs
// Summary: Loads the country CSV into observations (column lookup, alias cleanup, missing metrics dropped).

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use coalviz_core::Observation;

pub const COL_COUNTRY: &str = "Country Name";
pub const COL_YEAR: &str = "Year";
pub const COL_COAL: &str = "Coal_Percentage_Value";
pub const COL_CONSUMPTION: &str = "Electricity_Consumption_Value";

/// Countries preselected when no `--country` flag is given.
pub const DEFAULT_COUNTRIES: &[&str] = &["United States", "China", "India", "Germany", "South Africa"];

const ALIASES: &[(&str, &str)] = &[("Korea, Rep", "South Korea")];

// Cell spellings treated as a missing value.
const MISSING: &[&str] = &["", "nan", "na", "n/a", "null", "none"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub kept: usize,
    pub dropped_missing: usize,
}

pub fn load_csv(path: &Path) -> Result<(Vec<Observation>, LoadStats)> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    load_from_reader(file).with_context(|| format!("reading {}", path.display()))
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<(Vec<Observation>, LoadStats)> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();
    tracing::debug!(?headers, "csv headers");

    let idx = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("missing column '{name}'"))
    };
    let i_country = idx(COL_COUNTRY)?;
    let i_year = idx(COL_YEAR)?;
    let i_coal = idx(COL_COAL)?;
    let i_cons = idx(COL_CONSUMPTION)?;

    let mut out = Vec::new();
    let mut stats = LoadStats::default();
    for rec in rdr.records() {
        let rec = rec?;
        stats.rows += 1;
        let line = rec.position().map(|p| p.line()).unwrap_or(0);
        let cell = |i: usize| rec.get(i).unwrap_or("");

        let coal = parse_metric(cell(i_coal)).with_context(|| format!("line {line}: column '{COL_COAL}'"))?;
        let cons = parse_metric(cell(i_cons)).with_context(|| format!("line {line}: column '{COL_CONSUMPTION}'"))?;
        let (Some(x), Some(y)) = (coal, cons) else {
            stats.dropped_missing += 1;
            continue;
        };

        let year = parse_year(cell(i_year)).with_context(|| format!("line {line}: column '{COL_YEAR}'"))?;
        let country = normalize_country(cell(i_country));
        if country.is_empty() {
            anyhow::bail!("line {line}: empty '{COL_COUNTRY}'");
        }
        out.push(Observation::new(country, year, x, y));
        stats.kept += 1;
    }
    Ok((out, stats))
}

/// Map known alternative spellings to their display name.
pub fn normalize_country(raw: &str) -> String {
    let name = raw.trim();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// `Ok(None)` for a missing value; an error for anything non-numeric.
pub fn parse_metric(s: &str) -> Result<Option<f64>> {
    let s = s.trim();
    if MISSING.iter().any(|m| s.eq_ignore_ascii_case(m)) {
        return Ok(None);
    }
    let v: f64 = s.parse().with_context(|| format!("not a number: '{s}'"))?;
    if v.is_finite() {
        Ok(Some(v))
    } else {
        Ok(None)
    }
}

/// Accepts integral years written as floats ("2000.0").
pub fn parse_year(s: &str) -> Result<i32> {
    let s = s.trim();
    if let Ok(y) = s.parse::<i32>() {
        return Ok(y);
    }
    let f: f64 = s.parse().with_context(|| format!("not a year: '{s}'"))?;
    if f.fract() != 0.0 || !f.is_finite() || f.abs() > i32::MAX as f64 {
        anyhow::bail!("not a whole year: '{s}'");
    }
    Ok(f as i32)
}

/// Default countries that actually occur in the data, in preset order.
pub fn default_selection<'a>(available: &[&'a str]) -> Vec<&'a str> {
    DEFAULT_COUNTRIES
        .iter()
        .filter_map(|want| available.iter().copied().find(|c| c == want))
        .collect()
}
