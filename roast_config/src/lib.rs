#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and roast-profile parsing.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Profile CSV loader enforces headers and checks timestamp ordering, so
//!   the replay path never feeds malformed rows into a session.
use serde::Deserialize;

use roast_traits::EventType;

/// Roast profile CSV schema, one row per manual reading.
///
/// Expected headers:
/// timestamp,temperature,gas,damper,event,event_type
///
/// Example:
/// timestamp,temperature,gas,damper,event,event_type
/// 0,180.0,1.5,70,Charge,start
/// 60,120.5,,,,
/// 480,196.0,,,1st Crack,phase_change
#[derive(Debug, Deserialize, Clone)]
pub struct ProfileRow {
    pub timestamp: u32,
    pub temperature: f64,
    pub gas: Option<f64>,
    pub damper: Option<u8>,
    pub event: Option<String>,
    pub event_type: Option<String>,
}

impl ProfileRow {
    /// Parsed event classification; `None` when the row carries no event.
    pub fn parsed_event_type(&self) -> eyre::Result<Option<EventType>> {
        let Some(raw) = self.event_type.as_deref() else {
            return Ok(None);
        };
        let kind = match raw {
            "start" => EventType::Start,
            "phase_change" => EventType::PhaseChange,
            "user_note" => EventType::UserNote,
            "end" => EventType::End,
            other => eyre::bail!("unknown event_type '{other}'"),
        };
        Ok(Some(kind))
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default, deny_unknown_fields)]
pub struct SessionCfgToml {
    /// RoR lookback window for manual readings, seconds.
    pub ror_window_secs: u32,
    /// DTR target used for the projected finish time, percent.
    pub target_dtr_pct: f64,
    /// Temperature used for the yellow-point estimate, °C.
    pub yellow_temp_c: f64,
}

impl Default for SessionCfgToml {
    fn default() -> Self {
        Self {
            ror_window_secs: 60,
            target_dtr_pct: 20.0,
            yellow_temp_c: 140.0,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct StoreCfg {
    /// Path of the JSONL roast log. Falls back to the CLI default when unset.
    pub log_file: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Logging {
    pub level: Option<String>, // "info","debug"
    /// Emit machine-readable JSON lines instead of the human format.
    pub json: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub session: SessionCfgToml,
    pub store: StoreCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        if self.session.ror_window_secs == 0 {
            eyre::bail!("session.ror_window_secs must be > 0");
        }
        if self.session.ror_window_secs > 600 {
            eyre::bail!("session.ror_window_secs is unreasonably large (>10min)");
        }
        if self.session.target_dtr_pct <= 0.0 || self.session.target_dtr_pct >= 100.0 {
            eyre::bail!("session.target_dtr_pct must be in (0, 100)");
        }
        if !self.session.yellow_temp_c.is_finite() || self.session.yellow_temp_c <= 0.0 {
            eyre::bail!("session.yellow_temp_c must be a positive temperature");
        }
        Ok(())
    }
}

pub fn load_profile_csv(path: &std::path::Path) -> eyre::Result<Vec<ProfileRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open profile CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = [
        "timestamp",
        "temperature",
        "gas",
        "damper",
        "event",
        "event_type",
    ];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "profile CSV must have headers '{}', got: {}",
            expected.join(","),
            actual.join(",")
        );
    }

    let mut rows: Vec<ProfileRow> = Vec::new();
    for (idx, rec) in rdr.deserialize::<ProfileRow>().enumerate() {
        let row = rec.map_err(|e| eyre::eyre!("invalid CSV row {}: {}", idx + 2, e))?;
        if !row.temperature.is_finite() {
            eyre::bail!("invalid CSV row {}: non-finite temperature", idx + 2);
        }
        if row.event.is_some() != row.event_type.is_some() {
            eyre::bail!(
                "invalid CSV row {}: event and event_type must be set together",
                idx + 2
            );
        }
        row.parsed_event_type()
            .map_err(|e| eyre::eyre!("invalid CSV row {}: {}", idx + 2, e))?;
        if let Some(prev) = rows.last()
            && row.timestamp < prev.timestamp
        {
            eyre::bail!(
                "invalid CSV row {}: timestamps must be non-decreasing",
                idx + 2
            );
        }
        rows.push(row);
    }

    if rows.is_empty() {
        eyre::bail!("profile CSV {:?} contains no data rows", path);
    }
    Ok(rows)
}
