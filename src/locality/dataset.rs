//! Dataset parsing — canonical pincode-map shape plus a legacy adapter.
//!
//! Canonical shape: a JSON object mapping pincode → array of entries with
//! nested ward/mla/mp objects, optionally wrapped in
//! `{"version": ..., "pincodes": {...}}`.
//!
//! Legacy shape: a flat array of index rows with flattened ward/mla/mp
//! columns, as exported by older runs of the data pipeline. The adapter
//! regroups it into the canonical shape so only one lookup path exists.

use super::types::{
    is_valid_pincode, LocalityRecord, MatchMethod, MlaInfo, MpInfo, ResolverError, WardInfo,
};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// An immutable parsed snapshot of the locality dataset.
#[derive(Debug, Default)]
pub struct Dataset {
    by_pincode: HashMap<String, Vec<LocalityRecord>>,
    /// Version tag of the artifact, when the wrapper shape carries one.
    pub version: Option<String>,
    pub record_count: usize,
    /// Rows dropped on ingestion (malformed pincode or empty locality name).
    pub skipped_rows: usize,
}

// ─── Wire shapes ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct Wrapper {
    #[serde(default)]
    version: Option<String>,
    pincodes: HashMap<String, Vec<RawEntry>>,
}

#[derive(Deserialize)]
struct RawEntry {
    display_name: String,
    #[serde(default)]
    ward: Option<WardInfo>,
    #[serde(default)]
    mla: Option<MlaInfo>,
    #[serde(default)]
    mp: Option<MpInfo>,
    #[serde(default)]
    data_source: Option<String>,
}

/// One row of the legacy flat index export.
#[derive(Deserialize)]
struct IndexRow {
    pincode: String,
    locality_name: String,
    #[serde(default)]
    ward_no: Option<u32>,
    #[serde(default)]
    ward_name: Option<String>,
    #[serde(default)]
    councillor: Option<String>,
    #[serde(default)]
    councillor_party: Option<String>,
    #[serde(default)]
    reservation: Option<String>,
    #[serde(default)]
    ward_match_method: Option<MatchMethod>,
    #[serde(default)]
    ward_confidence: Option<f64>,
    #[serde(default)]
    ac_name: Option<String>,
    #[serde(default)]
    mla_name: Option<String>,
    #[serde(default)]
    mla_party: Option<String>,
    #[serde(default)]
    mla_confidence: Option<f64>,
    #[serde(default)]
    pc_name: Option<String>,
    #[serde(default)]
    mp_name: Option<String>,
    #[serde(default)]
    mp_party: Option<String>,
    #[serde(default)]
    mp_confidence: Option<f64>,
    #[serde(default)]
    data_source: Option<String>,
}

impl Dataset {
    /// Parse a raw artifact body, auto-detecting the shape.
    pub fn parse(body: &str) -> Result<Self, ResolverError> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| ResolverError::DatasetUnavailable(format!("invalid JSON: {}", e)))?;

        if value.is_array() {
            let rows: Vec<IndexRow> = serde_json::from_value(value).map_err(|e| {
                ResolverError::DatasetUnavailable(format!("malformed index rows: {}", e))
            })?;
            return Ok(Self::from_index_rows(rows));
        }

        if value.is_object() {
            // Pincode keys are 6 digits, so a "pincodes" key can only be
            // the versioned wrapper.
            if value.get("pincodes").is_some() {
                let wrapper: Wrapper = serde_json::from_value(value).map_err(|e| {
                    ResolverError::DatasetUnavailable(format!("malformed dataset: {}", e))
                })?;
                return Ok(Self::from_pincode_map(wrapper.version, wrapper.pincodes));
            }
            let map: HashMap<String, Vec<RawEntry>> =
                serde_json::from_value(value).map_err(|e| {
                    ResolverError::DatasetUnavailable(format!("malformed dataset: {}", e))
                })?;
            return Ok(Self::from_pincode_map(None, map));
        }

        Err(ResolverError::DatasetUnavailable(
            "expected a JSON object or array at the top level".into(),
        ))
    }

    fn from_pincode_map(version: Option<String>, map: HashMap<String, Vec<RawEntry>>) -> Self {
        let mut dataset = Dataset {
            version,
            ..Dataset::default()
        };
        for (pincode, entries) in map {
            if !is_valid_pincode(&pincode) {
                dataset.skipped_rows += entries.len();
                continue;
            }
            for entry in entries {
                if entry.display_name.trim().is_empty() {
                    dataset.skipped_rows += 1;
                    continue;
                }
                dataset.push(LocalityRecord {
                    pincode: pincode.clone(),
                    name: entry.display_name,
                    ward: entry.ward.map(clamp_ward),
                    mla: entry.mla.map(clamp_mla),
                    mp: entry.mp.map(clamp_mp),
                    data_source: entry.data_source,
                });
            }
        }
        dataset
    }

    fn from_index_rows(rows: Vec<IndexRow>) -> Self {
        let mut dataset = Dataset::default();
        for row in rows {
            if !is_valid_pincode(&row.pincode) || row.locality_name.trim().is_empty() {
                dataset.skipped_rows += 1;
                continue;
            }

            let ward = match (row.ward_no, row.ward_name, row.councillor) {
                (Some(number), Some(name), Some(councillor)) => Some(clamp_ward(WardInfo {
                    number,
                    name,
                    councillor,
                    party: row.councillor_party,
                    reservation: row.reservation,
                    match_method: row.ward_match_method.unwrap_or_default(),
                    confidence: row.ward_confidence,
                })),
                _ => None,
            };

            let mla = match (row.ac_name, row.mla_name) {
                (Some(constituency), Some(name)) => Some(clamp_mla(MlaInfo {
                    constituency,
                    name,
                    party: row.mla_party.unwrap_or_default(),
                    confidence: row.mla_confidence,
                })),
                _ => None,
            };

            let mp = match (row.pc_name, row.mp_name) {
                (Some(constituency), Some(name)) => Some(clamp_mp(MpInfo {
                    constituency,
                    name,
                    party: row.mp_party.unwrap_or_default(),
                    confidence: row.mp_confidence,
                })),
                _ => None,
            };

            dataset.push(LocalityRecord {
                pincode: row.pincode,
                name: row.locality_name,
                ward,
                mla,
                mp,
                data_source: row.data_source,
            });
        }
        dataset
    }

    fn push(&mut self, record: LocalityRecord) {
        self.record_count += 1;
        self.by_pincode
            .entry(record.pincode.clone())
            .or_default()
            .push(record);
    }

    // ─── Queries ─────────────────────────────────────────────────

    /// Distinct locality names under a pincode, case-insensitively
    /// de-duplicated (first-seen casing kept), sorted ascending.
    /// Unknown pincodes yield an empty list.
    pub fn localities(&self, pincode: &str) -> Vec<String> {
        let Some(entries) = self.by_pincode.get(pincode) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for entry in entries {
            if seen.insert(entry.name.to_lowercase()) {
                names.push(entry.name.clone());
            }
        }
        names.sort();
        names
    }

    /// First record under the pincode whose name matches, compared
    /// case-insensitively and trimmed of surrounding whitespace.
    ///
    /// Duplicate names under one pincode are a data-quality issue upstream;
    /// first match in artifact order wins.
    pub fn find(&self, pincode: &str, name: &str) -> Option<&LocalityRecord> {
        let needle = name.trim().to_lowercase();
        self.by_pincode
            .get(pincode)?
            .iter()
            .find(|entry| entry.name.trim().to_lowercase() == needle)
    }

    pub fn pincode_count(&self) -> usize {
        self.by_pincode.len()
    }
}

// Confidence is declared bounded in [0,1]; clamp on ingestion so a sloppy
// export cannot leak out-of-range scores to callers.

fn clamp_ward(mut w: WardInfo) -> WardInfo {
    w.confidence = w.confidence.map(|c| c.clamp(0.0, 1.0));
    w
}

fn clamp_mla(mut m: MlaInfo) -> MlaInfo {
    m.confidence = m.confidence.map(|c| c.clamp(0.0, 1.0));
    m
}

fn clamp_mp(mut m: MpInfo) -> MpInfo {
    m.confidence = m.confidence.map(|c| c.clamp(0.0, 1.0));
    m
}
