//! Core types for the locality subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the offline pipeline associated a ward with a locality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Exact,
    Fuzzy,
    Manual,
    #[default]
    Unmatched,
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::Manual => write!(f, "manual"),
            Self::Unmatched => write!(f, "unmatched"),
        }
    }
}

/// Municipal ward data for a locality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardInfo {
    pub number: u32,
    pub name: String,
    pub councillor: String,
    #[serde(default)]
    pub party: Option<String>,
    /// Seat reservation status (e.g. "General", "Women", "SC").
    #[serde(default)]
    pub reservation: Option<String>,
    #[serde(default)]
    pub match_method: MatchMethod,
    /// Match confidence in [0,1]. Informational only — callers decide.
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Assembly-constituency (MLA) data for a locality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlaInfo {
    pub constituency: String,
    pub name: String,
    pub party: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Parliamentary-constituency (MP) data for a locality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MpInfo {
    pub constituency: String,
    pub name: String,
    pub party: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Which representative a summary is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Ward,
    Mla,
    Mp,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ward => write!(f, "ward"),
            Self::Mla => write!(f, "mla"),
            Self::Mp => write!(f, "mp"),
        }
    }
}

/// One row per (pincode, locality) pair — the canonical denormalized record.
///
/// Ward, MLA and MP are independently optional: a record may carry ward data
/// with no confirmed MP, and so on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalityRecord {
    pub pincode: String,
    pub name: String,
    #[serde(default)]
    pub ward: Option<WardInfo>,
    #[serde(default)]
    pub mla: Option<MlaInfo>,
    #[serde(default)]
    pub mp: Option<MpInfo>,
    /// Provenance tag: which upstream dataset/version produced this row.
    #[serde(default)]
    pub data_source: Option<String>,
}

impl LocalityRecord {
    /// One-line display string for the requested representative.
    ///
    /// Absent sub-records yield a fixed "information not available"
    /// sentinel rather than an error.
    pub fn representative_summary(&self, role: Role) -> String {
        match role {
            Role::Ward => match &self.ward {
                Some(w) => format!("{} (Ward {}) - {}", w.name, w.number, w.councillor),
                None => "Ward information not available".into(),
            },
            Role::Mla => match &self.mla {
                Some(m) => format!("{} ({}) - {}", m.name, m.constituency, m.party),
                None => "MLA information not available".into(),
            },
            Role::Mp => match &self.mp {
                Some(m) => format!("{} ({}) - {}", m.name, m.constituency, m.party),
                None => "MP information not available".into(),
            },
        }
    }
}

/// Exactly 6 ASCII digits — the only accepted pincode form.
pub fn is_valid_pincode(pincode: &str) -> bool {
    pincode.len() == 6 && pincode.chars().all(|c| c.is_ascii_digit())
}

/// Locality resolution errors.
///
/// "No data for this pincode/locality" is not an error — it is an empty
/// list or `None`, so callers can tell "not in our dataset" apart from
/// "the data source is unreachable".
#[derive(Debug)]
pub enum ResolverError {
    /// Caller supplied a malformed pincode. Raised before any I/O.
    InvalidPincode(String),
    /// Dataset fetch or parse failed. Not retried by this component.
    DatasetUnavailable(String),
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPincode(p) => {
                write!(f, "Invalid pincode '{}': expected exactly 6 digits", p)
            }
            Self::DatasetUnavailable(msg) => write!(f, "Locality dataset unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ResolverError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_all() -> LocalityRecord {
        LocalityRecord {
            pincode: "560001".into(),
            name: "Indiranagar".into(),
            ward: Some(WardInfo {
                number: 12,
                name: "Ward 12".into(),
                councillor: "A. Kumar".into(),
                party: Some("X".into()),
                reservation: None,
                match_method: MatchMethod::Exact,
                confidence: Some(0.97),
            }),
            mla: Some(MlaInfo {
                constituency: "Shanti Nagar".into(),
                name: "B. Rao".into(),
                party: "Y".into(),
                confidence: Some(0.9),
            }),
            mp: Some(MpInfo {
                constituency: "Bangalore Central".into(),
                name: "C. Devi".into(),
                party: "Z".into(),
                confidence: None,
            }),
            data_source: Some("bbmp-2024".into()),
        }
    }

    #[test]
    fn test_ward_summary_format() {
        let record = record_with_all();
        assert_eq!(
            record.representative_summary(Role::Ward),
            "Ward 12 (Ward 12) - A. Kumar"
        );
    }

    #[test]
    fn test_mla_summary_format() {
        let record = record_with_all();
        assert_eq!(
            record.representative_summary(Role::Mla),
            "B. Rao (Shanti Nagar) - Y"
        );
    }

    #[test]
    fn test_mp_summary_format() {
        let record = record_with_all();
        assert_eq!(
            record.representative_summary(Role::Mp),
            "C. Devi (Bangalore Central) - Z"
        );
    }

    #[test]
    fn test_absent_subrecord_sentinels() {
        let record = LocalityRecord {
            pincode: "560001".into(),
            name: "Indiranagar".into(),
            ward: None,
            mla: None,
            mp: None,
            data_source: None,
        };
        assert_eq!(
            record.representative_summary(Role::Ward),
            "Ward information not available"
        );
        assert_eq!(
            record.representative_summary(Role::Mla),
            "MLA information not available"
        );
        assert_eq!(
            record.representative_summary(Role::Mp),
            "MP information not available"
        );
    }

    #[test]
    fn test_valid_pincodes() {
        assert!(is_valid_pincode("560001"));
        assert!(is_valid_pincode("110001"));
        assert!(is_valid_pincode("000000"));
    }

    #[test]
    fn test_invalid_pincodes() {
        assert!(!is_valid_pincode("12345"));
        assert!(!is_valid_pincode("1234567"));
        assert!(!is_valid_pincode("abcdef"));
        assert!(!is_valid_pincode(""));
        assert!(!is_valid_pincode("56000a"));
        assert!(!is_valid_pincode(" 560001"));
        // Non-ASCII digits are rejected
        assert!(!is_valid_pincode("٥٦٠٠٠١"));
    }

    #[test]
    fn test_match_method_wire_names() {
        let ward: WardInfo = serde_json::from_str(
            r#"{"number": 3, "name": "Ward 3", "councillor": "D. Singh", "match_method": "fuzzy"}"#,
        )
        .unwrap();
        assert_eq!(ward.match_method, MatchMethod::Fuzzy);
        assert!(ward.party.is_none());
        assert!(ward.confidence.is_none());
    }

    #[test]
    fn test_match_method_defaults_to_unmatched() {
        let ward: WardInfo = serde_json::from_str(
            r#"{"number": 3, "name": "Ward 3", "councillor": "D. Singh"}"#,
        )
        .unwrap();
        assert_eq!(ward.match_method, MatchMethod::Unmatched);
    }
}
