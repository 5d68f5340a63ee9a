use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Display text of a loose JSON field: strings as-is, `null` as empty,
/// anything else as its JSON text
pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Text fields accept any JSON value, see [`text_of`]
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| text_of(&value))
}

/// Lists of ids accept mixed values; `null` reads as an empty list
fn lenient_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values.iter().map(text_of).collect())
}

/// The API serialises unset lists as `null`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Entry of the `farms` listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FarmSummary {
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub short_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Farm {
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub short_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zones: Vec<ZoneSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ZoneSummary {
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub short_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Zone {
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub farm: String,
    #[serde(deserialize_with = "lenient_text")]
    pub short_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub scans: Vec<ScanSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanSummary {
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Scan {
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub farm: String,
    #[serde(deserialize_with = "lenient_text")]
    pub zone: String,
    #[serde(deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(deserialize_with = "lenient_text_list")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub analyses: Vec<AnalysisSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisSummary {
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub short_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub state: String,
}

/// A single analysis. The API omits `farm` and `zone`; the client fills
/// them in from the route the analysis was requested through.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Analysis {
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub short_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(deserialize_with = "lenient_text")]
    pub state: String,
    pub results: Value,
    pub farm: Option<String>,
    pub zone: Option<String>,
}

impl Analysis {
    pub fn is_stitching(&self) -> bool {
        self.short_name == "stitching"
    }
}

/// Any payload the API can return, one variant per route
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Farms(Vec<FarmSummary>),
    Farm(Farm),
    Zone(Zone),
    Scan(Scan),
    Analysis(Analysis),
}

impl Resource {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Farms(_) => "Farms",
            Self::Farm(_) => "Farm",
            Self::Zone(_) => "Zone",
            Self::Scan(_) => "Scan",
            Self::Analysis(_) => "Analysis",
        }
    }
}
