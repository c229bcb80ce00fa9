use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::media::ImageSource;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    /// Any status value this build does not know about.
    #[serde(other)]
    Unknown,
}

impl ReportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "รอดำเนินการ",
            ReportStatus::InProgress => "กำลังติดตาม",
            ReportStatus::Resolved => "ปิดรายงานแล้ว",
            ReportStatus::Unknown => "ไม่ทราบสถานะ",
        }
    }

    /// Parse a status filter value. `Unknown` is never produced.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ReportStatus::Pending),
            "in_progress" => Some(ReportStatus::InProgress),
            "resolved" => Some(ReportStatus::Resolved),
            _ => None,
        }
    }
}

/// Treat an explicit `null` column like a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Stray-sighting report as stored in the `reports` table
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Report {
    pub id: String,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photo_urls: Option<ImageSource>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cat_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ReportStatus,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Report {
    /// Both coordinates, when the report was geotagged.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Dog,
    Cat,
    Other,
}

impl Species {
    pub fn label(&self) -> &'static str {
        match self {
            Species::Dog => "หมา",
            Species::Cat => "แมว",
            Species::Other => "อื่นๆ",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnimalCondition {
    Normal,
    Injured,
    Pregnant,
    Aggressive,
}

impl AnimalCondition {
    pub fn label(&self) -> &'static str {
        match self {
            AnimalCondition::Normal => "ปกติ",
            AnimalCondition::Injured => "บาดเจ็บ/ป่วย",
            AnimalCondition::Pregnant => "ตั้งครรภ์/ลูกอ่อน",
            AnimalCondition::Aggressive => "ดุร้าย",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Collar {
    Yes,
    No,
}

impl Collar {
    pub fn label(&self) -> &'static str {
        match self {
            Collar::Yes => "มี",
            Collar::No => "ไม่มี",
        }
    }
}

/// Report form as submitted by a signed-in user
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CreateReportPayload {
    pub province: String,
    pub district: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub species: Option<Species>,
    #[serde(default)]
    pub condition: Option<AnimalCondition>,
    #[serde(default)]
    pub collar: Option<Collar>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

/// Row ready for insertion: only the columns the `reports` table accepts.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ReportSubmission {
    pub province: String,
    pub district: String,
    pub location: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub cat_count: u32,
    pub status: ReportStatus,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_urls: Option<Vec<String>>,
}
