//! Document-store records: `crimes/{id}` and `users/{uid}`.
//!
//! The store is schemaless and has accumulated two report shapes over time
//! (`type` vs `crimeType`, `imageUrl` vs `imageUrls`, epoch-millis vs ISO
//! timestamps, string vs numeric coordinates). Deserialization accepts both
//! and normalizes them.

use chrono::DateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of account stored under `users/{uid}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Citizen,
    Law,
}

impl UserType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Law => "law",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile stored under `users/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, alias = "name")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "usertype", alias = "userType")]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub badge_number: Option<String>,
}

/// Geographic point attached to a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    #[serde(deserialize_with = "de_flexible_f64")]
    #[schemars(with = "f64")]
    pub lat: f64,
    #[serde(deserialize_with = "de_flexible_f64")]
    #[schemars(with = "f64")]
    pub lon: f64,
}

/// A citizen's incident report stored under `crimes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrimeReport {
    /// Store key. Not part of the stored value; filled in by the reader.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, alias = "type")]
    pub crime_type: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub is_anonymous: bool,
    /// Submission time in epoch milliseconds (0 when missing or unparseable).
    #[serde(default, deserialize_with = "de_timestamp_millis")]
    #[schemars(with = "i64")]
    pub timestamp: i64,
}

impl CrimeReport {
    /// Every attached image URL, single-image records included.
    #[must_use]
    pub fn all_image_urls(&self) -> Vec<&str> {
        self.image_url
            .iter()
            .map(String::as_str)
            .chain(self.image_urls.iter().map(String::as_str))
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

fn de_flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        #[allow(clippy::cast_precision_loss)]
        NumberOrText::Int(v) => Ok(v as f64),
        NumberOrText::Float(v) => Ok(v),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid coordinate '{s}': {e}"))),
    }
}

fn de_timestamp_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match raw {
        None => 0,
        Some(NumberOrText::Int(v)) => v,
        #[allow(clippy::cast_possible_truncation)]
        Some(NumberOrText::Float(v)) => v as i64,
        Some(NumberOrText::Text(s)) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.timestamp_millis())
            .or_else(|_| s.trim().parse::<i64>())
            .unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_dashboard_shape() {
        let json = r#"{
            "type": "Theft",
            "location": "Central Market",
            "description": "Bag snatched",
            "timestamp": 1714567890123,
            "imageUrl": "https://img.example/1.jpg",
            "userId": "uid-7"
        }"#;
        let report: CrimeReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.crime_type, "Theft");
        assert_eq!(report.timestamp, 1_714_567_890_123);
        assert_eq!(report.user_id.as_deref(), Some("uid-7"));
        assert_eq!(report.all_image_urls(), vec!["https://img.example/1.jpg"]);
        assert!(report.coordinates.is_none());
    }

    #[test]
    fn parses_submission_shape() {
        let json = r#"{
            "fullName": "Asha Rao",
            "phoneNumber": "9876543210",
            "email": "asha@example.com",
            "crimeType": "Vandalism",
            "date": "2025-03-02",
            "time": "21:15",
            "location": "Park Street",
            "description": "Car windows smashed",
            "timestamp": "2025-03-02T16:00:00.000Z",
            "imageUrls": ["https://img.example/a.jpg", "https://img.example/b.jpg"],
            "coordinates": { "lat": "22.5526", "lon": "88.3520" }
        }"#;
        let report: CrimeReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.crime_type, "Vandalism");
        assert_eq!(report.timestamp, 1_740_931_200_000);
        assert_eq!(report.all_image_urls().len(), 2);
        let coords = report.coordinates.unwrap();
        assert!((coords.lat - 22.5526).abs() < 1e-9);
        assert!((coords.lon - 88.3520).abs() < 1e-9);
    }

    #[test]
    fn missing_or_garbage_timestamp_is_zero() {
        let report: CrimeReport = serde_json::from_str(r#"{"description": "x"}"#).unwrap();
        assert_eq!(report.timestamp, 0);

        let report: CrimeReport =
            serde_json::from_str(r#"{"description": "x", "timestamp": "yesterday"}"#).unwrap();
        assert_eq!(report.timestamp, 0);
    }

    #[test]
    fn parses_user_profile() {
        let json = r#"{
            "fullName": "Officer Khan",
            "email": "khan@police.example",
            "usertype": "law",
            "badgeNumber": "B-1042",
            "createdAt": "2025-01-10T08:00:00Z"
        }"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_type, Some(UserType::Law));
        assert_eq!(user.badge_number.as_deref(), Some("B-1042"));
        assert!(user.phone.is_none());
    }

    #[test]
    fn user_type_display() {
        assert_eq!(UserType::Citizen.to_string(), "citizen");
        assert_eq!(UserType::Law.to_string(), "law");
    }
}
