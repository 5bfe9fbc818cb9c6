use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Resume metadata. The binary itself lives in object storage (transfer is
/// stubbed); only the descriptive fields are managed here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeMetadataRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub s3_key: Option<String>,
    pub s3_bucket: Option<String>,
    pub is_active: bool,
    pub is_primary: bool,
    pub notes: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeMetadataCreate {
    pub profile_id: Uuid,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    #[serde(default)]
    pub s3_key: Option<String>,
    #[serde(default)]
    pub s3_bucket: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update of the caller-editable metadata fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeMetadataUpdate {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_primary: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}
