//! Response of the organizer backend.
//!
//! # Contract
//!
//! ```json
//! {
//!   "message": "Files uploaded and organized successfully",
//!   "stats": {
//!     "images": 2,
//!     "documents": 1,
//!     "others": 0,
//!     "folder_structure": { "Education": ["Assignments", "Exercises"] }
//!   }
//! }
//! ```
//!
//! Failures carry `{"error": "..."}`, usually with a non-2xx status.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::UploadError;

/// Successful upload summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Human-readable outcome
    pub message: String,
    /// Counts and resulting layout
    pub stats: UploadStats,
}

/// What the backend did with the batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadStats {
    pub images: u64,
    pub documents: u64,
    pub others: u64,
    /// Category → subcategories, absent when nothing was organized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_structure: Option<FolderStructure>,
}

/// Category → ordered subcategory names, in the order the backend sent them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FolderStructure(Vec<(String, Vec<String>)>);

impl FolderStructure {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self(entries)
    }

    /// Categories with their subcategories.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(cat, subs)| (cat.as_str(), subs.as_slice()))
    }

    pub fn subcategories(&self, category: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(cat, _)| cat == category)
            .map(|(_, subs)| subs.as_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FolderStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, subcategories) in &self.0 {
            map.serialize_entry(category, subcategories)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FolderStructure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = FolderStructure;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category to subcategory names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((category, subcategories)) =
                    access.next_entry::<String, Vec<String>>()?
                {
                    entries.push((category, subcategories));
                }
                Ok(FolderStructure(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// The backend's `error` field, if the body has a non-empty one.
fn error_field(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|msg| !msg.trim().is_empty())
}

/// Turn a raw HTTP answer into the batch outcome.
pub fn interpret_response(status: u16, body: &str) -> Result<UploadResult, UploadError> {
    if !(200..300).contains(&status) {
        let message =
            error_field(body).unwrap_or_else(|| format!("HTTP error! status: {}", status));
        return Err(UploadError::Http { status, message });
    }

    // Some failures come back in-band with a 2xx
    if let Some(message) = error_field(body) {
        return Err(UploadError::Http { status, message });
    }

    serde_json::from_str::<UploadResult>(body)
        .map_err(|e| UploadError::UnexpectedResponse(e.to_string()))
}
