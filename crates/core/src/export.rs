//! Dashboard export document.
//!
//! A dashboard exports as a self-contained JSON document that can be
//! downloaded, shared, and imported back into an equivalent
//! [`DashboardState`]. Building the document is pure; the caller supplies
//! the timestamp used in the suggested filename.

use serde::{Deserialize, Serialize};

use crate::dashboard::{DashboardState, Layout, Widget};

/// Filename stem used when the dashboard has no name yet.
const FALLBACK_FILENAME_STEM: &str = "dashboard";

/// The serialized form of one dashboard, as written to an export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub name: String,
    pub description: String,
    pub layouts: Layout,
    pub widgets: Vec<Widget>,
    /// The data-source endpoint the dashboard's queries run against.
    pub rpc_endpoint: String,
}

impl ExportDocument {
    /// Build the export document for a dashboard.
    pub fn from_state(state: &DashboardState, rpc_endpoint: &str) -> Self {
        Self {
            name: state.name.clone(),
            description: state.description.clone(),
            layouts: state.layouts.clone(),
            widgets: state.widgets.clone(),
            rpc_endpoint: rpc_endpoint.to_string(),
        }
    }

    /// Reconstruct the dashboard state this document was exported from.
    pub fn into_state(self) -> DashboardState {
        DashboardState {
            name: self.name,
            description: self.description,
            widgets: self.widgets,
            layouts: self.layouts,
        }
    }
}

/// Suggested download filename: `"{name|dashboard}_{unix_millis}.json"`.
///
/// An empty or whitespace-only name falls back to `"dashboard"`.
pub fn export_filename(name: &str, unix_millis: i64) -> String {
    let stem = name.trim();
    let stem = if stem.is_empty() {
        FALLBACK_FILENAME_STEM
    } else {
        stem
    };
    format!("{stem}_{unix_millis}.json")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
