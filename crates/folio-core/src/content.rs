//! Portfolio content as authored in the JSON source.
//!
//! Every field is optional; missing sections deserialize to their empty
//! defaults and the renderers skip or substitute built-in values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use ts_rs::TS;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to prepare {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to export TypeScript bindings: {0}")]
    Export(#[from] ts_rs::ExportError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Content {
    pub greeting: Greeting,
    pub intro: Intro,
    pub skills: Skills,
    pub projects: Projects,
    pub socials: Vec<Social>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Greeting {
    pub heading: String,
    pub description: String,
    /// Terms highlighted in the greeting and the animated sections.
    pub keywords: Vec<String>,
    pub platforms: Option<PlatformRotation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PlatformRotation {
    pub items: Vec<String>,
    #[ts(type = "number | null")]
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Intro {
    pub heading: String,
    pub description: String,
    /// Flat question/answer sequence for the paired typewriter.
    pub lines: Vec<String>,
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct TimelineEntry {
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl TimelineEntry {
    /// Non-blank description; only these entries may open the detail modal.
    pub fn details(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn has_details(&self) -> bool {
        self.details().is_some()
    }

    /// Subtitle and date joined the way the modal header shows them.
    pub fn meta_line(&self) -> String {
        [self.subtitle.trim(), self.date.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Skills {
    pub description: String,
    pub list: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Projects {
    pub pro: Vec<Project>,
    pub hobby: Vec<Project>,
    /// Accent overrides keyed by project name.
    pub colors: BTreeMap<String, ColorPair>,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ColorPair {
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub details: Option<String>,
}

impl Project {
    pub fn details(&self) -> Option<&str> {
        self.details
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Social {
    pub platform: String,
    pub username: String,
    pub url: Option<String>,
}

impl Content {
    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(text)?)
    }
}

pub fn load_content(path: &Path) -> Result<Content, ContentError> {
    let text = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = Content::from_json(&text)?;
    info!(
        path = %path.display(),
        timeline = content.intro.timeline.len(),
        projects = content.projects.pro.len() + content.projects.hobby.len(),
        "Loaded portfolio content"
    );
    Ok(content)
}

fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<(), ContentError> {
    T::export_all_to(out_dir)?;
    Ok(())
}

/// Write TypeScript declarations for the content schema into `out_dir`,
/// replacing any stale `.ts` files there.
pub fn export_ts_bindings(out_dir: &Path) -> Result<(), ContentError> {
    let dir_error = |source| ContentError::OutputDir {
        path: out_dir.to_path_buf(),
        source,
    };
    fs::create_dir_all(out_dir).map_err(dir_error)?;
    for entry in fs::read_dir(out_dir).map_err(dir_error)? {
        let path = entry.map_err(dir_error)?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ts") {
            fs::remove_file(&path).map_err(dir_error)?;
        }
    }

    export_single_type::<Content>(out_dir)?;
    export_single_type::<Greeting>(out_dir)?;
    export_single_type::<PlatformRotation>(out_dir)?;
    export_single_type::<Intro>(out_dir)?;
    export_single_type::<TimelineEntry>(out_dir)?;
    export_single_type::<Skills>(out_dir)?;
    export_single_type::<Projects>(out_dir)?;
    export_single_type::<ColorPair>(out_dir)?;
    export_single_type::<Project>(out_dir)?;
    export_single_type::<Social>(out_dir)?;
    Ok(())
}
