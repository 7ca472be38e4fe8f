use crate::model::PropertyQuery;
use crate::statics;
use anyhow::Context;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioFile {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    source: Option<String>,
    /// Resolved relative to the scenario file.
    #[serde(default)]
    source_path: Option<PathBuf>,
    query: PropertyQuery,
}

/// A document plus the property query the language server would report for it.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub uri: String,
    pub source: String,
    pub query: PropertyQuery,
}

impl Scenario {
    pub fn sample() -> anyhow::Result<Self> {
        let query = PropertyQuery::parse_json5(statics::SAMPLE_QUERY).context("parsing sample query")?;
        Ok(Self {
            uri: statics::SAMPLE_URI.to_string(),
            source: statics::SAMPLE_SOURCE.to_string(),
            query,
        })
    }

    pub fn load_path(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {path:?}"))?;
        let file: ScenarioFile =
            json5::from_str(&text).with_context(|| format!("parsing scenario {path:?}"))?;

        let source = match (file.source, file.source_path) {
            (Some(source), _) => source,
            (None, Some(source_path)) => {
                let resolved = match path.parent() {
                    Some(dir) if source_path.is_relative() => dir.join(&source_path),
                    _ => source_path,
                };
                fs::read_to_string(&resolved).with_context(|| format!("reading {resolved:?}"))?
            }
            (None, None) => anyhow::bail!("scenario {path:?} has neither source nor sourcePath"),
        };

        // The panel resolves ranges under the query's uri, so both must agree.
        let uri = match file.uri {
            Some(uri) if uri != file.query.source_uri => anyhow::bail!(
                "scenario {path:?}: uri {uri:?} does not match query sourceUri {:?}",
                file.query.source_uri
            ),
            Some(uri) => uri,
            None => file.query.source_uri.clone(),
        };
        Ok(Self {
            uri,
            source,
            query: file.query,
        })
    }
}
