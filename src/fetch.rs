//! Dataset loading boundary
//!
//! Each population comes from its own JSON resource: an array of
//! `{"x": number, "y": number, "scope": string}` records. The two resources
//! are independent and may resolve in any order; callers fetch them
//! concurrently and only recompose once both have resolved.
//!
//! A missing or unparsable resource is an error here; the caller recovers by
//! leaving that dataset unset and logging a warning, never by surfacing a
//! visible error state.

use std::path::Path;

use crate::error::Result;
use crate::sample::{Dataset, RawSample, SamplePoint, Scope};

/// Load one population's dataset from a JSON resource
///
/// Records whose scope tag does not parse, or that belong to the other
/// population, are skipped with a warning rather than failing the load.
pub async fn load_dataset(path: &Path, scope: Scope) -> Result<Dataset> {
    let bytes = tokio::fs::read(path).await?;
    let records: Vec<RawSample> = serde_json::from_slice(&bytes)?;

    let mut points = Vec::with_capacity(records.len());
    for record in records {
        match Scope::parse(&record.scope) {
            Some(s) if s == scope => points.push(SamplePoint {
                x: record.x,
                y: record.y,
                scope,
            }),
            Some(other) => {
                eprintln!(
                    "⚠ Skipping '{}' record in {} dataset resource {}",
                    other.as_str(),
                    scope.as_str(),
                    path.display()
                );
            }
            None => {
                eprintln!(
                    "⚠ Skipping record with unknown scope '{}' in {}",
                    record.scope,
                    path.display()
                );
            }
        }
    }

    Ok(Dataset::from_points(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("moodmap_test_{}_{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_load_well_formed_dataset() {
        let path = temp_path("well_formed.json");
        std::fs::write(
            &path,
            r#"[{"x": 0.1, "y": 0.2, "scope": "local"}, {"x": 0.9, "y": 0.8, "scope": "local"}]"#,
        )
        .unwrap();

        let ds = load_dataset(&path, Scope::Local).await.unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.points()[0].x, 0.1);
        assert_eq!(ds.points()[0].scope, Scope::Local);

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_missing_resource_is_an_error() {
        let path = temp_path("does_not_exist.json");
        assert!(load_dataset(&path, Scope::Local).await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_document_is_an_error() {
        let path = temp_path("malformed.json");
        std::fs::write(&path, "not json at all").unwrap();

        assert!(load_dataset(&path, Scope::Global).await.is_err());

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_cross_scope_and_unknown_records_are_skipped() {
        let path = temp_path("mixed_scopes.json");
        std::fs::write(
            &path,
            r#"[
                {"x": 0.1, "y": 0.2, "scope": "local"},
                {"x": 0.3, "y": 0.4, "scope": "global"},
                {"x": 0.5, "y": 0.6, "scope": "session"}
            ]"#,
        )
        .unwrap();

        let ds = load_dataset(&path, Scope::Local).await.unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.points()[0].x, 0.1);

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_empty_array_yields_empty_dataset() {
        let path = temp_path("empty.json");
        std::fs::write(&path, "[]").unwrap();

        let ds = load_dataset(&path, Scope::Global).await.unwrap();
        assert!(ds.is_empty());

        std::fs::remove_file(&path).ok();
    }
}
