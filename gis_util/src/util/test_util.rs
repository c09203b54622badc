/*
This file is part of the Campus Structures Workflow Tool
Copyright (C) 2022 Novel-T

The Campus Structures Workflow Tool is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::Result;
use itertools::Itertools;

use crate::csv::read_xy_rows;
use crate::engine::{
    DissolveOption, EngineError, FeatureArtifact, GisEngine, PointLayer, SpatialRef,
};
use crate::notify::NotificationSink;

/// A feature collection held in memory: field names plus string valued rows
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    pub fields: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MemoryTable {
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }
}

/// In memory stand-in for the geoprocessing engine.
///
/// Collections are attribute tables; every operation lands in a call log so a
/// test can assert what ran and in which order. No geometry is computed: a
/// buffer or clip output records feature counts only.
pub struct MemoryEngine {
    overwrite_outputs: bool,
    gdbs: HashSet<PathBuf>,
    collections: HashMap<PathBuf, MemoryTable>,
    fail_ops: HashSet<&'static str>,

    pub call_log: Vec<String>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        MemoryEngine {
            overwrite_outputs: false,
            gdbs: HashSet::new(),
            collections: HashMap::new(),
            fail_ops: HashSet::new(),
            call_log: Vec::new(),
        }
    }

    /// Registers a pre-existing geodatabase or workspace
    pub fn add_gdb<P: Into<PathBuf>>(&mut self, path: P) {
        self.gdbs.insert(path.into());
    }

    /// Registers a pre-existing feature collection
    pub fn add_collection<P: Into<PathBuf>>(&mut self, path: P, fields: &[&str], rows: &[&[&str]]) {
        let table = MemoryTable {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        };
        self.collections.insert(path.into(), table);
    }

    pub fn collection(&self, path: &Path) -> Option<&MemoryTable> {
        self.collections.get(path)
    }

    pub fn has_collection(&self, path: &Path) -> bool {
        self.collections.contains_key(path)
    }

    /// The named operation will return OperationFailed from now on
    pub fn fail_on(&mut self, op: &'static str) {
        self.fail_ops.insert(op);
    }

    pub fn calls_to(&self, op: &str) -> Vec<&String> {
        let prefix = format!("{}:", op);
        self.call_log
            .iter()
            .filter(|c| c.starts_with(&prefix))
            .collect_vec()
    }

    fn maybe_fail(&self, op: &'static str) -> Result<(), EngineError> {
        if self.fail_ops.contains(op) {
            return Err(EngineError::OperationFailed {
                op,
                reason: "forced failure".to_string(),
            });
        }
        Ok(())
    }

    fn check_output(&mut self, out_fc: &Path) -> Result<(), EngineError> {
        if self.collections.contains_key(out_fc) {
            if !self.overwrite_outputs {
                return Err(EngineError::OutputExists(out_fc.to_path_buf()));
            }
            self.collections.remove(out_fc);
        }
        Ok(())
    }

    fn table(&self, path: &Path) -> Result<&MemoryTable, EngineError> {
        self.collections
            .get(path)
            .ok_or_else(|| EngineError::DatasetNotFound(path.to_path_buf()))
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        MemoryEngine::new()
    }
}

impl GisEngine for MemoryEngine {
    fn set_overwrite_outputs(&mut self, enabled: bool) {
        self.call_log.push(format!("set_overwrite_outputs:{}", enabled));
        self.overwrite_outputs = enabled;
    }

    fn exists(&self, path: &Path) -> bool {
        self.gdbs.contains(path) || self.collections.contains_key(path) || path.exists()
    }

    fn create_file_gdb(&mut self, folder: &Path, name: &str) -> Result<(), EngineError> {
        let full = folder.join(name);
        self.call_log.push(format!("create_file_gdb:{}", full.display()));
        self.maybe_fail("create_file_gdb")?;

        if !self.gdbs.contains(folder) && !folder.exists() {
            return Err(EngineError::CreateFailed {
                path: full,
                reason: "parent folder does not exist".to_string(),
            });
        }

        self.gdbs.insert(full);
        Ok(())
    }

    fn try_xy_event_layer(
        &mut self,
        table: &Path,
        x_field: &str,
        y_field: &str,
        out_name: &str,
        spatial_ref: &SpatialRef,
    ) -> Result<Option<PointLayer>, EngineError> {
        self.call_log
            .push(format!("try_xy_event_layer:{}/{}", x_field, y_field));
        self.maybe_fail("try_xy_event_layer")?;

        let points = match read_xy_rows(table, x_field, y_field)? {
            Some(points) => points,
            None => return Ok(None),
        };

        Ok(Some(PointLayer {
            name: out_name.to_string(),
            spatial_ref: *spatial_ref,
            x_field: x_field.to_string(),
            y_field: y_field.to_string(),
            points,
        }))
    }

    fn save_point_layer(
        &mut self,
        layer: &PointLayer,
        gdb: &Path,
    ) -> Result<FeatureArtifact, EngineError> {
        let out_fc = gdb.join(&layer.name);
        self.call_log.push(format!("save_point_layer:{}", out_fc.display()));
        self.maybe_fail("save_point_layer")?;

        if !self.gdbs.contains(gdb) {
            return Err(EngineError::DatasetNotFound(gdb.to_path_buf()));
        }
        self.check_output(&out_fc)?;

        let table = MemoryTable {
            fields: vec![layer.x_field.clone(), layer.y_field.clone()],
            rows: layer
                .points
                .iter()
                .map(|p| vec![p.x.to_string(), p.y.to_string()])
                .collect(),
        };
        let feature_count = table.rows.len() as u64;
        self.collections.insert(out_fc.clone(), table);

        Ok(FeatureArtifact {
            path: out_fc,
            feature_count,
        })
    }

    fn field_names(&self, collection: &Path) -> Result<Vec<String>, EngineError> {
        Ok(self.table(collection)?.fields.clone())
    }

    fn search_field_values(
        &self,
        collection: &Path,
        field: &str,
        attribute_filter: Option<&str>,
    ) -> Result<Vec<String>, EngineError> {
        let table = self.table(collection)?;

        let field_idx = table
            .field_index(field)
            .ok_or_else(|| EngineError::OperationFailed {
                op: "search",
                reason: format!("no field {} in {:?}", field, collection),
            })?;

        let rows: Vec<&Vec<String>> = match attribute_filter {
            None => table.rows.iter().collect_vec(),
            Some(filter) => filter_rows(table, filter)?,
        };

        Ok(rows
            .into_iter()
            .filter_map(|r| r.get(field_idx).cloned())
            .collect_vec())
    }

    fn select(
        &mut self,
        collection: &Path,
        attribute_filter: &str,
        out_fc: &Path,
    ) -> Result<FeatureArtifact, EngineError> {
        self.call_log.push(format!("select:{}", out_fc.display()));
        self.maybe_fail("select")?;

        let matched = {
            let table = self.table(collection)?;
            let rows = filter_rows(table, attribute_filter)?;
            MemoryTable {
                fields: table.fields.clone(),
                rows: rows.into_iter().cloned().collect(),
            }
        };

        self.check_output(out_fc)?;
        let feature_count = matched.rows.len() as u64;
        self.collections.insert(out_fc.to_path_buf(), matched);

        Ok(FeatureArtifact {
            path: out_fc.to_path_buf(),
            feature_count,
        })
    }

    fn buffer(
        &mut self,
        in_fc: &Path,
        distance: &str,
        dissolve: DissolveOption,
        out_fc: &Path,
    ) -> Result<FeatureArtifact, EngineError> {
        self.call_log.push(format!("buffer:{}", out_fc.display()));
        self.maybe_fail("buffer")?;

        parse_buffer_distance(distance)?;

        let in_count = self.table(in_fc)?.rows.len();
        let feature_count = match dissolve {
            DissolveOption::All => 1.min(in_count),
            DissolveOption::None => in_count,
        } as u64;

        self.check_output(out_fc)?;
        let table = MemoryTable {
            fields: vec!["BUFF_DIST".to_string()],
            rows: (0..feature_count).map(|_| vec![distance.to_string()]).collect(),
        };
        self.collections.insert(out_fc.to_path_buf(), table);

        Ok(FeatureArtifact {
            path: out_fc.to_path_buf(),
            feature_count,
        })
    }

    fn clip(
        &mut self,
        in_fc: &Path,
        clip_fc: &Path,
        out_fc: &Path,
    ) -> Result<FeatureArtifact, EngineError> {
        self.call_log.push(format!("clip:{}", out_fc.display()));
        self.maybe_fail("clip")?;

        self.table(clip_fc)?;
        let clipped = self.table(in_fc)?.clone();

        self.check_output(out_fc)?;
        let feature_count = clipped.rows.len() as u64;
        self.collections.insert(out_fc.to_path_buf(), clipped);

        Ok(FeatureArtifact {
            path: out_fc.to_path_buf(),
            feature_count,
        })
    }
}

/// Rows matching a `Field = 'literal'` filter.
/// Comparison is case insensitive, like the default collation of the file
/// geodatabase drivers this engine stands in for.
fn filter_rows<'t>(
    table: &'t MemoryTable,
    attribute_filter: &str,
) -> Result<Vec<&'t Vec<String>>, EngineError> {
    let (field, literal) = parse_equality_filter(attribute_filter)?;

    let field_idx = table
        .field_index(&field)
        .ok_or_else(|| EngineError::OperationFailed {
            op: "attribute filter",
            reason: format!("no field {} in collection", field),
        })?;

    Ok(table
        .rows
        .iter()
        .filter(|r| {
            r.get(field_idx)
                .map(|v| v.eq_ignore_ascii_case(&literal))
                .unwrap_or(false)
        })
        .collect_vec())
}

fn parse_equality_filter(attribute_filter: &str) -> Result<(String, String), EngineError> {
    let bad = |reason: String| EngineError::OperationFailed {
        op: "attribute filter",
        reason,
    };

    let (field, rest) = attribute_filter
        .split_once('=')
        .ok_or_else(|| bad(format!("no '=' in filter {:?}", attribute_filter)))?;

    let rest = rest.trim();
    if rest.len() < 2 || !rest.starts_with('\'') || !rest.ends_with('\'') {
        return Err(bad(format!("unquoted literal in filter {:?}", attribute_filter)));
    }

    let literal = rest[1..rest.len() - 1].replace("''", "'");

    Ok((field.trim().to_string(), literal))
}

fn parse_buffer_distance(distance: &str) -> Result<(f64, String), EngineError> {
    let bad = |reason: String| EngineError::OperationFailed {
        op: "buffer",
        reason,
    };

    let mut parts = distance.split_whitespace();

    let value = parts
        .next()
        .unwrap_or("")
        .parse::<f64>()
        .map_err(|_| bad(format!("bad distance {:?}", distance)))?;

    let unit = parts
        .next()
        .ok_or_else(|| bad(format!("missing unit in distance {:?}", distance)))?;

    Ok((value, unit.to_string()))
}

/// Records notifications in arrival order so tests can assert on them
#[derive(Debug, Default)]
pub struct CaptureSink {
    pub messages: Vec<String>,
    pub errors: Vec<String>,
}

impl NotificationSink for CaptureSink {
    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}

/// Per test scratch directory under the system temp dir
pub fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("campus_workflow_tests")
        .join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes a small csv file for tests, returns its path
pub fn write_csv(dir: &Path, file_name: &str, header: &str, rows: &[&str]) -> Result<PathBuf> {
    let path = dir.join(file_name);

    let mut content = String::new();
    content.push_str(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }

    std::fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_equality_filter() {
        let (field, literal) = parse_equality_filter("BldgName = 'O''Brien Hall'").unwrap();
        assert_eq!(field, "BldgName");
        assert_eq!(literal, "O'Brien Hall");

        assert!(parse_equality_filter("BldgName = West Garage").is_err());
    }

    #[test]
    fn test_parse_buffer_distance() {
        let (value, unit) = parse_buffer_distance("150 Meters").unwrap();
        assert_eq!(value, 150.0);
        assert_eq!(unit, "Meters");

        assert!(parse_buffer_distance("fast Meters").is_err());
        assert!(parse_buffer_distance("150").is_err());
    }

    #[test]
    fn test_select_filters_case_insensitively() {
        let mut engine = MemoryEngine::new();
        engine.add_collection(
            "/campus/Structures",
            &["BldgName"],
            &[&["West Garage"], &["Library"]],
        );
        engine.set_overwrite_outputs(true);

        let artifact = engine
            .select(
                Path::new("/campus/Structures"),
                "BldgName = 'west garage'",
                Path::new("/out/sel"),
            )
            .unwrap();

        assert_eq!(artifact.feature_count, 1);
        let table = engine.collection(Path::new("/out/sel")).unwrap();
        assert_eq!(table.rows[0][0], "West Garage");
    }

    #[test]
    fn test_output_exists_without_overwrite() {
        let mut engine = MemoryEngine::new();
        engine.add_collection("/campus/Structures", &["BldgName"], &[&["Library"]]);
        engine.add_collection("/out/sel", &["BldgName"], &[]);

        let r = engine.select(
            Path::new("/campus/Structures"),
            "BldgName = 'Library'",
            Path::new("/out/sel"),
        );

        match r {
            Err(EngineError::OutputExists(p)) => assert_eq!(p, Path::new("/out/sel")),
            other => panic!("expected OutputExists, got {:?}", other.map(|a| a.path)),
        }
    }
}
