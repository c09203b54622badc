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
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::debug;
use thiserror::Error;

use gis_util::engine::{DissolveOption, EngineError, FeatureArtifact, GisEngine, SpatialRef};
use gis_util::notify::NotificationSink;
use gis_util::util::{name_equals_filter, sanitize_fc_name};

use crate::config::RunConfig;
use crate::constants::{
    BLDG_NAME_FIELD, BUFFER_FC, CANDIDATE_XY_FIELDS, CLIP_FC_PREFIX, MAX_NAME_HINTS, SELECTED_FC,
    XY_LAYER_SUFFIX,
};

/// The working geodatabase, resolved once per run and reused by every later stage
#[derive(Debug, Clone)]
pub struct Geodatabase {
    pub path: PathBuf,
    pub created: bool,
}

/// What happened to the optional garage csv import.
/// Only reported; nothing downstream depends on it.
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    Imported {
        x_field: String,
        y_field: String,
        feature: FeatureArtifact,
    },
    HeadersNotDetected,
    CsvMissing,
    Failed {
        reason: String,
    },
}

/// The three derived feature classes, all inside the working geodatabase
#[derive(Debug, Clone)]
pub struct OutputSet {
    pub selected: FeatureArtifact,
    pub buffer: FeatureArtifact,
    pub clip: FeatureArtifact,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub gdb: Geodatabase,
    pub import: ImportOutcome,
    pub outputs: OutputSet,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{label} not found: {path:?}")]
    MissingInput {
        label: &'static str,
        path: PathBuf,
    },

    #[error("field '{field}' not found in {collection:?}")]
    NameFieldMissing {
        field: &'static str,
        collection: PathBuf,
    },

    #[error("no structure found with BldgName = {name}")]
    TargetNotFound { name: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Runs the whole sequence: ensure the geodatabase, import the garage csv if
/// its header cooperates, verify the requested structure exists, then select,
/// buffer and clip around it.
///
/// Engine failures are reported through the sink once and returned to the
/// caller. Artifacts written before a failure stay in place.
pub fn run_workflow(
    config: &RunConfig,
    engine: &mut dyn GisEngine,
    notify: &mut dyn NotificationSink,
) -> Result<RunOutcome, RunError> {
    let result = run_stages(config, engine, notify);

    if let Err(RunError::Engine(e)) = &result {
        notify.error(&format!("geoprocessing failed: {}", e));
    }

    result
}

fn run_stages(
    config: &RunConfig,
    engine: &mut dyn GisEngine,
    notify: &mut dyn NotificationSink,
) -> Result<RunOutcome, RunError> {
    engine.set_overwrite_outputs(config.overwrite_outputs);

    check_input(engine, notify, "GDB folder", &config.gdb_folder)?;
    check_input(engine, notify, "campus GDB", &config.campus_gdb)?;

    let gdb = ensure_gdb(config, engine, notify)?;

    let import = import_garage_csv(config, &gdb, engine, notify);

    let filter = name_equals_filter(BLDG_NAME_FIELD, &config.selected_name);
    debug!("where clause: {}", filter);

    verify_target(config, &filter, engine, notify)?;

    let outputs = select_buffer_clip(config, &gdb, &filter, engine)?;

    notify.message("success");
    notify.message(&format!("Outputs GDB: {}", gdb.path.display()));

    Ok(RunOutcome {
        gdb,
        import,
        outputs,
    })
}

/// Fail early, with a message, when a required input path is missing
fn check_input(
    engine: &dyn GisEngine,
    notify: &mut dyn NotificationSink,
    label: &'static str,
    path: &Path,
) -> Result<(), RunError> {
    //The engine knows about datasets, the filesystem about folders and files
    if engine.exists(path) || path.exists() {
        return Ok(());
    }

    notify.error(&format!("{} not found: {}", label, path.display()));
    Err(RunError::MissingInput {
        label,
        path: path.to_path_buf(),
    })
}

fn ensure_gdb(
    config: &RunConfig,
    engine: &mut dyn GisEngine,
    notify: &mut dyn NotificationSink,
) -> Result<Geodatabase, RunError> {
    let full = config.gdb_path();

    if engine.exists(&full) {
        notify.message(&format!("Using existing GDB: {}", full.display()));
        return Ok(Geodatabase {
            path: full,
            created: false,
        });
    }

    engine.create_file_gdb(&config.gdb_folder, &config.gdb_name)?;
    notify.message(&format!("Created file GDB: {}", full.display()));

    Ok(Geodatabase {
        path: full,
        created: true,
    })
}

/// Best effort: tries the candidate column pairs in order and persists the
/// first event layer that builds. Never fails the run.
fn import_garage_csv(
    config: &RunConfig,
    gdb: &Geodatabase,
    engine: &mut dyn GisEngine,
    notify: &mut dyn NotificationSink,
) -> ImportOutcome {
    if !config.garage_csv.exists() {
        notify.message("Note: CSV not found; skipping garages import. (Buffer/Clip still runs.)");
        return ImportOutcome::CsvMissing;
    }

    let out_name = format!("{}{}", config.garage_layer_name, XY_LAYER_SUFFIX);
    let sr = SpatialRef::wgs84();

    for (x_field, y_field) in CANDIDATE_XY_FIELDS {
        let layer = match engine.try_xy_event_layer(
            &config.garage_csv,
            x_field,
            y_field,
            &out_name,
            &sr,
        ) {
            Ok(Some(layer)) => layer,
            Ok(None) => continue,
            Err(e) => return import_failed(notify, e),
        };

        let feature = match engine.save_point_layer(&layer, &gdb.path) {
            Ok(feature) => feature,
            Err(e) => return import_failed(notify, e),
        };

        notify.message(&format!(
            "CSV imported using X='{}', Y='{}'",
            x_field, y_field
        ));
        return ImportOutcome::Imported {
            x_field: x_field.to_string(),
            y_field: y_field.to_string(),
            feature,
        };
    }

    notify.message("Note: CSV present but X/Y headers not detected (skipping import).");
    ImportOutcome::HeadersNotDetected
}

fn import_failed(notify: &mut dyn NotificationSink, e: EngineError) -> ImportOutcome {
    notify.message(&format!(
        "Note: garage import failed ({}); continuing without it.",
        e
    ));
    ImportOutcome::Failed {
        reason: e.to_string(),
    }
}

/// Confirms the requested structure really is there before anything mutates.
/// The filter narrows the scan; exact equality on the raw value decides.
fn verify_target(
    config: &RunConfig,
    filter: &str,
    engine: &dyn GisEngine,
    notify: &mut dyn NotificationSink,
) -> Result<(), RunError> {
    let structures = config.structures_path();

    if !engine.exists(&structures) {
        notify.error(&format!(
            "Structures feature class not found: {}",
            structures.display()
        ));
        return Err(RunError::MissingInput {
            label: "Structures feature class",
            path: structures,
        });
    }

    let fields = engine.field_names(&structures)?;
    if !fields.iter().any(|f| f == BLDG_NAME_FIELD) {
        notify.error(&format!(
            "field '{}' not found in {}. Check your data schema.",
            BLDG_NAME_FIELD,
            structures.display()
        ));
        return Err(RunError::NameFieldMissing {
            field: BLDG_NAME_FIELD,
            collection: structures,
        });
    }

    let matches = engine.search_field_values(&structures, BLDG_NAME_FIELD, Some(filter))?;
    if matches.iter().any(|m| m == &config.selected_name) {
        return Ok(());
    }

    notify.error(&format!(
        "No structure found with {} = {}",
        BLDG_NAME_FIELD, config.selected_name
    ));
    emit_name_hints(&structures, engine, notify);

    Err(RunError::TargetNotFound {
        name: config.selected_name.clone(),
    })
}

/// Lists a few known names so the exact text can be copied. Never fatal.
fn emit_name_hints(structures: &Path, engine: &dyn GisEngine, notify: &mut dyn NotificationSink) {
    let all = match engine.search_field_values(structures, BLDG_NAME_FIELD, None) {
        Ok(values) => values,
        Err(_) => return,
    };

    for name in all.into_iter().unique().sorted().take(MAX_NAME_HINTS) {
        notify.message(&format!("hint: {}", name));
    }
}

fn select_buffer_clip(
    config: &RunConfig,
    gdb: &Geodatabase,
    filter: &str,
    engine: &mut dyn GisEngine,
) -> Result<OutputSet, RunError> {
    let structures = config.structures_path();

    let sel_fc = gdb.path.join(SELECTED_FC);
    let buff_fc = gdb.path.join(BUFFER_FC);
    let clip_fc = gdb.path.join(format!(
        "{}{}",
        CLIP_FC_PREFIX,
        sanitize_fc_name(&config.selected_name)
    ));

    let selected = engine.select(&structures, filter, &sel_fc)?;

    let buffer = engine.buffer(&sel_fc, &config.buffer_radius, DissolveOption::All, &buff_fc)?;

    //Clip all structures to the buffer to see what falls inside it
    let clip = engine.clip(&structures, &buff_fc, &clip_fc)?;

    Ok(OutputSet {
        selected,
        buffer,
        clip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gis_util::util::test_util::{test_dir, write_csv, CaptureSink, MemoryEngine};

    const CAMPUS_GDB: &str = "/data/Campus.gdb";
    const STRUCTURES: &str = "/data/Campus.gdb/Structures";

    fn test_config(dir: &Path) -> RunConfig {
        RunConfig {
            gdb_folder: dir.to_path_buf(),
            gdb_name: "Lab5.gdb".to_string(),
            garage_csv: dir.join("garages.csv"),
            garage_layer_name: "Garages".to_string(),
            campus_gdb: PathBuf::from(CAMPUS_GDB),
            selected_name: "West Garage".to_string(),
            buffer_radius: "150 Meters".to_string(),
            overwrite_outputs: true,
        }
    }

    fn engine_with_campus() -> MemoryEngine {
        let mut engine = MemoryEngine::new();
        engine.add_gdb(CAMPUS_GDB);
        engine.add_collection(
            STRUCTURES,
            &["BldgName", "BldgType"],
            &[
                &["West Garage", "garage"],
                &["East Garage", "garage"],
                &["O'Brien Hall", "hall"],
                &["Library", "academic"],
            ],
        );
        engine
    }

    fn probe_log(engine: &MemoryEngine) -> Vec<&str> {
        engine
            .call_log
            .iter()
            .filter(|c| c.starts_with("try_xy_event_layer:"))
            .map(|c| c.as_str())
            .collect()
    }

    #[test]
    fn creates_gdb_when_missing() {
        let dir = test_dir("creates_gdb");
        let config = test_config(&dir);
        let mut engine = engine_with_campus();
        let mut sink = CaptureSink::default();

        let outcome = run_workflow(&config, &mut engine, &mut sink).unwrap();

        assert!(outcome.gdb.created);
        assert_eq!(outcome.gdb.path, dir.join("Lab5.gdb"));
        assert_eq!(engine.calls_to("create_file_gdb").len(), 1);

        //Every derived artifact lands inside the new geodatabase
        assert!(outcome.outputs.selected.path.starts_with(&outcome.gdb.path));
        assert!(outcome.outputs.buffer.path.starts_with(&outcome.gdb.path));
        assert!(outcome.outputs.clip.path.starts_with(&outcome.gdb.path));

        assert!(sink
            .messages
            .iter()
            .any(|m| m.starts_with("Created file GDB:")));
    }

    #[test]
    fn reuses_existing_gdb() {
        let dir = test_dir("reuses_gdb");
        let config = test_config(&dir);
        let mut engine = engine_with_campus();
        engine.add_gdb(config.gdb_path());
        let mut sink = CaptureSink::default();

        let outcome = run_workflow(&config, &mut engine, &mut sink).unwrap();

        assert!(!outcome.gdb.created);
        assert!(engine.calls_to("create_file_gdb").is_empty());
        assert!(sink
            .messages
            .iter()
            .any(|m| m.starts_with("Using existing GDB:")));
    }

    #[test]
    fn import_prefers_first_candidate_pair() {
        let dir = test_dir("import_priority");
        let config = test_config(&dir);
        write_csv(
            &dir,
            "garages.csv",
            "X,Y,Lon,Lat",
            &["1.0,2.0,3.0,4.0"],
        )
        .unwrap();
        let mut engine = engine_with_campus();
        let mut sink = CaptureSink::default();

        let outcome = run_workflow(&config, &mut engine, &mut sink).unwrap();

        match &outcome.import {
            ImportOutcome::Imported { x_field, y_field, .. } => {
                assert_eq!(x_field, "X");
                assert_eq!(y_field, "Y");
            }
            other => panic!("expected an import, got {:?}", other),
        }

        //The winning probe is the only probe
        assert_eq!(probe_log(&engine), vec!["try_xy_event_layer:X/Y"]);
    }

    #[test]
    fn import_falls_back_through_candidates() {
        let dir = test_dir("import_fallback");
        let config = test_config(&dir);
        write_csv(
            &dir,
            "garages.csv",
            "Lon,Lat,Name",
            &["-96.34,30.61,North Garage", "-96.33,30.60,West Garage"],
        )
        .unwrap();
        let mut engine = engine_with_campus();
        let mut sink = CaptureSink::default();

        let outcome = run_workflow(&config, &mut engine, &mut sink).unwrap();

        match &outcome.import {
            ImportOutcome::Imported {
                x_field,
                y_field,
                feature,
            } => {
                assert_eq!(x_field, "Lon");
                assert_eq!(y_field, "Lat");
                assert_eq!(feature.feature_count, 2);
                assert_eq!(feature.path, outcome.gdb.path.join("Garages_xy"));
            }
            other => panic!("expected an import, got {:?}", other),
        }

        //X/Y missed, Lon/Lat hit, nothing after was tried
        assert_eq!(
            probe_log(&engine),
            vec!["try_xy_event_layer:X/Y", "try_xy_event_layer:Lon/Lat"]
        );

        assert!(sink
            .messages
            .contains(&"CSV imported using X='Lon', Y='Lat'".to_string()));
    }

    #[test]
    fn undetected_headers_skip_import_without_failing() {
        let dir = test_dir("import_miss");
        let config = test_config(&dir);
        write_csv(&dir, "garages.csv", "Name,Capacity", &["North Garage,120"]).unwrap();
        let mut engine = engine_with_campus();
        let mut sink = CaptureSink::default();

        let outcome = run_workflow(&config, &mut engine, &mut sink).unwrap();

        assert!(matches!(outcome.import, ImportOutcome::HeadersNotDetected));
        //All four pairs were probed before giving up
        assert_eq!(probe_log(&engine).len(), 4);
        assert!(sink
            .messages
            .iter()
            .any(|m| m.contains("X/Y headers not detected")));

        //The run still produced its outputs
        assert_eq!(outcome.outputs.selected.feature_count, 1);
    }

    #[test]
    fn missing_csv_skips_import() {
        let dir = test_dir("import_no_csv");
        let config = test_config(&dir);
        let mut engine = engine_with_campus();
        let mut sink = CaptureSink::default();

        let outcome = run_workflow(&config, &mut engine, &mut sink).unwrap();

        assert!(matches!(outcome.import, ImportOutcome::CsvMissing));
        assert!(probe_log(&engine).is_empty());
        assert!(sink
            .messages
            .iter()
            .any(|m| m.contains("CSV not found; skipping garages import")));
    }

    #[test]
    fn import_engine_failure_is_absorbed() {
        let dir = test_dir("import_absorbed");
        let config = test_config(&dir);
        write_csv(&dir, "garages.csv", "Lon,Lat", &["-96.34,30.61"]).unwrap();
        let mut engine = engine_with_campus();
        engine.fail_on("save_point_layer");
        let mut sink = CaptureSink::default();

        let outcome = run_workflow(&config, &mut engine, &mut sink).unwrap();

        match &outcome.import {
            ImportOutcome::Failed { reason } => assert!(reason.contains("save_point_layer")),
            other => panic!("expected an absorbed failure, got {:?}", other),
        }

        //Absorbed as a notice, not an error
        assert!(sink.errors.is_empty());
        assert_eq!(outcome.outputs.clip.feature_count, 4);
    }

    #[test]
    fn target_not_found_stops_before_outputs() {
        let dir = test_dir("target_missing");
        let mut config = test_config(&dir);
        config.selected_name = "Nonexistent Hall".to_string();
        let mut engine = engine_with_campus();
        let mut sink = CaptureSink::default();

        let err = run_workflow(&config, &mut engine, &mut sink).unwrap_err();

        assert!(matches!(err, RunError::TargetNotFound { ref name } if name == "Nonexistent Hall"));

        assert!(engine.calls_to("select").is_empty());
        assert!(engine.calls_to("buffer").is_empty());
        assert!(engine.calls_to("clip").is_empty());

        assert_eq!(
            sink.errors,
            vec!["No structure found with BldgName = Nonexistent Hall"]
        );

        //Distinct known names, sorted
        let hints: Vec<&str> = sink
            .messages
            .iter()
            .filter(|m| m.starts_with("hint: "))
            .map(|m| m.as_str())
            .collect();
        assert_eq!(
            hints,
            vec![
                "hint: East Garage",
                "hint: Library",
                "hint: O'Brien Hall",
                "hint: West Garage"
            ]
        );
    }

    #[test]
    fn match_is_case_sensitive() {
        let dir = test_dir("case_sensitive");
        let mut config = test_config(&dir);
        config.selected_name = "WEST GARAGE".to_string();
        let mut engine = engine_with_campus();
        let mut sink = CaptureSink::default();

        //The engine's filter matches case insensitively; the exact check decides
        let err = run_workflow(&config, &mut engine, &mut sink).unwrap_err();

        assert!(matches!(err, RunError::TargetNotFound { .. }));
        assert!(engine.calls_to("select").is_empty());
    }

    #[test]
    fn quoted_name_survives_filtering() {
        let dir = test_dir("quoted_name");
        let mut config = test_config(&dir);
        config.selected_name = "O'Brien Hall".to_string();
        let mut engine = engine_with_campus();
        let mut sink = CaptureSink::default();

        let outcome = run_workflow(&config, &mut engine, &mut sink).unwrap();

        assert_eq!(outcome.outputs.selected.feature_count, 1);
        assert_eq!(
            outcome.outputs.clip.path,
            outcome.gdb.path.join("clip_O'Brien_Hall")
        );
    }

    #[test]
    fn end_to_end_scenario() {
        let dir = test_dir("end_to_end");
        let config = test_config(&dir);
        write_csv(
            &dir,
            "garages.csv",
            "Lon,Lat,Name",
            &["-96.34,30.61,North Garage", "-96.33,30.60,West Garage"],
        )
        .unwrap();
        let mut engine = engine_with_campus();
        let mut sink = CaptureSink::default();

        let outcome = run_workflow(&config, &mut engine, &mut sink).unwrap();

        let gdb = dir.join("Lab5.gdb");
        assert!(outcome.gdb.created);
        assert_eq!(outcome.gdb.path, gdb);

        assert!(engine.has_collection(&gdb.join("Garages_xy")));
        assert!(engine.has_collection(&gdb.join("structure_selected")));
        assert!(engine.has_collection(&gdb.join("structure_buffer")));
        assert!(engine.has_collection(&gdb.join("clip_West_Garage")));

        assert_eq!(outcome.outputs.selected.feature_count, 1);
        //Dissolved into one combined region
        assert_eq!(outcome.outputs.buffer.feature_count, 1);

        assert!(sink.messages.contains(&"success".to_string()));
        assert_eq!(
            sink.messages.last().unwrap(),
            &format!("Outputs GDB: {}", gdb.display())
        );
        assert!(sink.errors.is_empty());
    }

    #[test]
    fn engine_failure_is_reported_and_returned() {
        let dir = test_dir("engine_failure");
        let config = test_config(&dir);
        let mut engine = engine_with_campus();
        engine.fail_on("buffer");
        let mut sink = CaptureSink::default();

        let err = run_workflow(&config, &mut engine, &mut sink).unwrap_err();

        match err {
            RunError::Engine(EngineError::OperationFailed { op, .. }) => assert_eq!(op, "buffer"),
            other => panic!("expected an engine error, got {:?}", other),
        }

        //Reported once, with the underlying message
        assert_eq!(sink.errors.len(), 1);
        assert!(sink.errors[0].contains("geoprocessing failed"));
        assert!(sink.errors[0].contains("buffer failed"));

        //The selection made before the failure is left in place
        assert!(engine.has_collection(&config.gdb_path().join("structure_selected")));
        assert!(engine.calls_to("clip").is_empty());
    }

    #[test]
    fn gdb_create_failure_is_fatal() {
        let dir = test_dir("create_failure");
        let config = test_config(&dir);
        let mut engine = engine_with_campus();
        engine.fail_on("create_file_gdb");
        let mut sink = CaptureSink::default();

        let err = run_workflow(&config, &mut engine, &mut sink).unwrap_err();

        assert!(matches!(err, RunError::Engine(_)));
        assert!(sink.errors[0].contains("geoprocessing failed"));
        assert!(engine.calls_to("select").is_empty());
    }

    #[test]
    fn missing_gdb_folder_is_reported() {
        let dir = test_dir("missing_folder");
        let mut config = test_config(&dir);
        config.gdb_folder = dir.join("not_there");
        let mut engine = engine_with_campus();
        let mut sink = CaptureSink::default();

        let err = run_workflow(&config, &mut engine, &mut sink).unwrap_err();

        assert!(matches!(
            err,
            RunError::MissingInput {
                label: "GDB folder",
                ..
            }
        ));
        assert!(sink.errors[0].starts_with("GDB folder not found:"));
        assert!(engine.calls_to("create_file_gdb").is_empty());
    }

    #[test]
    fn missing_campus_gdb_is_reported() {
        let dir = test_dir("missing_campus");
        let mut config = test_config(&dir);
        config.campus_gdb = PathBuf::from("/data/NotACampus.gdb");
        let mut engine = engine_with_campus();
        let mut sink = CaptureSink::default();

        let err = run_workflow(&config, &mut engine, &mut sink).unwrap_err();

        assert!(matches!(
            err,
            RunError::MissingInput {
                label: "campus GDB",
                ..
            }
        ));
    }

    #[test]
    fn missing_structures_collection_is_reported() {
        let dir = test_dir("missing_structures");
        let config = test_config(&dir);
        let mut engine = MemoryEngine::new();
        engine.add_gdb(CAMPUS_GDB);
        let mut sink = CaptureSink::default();

        let err = run_workflow(&config, &mut engine, &mut sink).unwrap_err();

        assert!(matches!(
            err,
            RunError::MissingInput {
                label: "Structures feature class",
                ..
            }
        ));
        assert!(sink.errors[0].contains("Structures feature class not found"));
    }

    #[test]
    fn missing_name_field_is_fatal() {
        let dir = test_dir("missing_name_field");
        let config = test_config(&dir);
        let mut engine = MemoryEngine::new();
        engine.add_gdb(CAMPUS_GDB);
        engine.add_collection(STRUCTURES, &["Name"], &[&["West Garage"]]);
        let mut sink = CaptureSink::default();

        let err = run_workflow(&config, &mut engine, &mut sink).unwrap_err();

        assert!(matches!(err, RunError::NameFieldMissing { field: "BldgName", .. }));
        assert!(sink.errors[0].contains("Check your data schema"));
        assert!(engine.calls_to("select").is_empty());
    }

    #[test]
    fn existing_output_respected_without_overwrite() {
        let dir = test_dir("no_overwrite");
        let mut config = test_config(&dir);
        config.overwrite_outputs = false;
        let mut engine = engine_with_campus();
        engine.add_gdb(config.gdb_path());
        engine.add_collection(config.gdb_path().join("structure_selected"), &["BldgName"], &[]);
        let mut sink = CaptureSink::default();

        let err = run_workflow(&config, &mut engine, &mut sink).unwrap_err();

        assert!(matches!(
            err,
            RunError::Engine(EngineError::OutputExists(_))
        ));
    }

    #[test]
    fn existing_output_replaced_with_overwrite() {
        let dir = test_dir("overwrite");
        let config = test_config(&dir);
        let mut engine = engine_with_campus();
        engine.add_gdb(config.gdb_path());
        engine.add_collection(config.gdb_path().join("structure_selected"), &["BldgName"], &[]);
        let mut sink = CaptureSink::default();

        let outcome = run_workflow(&config, &mut engine, &mut sink).unwrap();

        assert_eq!(outcome.outputs.selected.feature_count, 1);
    }
}
