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
use std::path::Path;

use crate::engine::{DissolveOption, EngineError, FeatureArtifact, PointLayer, SpatialRef};

/// The geoprocessing operations the workflow tools are written against.
///
/// A production implementation delegates to a real engine; test_util ships an
/// in memory one. Geometry is always the engine's problem, never the caller's.
pub trait GisEngine {
    /// When enabled, artifact producing operations replace an existing output
    /// instead of failing on it
    fn set_overwrite_outputs(&mut self, enabled: bool);

    /// True if any dataset (geodatabase, feature class, plain file) lives at this path
    fn exists(&self, path: &Path) -> bool;

    fn create_file_gdb(&mut self, folder: &Path, name: &str) -> Result<(), EngineError>;

    /// Builds a coordinate event layer from a table.
    /// Returns Ok(None) when either field name is absent from the table header.
    fn try_xy_event_layer(
        &mut self,
        table: &Path,
        x_field: &str,
        y_field: &str,
        out_name: &str,
        spatial_ref: &SpatialRef,
    ) -> Result<Option<PointLayer>, EngineError>;

    /// Persists an event layer into a geodatabase as a permanent feature class
    fn save_point_layer(
        &mut self,
        layer: &PointLayer,
        gdb: &Path,
    ) -> Result<FeatureArtifact, EngineError>;

    fn field_names(&self, collection: &Path) -> Result<Vec<String>, EngineError>;

    /// Values of one field, optionally narrowed by an attribute filter
    fn search_field_values(
        &self,
        collection: &Path,
        field: &str,
        attribute_filter: Option<&str>,
    ) -> Result<Vec<String>, EngineError>;

    fn select(
        &mut self,
        collection: &Path,
        attribute_filter: &str,
        out_fc: &Path,
    ) -> Result<FeatureArtifact, EngineError>;

    /// Buffers a feature class by a "<number> <unit>" distance string
    fn buffer(
        &mut self,
        in_fc: &Path,
        distance: &str,
        dissolve: DissolveOption,
        out_fc: &Path,
    ) -> Result<FeatureArtifact, EngineError>;

    fn clip(
        &mut self,
        in_fc: &Path,
        clip_fc: &Path,
        out_fc: &Path,
    ) -> Result<FeatureArtifact, EngineError>;
}
