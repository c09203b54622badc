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
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// EPSG based spatial reference, enough to tag an event layer with its CRS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialRef {
    epsg: u32,
}

impl SpatialRef {
    pub fn from_epsg(epsg: u32) -> Self {
        SpatialRef { epsg }
    }

    pub fn wgs84() -> Self {
        SpatialRef::from_epsg(4326)
    }

    pub fn epsg(&self) -> u32 {
        self.epsg
    }
}

impl fmt::Display for SpatialRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DissolveOption {
    All,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventPoint {
    pub x: f64,
    pub y: f64,
}

/// Coordinate event layer materialized from a table's X/Y columns.
/// Lives in memory until saved into a geodatabase.
#[derive(Debug, Clone)]
pub struct PointLayer {
    pub name: String,
    pub spatial_ref: SpatialRef,
    pub x_field: String,
    pub y_field: String,
    pub points: Vec<EventPoint>,
}

/// A feature class produced by an engine operation
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureArtifact {
    pub path: PathBuf,
    pub feature_count: u64,
}
