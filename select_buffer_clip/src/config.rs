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

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::STRUCTURES_FC;

/// The inputs for one select/buffer/clip run.
/// All seven values are required; the caller supplies them fully populated.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Folder that will contain the working geodatabase
    pub gdb_folder: PathBuf,

    /// Geodatabase name, e.g. Lab5.gdb
    pub gdb_name: String,

    /// Csv file with the garage coordinates
    pub garage_csv: PathBuf,

    /// Base name for the imported point feature class
    pub garage_layer_name: String,

    /// Workspace containing the Structures feature class
    pub campus_gdb: PathBuf,

    /// Value matched against BldgName in Structures
    pub selected_name: String,

    /// Distance plus unit, e.g. "150 Meters"
    pub buffer_radius: String,

    #[serde(default = "default_overwrite_outputs")]
    pub overwrite_outputs: bool,
}

fn default_overwrite_outputs() -> bool {
    true
}

impl RunConfig {
    pub fn from_toml_str(raw: &str) -> Result<RunConfig> {
        let config: RunConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_path(path: &Path) -> Result<RunConfig> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading run config {:?}", path))?;
        Self::from_toml_str(&raw)
    }

    /// A value is required for every field
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("gdb_folder", self.gdb_folder.as_os_str().is_empty()),
            ("gdb_name", self.gdb_name.trim().is_empty()),
            ("garage_csv", self.garage_csv.as_os_str().is_empty()),
            ("garage_layer_name", self.garage_layer_name.trim().is_empty()),
            ("campus_gdb", self.campus_gdb.as_os_str().is_empty()),
            ("selected_name", self.selected_name.trim().is_empty()),
            ("buffer_radius", self.buffer_radius.trim().is_empty()),
        ];

        for (label, is_empty) in required {
            if is_empty {
                bail!("a value is required for: {}", label);
            }
        }

        Ok(())
    }

    /// Full path of the working geodatabase, folder joined with name
    pub fn gdb_path(&self) -> PathBuf {
        self.gdb_folder.join(&self.gdb_name)
    }

    pub fn structures_path(&self) -> PathBuf {
        self.campus_gdb.join(STRUCTURES_FC)
    }
}
