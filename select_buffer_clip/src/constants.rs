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

/// Candidate X/Y column pairs for the garage csv, probed in this order.
/// The first pair present in the header wins.
pub const CANDIDATE_XY_FIELDS: [(&str, &str); 4] = [
    ("X", "Y"),
    ("Lon", "Lat"),
    ("Longitude", "Latitude"),
    ("long", "lat"),
];

/// Feature class holding the campus buildings, inside the campus geodatabase
pub const STRUCTURES_FC: &str = "Structures";

/// Attribute carrying the building name in the structures feature class
pub const BLDG_NAME_FIELD: &str = "BldgName";

pub const SELECTED_FC: &str = "structure_selected";
pub const BUFFER_FC: &str = "structure_buffer";
pub const CLIP_FC_PREFIX: &str = "clip_";

/// Event layers built from the csv carry this suffix, also once saved
pub const XY_LAYER_SUFFIX: &str = "_xy";

/// How many known building names to list when the requested one is missing
pub const MAX_NAME_HINTS: usize = 10;
