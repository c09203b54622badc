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

use crate::engine::{EngineError, EventPoint};

/// Returns the header fields of a csv file, whitespace trimmed
pub fn read_header_fields(csv_path: &Path) -> Result<Vec<String>, EngineError> {
    let mut rdr = csv::Reader::from_path(csv_path)?;
    let headers = rdr.headers()?;

    Ok(headers.iter().map(|h| h.trim().to_string()).collect())
}

/// Reads coordinate pairs out of a csv file using the two named columns.
/// Returns Ok(None) when either column is missing from the header.
pub fn read_xy_rows(
    csv_path: &Path,
    x_field: &str,
    y_field: &str,
) -> Result<Option<Vec<EventPoint>>, EngineError> {
    let mut rdr = csv::Reader::from_path(csv_path)?;
    let headers = rdr.headers()?.clone();

    let x_idx = headers.iter().position(|h| h.trim() == x_field);
    let y_idx = headers.iter().position(|h| h.trim() == y_field);

    let (x_idx, y_idx) = match (x_idx, y_idx) {
        (Some(x), Some(y)) => (x, y),
        _ => return Ok(None),
    };

    let mut points = Vec::new();

    for record in rdr.records() {
        let record = record?;

        let x = parse_coordinate(record.get(x_idx), x_field)?;
        let y = parse_coordinate(record.get(y_idx), y_field)?;

        points.push(EventPoint { x, y });
    }

    Ok(Some(points))
}

fn parse_coordinate(raw: Option<&str>, field: &str) -> Result<f64, EngineError> {
    let raw = raw.unwrap_or("").trim();

    raw.parse::<f64>().map_err(|_| EngineError::OperationFailed {
        op: "make xy event layer",
        reason: format!("column {} holds a non numeric value {:?}", field, raw),
    })
}
