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

/// Doubles embedded single quotes so a value can sit inside a quoted filter literal
pub fn escape_filter_literal(s: &str) -> String {
    s.replace('\'', "''")
}

/// Renders an equality attribute filter, quoting and escaping the value
pub fn name_equals_filter(field: &str, value: &str) -> String {
    format!("{} = '{}'", field, escape_filter_literal(value))
}

/// Feature class names cannot carry spaces
pub fn sanitize_fc_name(s: &str) -> String {
    s.replace(' ', "_")
}
