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
use log::{error, info};

/// Fire and forget progress/error channel.
/// Notification order follows the order of the workflow stages.
pub trait NotificationSink {
    fn message(&mut self, text: &str);

    fn error(&mut self, text: &str);
}

/// Forwards notifications to the log crate
pub struct LogSink;

impl NotificationSink for LogSink {
    fn message(&mut self, text: &str) {
        info!("{}", text);
    }

    fn error(&mut self, text: &str) {
        error!("{}", text);
    }
}
