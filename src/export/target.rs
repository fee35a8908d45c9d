//! Export naming

use serde::Serialize;
use std::fmt;

/// Where one table is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportTarget {
    /// Directory prefix, e.g. `2023/1/boxscore_score`
    pub directory: String,
    /// File name inside `directory`
    pub file_name: String,
    /// Entity label the file was named after
    pub label: String,
}

impl ExportTarget {
    /// Create a target from explicit parts
    pub fn new(
        directory: impl Into<String>,
        file_name: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
            label: label.into(),
        }
    }

    /// Target for one entity of one game.
    ///
    /// Layout: `{season}/{week}/{folder}/{label}_{home}_{away}_{season}_{week}.csv`
    pub fn for_entity(
        season: &str,
        week: &str,
        folder: &str,
        label: &str,
        home_team: &str,
        away_team: &str,
    ) -> Self {
        let season = sanitize_component(season);
        let week = sanitize_component(week);
        let folder = sanitize_component(folder);
        let label = sanitize_component(label);
        let home = sanitize_component(home_team);
        let away = sanitize_component(away_team);

        Self {
            directory: format!("{season}/{week}/{folder}"),
            file_name: format!("{label}_{home}_{away}_{season}_{week}.csv"),
            label,
        }
    }

    /// Full object path: `directory/file_name`
    pub fn object_path(&self) -> String {
        join_object_path(&self.directory, &self.file_name)
    }
}

/// Acknowledgement returned by a finished export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReceipt {
    /// Directory the file was written under, as given
    pub directory: String,
    /// File name, as given
    pub file_name: String,
}

impl ExportReceipt {
    /// Create a receipt
    pub fn new(directory: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }
}

impl fmt::Display for ExportReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_object_path(&self.directory, &self.file_name))
    }
}

/// Join a directory prefix and a file name with exactly one `/`
pub fn join_object_path(directory: &str, file_name: &str) -> String {
    let directory = directory.trim_matches('/');
    if directory.is_empty() {
        file_name.to_string()
    } else {
        format!("{directory}/{file_name}")
    }
}

/// Make one path component safe: separators and whitespace become `_`
pub fn sanitize_component(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_whitespace() {
                '_'
            } else {
                c
            }
        })
        .collect()
}
