use serde::Serialize;

use crate::context::IdFormat;

/// Flat record written to the export file
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExportRow {
    pub format: IdFormat,
    pub external_id: String,
    /// Name of the timestamp column (`watched_at`, `listed_at`, `collected_at`)
    pub timestamp_field: &'static str,
    pub timestamp: String,
    pub detail: RowDetail,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RowDetail {
    Titled {
        title: String,
    },
    Episode {
        season: Option<u32>,
        episode: Option<u32>,
        show_title: String,
    },
}

impl ExportRow {
    /// Column names of this row, in output order
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = vec![self.format.as_str(), self.timestamp_field];
        match self.detail {
            RowDetail::Titled { .. } => names.push("title"),
            RowDetail::Episode { .. } => names.extend(["season", "episode", "show_title"]),
        }
        names
    }

    pub fn values(&self) -> Vec<String> {
        let mut values = vec![self.external_id.clone(), self.timestamp.clone()];
        match &self.detail {
            RowDetail::Titled { title } => values.push(title.clone()),
            RowDetail::Episode {
                season,
                episode,
                show_title,
            } => {
                values.push(season.map(|s| s.to_string()).unwrap_or_default());
                values.push(episode.map(|e| e.to_string()).unwrap_or_default());
                values.push(show_title.clone());
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_row_columns() {
        let row = ExportRow {
            format: IdFormat::Tmdb,
            external_id: "397629".to_string(),
            timestamp_field: "watched_at",
            timestamp: "2014-03-31T09:28:53.000Z".to_string(),
            detail: RowDetail::Episode {
                season: Some(2),
                episode: Some(1),
                show_title: "Parks and Recreation".to_string(),
            },
        };
        assert_eq!(row.field_names(), vec!["tmdb", "watched_at", "season", "episode", "show_title"]);
        assert_eq!(
            row.values(),
            vec!["397629", "2014-03-31T09:28:53.000Z", "2", "1", "Parks and Recreation"]
        );
    }
}
