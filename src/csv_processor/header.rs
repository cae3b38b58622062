use crate::csv_processor::tokenizer::parse_csv_line;
use crate::utils::{CsvImportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical meaning of a header column, matched case-insensitively by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Name,
    Type,
    Content,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Name => "name",
            ColumnRole::Type => "type",
            ColumnRole::Content => "content",
        }
    }

    pub fn matches(&self, column: &str) -> bool {
        column.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles whose column must exist in the header and be non-blank in every row.
pub const REQUIRED_ROLES: [ColumnRole; 2] = [ColumnRole::Name, ColumnRole::Type];

/// Roles extracted into their own record field instead of the synthesized content.
pub const OUTSIDE_CONTENT_ROLES: [ColumnRole; 2] = [ColumnRole::Name, ColumnRole::Type];

/// Column facts resolved once from the header line of a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    columns: Vec<String>,
    required: Vec<(usize, ColumnRole)>,
    outside_content: Vec<(usize, ColumnRole)>,
    content_index: Option<usize>,
}

impl HeaderLayout {
    pub fn resolve(header_line: &str) -> Result<Self> {
        Self::from_columns(parse_csv_line(header_line))
    }

    /// Unnamed columns keep their position so data values stay aligned. Blank header cells
    /// are not dropped before indexing: `name,,type` puts `type` at index 2, not 1.
    pub fn from_columns(columns: Vec<String>) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(|c| c.trim().to_string()).collect();
        if columns.iter().all(|c| c.is_empty()) {
            return Err(CsvImportError::EmptyHeader);
        }

        let required = REQUIRED_ROLES
            .iter()
            .map(|role| {
                position_of(&columns, *role)
                    .map(|index| (index, *role))
                    .ok_or_else(|| CsvImportError::MissingRequiredColumn(role.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let outside_content = OUTSIDE_CONTENT_ROLES
            .iter()
            .filter_map(|role| position_of(&columns, *role).map(|index| (index, *role)))
            .collect();

        let content_index = position_of(&columns, ColumnRole::Content);

        Ok(Self {
            columns,
            required,
            outside_content,
            content_index,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn required(&self) -> &[(usize, ColumnRole)] {
        &self.required
    }

    pub fn outside_content(&self) -> &[(usize, ColumnRole)] {
        &self.outside_content
    }

    pub fn content_index(&self) -> Option<usize> {
        self.content_index
    }

    pub fn index_of(&self, role: ColumnRole) -> Option<usize> {
        position_of(&self.columns, role)
    }

    /// Whether the column at `index` feeds the synthesized content string.
    pub fn is_content_part(&self, index: usize) -> bool {
        self.content_index != Some(index)
            && !self.outside_content.iter().any(|(i, _)| *i == index)
    }
}

// first match wins when a role name is repeated
fn position_of(columns: &[String], role: ColumnRole) -> Option<usize> {
    columns.iter().position(|c| role.matches(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_roles_case_insensitively() {
        let lower = HeaderLayout::resolve("name,type,content").unwrap();
        let mixed = HeaderLayout::resolve("Name,TYPE,Content").unwrap();

        assert_eq!(lower.required(), mixed.required());
        assert_eq!(lower.outside_content(), mixed.outside_content());
        assert_eq!(lower.content_index(), mixed.content_index());
        assert_eq!(
            mixed.required(),
            &[(0, ColumnRole::Name), (1, ColumnRole::Type)]
        );
        assert_eq!(mixed.content_index(), Some(2));
    }

    #[test]
    fn content_column_is_optional() {
        let layout = HeaderLayout::resolve("type,extra,name").unwrap();
        assert_eq!(layout.content_index(), None);
        assert_eq!(layout.index_of(ColumnRole::Name), Some(2));
        assert!(layout.is_content_part(1));
        assert!(!layout.is_content_part(0));
        assert!(!layout.is_content_part(2));
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let err = HeaderLayout::resolve("type,content").unwrap_err();
        assert!(matches!(err, CsvImportError::MissingRequiredColumn(ref c) if c == "name"));

        let err = HeaderLayout::resolve("name,content").unwrap_err();
        assert!(matches!(err, CsvImportError::MissingRequiredColumn(ref c) if c == "type"));
    }

    #[test]
    fn blank_header_is_rejected() {
        assert!(matches!(
            HeaderLayout::resolve(" , ,").unwrap_err(),
            CsvImportError::EmptyHeader
        ));
    }

    #[test]
    fn unnamed_columns_keep_their_position() {
        let layout = HeaderLayout::resolve("name,,type").unwrap();
        assert_eq!(layout.column_count(), 3);
        assert_eq!(layout.index_of(ColumnRole::Type), Some(2));
    }

    #[test]
    fn first_duplicate_wins() {
        let layout = HeaderLayout::resolve("name,type,NAME").unwrap();
        assert_eq!(layout.index_of(ColumnRole::Name), Some(0));
        assert!(layout.is_content_part(2));
    }
}
