use crate::csv_processor::header::{ColumnRole, HeaderLayout};
use crate::csv_processor::tokenizer::parse_csv_line;
use crate::utils::RowError;
use serde::{Deserialize, Serialize};

pub const CONTENT_SEPARATOR: &str = ";";

/// One imported row: the two role columns plus everything else folded into `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRow {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

/// Builds a [`CsvRow`] from one data line, or the reason the line has to be skipped.
pub fn assemble_row(layout: &HeaderLayout, line: &str) -> Result<CsvRow, RowError> {
    if line.trim().is_empty() {
        return Err(RowError::EmptyRow);
    }

    let values = parse_csv_line(line);

    if let Some((_, role)) = layout
        .required()
        .iter()
        .find(|(index, _)| non_blank(&values, *index).is_none())
    {
        return Err(RowError::MissingRequiredValue(role.to_string()));
    }

    let role_value = |role: ColumnRole| -> String {
        layout
            .outside_content()
            .iter()
            .find(|(_, r)| *r == role)
            .and_then(|(index, _)| values.get(*index))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    Ok(CsvRow {
        name: role_value(ColumnRole::Name),
        kind: role_value(ColumnRole::Type),
        content: build_content(layout, &values),
    })
}

fn build_content(layout: &HeaderLayout, values: &[String]) -> String {
    let mut parts: Vec<String> = layout
        .columns()
        .iter()
        .zip(values)
        .enumerate()
        .filter(|(index, _)| layout.is_content_part(*index))
        .filter_map(|(_, (column, value))| {
            let value = value.trim();
            (!column.is_empty() && !value.is_empty())
                .then(|| format!("{}={}", column.to_uppercase(), value))
        })
        .collect();

    if let Some(raw) = layout
        .content_index()
        .and_then(|index| non_blank(values, index))
    {
        parts.push(raw.to_string());
    }

    parts.join(CONTENT_SEPARATOR)
}

fn non_blank(values: &[String], index: usize) -> Option<&str> {
    values
        .get(index)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(header: &str) -> HeaderLayout {
        HeaderLayout::resolve(header).unwrap()
    }

    #[test]
    fn extra_columns_become_content() {
        let row = assemble_row(&layout("name,type,extra"), "foo,bar,baz").unwrap();
        assert_eq!(
            row,
            CsvRow {
                name: "foo".into(),
                kind: "bar".into(),
                content: "EXTRA=baz".into(),
            }
        );
    }

    #[test]
    fn literal_content_is_appended_last() {
        let row = assemble_row(&layout("name,type,extra,content"), "foo,bar,baz,raw").unwrap();
        assert_eq!(row.content, "EXTRA=baz;raw");

        let row = assemble_row(&layout("content,name,type,extra"), "raw,foo,bar,baz").unwrap();
        assert_eq!(row.content, "EXTRA=baz;raw");
    }

    #[test]
    fn literal_content_alone() {
        let row = assemble_row(&layout("name,type,content"), "foo,bar,  hello ").unwrap();
        assert_eq!(row.content, "hello");
    }

    #[test]
    fn blank_content_contributes_nothing() {
        let row = assemble_row(&layout("name,type,a,content,b"), "n,t,1, ,2").unwrap();
        assert_eq!(row.content, "A=1;B=2");

        let row = assemble_row(&layout("name,type,content"), "n,t,").unwrap();
        assert_eq!(row.content, "");
    }

    #[test]
    fn empty_extra_values_are_skipped() {
        let row = assemble_row(&layout("name,type,a,b,c"), "n,t,,2,").unwrap();
        assert_eq!(row.content, "B=2");
    }

    #[test]
    fn blank_line_is_rejected() {
        assert_eq!(
            assemble_row(&layout("name,type"), "   ").unwrap_err(),
            RowError::EmptyRow
        );
    }

    #[test]
    fn blank_required_value_is_rejected() {
        let layout = layout("name,type,extra");
        assert_eq!(
            assemble_row(&layout, " ,bar,baz").unwrap_err(),
            RowError::MissingRequiredValue("name".into())
        );
        assert_eq!(
            assemble_row(&layout, "foo,,baz").unwrap_err(),
            RowError::MissingRequiredValue("type".into())
        );
    }

    #[test]
    fn short_row_missing_required_value_is_rejected() {
        assert_eq!(
            assemble_row(&layout("extra,name,type"), "x,foo").unwrap_err(),
            RowError::MissingRequiredValue("type".into())
        );
    }

    #[test]
    fn ragged_rows_only_use_overlapping_positions() {
        let layout = layout("name,type,extra");
        let long = assemble_row(&layout, "foo,bar,baz,ignored,also").unwrap();
        assert_eq!(long.content, "EXTRA=baz");

        let short = assemble_row(&layout, "foo,bar").unwrap();
        assert_eq!(short.content, "");
    }

    #[test]
    fn quoted_values_keep_commas_and_quotes() {
        let row = assemble_row(
            &layout("name,type,note"),
            r#""a, b",action,"say ""hi""""#,
        )
        .unwrap();
        assert_eq!(row.name, "a, b");
        assert_eq!(row.content, r#"NOTE=say "hi""#);
    }

    #[test]
    fn unnamed_column_is_not_folded_into_content() {
        let row = assemble_row(&layout("name,,type,x"), "n,orphan,t,1").unwrap();
        assert_eq!(row.kind, "t");
        assert_eq!(row.content, "X=1");
    }

    #[test]
    fn serializes_kind_as_type() {
        let row = CsvRow {
            name: "n".into(),
            kind: "t".into(),
            content: "c".into(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["type"], "t");
    }
}
