//! CSV export for the admin panel.
//!
//! The header row is written bare; every value is double-quoted with inner
//! quotes doubled. Lines end in `\n` and the output has no trailing newline.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::ExportError;
use crate::model::feedback::{FeedbackSubmission, Question};
use crate::model::rating::Rating;
use crate::model::user::UserRecord;

/// A record that can be written as one CSV line.
pub trait CsvRow {
    fn headers() -> Vec<&'static str>;
    fn fields(&self) -> Vec<String>;
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl CsvRow for Rating {
    fn headers() -> Vec<&'static str> {
        vec!["id", "user_id", "model_number", "star_rating", "comments", "created_at"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            opt(&self.id),
            self.user_id.clone(),
            self.model_number.to_string(),
            self.star_rating.to_string(),
            opt(&self.comments),
            self.created_at.map(|at| at.to_rfc3339()).unwrap_or_default(),
        ]
    }
}

impl CsvRow for UserRecord {
    fn headers() -> Vec<&'static str> {
        vec!["id", "user_id", "name", "place", "phone", "email", "visitor_count", "repeat_count"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            opt(&self.id),
            self.user_id.clone(),
            self.name.clone(),
            self.place.clone(),
            opt(&self.phone),
            opt(&self.email),
            self.visitor_count.to_string(),
            self.repeat_count.to_string(),
        ]
    }
}

impl CsvRow for FeedbackSubmission {
    fn headers() -> Vec<&'static str> {
        vec![
            "id",
            "user_id",
            "name",
            "place",
            "mobile",
            "email",
            "accompanying_type",
            "accompanying_count",
            "overall_experience",
            "overall_experience_comment",
            "organization",
            "organization_comment",
            "movement",
            "movement_comment",
            "learning",
            "learning_comment",
            "improvements",
            "improvements_comment",
            "additional_comments",
            "submitted_at",
            "submission_language",
        ]
    }

    fn fields(&self) -> Vec<String> {
        let mut fields = vec![
            opt(&self.id),
            self.user_id.clone(),
            self.name.clone(),
            self.place.clone(),
            opt(&self.mobile),
            opt(&self.email),
            self.accompanying_type.clone(),
            self.accompanying_count.to_string(),
        ];
        for question in Question::ALL {
            let (answer, comment) = self.answer(question);
            fields.push(answer.to_string());
            fields.push(comment.to_string());
        }
        fields.push(self.additional_comments.clone());
        fields.push(self.submitted_at.to_rfc3339());
        fields.push(self.submission_language.code().to_string());
        fields
    }
}

/// Renders `rows` as CSV. An empty slice renders as an empty string.
pub fn to_csv<R: CsvRow>(rows: &[R]) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row.fields())?;
    }
    let body = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;

    let mut out = R::headers().join(",");
    out.push('\n');
    out.push_str(&String::from_utf8(body)?);
    Ok(out.trim_end_matches('\n').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(id: i64, comments: Option<&str>) -> Rating {
        Rating {
            id: Some(id),
            user_id: "abc123".to_string(),
            model_number: 7,
            star_rating: 5,
            comments: comments.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn commas_stay_inside_one_quoted_column() {
        let csv = to_csv(&[rating(1, Some("a,b"))]).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines[0], "id,user_id,model_number,star_rating,comments,created_at");
        assert_eq!(lines[1], r#""1","abc123","7","5","a,b","""#);
    }

    #[test]
    fn quotes_are_doubled_and_no_trailing_newline() {
        let csv = to_csv(&[rating(1, Some("the \"best\"")), rating(2, None)]).unwrap();
        assert!(csv.contains(r#""the ""best""""#));
        assert!(!csv.ends_with('\n'));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn nothing_to_export_is_empty() {
        assert_eq!(to_csv::<Rating>(&[]).unwrap(), "");
    }
}
