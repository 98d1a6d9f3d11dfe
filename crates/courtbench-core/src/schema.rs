/// Arrow schema for the participant dataset.
pub mod dataset {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, BooleanArray, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::error::ArrowError;
    use arrow::record_batch::RecordBatch;

    use crate::ParticipantRow;

    /// Schema for participant rows, one column per output field.
    pub fn participant_schema() -> Schema {
        Schema::new(vec![
            Field::new("webcast_id", DataType::Utf8, false),
            Field::new("name", DataType::Utf8, false),
            Field::new("has_question", DataType::Boolean, false),
            Field::new("has_opinion", DataType::Boolean, false),
            Field::new("language", DataType::Utf8, false),
            Field::new("question", DataType::Utf8, false),
            Field::new("case_id", DataType::Utf8, false),
            Field::new("opinion", DataType::Utf8, false),
            Field::new("opinion_type", DataType::Utf8, false),
        ])
    }

    /// Convert participant rows into a single RecordBatch.
    pub fn to_record_batch(rows: &[ParticipantRow]) -> Result<RecordBatch, ArrowError> {
        let utf8 = |f: fn(&ParticipantRow) -> &str| -> ArrayRef {
            Arc::new(StringArray::from_iter_values(rows.iter().map(f)))
        };
        let boolean = |f: fn(&ParticipantRow) -> bool| -> ArrayRef {
            Arc::new(BooleanArray::from(rows.iter().map(f).collect::<Vec<_>>()))
        };

        let columns = vec![
            utf8(|r| r.webcast_id.as_str()),
            utf8(|r| r.name.as_str()),
            boolean(|r| r.has_question),
            boolean(|r| r.has_opinion),
            utf8(|r| r.language.as_str()),
            utf8(|r| r.question.as_str()),
            utf8(|r| r.case_id.as_str()),
            utf8(|r| r.opinion.as_str()),
            utf8(|r| r.opinion_type.as_str()),
        ];
        RecordBatch::try_new(Arc::new(participant_schema()), columns)
    }
}
