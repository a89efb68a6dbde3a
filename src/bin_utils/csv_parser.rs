use std::io::Read;

use crate::operation::{Operation, OperationError, OperationKind};
use csv::{DeserializeRecordsIntoIter, Trim};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Row {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub branch: String,
    pub customer: Option<i64>,
    pub name: Option<String>,
    pub amount: Option<f64>,
}

/// Parses bank operations in CSV format, yielding each with its line number.
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, Row>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, Result<Operation, OperationError>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| {
            let op = row.map_err(OperationError::from).and_then(|row| {
                Operation::parse(row.kind, row.branch, row.customer, row.name, row.amount)
            });
            (curr_line, op)
        })
    }
}
