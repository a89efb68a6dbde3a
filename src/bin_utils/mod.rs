//! Replays a CSV file of bank operations against an in-memory [`Bank`] and
//! prints the resulting customer listing.

use std::io::{Read, Write};

use crate::{
    bank::Bank,
    branch::{Branch, BranchKey},
    operation::OperationError,
    report::TextReporter,
};
use anyhow::Result;
use csv_parser::CsvOperationParser;
pub mod csv_parser;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub bank_name: String,
    pub error_printer: Box<dyn FnMut(u64, OperationError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut bank = Bank::with_reporter(self.bank_name, TextReporter::new(self.output))?;

        for (line, op) in parser {
            if let Err(err) = op.and_then(|op| op.apply(&mut bank)) {
                (self.error_printer)(line, err);
            }
        }

        let keys: Vec<BranchKey> = bank.branches().iter().map(Branch::key).collect();
        for key in keys {
            bank.list_customers(key, true)?;
        }
        Ok(())
    }
}
