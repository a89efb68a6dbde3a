use std::io::{self, Stdout, Write};

use tracing::warn;

use crate::branch::Branch;

/// Receives the human-readable output of bank queries.
pub trait Reporter {
    fn branch_search(&mut self, query: &str, found: Option<&Branch>);

    fn customer_listing(&mut self, branch: &Branch, include_transactions: bool);
}

/// Renders reports as plain text lines into any writer.
#[derive(Debug)]
pub struct TextReporter<W> {
    output: W,
}

impl TextReporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> TextReporter<W>
where
    W: Write,
{
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn get_ref(&self) -> &W {
        &self.output
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    fn write_search(&mut self, query: &str, found: Option<&Branch>) -> io::Result<()> {
        self.write_search_lines(query, found)?;
        self.output.flush()
    }

    fn write_listing(&mut self, branch: &Branch, include_transactions: bool) -> io::Result<()> {
        self.write_listing_lines(branch, include_transactions)?;
        self.output.flush()
    }

    fn write_search_lines(&mut self, query: &str, found: Option<&Branch>) -> io::Result<()> {
        match found {
            Some(branch) => writeln!(
                self.output,
                "Search result for \"{query}\":  {}.",
                branch.name()
            ),
            None => writeln!(self.output, "\nNo branches found matching \"{query}\"."),
        }
    }

    fn write_listing_lines(
        &mut self,
        branch: &Branch,
        include_transactions: bool,
    ) -> io::Result<()> {
        let customers = branch.customers();
        if customers.is_empty() {
            return writeln!(self.output, "No customers found.");
        }
        writeln!(
            self.output,
            "\n>>> {}: {} customer(s)",
            branch.name(),
            customers.len()
        )?;
        for customer in customers {
            writeln!(
                self.output,
                "\n\tID: {}, Name: {}",
                customer.id(),
                customer.name()
            )?;
            if customer.transactions().is_empty() {
                writeln!(
                    self.output,
                    "\t\tThere is no transactions for {} (ID: {}).\n",
                    customer.name(),
                    customer.id()
                )?;
            } else if include_transactions {
                for tx in customer.transactions() {
                    writeln!(
                        self.output,
                        "\t\tDate: {} Amount: {}",
                        tx.date().format("%-m/%-d/%Y"),
                        tx.amount()
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl<W> Reporter for TextReporter<W>
where
    W: Write,
{
    fn branch_search(&mut self, query: &str, found: Option<&Branch>) {
        if let Err(err) = self.write_search(query, found) {
            warn!("Failed to write branch search report: {err}");
        }
    }

    fn customer_listing(&mut self, branch: &Branch, include_transactions: bool) {
        if let Err(err) = self.write_listing(branch, include_transactions) {
            warn!(branch = %branch.name(), "Failed to write customer listing: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use crate::customer::Customer;

    use super::*;

    fn render(branch: &Branch, include_transactions: bool) -> String {
        let mut reporter = TextReporter::new(Vec::new());
        reporter.customer_listing(branch, include_transactions);
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn search_messages() {
        let branch = Branch::new("Main").unwrap();
        let mut reporter = TextReporter::new(Vec::new());
        reporter.branch_search("mai", Some(&branch));
        reporter.branch_search("zzz", None);
        assert_eq!(
            String::from_utf8(reporter.into_inner()).unwrap(),
            "Search result for \"mai\":  Main.\n\nNo branches found matching \"zzz\".\n"
        );
    }

    /// Counts flushes, to check that every report reaches the writer.
    #[derive(Default)]
    struct FlushCounter {
        written: Vec<u8>,
        flushes: usize,
    }

    impl Write for FlushCounter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn every_report_is_flushed() {
        let mut branch = Branch::new("Main").unwrap();
        let mut reporter = TextReporter::new(FlushCounter::default());

        reporter.branch_search("mai", Some(&branch));
        assert_eq!(reporter.get_ref().flushes, 1);
        reporter.branch_search("zzz", None);
        assert_eq!(reporter.get_ref().flushes, 2);
        // empty branch
        reporter.customer_listing(&branch, true);
        assert_eq!(reporter.get_ref().flushes, 3);

        branch.add_customer(Customer::new("Alice", 1).unwrap());
        reporter.customer_listing(&branch, false);
        let output = reporter.into_inner();
        assert_eq!(output.flushes, 4);
        assert!(String::from_utf8(output.written).unwrap().contains("Name: Alice"));
    }

    #[test]
    fn empty_branch_listing() {
        let branch = Branch::new("Main").unwrap();
        assert_eq!(render(&branch, true), "No customers found.\n");
    }

    #[test]
    fn customer_listing() {
        let mut branch = Branch::new("Main").unwrap();
        branch.add_customer(Customer::new("Alice", 1).unwrap());
        branch.add_customer(Customer::new("Bob", 2).unwrap());
        let alice = branch.customers()[0].id();
        branch.add_customer_transaction(alice, 20.0).unwrap();
        branch.add_customer_transaction(alice, 1.5).unwrap();

        let today = Local::now().format("%-m/%-d/%Y").to_string();
        assert_eq!(
            render(&branch, true),
            format!(
                "\n>>> Main: 2 customer(s)\n\
                 \n\tID: 1, Name: Alice\n\
                 \t\tDate: {today} Amount: 20\n\
                 \t\tDate: {today} Amount: 1.5\n\
                 \n\tID: 2, Name: Bob\n\
                 \t\tThere is no transactions for Bob (ID: 2).\n\n"
            )
        );
        assert_eq!(
            render(&branch, false),
            "\n>>> Main: 2 customer(s)\n\
             \n\tID: 1, Name: Alice\n\
             \n\tID: 2, Name: Bob\n\
             \t\tThere is no transactions for Bob (ID: 2).\n\n"
        );
    }

    #[test]
    fn transaction_dates_use_local_calendar_day() {
        let date = Local.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        let tx = crate::transaction::Transaction::with_date(5.0, date).unwrap();
        assert_eq!(tx.date().format("%-m/%-d/%Y").to_string(), "3/7/2024");
    }
}
