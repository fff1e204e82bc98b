//! Batch quoting: CSV requests in, stored reports and summary rows out.
//!
//! Stands in for the interactive front end. Each input row is priced
//! independently; a row that fails validation is logged and skipped without
//! affecting the others.

use crate::decimal::Money;
use crate::error::Result;
use crate::pricing::{BudgetSummary, PricingEngine};
use crate::property::PropertyType;
use crate::report::ReportStore;
use crate::request::BudgetForm;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Serialize;
use std::io::{Read, Write};

/// One line of the quote summary output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteRow {
    pub client: String,
    pub property_type: PropertyType,
    pub rooms: Option<i32>,
    pub parking: i32,
    pub has_children: bool,
    pub base_rent: Money,
    pub discount: Money,
    pub contract_total: Money,
    pub installments: u32,
    pub installment_amount: Money,
    pub annual_total: Money,
    /// Name under which the report was stored.
    pub report: String,
}

impl QuoteRow {
    fn new(client: String, summary: BudgetSummary, report: String) -> Self {
        QuoteRow {
            client,
            property_type: summary.property_type,
            rooms: summary.rooms,
            parking: summary.parking,
            has_children: summary.has_children,
            base_rent: summary.base_rent,
            discount: summary.discount,
            contract_total: summary.contract_total,
            installments: summary.installments,
            installment_amount: summary.installment_amount,
            annual_total: summary.annual_total,
            report,
        }
    }
}

/// Prices a batch of requests and stores one report per request.
pub struct Quoter<'a> {
    engine: &'a PricingEngine,
    store: &'a ReportStore,
}

impl<'a> Quoter<'a> {
    pub fn new(engine: &'a PricingEngine, store: &'a ReportStore) -> Self {
        Quoter { engine, store }
    }

    /// Reads requests from a CSV reader and returns a summary row per
    /// successfully quoted request, in input order.
    ///
    /// Rows that cannot be read or validated are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&self, reader: R) -> Result<Vec<QuoteRow>> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();

        for (row_idx, result) in csv_reader.deserialize::<BudgetForm>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let form = match result {
                Ok(form) => form,
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                    continue;
                }
            };

            match self.quote(form) {
                Ok(row) => {
                    debug!("Row {}: Quoted {} for {}", row_num, row.annual_total, row.client);
                    rows.push(row);
                }
                Err(e) => warn!("Row {}: {}", row_num, e),
            }
        }

        Ok(rows)
    }

    /// Prices a single request and stores its report.
    pub fn quote(&self, form: BudgetForm) -> Result<QuoteRow> {
        let (client, request) = form.into_request()?;
        let budget = self.engine.compute(&request);
        let stored = self
            .store
            .save(&client, request.property_type, &budget.schedule)?;

        Ok(QuoteRow::new(client, budget.summary, stored.name))
    }
}

/// Writes summary rows as comma-separated CSV with a header.
pub fn write_summary<W: Write>(rows: &[QuoteRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for row in rows {
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn quote_csv(csv: &str) -> (tempfile::TempDir, ReportStore, Vec<QuoteRow>) {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::open(dir.path()).unwrap();
        let engine = PricingEngine::default();
        let rows = Quoter::new(&engine, &store)
            .process_csv(Cursor::new(csv))
            .unwrap();
        (dir, store, rows)
    }

    #[test]
    fn test_quotes_each_row() {
        let csv = r#"client_name,property_type,rooms,parking,has_children,installments
Ana,apartment,3,1,no,1
Bruno,Studio,1,4,yes,7"#;

        let (_dir, store, rows) = quote_csv(csv);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].client, "Ana");
        assert_eq!(rows[0].base_rent.to_string(), "1330.00");
        assert_eq!(rows[0].discount.to_string(), "70.00");

        assert_eq!(rows[1].property_type, PropertyType::Studio);
        assert_eq!(rows[1].rooms, None);
        assert_eq!(rows[1].base_rent.to_string(), "1570.00");
        assert_eq!(rows[1].installments, 5);

        for row in &rows {
            assert!(store.load(&row.report).is_ok());
        }
    }

    #[test]
    fn test_invalid_row_is_skipped() {
        let csv = r#"client_name,property_type,rooms,parking,has_children,installments
Ana,mansion,3,1,no,1
Bruno,house,abc,0,yes,1
Carla,house,2,0,yes,2"#;

        let (dir, _store, rows) = quote_csv(csv);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].client, "Carla");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_columns_use_defaults() {
        let csv = "client_name\nDiego\n";

        let (_dir, _store, rows) = quote_csv(csv);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].property_type, PropertyType::Apartment);
        assert_eq!(rows[0].rooms, Some(1));
        assert!(rows[0].has_children);
        assert_eq!(rows[0].annual_total.to_string(), "10400.00");
    }

    #[test]
    fn test_write_summary_format() {
        let csv = "client_name,property_type\nEva,studio\n";
        let (_dir, _store, rows) = quote_csv(csv);

        let mut output = Vec::new();
        write_summary(&rows, &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "client,property_type,rooms,parking,has_children,base_rent,discount,contract_total,installments,installment_amount,annual_total,report"
        );
        let line = lines.next().unwrap();
        assert!(line.starts_with("Eva,studio,,0,true,1200.00,0.00,2000.00,1,2000.00,16400.00,budget_Eva_studio_"));
    }
}
