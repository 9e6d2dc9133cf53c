//! Statement session
//!
//! Holds the user's current selection (date range and customer) and the last
//! generated statement. Generating replaces the previous statement wholesale.
//! Exports write the rows of the last generated statement under a header and
//! file name taken from the current selection, even if it changed since.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};

use crate::config::Settings;
use crate::error::DairyResult;
use crate::export::{export_statement, ExportFormat, StatementMeta};
use crate::models::{Customer, CustomerFilter};
use crate::reports::{StatementRequest, StatementResult};
use crate::source::StatementSource;

/// A statement together with the selection that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedStatement {
    pub request: StatementRequest,
    pub customer_label: String,
    pub result: StatementResult,
}

/// Selection state plus the last generated statement
#[derive(Debug, Clone)]
pub struct StatementSession {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer: CustomerFilter,
    /// Customer list seen by the last generate, for labels
    customers: Vec<Customer>,
    generated: Option<GeneratedStatement>,
}

impl Default for StatementSession {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

impl StatementSession {
    /// A session covering a single day for every customer
    pub fn new(today: NaiveDate) -> Self {
        Self {
            start_date: today,
            end_date: today,
            customer: CustomerFilter::All,
            customers: Vec::new(),
            generated: None,
        }
    }

    pub fn set_range(&mut self, start_date: NaiveDate, end_date: NaiveDate) {
        self.start_date = start_date;
        self.end_date = end_date;
    }

    pub fn set_customer(&mut self, customer: CustomerFilter) {
        self.customer = customer;
    }

    pub fn request(&self) -> StatementRequest {
        StatementRequest::new(self.start_date, self.end_date, self.customer.clone())
    }

    /// Generate a statement for the current selection
    ///
    /// Fails with `DataLoading` while the source is not ready, leaving any
    /// previous statement in place.
    pub fn generate<S: StatementSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> DairyResult<&GeneratedStatement> {
        let request = self.request();
        let result = StatementResult::from_source(source, &request)?;
        self.customers = source.customers()?;
        let customer_label = request.customer.label(&self.customers);

        Ok(self.generated.insert(GeneratedStatement {
            request,
            customer_label,
            result,
        }))
    }

    pub fn generated(&self) -> Option<&GeneratedStatement> {
        self.generated.as_ref()
    }

    pub fn statement(&self) -> Option<&StatementResult> {
        self.generated.as_ref().map(|g| &g.result)
    }

    /// Label of the currently selected customer
    pub fn customer_label(&self) -> String {
        self.customer.label(&self.customers)
    }

    /// Rendering metadata from the current selection
    ///
    /// `None` until a statement has been generated.
    pub fn meta(&self, settings: &Settings) -> Option<StatementMeta> {
        self.generated.as_ref().map(|_| {
            StatementMeta::new(
                settings,
                self.customer_label(),
                self.start_date,
                self.end_date,
            )
        })
    }

    /// Export the last generated statement into `dir`
    ///
    /// Returns `Ok(None)` without writing anything if nothing has been
    /// generated yet.
    pub fn export(
        &self,
        settings: &Settings,
        format: ExportFormat,
        dir: &Path,
    ) -> DairyResult<Option<PathBuf>> {
        let (Some(generated), Some(meta)) = (self.generated.as_ref(), self.meta(settings)) else {
            tracing::debug!(format = %format, "export requested before generate; ignoring");
            return Ok(None);
        };

        export_statement(&generated.result, &meta, format, dir).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DairyError;
    use crate::models::{Customer, CustomerId, Money, Order, OrderStatus};
    use crate::source::Snapshot;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn snapshot() -> Snapshot {
        let c1 = CustomerId::from("c1");
        let mut delivered = Order::new(c1.clone(), "Ramesh Patel", day(1), Money::from_paise(10000));
        delivered.amount_paid = Some(Money::from_paise(10000));
        delivered.status = OrderStatus::Delivered;
        let pending = Order::new(c1.clone(), "Ramesh Patel", day(2), Money::from_paise(5000));

        Snapshot::new(
            vec![delivered, pending],
            vec![Customer::with_id(c1, "Ramesh Patel")],
        )
    }

    #[test]
    fn test_new_session_covers_today_for_everyone() {
        let session = StatementSession::new(day(9));
        assert_eq!(session.start_date, day(9));
        assert_eq!(session.end_date, day(9));
        assert_eq!(session.customer, CustomerFilter::All);
        assert!(session.statement().is_none());
    }

    #[test]
    fn test_generate_for_all_customers() {
        let mut session = StatementSession::new(day(1));
        session.set_range(day(1), day(2));

        let generated = session.generate(&snapshot()).unwrap();
        assert_eq!(generated.customer_label, "All Customers");
        assert_eq!(generated.result.total_orders, 2);
        assert_eq!(generated.result.pending_amount.paise(), 5000);
    }

    #[test]
    fn test_generate_replaces_previous_statement() {
        let source = snapshot();
        let mut session = StatementSession::new(day(1));
        session.generate(&source).unwrap();
        assert_eq!(session.statement().unwrap().total_orders, 1);

        session.set_range(day(1), day(2));
        session.set_customer(CustomerFilter::Customer(CustomerId::from("c1")));
        session.generate(&source).unwrap();

        let generated = session.generated().unwrap();
        assert_eq!(generated.result.total_orders, 2);
        assert_eq!(generated.customer_label, "Ramesh Patel");
    }

    #[test]
    fn test_unknown_customer_has_empty_label_and_result() {
        let mut session = StatementSession::new(day(1));
        session.set_range(day(1), day(31));
        session.set_customer(CustomerFilter::Customer(CustomerId::from("ghost")));

        let generated = session.generate(&snapshot()).unwrap();
        assert_eq!(generated.customer_label, "");
        assert!(generated.result.is_empty());
    }

    #[test]
    fn test_loading_source_keeps_previous_statement() {
        let mut source = snapshot();
        let mut session = StatementSession::new(day(2));
        session.generate(&source).unwrap();

        source.loading = true;
        session.set_range(day(1), day(2));
        assert!(matches!(
            session.generate(&source),
            Err(DairyError::DataLoading)
        ));
        assert_eq!(session.statement().unwrap().total_orders, 1);
    }

    #[test]
    fn test_export_before_generate_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let session = StatementSession::new(day(1));

        let result = session
            .export(&Settings::default(), ExportFormat::Pdf, temp_dir.path())
            .unwrap();
        assert!(result.is_none());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_header_follows_current_selection() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = StatementSession::new(day(1));
        session.set_range(day(1), day(2));
        session.set_customer(CustomerFilter::Customer(CustomerId::from("c1")));
        session.generate(&snapshot()).unwrap();

        // Rows stay from the last generate; header and name use the new range
        session.set_range(day(5), day(6));

        let path = session
            .export(&Settings::default(), ExportFormat::Xlsx, temp_dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Statement_Ramesh_Patel_2024-01-05_to_2024-01-06.xlsx"
        );

        let meta = session.meta(&Settings::default()).unwrap();
        assert_eq!(meta.period_line(), "Period: 2024-01-05 to 2024-01-06");
        assert_eq!(session.statement().unwrap().total_orders, 2);

        session.set_customer(CustomerFilter::All);
        assert_eq!(
            session.meta(&Settings::default()).unwrap().customer_label,
            "All Customers"
        );
    }
}
