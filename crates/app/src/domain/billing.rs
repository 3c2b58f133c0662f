//! Table bill service.

use std::{mem, sync::Arc};

use tableside::{
    billing::{BillingEvent, BillingState, PaidAt, TableFilter},
    state::Reducer,
};
use tracing::{debug, error, info};

use crate::{
    client::OrdersApi,
    domain::{ServiceError, read_outcome},
};

/// Alert raised when the payment request fails.
pub const PAYMENT_FAILED: &str = "Failed to mark as paid";

pub struct BillingService {
    api: Arc<dyn OrdersApi>,
    state: BillingState,
}

impl BillingService {
    #[must_use]
    pub fn new(api: Arc<dyn OrdersApi>) -> Self {
        Self {
            api,
            state: BillingState::default(),
        }
    }

    pub fn state(&self) -> &BillingState {
        &self.state
    }

    fn apply(&mut self, event: BillingEvent) {
        self.state = mem::take(&mut self.state).reduce(event);
    }

    /// Reload every open cart, keeping the current table filter.
    pub async fn refresh(&mut self) -> &BillingState {
        self.apply(BillingEvent::FetchStarted);

        match read_outcome("carts", self.api.fetch_carts().await) {
            Ok(carts) => self.apply(BillingEvent::FetchSucceeded(carts)),
            Err(message) => self.apply(BillingEvent::FetchFailed(message)),
        }

        &self.state
    }

    pub fn set_filter(&mut self, filter: TableFilter) {
        debug!(%filter, "table filter changed");
        self.apply(BillingEvent::FilterChanged(filter));
    }

    pub fn toggle(&mut self) {
        self.apply(BillingEvent::Toggled);
    }

    /// Settle the selected table's bill.
    ///
    /// Issues exactly one request, and only when every line is served. A successful
    /// payment is followed by a refetch.
    ///
    /// # Errors
    ///
    /// Returns the local refusal without contacting the server, or the API error when the
    /// request fails.
    pub async fn mark_paid(&mut self, paid_at: PaidAt) -> Result<(), ServiceError> {
        let request = self.state.payment_request(paid_at)?;

        if let Err(error) = self.api.mark_paid(&request).await {
            error!(table = request.table_number, %error, "failed to mark bill paid");
            self.apply(BillingEvent::PaymentFailed(PAYMENT_FAILED.to_string()));

            return Err(error.into());
        }

        info!(
            table = request.table_number,
            lines = request.items.len(),
            "bill paid"
        );

        self.apply(BillingEvent::PaymentSucceeded);
        self.refresh().await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use mockall::Sequence;
    use reqwest::{Method, StatusCode};
    use rust_decimal::Decimal;
    use tableside::{
        billing::{BillingError, PAID_MESSAGE},
        fixtures::Fixture,
        orders::{CartRecord, ServingStatus},
    };
    use testresult::TestResult;

    use crate::client::{ApiError, MockOrdersApi};

    use super::*;

    fn dinner_service() -> Result<Vec<CartRecord>, tableside::fixtures::FixtureError> {
        Fixture::with_base_path("../../fixtures").load_carts("dinner_service")
    }

    fn paid_at() -> PaidAt {
        PaidAt::from_datetime(date(2026, 10, 16).at(13, 45, 9, 0))
    }

    #[tokio::test]
    async fn filter_merges_rounds_for_one_table() -> TestResult {
        let carts = dinner_service()?;
        let mut api = MockOrdersApi::new();
        api.expect_fetch_carts().returning(move || Ok(carts.clone()));

        let mut service = BillingService::new(Arc::new(api));
        service.refresh().await;
        service.set_filter(TableFilter::Table(4));

        assert_eq!(service.state().lines().len(), 3);
        assert_eq!(service.state().total(), Decimal::new(3925, 2));
        assert!(!service.state().can_mark_paid());

        Ok(())
    }

    #[tokio::test]
    async fn unserved_table_is_refused_without_a_request() -> TestResult {
        let carts = dinner_service()?;
        let mut api = MockOrdersApi::new();
        api.expect_fetch_carts().returning(move || Ok(carts.clone()));
        api.expect_mark_paid().never();

        let mut service = BillingService::new(Arc::new(api));
        service.refresh().await;
        service.set_filter(TableFilter::Table(4));

        let result = service.mark_paid(paid_at()).await;

        assert!(matches!(
            result,
            Err(ServiceError::Billing(BillingError::NotAllServed { table: 4, .. }))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn all_tables_view_cannot_be_paid() -> TestResult {
        let carts = dinner_service()?;
        let mut api = MockOrdersApi::new();
        api.expect_fetch_carts().returning(move || Ok(carts.clone()));
        api.expect_mark_paid().never();

        let mut service = BillingService::new(Arc::new(api));
        service.refresh().await;

        let result = service.mark_paid(paid_at()).await;

        assert!(matches!(
            result,
            Err(ServiceError::Billing(BillingError::NoTableSelected))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn served_table_posts_once_then_refetches() -> TestResult {
        let carts = dinner_service()?;
        let after_payment: Vec<CartRecord> = carts
            .iter()
            .filter(|cart| cart.table_number != 2)
            .cloned()
            .collect();

        let mut seq = Sequence::new();
        let mut api = MockOrdersApi::new();

        api.expect_fetch_carts()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(carts.clone()));
        api.expect_mark_paid()
            .withf(|request| {
                request.table_number == 2
                    && request.paid_time == "1:45:09 PM"
                    && request.paid_date == "10/16/2026"
                    && request
                        .items
                        .iter()
                        .all(|line| line.status == ServingStatus::Served)
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        api.expect_fetch_carts()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(after_payment.clone()));

        let mut service = BillingService::new(Arc::new(api));
        service.refresh().await;
        service.set_filter(TableFilter::Table(2));

        service.mark_paid(paid_at()).await?;

        assert_eq!(service.state().alert(), Some(PAID_MESSAGE));
        assert!(service.state().lines().is_empty());
        assert!(!service.state().occupied().contains(&2));

        Ok(())
    }

    #[tokio::test]
    async fn payment_failure_alerts_and_keeps_bill() -> TestResult {
        let carts = dinner_service()?;
        let mut api = MockOrdersApi::new();
        api.expect_fetch_carts()
            .times(1)
            .returning(move || Ok(carts.clone()));
        api.expect_mark_paid().times(1).returning(|_| {
            Err(ApiError::UnexpectedStatus {
                method: Method::POST,
                path: "/bills/paid".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            })
        });

        let mut service = BillingService::new(Arc::new(api));
        service.refresh().await;
        service.set_filter(TableFilter::Table(2));

        let result = service.mark_paid(paid_at()).await;

        assert!(matches!(result, Err(ServiceError::Api(_))));
        assert_eq!(service.state().alert(), Some(PAYMENT_FAILED));
        assert_eq!(service.state().lines().len(), 2);

        Ok(())
    }
}
