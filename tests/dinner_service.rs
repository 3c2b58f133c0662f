//! Integration test for a dinner service driven from the `dinner_service` cart fixture.
//!
//! The fixture holds three carts:
//!
//! - Table 2 (`66f1c0a1b2`): Paneer Tikka and 2x Jeera Rice, all served.
//! - Table 4 (`66f1c0a1b3`): 3x Jeera Rice served, Chicken Curry and a Lunch Thali combo
//!   not served.
//! - Table 4 (`66f1c0a1b4`): a second round of 1x Jeera Rice, not served.
//!
//! Table 4's bill merges both carts: Jeera Rice x4 @ 3.50, Chicken Curry @ 11.25 and
//! Lunch Thali @ 14.00, for a total of 39.25. It can only be paid once the kitchen has
//! served the three outstanding entries.

use jiff::civil::date;
use rust_decimal::Decimal;
use testresult::TestResult;

use tableside::prelude::*;

fn board() -> Result<(Vec<CartRecord>, KitchenState), FixtureError> {
    let carts = Fixture::new().load_carts("dinner_service")?;
    let state = KitchenState::default().reduce_all([
        KitchenEvent::FetchStarted,
        KitchenEvent::FetchSucceeded(carts.clone()),
    ]);

    Ok((carts, state))
}

#[test]
fn kitchen_board_buckets_carts_by_progress() -> TestResult {
    let (_, state) = board()?;

    assert_eq!(state.partition().all, vec![CartId::new("66f1c0a1b2")]);
    assert_eq!(state.partition().few, vec![CartId::new("66f1c0a1b3")]);
    assert_eq!(state.partition().none, vec![CartId::new("66f1c0a1b4")]);
    assert_eq!(state.partition().len(), state.carts().len());

    Ok(())
}

#[test]
fn table_bill_merges_rounds_and_refuses_until_served() -> TestResult {
    let (carts, _) = board()?;

    let billing = BillingState::default().reduce_all([
        BillingEvent::FetchSucceeded(carts),
        BillingEvent::FilterChanged(TableFilter::Table(4)),
    ]);

    let names: Vec<&str> = billing.lines().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Jeera Rice", "Chicken Curry", "Lunch Thali"]);

    let rice = billing.lines().first().ok_or("no rice line")?;
    assert_eq!(rice.count, 4);
    assert_eq!(rice.status, ServingStatus::NotServed);

    assert_eq!(billing.total(), Decimal::new(3925, 2));
    assert!(!billing.can_mark_paid());

    let paid_at = PaidAt::from_datetime(date(2026, 10, 16).at(21, 5, 0, 0));
    assert!(matches!(
        billing.payment_request(paid_at),
        Err(BillingError::NotAllServed { table: 4, .. })
    ));

    Ok(())
}

#[test]
fn serving_everything_unlocks_payment() -> TestResult {
    let (_, kitchen) = board()?;

    let kitchen = kitchen.reduce_all([
        KitchenEvent::EntryServed {
            cart: CartId::new("66f1c0a1b3"),
            entry: EntryRef::Item(LineItemId::new("it-402")),
        },
        KitchenEvent::EntryServed {
            cart: CartId::new("66f1c0a1b3"),
            entry: EntryRef::Combo(ComboItemId::new("co-401")),
        },
        KitchenEvent::EntryServed {
            cart: CartId::new("66f1c0a1b4"),
            entry: EntryRef::Item(LineItemId::new("it-403")),
        },
    ]);

    assert!(kitchen.partition().few.is_empty());
    assert!(kitchen.partition().none.is_empty());

    let billing = BillingState::default().reduce_all([
        BillingEvent::FetchSucceeded(kitchen.carts().to_vec()),
        BillingEvent::FilterChanged(TableFilter::Table(4)),
    ]);

    assert!(billing.can_mark_paid());

    let request =
        billing.payment_request(PaidAt::from_datetime(date(2026, 10, 16).at(21, 5, 0, 0)))?;
    assert_eq!(request.table_number, 4);
    assert_eq!(request.paid_time, "9:05:00 PM");
    assert_eq!(request.paid_date, "10/16/2026");
    assert_eq!(request.items.len(), 3);

    let billing = billing.reduce(BillingEvent::PaymentSucceeded);
    assert_eq!(billing.alert(), Some(PAID_MESSAGE));

    Ok(())
}

#[test]
fn stock_screen_toggles_from_fixtures() -> TestResult {
    let fixture = Fixture::new();
    let state = StockState::default().reduce_all([
        StockEvent::FetchStarted,
        StockEvent::FetchSucceeded {
            items: fixture.load_stock_items("menu")?,
            combos: fixture.load_combo_stocks("menu")?,
        },
    ]);

    let curry = StockRef::Item(StockItemId::new("st-2"));
    let current = state.availability_of(&curry).ok_or("curry not listed")?;
    assert_eq!(current, Availability::NotAvailable);

    let state = state.reduce(StockEvent::AvailabilityChanged {
        target: curry.clone(),
        availability: current.toggled(),
    });
    assert_eq!(state.availability_of(&curry), Some(Availability::Available));

    Ok(())
}

#[test]
fn menu_edit_validates_against_fixture_categories() -> TestResult {
    let fixture = Fixture::new();
    let categories = fixture.load_categories("menu")?;
    let items = fixture.load_stock_items("menu")?;

    let curry = items.get(1).ok_or("curry not listed")?;
    let mut edit = MenuItemEdit::from_stock(curry)?;
    assert_eq!(edit.food_type, FoodType::NonVeg);
    assert_eq!(edit.validate(&categories), Ok(()));

    edit.category_name = "Desserts".to_string();
    assert_eq!(
        edit.validate(&categories),
        Err(MenuEditError::UnknownCategory("Desserts".to_string()))
    );

    Ok(())
}
