//! End-to-end exercise of the marketplace ledger.
//!
//! The first test walks the machine through its full lifecycle in one
//! sitting - construction, role grants, listing, purchase, withdrawal, and
//! every rejection along the way - asserting after each rejection that state
//! is untouched. The remaining tests check the global properties: balance
//! conservation and deterministic replay.

use market_core::payment::CollectingSink;
use market_core::{AccountId, Amount, Market, MarketError, MarketEvent, Operation};

/// Price used throughout: 1e12 smallest-currency-units, matching the
/// original deployment's micro-denominated widget.
const WIDGET_PRICE: u64 = 1_000_000_000_000;

#[test]
fn full_marketplace_lifecycle() {
    let owner = AccountId::new();
    let admin = AccountId::new();
    let merchant = AccountId::new();
    let outsider = AccountId::new();
    let buyer = AccountId::new();
    let price = Amount::from_units(WIDGET_PRICE);

    // Construction: enabled, owned by its creator
    let mut market = Market::new(owner, true);
    assert!(market.is_service_enabled());
    assert_eq!(market.owner(), owner);

    // Non-owner may not appoint administrators
    let before = market.clone();
    assert!(matches!(
        market.add_administrator(admin, admin),
        Err(MarketError::Unauthorized { .. })
    ));
    assert_eq!(market, before);

    // Owner appoints an administrator; the event names the new admin
    let entry = market.add_administrator(owner, admin).unwrap();
    assert_eq!(entry.event, MarketEvent::AdministratorAdded { admin });
    assert!(market.is_administrator(admin));

    // Non-administrator may not register merchants
    assert!(matches!(
        market.add_merchant(merchant, merchant),
        Err(MarketError::Unauthorized { .. })
    ));
    assert!(!market.is_merchant(merchant));

    // Administrator registers the merchant
    let entry = market.add_merchant(admin, merchant).unwrap();
    assert_eq!(entry.event, MarketEvent::MerchantAdded { merchant });
    assert!(market.is_merchant(merchant));

    // Administrator lists the widget; index 0, record matches input
    let index = market
        .add_product(
            admin,
            "widget",
            "your life will never be the same",
            merchant,
            1,
            price,
        )
        .unwrap();
    assert_eq!(index, 0);
    let product = market.get_product_by_name("widget").unwrap();
    assert_eq!(product.index, 0);
    assert_eq!(product.description, "your life will never be the same");
    assert_eq!(product.merchant, merchant);
    assert_eq!(product.stock, 1);
    assert_eq!(product.price, price);

    // Non-administrators may not list products
    assert!(matches!(
        market.add_product(merchant, "widget2", "even better than the last", merchant, 1, price),
        Err(MarketError::Unauthorized { .. })
    ));

    // Unregistered merchants may not be listed against
    assert!(matches!(
        market.add_product(admin, "widget2", "even better than the last", outsider, 1, price),
        Err(MarketError::InvalidMerchant { .. })
    ));
    assert!(market.get_product_by_name("widget2").is_none());

    // Underpayment is rejected and the shelf is untouched
    let before = market.clone();
    assert!(matches!(
        market.buy_product(buyer, "widget", Amount::from_units(WIDGET_PRICE - 1)),
        Err(MarketError::InsufficientPayment { .. })
    ));
    assert_eq!(market, before);
    assert_eq!(market.get_product_by_name("widget").unwrap().stock, 1);

    // Anyone may buy in-stock goods for the exact price
    let entry = market.buy_product(buyer, "widget", price).unwrap();
    assert_eq!(
        entry.event,
        MarketEvent::ProductPurchased {
            name: "widget".to_string(),
            buyer,
            initial_stock: 1,
            remaining_stock: 0,
        }
    );
    assert_eq!(market.proceeds_of(merchant), price);

    // The shelf is now empty
    assert!(matches!(
        market.buy_product(buyer, "widget", price),
        Err(MarketError::OutOfStock { .. })
    ));

    // Non-merchants may not withdraw
    let mut sink = CollectingSink::new();
    assert!(matches!(
        market.withdraw_proceeds(buyer, buyer, price, &mut sink),
        Err(MarketError::Unauthorized { .. })
    ));
    assert!(sink.transfers().is_empty());

    // The merchant withdraws the full proceeds to an account of their choice
    let entry = market
        .withdraw_proceeds(merchant, merchant, price, &mut sink)
        .unwrap();
    assert_eq!(
        entry.event,
        MarketEvent::ProceedsWithdrawn {
            merchant,
            destination: merchant,
            amount: price,
        }
    );
    assert_eq!(market.proceeds_of(merchant), Amount::zero());
    assert_eq!(sink.delivered_to(merchant), price);

    // A second identical withdrawal finds nothing left
    assert!(matches!(
        market.withdraw_proceeds(merchant, merchant, price, &mut sink),
        Err(MarketError::InsufficientBalance { .. })
    ));
    assert_eq!(sink.transfers().len(), 1);
}

#[test]
fn proceeds_are_conserved_across_purchases_and_withdrawals() {
    let owner = AccountId::new();
    let merchant_a = AccountId::new();
    let merchant_b = AccountId::new();
    let buyer = AccountId::new();

    let mut market = Market::new(owner, true);
    market.add_merchant(owner, merchant_a).unwrap();
    market.add_merchant(owner, merchant_b).unwrap();

    let price_a = Amount::from_units(300);
    let price_b = Amount::from_units(700);
    market.add_product(owner, "apples", "", merchant_a, 5, price_a).unwrap();
    market.add_product(owner, "bread", "", merchant_b, 5, price_b).unwrap();

    // Each successful purchase grows the total by exactly one price
    market.buy_product(buyer, "apples", price_a).unwrap();
    market.buy_product(buyer, "apples", price_a).unwrap();
    market.buy_product(buyer, "bread", price_b).unwrap();
    assert_eq!(market.proceeds_of(merchant_a), Amount::from_units(600));
    assert_eq!(market.proceeds_of(merchant_b), Amount::from_units(700));

    // Each withdrawal shrinks it by exactly the withdrawn amount, and the
    // sink accounts for every unit that left the ledger
    let mut sink = CollectingSink::new();
    market
        .withdraw_proceeds(merchant_a, merchant_a, Amount::from_units(200), &mut sink)
        .unwrap();
    market
        .withdraw_proceeds(merchant_b, merchant_b, Amount::from_units(700), &mut sink)
        .unwrap();
    assert_eq!(market.proceeds_of(merchant_a), Amount::from_units(400));
    assert_eq!(market.proceeds_of(merchant_b), Amount::zero());
    assert_eq!(sink.delivered_to(merchant_a), Amount::from_units(200));
    assert_eq!(sink.delivered_to(merchant_b), Amount::from_units(700));

    // Merchants cannot reach each other's balances
    assert!(matches!(
        market.withdraw_proceeds(merchant_b, merchant_b, Amount::from_units(1), &mut sink),
        Err(MarketError::InsufficientBalance { .. })
    ));
}

#[test]
fn replaying_the_same_sequence_twice_yields_identical_state() {
    let owner = AccountId::new();
    let admin = AccountId::new();
    let merchant = AccountId::new();
    let buyer = AccountId::new();
    let price = Amount::from_units(WIDGET_PRICE);

    let ops = vec![
        Operation::AddAdministrator {
            caller: owner,
            target: admin,
        },
        Operation::AddMerchant {
            caller: admin,
            target: merchant,
        },
        Operation::AddProduct {
            caller: admin,
            name: "widget".to_string(),
            description: "your life will never be the same".to_string(),
            merchant,
            stock: 2,
            price,
        },
        Operation::BuyProduct {
            caller: buyer,
            name: "widget".to_string(),
            payment: price,
        },
        Operation::WithdrawProceeds {
            caller: merchant,
            destination: buyer,
            amount: price,
        },
    ];

    // The log survives a serialization round trip unchanged
    let json = serde_json::to_string(&ops).unwrap();
    let restored: Vec<Operation> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, ops);

    let (first, outcomes) =
        market_core::ops::replay(owner, true, &ops, &mut CollectingSink::new());
    assert!(outcomes.iter().all(|o| o.is_ok()));

    let (second, _) = market_core::ops::replay(owner, true, &restored, &mut CollectingSink::new());

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
