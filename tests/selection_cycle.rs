mod common;

use chrono::{NaiveDateTime, SubsecRound};
use common::{FakeMarketData, FakeTicker, date, history_in, scripted_prompt, today};
use options_sector_picker::db::memory_store::InMemoryTransactionStore;
use options_sector_picker::db::store::TransactionStore;
use options_sector_picker::errors::PickerError;
use options_sector_picker::execution::engine::SelectionEngine;
use options_sector_picker::execution::types::PurchaseOutcome;
use options_sector_picker::sector::Sector;
use options_sector_picker::strategy::picker::make_rng;
use options_sector_picker::strategy::ranker::RankerSettings;
use options_sector_picker::strategy::types::Candidate;
use rust_decimal::Decimal;

fn now() -> NaiveDateTime {
    date(2024, 1, 10).and_hms_milli_opt(15, 30, 12, 450).unwrap()
}

fn provider() -> FakeMarketData {
    FakeMarketData::new()
        .with_ticker("AAA", FakeTicker::scoring(0.005))
        .with_ticker("BBB", FakeTicker::scoring(0.003))
        .with_ticker("CCC", FakeTicker::scoring(0.001))
}

fn candidates() -> Vec<Candidate> {
    vec![
        Candidate::new("AAA", Sector::Technology),
        Candidate::new("BBB", Sector::Healthcare),
        Candidate::new("CCC", Sector::Energy),
    ]
}

/// Every sector held once except healthcare
fn history_without_healthcare() -> InMemoryTransactionStore {
    InMemoryTransactionStore::with_transactions(history_in(&[
        Sector::Technology,
        Sector::Utilities,
        Sector::RealEstate,
        Sector::Financials,
        Sector::ConsumerGoods,
        Sector::Energy,
    ]))
}

#[tokio::test]
async fn full_cycle_records_pick_from_least_held_sector() {
    let engine = SelectionEngine::new(provider(), history_without_healthcare(), candidates(), RankerSettings::default());
    let mut prompt = scripted_prompt("y\n250.75\n10\nbought on dip\ny\n");
    let mut rng = make_rng(Some(5));

    let report = engine.run_once(&mut prompt, &mut rng, today(), &now).await.unwrap();

    let ranked: Vec<&str> = report.ranked.iter().map(|p| p.symbol.as_str()).collect();
    assert_eq!(ranked, vec!["AAA", "BBB", "CCC"]);
    assert_eq!(report.pick.symbol, "BBB");

    let (id, transaction) = match report.outcome {
        PurchaseOutcome::Recorded { id, transaction } => (id, transaction),
        other => panic!("unexpected outcome: {other:?}"),
    };
    assert_eq!(id, 7);
    assert_eq!(transaction.sector, Sector::Healthcare);
    assert_eq!(transaction.cost, "250.75".parse::<Decimal>().unwrap());
    assert_eq!(transaction.shares, "10".parse::<Decimal>().unwrap());
    assert_eq!(transaction.notes, "bought on dip");
    assert_eq!(transaction.date, now().trunc_subsecs(0));

    let stored = engine.store().read_all().await.unwrap();
    assert_eq!(stored.len(), 7);
    assert_eq!(stored[6], transaction.clone().into_model(7));

    let output = String::from_utf8(prompt.into_output()).unwrap();
    assert!(output.starts_with("buy BBB? (y/n) "), "{output}");
    assert!(output.contains("symbol: BBB, price: 100, sector: 5 (Healthcare)"), "{output}");
    assert!(output.ends_with("finish? (y/n) "), "{output}");
}

#[tokio::test]
async fn declining_leaves_the_store_untouched() {
    let engine = SelectionEngine::new(provider(), history_without_healthcare(), candidates(), RankerSettings::default());
    let mut prompt = scripted_prompt("n\n");

    let report = engine
        .run_once(&mut prompt, &mut make_rng(Some(5)), today(), &now)
        .await
        .unwrap();

    assert_eq!(report.outcome, PurchaseOutcome::Declined);
    assert_eq!(engine.store().len().await, 6);
}

#[tokio::test]
async fn empty_history_still_picks_a_ranked_stock() {
    let engine = SelectionEngine::new(
        provider(),
        InMemoryTransactionStore::new(),
        candidates(),
        RankerSettings::default(),
    );
    let mut prompt = scripted_prompt("y\n\n\n\ny\n");

    let report = engine
        .run_once(&mut prompt, &mut make_rng(Some(17)), today(), &now)
        .await
        .unwrap();

    assert!(["AAA", "BBB", "CCC"].contains(&report.pick.symbol.as_str()));
    assert!(report.outcome.is_recorded());
    let stored = engine.store().read_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, 1);
    assert_eq!(stored[0].cost, "5.00".parse::<Decimal>().unwrap());
    assert!(stored[0].shares.is_zero());
    assert_eq!(stored[0].notes, "");
}

#[tokio::test]
async fn nothing_ranked_is_an_empty_selection() {
    let engine = SelectionEngine::new(
        provider(),
        InMemoryTransactionStore::new(),
        Vec::new(),
        RankerSettings::default(),
    );
    let mut prompt = scripted_prompt("");

    let err = engine
        .run_once(&mut prompt, &mut make_rng(Some(1)), today(), &now)
        .await
        .unwrap_err();
    assert!(matches!(err, PickerError::EmptySelection));
    assert!(prompt.into_output().is_empty());
}

#[tokio::test]
async fn provider_failure_stops_before_any_prompt() {
    let mut with_missing = candidates();
    with_missing.push(Candidate::new("GONE", Sector::Utilities));
    let engine = SelectionEngine::new(provider(), InMemoryTransactionStore::new(), with_missing, RankerSettings::default());
    let mut prompt = scripted_prompt("y\n");

    let err = engine
        .run_once(&mut prompt, &mut make_rng(Some(1)), today(), &now)
        .await
        .unwrap_err();
    assert!(matches!(err, PickerError::Provider { .. }));
    assert!(engine.store().is_empty().await);
    assert!(prompt.into_output().is_empty());
}
