//! Raw rows in, recommendations and statistics out.

use rebalance_core::Article;
use rebalance_inventory::RawTable;
use rebalance_transfer::{ReceivePriority, Strategy, TransferEngine, TransferType};

/// Row in mandatory column order:
/// Article, Article Description, RP Type, Site, OM, MOQ, SaSa Net Stock,
/// Pending Received, Safety Stock, Last Month Sold Qty, MTD Sold Qty.
fn push(table: &mut RawTable, cells: [&str; 11]) {
    table.push_text_row(cells);
}

#[test]
fn rf_surplus_moves_to_urgent_stockout_under_option_a() {
    let mut table = RawTable::with_mandatory_headers();
    push(&mut table, ["123", "Lip balm", "RF", "A", "OM1", "6", "100", "0", "20", "5", "0"]);
    push(&mut table, ["123", "Lip balm", "RF", "B", "OM1", "6", "0", "0", "10", "30", "0"]);

    let run = TransferEngine::new(Strategy::ConservativeA).run(&table).unwrap();
    let recs = &run.plan.recommendations;

    assert_eq!(recs.len(), 1);
    let r = &recs[0];
    assert_eq!(r.article.as_str(), "000000000123");
    assert_eq!(r.om.as_str(), "OM1");
    assert_eq!(r.transfer_site.as_str(), "A");
    assert_eq!(r.receive_site.as_str(), "B");
    assert_eq!(r.transfer_qty, 20);
    assert_eq!(r.transfer_type, TransferType::RfSurplus);
    assert_eq!(r.receive_priority, ReceivePriority::UrgentStockout);
    assert_eq!(r.article_description, "Lip balm");
    assert_eq!(r.notes, "RF surplus transfer-out");

    let stats = &run.plan.statistics;
    assert_eq!(stats.total_quantity, 20);
    assert_eq!(stats.unmatched_transfer_qty, 0);
    assert_eq!(stats.unsatisfied_receive_candidates, 0);
    assert!(run.plan.quality.all_passed);
    assert_eq!(run.preprocess.corrected_article_length, 2);
}

#[test]
fn option_b_moves_the_larger_cap() {
    let mut table = RawTable::with_mandatory_headers();
    push(&mut table, ["123", "", "RF", "A", "OM1", "0", "100", "0", "20", "5", "0"]);
    push(&mut table, ["123", "", "RF", "B", "OM1", "0", "0", "0", "10", "30", "0"]);

    let run = TransferEngine::new(Strategy::EnhancedB).run(&table).unwrap();
    assert_eq!(run.plan.recommendations.len(), 1);
    assert_eq!(run.plan.recommendations[0].transfer_qty, 50);
}

#[test]
fn mixed_snapshot_is_deterministic_and_sound() {
    let mut table = RawTable::with_mandatory_headers();
    let rows: &[[&str; 11]] = &[
        ["111", "Toner", "ND", "S01", "OM1", "1", "12", "0", "5", "0", "0"],
        ["111", "Toner", "RF", "S02", "OM1", "1", "60", "4", "10", "7", "2"],
        ["111", "Toner", "RF", "S03", "OM1", "1", "0", "0", "8", "11", "3"],
        ["111", "Toner", "RF", "S04", "OM1", "1", "2", "0", "8", "4", "4"],
        ["111", "Toner", "RF", "S05", "OM1", "1", "0", "0", "8", "-3", "0"],
        ["111", "Toner", "RF", "S01", "OM2", "1", "0", "0", "8", "2", "0"],
        ["222", "Serum", "ND", "S02", "OM1", "1", "3", "0", "0", "0", "0"],
        ["222", "Serum", "RF", "S03", "OM1", "1", "1", "0", "9", "120000", "0"],
        ["", "Orphan", "RF", "S09", "OM1", "1", "1", "0", "0", "0", "0"],
    ];
    for row in rows {
        push(&mut table, *row);
    }

    let engine = TransferEngine::new(Strategy::ConservativeA);
    let first = engine.run(&table).unwrap();
    let second = engine.run(&table).unwrap();
    assert_eq!(first.plan.recommendations, second.plan.recommendations);
    assert_eq!(first.plan.statistics, second.plan.statistics);

    assert_eq!(first.preprocess.dropped_missing_identity, 1);
    assert_eq!(first.preprocess.clamped_sales, 1);
    assert_eq!(first.preprocess.corrected_negative, 1);

    let pairs: Vec<(String, &str, &str, u32)> = first
        .plan
        .recommendations
        .iter()
        .map(|r| {
            (
                r.article.to_string(),
                r.transfer_site.as_str(),
                r.receive_site.as_str(),
                r.transfer_qty,
            )
        })
        .collect();

    // 111@OM1: ND S01 (12) → urgent S03; RF S02 (cap 12) → potential S04.
    // 222@OM1: ND S02 (3) → potential S03.
    assert_eq!(
        pairs,
        vec![
            ("000000000111".to_string(), "S01", "S03", 12),
            ("000000000111".to_string(), "S02", "S04", 12),
            ("000000000222".to_string(), "S02", "S03", 3),
        ]
    );

    let stats = &first.plan.statistics;
    assert_eq!(stats.total_quantity, 27);
    assert_eq!(stats.by_article[&Article::canonical("111")].quantity, 24);
    // S01@OM2 is a stockout with no source in its OM.
    assert_eq!(stats.unsatisfied_receive_candidates, 1);
    assert!(first.plan.quality.all_passed);
}
