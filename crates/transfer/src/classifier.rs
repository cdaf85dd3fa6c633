//! Candidate classification.
//!
//! Each canonical record yields at most one candidate. A record that qualifies as
//! both a source and a target is a source: transfer-out wins.

use tracing::debug;

use rebalance_inventory::{InventoryRecord, RpType};

use crate::candidate::{
    CandidatePools, ReceiveCandidate, ReceivePriority, TransferCandidate, TransferType,
};
use crate::strategy::{MIN_TRANSFER_BATCH, Strategy};

/// Split canonical records into the transfer-out and receive pools.
pub fn classify(records: &[InventoryRecord], strategy: Strategy) -> CandidatePools {
    let mut pools = CandidatePools::default();

    for record in records {
        let source = transfer_out_candidate(record, strategy);
        let target = receive_candidate(record);

        match (source, target) {
            (Some(source), Some(_)) => {
                debug!(
                    article = %record.article,
                    om = %record.om,
                    site = %record.site,
                    "record qualifies for both pools; keeping transfer-out"
                );
                pools.transfer_out.push(source);
                pools.suppressed_receives += 1;
            }
            (Some(source), None) => pools.transfer_out.push(source),
            (None, Some(target)) => pools.receive.push(target),
            (None, None) => {}
        }
    }

    pools
}

/// Transfer-out rule for one record, if it has anything to give.
pub fn transfer_out_candidate(
    record: &InventoryRecord,
    strategy: Strategy,
) -> Option<TransferCandidate> {
    let (transfer_type, available_qty, raised_to_min_batch) = match record.rp_type {
        RpType::Nd => (TransferType::NdFull, record.net_stock, false),
        RpType::Rf => {
            let (qty, raised) = rf_transferable(record.net_stock, record.safety_stock, strategy);
            (TransferType::RfSurplus, qty, raised)
        }
    };

    if available_qty == 0 {
        return None;
    }

    Some(TransferCandidate {
        site: record.site.clone(),
        article: record.article.clone(),
        om: record.om.clone(),
        transfer_type,
        available_qty,
        sales_velocity: record.sales_velocity(),
        net_stock: record.net_stock,
        safety_stock: record.safety_stock,
        article_description: record.article_description.clone(),
        raised_to_min_batch,
    })
}

/// RF surplus after the strategy cap, minimum batch and net-stock clamp.
///
/// Returns the quantity and whether the minimum batch raised it.
pub fn rf_transferable(net_stock: u32, safety_stock: u32, strategy: Strategy) -> (u32, bool) {
    let surplus = net_stock.saturating_sub(safety_stock);
    if surplus == 0 {
        return (0, false);
    }

    let capped = surplus.min(strategy.rf_cap(net_stock));
    let floored = if capped > 0 && capped < MIN_TRANSFER_BATCH {
        MIN_TRANSFER_BATCH
    } else {
        capped
    };
    let qty = floored.min(net_stock);

    (qty, qty > capped)
}

/// Receive rule for one record, independent of its replenishment type.
pub fn receive_candidate(record: &InventoryRecord) -> Option<ReceiveCandidate> {
    let velocity = record.sales_velocity();
    if velocity == 0 {
        return None;
    }

    let (receive_priority, need_score) = if record.net_stock == 0 {
        (ReceivePriority::UrgentStockout, f64::from(velocity))
    } else if record.net_stock < record.safety_stock {
        (
            ReceivePriority::PotentialShortage,
            f64::from(velocity) / f64::from(record.net_stock.max(1)),
        )
    } else {
        return None;
    };

    Some(ReceiveCandidate {
        site: record.site.clone(),
        article: record.article.clone(),
        om: record.om.clone(),
        receive_priority,
        need_score,
        net_stock: record.net_stock,
        safety_stock: record.safety_stock,
        sales_velocity: velocity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;
    use proptest::prelude::*;
    use proptest::strategy::Strategy as PropStrategy;
    use rebalance_core::{Article, OmId, SiteId};

    fn record(site: &str, rp_type: RpType) -> InventoryRecord {
        InventoryRecord::new(
            Article::canonical("123"),
            OmId::new("OM1").unwrap(),
            SiteId::new(site).unwrap(),
            rp_type,
        )
    }

    #[test]
    fn nd_divests_full_stock() {
        let r = record("A", RpType::Nd).with_stock(37, 50);
        for strategy in [Strategy::ConservativeA, Strategy::EnhancedB] {
            let c = transfer_out_candidate(&r, strategy).unwrap();
            assert_eq!(c.transfer_type, TransferType::NdFull);
            assert_eq!(c.available_qty, 37);
            assert!(!c.raised_to_min_batch);
        }
    }

    #[test]
    fn nd_with_no_stock_is_not_a_source() {
        let r = record("A", RpType::Nd).with_stock(0, 5);
        assert!(transfer_out_candidate(&r, Strategy::ConservativeA).is_none());
    }

    #[test]
    fn rf_surplus_is_capped_per_strategy() {
        let r = record("A", RpType::Rf).with_stock(100, 50);
        let a = transfer_out_candidate(&r, Strategy::ConservativeA).unwrap();
        let b = transfer_out_candidate(&r, Strategy::EnhancedB).unwrap();
        assert_eq!(a.available_qty, 20);
        assert_eq!(b.available_qty, 50);
        assert_eq!(a.transfer_type, TransferType::RfSurplus);
    }

    #[test]
    fn rf_small_surplus_is_raised_to_minimum_batch() {
        for strategy in [Strategy::ConservativeA, Strategy::EnhancedB] {
            assert_eq!(rf_transferable(10, 9, strategy), (2, true));
        }
    }

    #[test]
    fn rf_minimum_batch_is_clamped_to_net_stock() {
        assert_eq!(rf_transferable(1, 0, Strategy::ConservativeA), (1, false));
    }

    #[test]
    fn rf_without_surplus_is_not_a_source() {
        assert_eq!(rf_transferable(10, 10, Strategy::EnhancedB), (0, false));
        assert_eq!(rf_transferable(3, 10, Strategy::EnhancedB), (0, false));
    }

    #[test]
    fn stockout_with_sales_is_urgent() {
        let r = record("B", RpType::Rf).with_stock(0, 10).with_sales(30, 4);
        let c = receive_candidate(&r).unwrap();
        assert_eq!(c.receive_priority, ReceivePriority::UrgentStockout);
        assert_eq!(c.need_score, 34.0);
    }

    #[test]
    fn below_safety_with_sales_is_potential_shortage() {
        let r = record("B", RpType::Nd).with_stock(4, 10).with_sales(10, 2);
        let c = receive_candidate(&r).unwrap();
        assert_eq!(c.receive_priority, ReceivePriority::PotentialShortage);
        assert_eq!(c.need_score, 3.0);
    }

    #[test]
    fn no_sales_means_no_need() {
        let r = record("B", RpType::Rf).with_stock(0, 10);
        assert!(receive_candidate(&r).is_none());
        let r = record("C", RpType::Rf).with_stock(12, 10).with_sales(5, 5);
        assert!(receive_candidate(&r).is_none());
    }

    #[test]
    fn transfer_out_takes_precedence_over_receive() {
        // ND below safety stock while selling: both rules hold.
        let r = record("A", RpType::Nd).with_stock(4, 10).with_sales(10, 0);
        assert!(transfer_out_candidate(&r, Strategy::ConservativeA).is_some());
        assert!(receive_candidate(&r).is_some());

        let pools = classify(&[r], Strategy::ConservativeA);
        assert_eq!(pools.transfer_out.len(), 1);
        assert!(pools.receive.is_empty());
        assert_eq!(pools.suppressed_receives, 1);
    }

    fn arb_record() -> impl PropStrategy<Value = InventoryRecord> {
        (
            "[A-E]",
            prop_oneof![Just(RpType::Nd), Just(RpType::Rf)],
            0u32..200,
            0u32..200,
            0u32..500,
            0u32..500,
        )
            .prop_map(|(site, rp, net, safety, lm, mtd)| {
                record(&site, rp).with_stock(net, safety).with_sales(lm, mtd)
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: every record lands in at most one pool, and every source
        /// quantity is positive and never above the record's net stock.
        #[test]
        fn pools_are_exclusive_and_bounded(
            records in prop::collection::vec(arb_record(), 0..40),
            enhanced in any::<bool>()
        ) {
            let strategy = if enhanced { Strategy::EnhancedB } else { Strategy::ConservativeA };

            let mut expected_sources = 0;
            let mut expected_targets = 0;
            for r in &records {
                let single = classify(std::slice::from_ref(r), strategy);
                prop_assert!(single.transfer_out.len() + single.receive.len() <= 1);
                expected_sources += single.transfer_out.len();
                expected_targets += single.receive.len();
            }

            let pools = classify(&records, strategy);
            prop_assert_eq!(pools.transfer_out.len(), expected_sources);
            prop_assert_eq!(pools.receive.len(), expected_targets);
            for c in &pools.transfer_out {
                prop_assert!(c.available_qty > 0);
                prop_assert!(c.available_qty <= c.net_stock);
            }
        }
    }
}
