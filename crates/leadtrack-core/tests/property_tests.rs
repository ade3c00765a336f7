//! # Property-Based Tests
//!
//! Invariants of the lead register checked with proptest.

use chrono::NaiveDate;
use leadtrack_core::{
    FixedClock, LeadFields, LeadId, LeadQuery, LeadStore, Stage, StageFilter, is_due,
};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeSet;

// =============================================================================
// STRATEGIES
// =============================================================================

fn stage() -> impl Strategy<Value = Stage> {
    (0usize..Stage::ALL.len()).prop_map(|i| Stage::ALL[i])
}

fn date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2040, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

/// Field sets where name and company may be blank.
fn fields() -> impl Strategy<Value = LeadFields> {
    (
        prop_oneof!["[A-Za-z]{1,8}", Just(String::new()), Just("  ".to_string())],
        prop_oneof!["[A-Za-z]{1,8}", Just(String::new())],
        stage(),
        proptest::option::of(date()),
    )
        .prop_map(|(name, company, stage, reminder)| {
            let mut fields = LeadFields::new(name, company).with_stage(stage);
            fields.reminder = reminder;
            fields
        })
}

#[derive(Debug, Clone)]
enum Op {
    Write(LeadFields, Option<u64>),
    SetStage(u64, Stage),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (fields(), proptest::option::of(1u64..12)).prop_map(|(f, t)| Op::Write(f, t)),
        (1u64..12, stage()).prop_map(|(id, s)| Op::SetStage(id, s)),
    ]
}

fn run(ops: &[Op]) -> LeadStore {
    let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
    let mut store = LeadStore::with_clock(FixedClock(today));
    for op in ops {
        match op {
            Op::Write(fields, target) => {
                store.create_or_update(fields.clone(), target.map(LeadId));
            }
            Op::SetStage(id, stage) => {
                store.set_stage(LeadId(*id), *stage);
            }
        }
    }
    store
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Counts always sum to the number of leads.
    #[test]
    fn counts_partition_register(ops in vec(op(), 0..60)) {
        let store = run(&ops);
        prop_assert_eq!(store.counts_by_stage().total(), store.len());
    }

    /// Ids stay unique whatever the sequence of writes.
    #[test]
    fn ids_unique(ops in vec(op(), 0..60)) {
        let store = run(&ops);
        let ids: BTreeSet<LeadId> = store.leads().iter().map(|l| l.id).collect();
        prop_assert_eq!(ids.len(), store.len());
    }

    /// No stored lead ever has a blank name or company.
    #[test]
    fn stored_leads_are_valid(ops in vec(op(), 0..60)) {
        let store = run(&ops);
        prop_assert!(store.leads().iter().all(|l| l.fields.is_valid()));
    }

    /// A create with no target grows the store by one iff the fields are valid.
    #[test]
    fn create_grows_by_validity(ops in vec(op(), 0..30), extra in fields()) {
        let mut store = run(&ops);
        let before = store.len();
        let written = store.create_or_update(extra.clone(), None);

        prop_assert_eq!(written.is_some(), extra.is_valid());
        prop_assert_eq!(store.len(), before + usize::from(extra.is_valid()));
    }

    /// Setting a stage twice is the same as setting it once.
    #[test]
    fn set_stage_idempotent(ops in vec(op(), 1..30), id in 1u64..12, s in stage()) {
        let mut once = run(&ops);
        let mut twice = run(&ops);

        once.set_stage(LeadId(id), s);
        twice.set_stage(LeadId(id), s);
        twice.set_stage(LeadId(id), s);

        prop_assert_eq!(once.leads(), twice.leads());
    }

    /// A filtered view is an order-preserving subsequence of the register.
    #[test]
    fn filtered_is_ordered_subsequence(
        ops in vec(op(), 0..60),
        filter in proptest::option::of(stage()),
        search in "[a-zA-Z]{0,2}"
    ) {
        let store = run(&ops);
        let stage_filter = filter.map_or(StageFilter::All, StageFilter::Only);
        let view = store.filtered_leads(&LeadQuery::new(stage_filter, search));

        let positions: Vec<usize> = view
            .iter()
            .filter_map(|lead| store.leads().iter().position(|l| l.id == lead.id))
            .collect();
        prop_assert_eq!(positions.len(), view.len());
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(view.iter().all(|l| stage_filter.matches(l.stage())));
    }

    /// Due evaluation agrees with plain date ordering.
    #[test]
    fn due_matches_date_order(reminder in date(), today in date()) {
        prop_assert_eq!(is_due(Some(reminder), today), reminder <= today);
    }
}
