//! Property tests for reconciliation

mod common;

use common::*;
use proptest::prelude::*;
use relsync_builder::{DependentRelationshipBuilder, OwnerRelationshipBuilder, ReconcilePlan};
use relsync_domain::{ContentId, Side};
use std::collections::BTreeSet;

fn id_set() -> impl Strategy<Value = BTreeSet<u32>> {
    prop::collection::btree_set(100u32..=110, 0..8)
}

fn to_ids(values: &BTreeSet<u32>) -> BTreeSet<ContentId> {
    values.iter().copied().map(ContentId::new).collect()
}

proptest! {
    #[test]
    fn reconcile_converges_to_desired(current in id_set(), desired in id_set()) {
        let platform = FakePlatform::new();
        let current: Vec<u32> = current.into_iter().collect();
        platform.seed_related(Side::Owner, 1, &current, RELATED_SLOT);
        let builder = OwnerRelationshipBuilder::new(&platform, &platform, &platform);
        let desired = to_ids(&desired);

        builder.reconcile(ContentId::new(1), &desired, RELATED_SLOT, SNIPPET).unwrap();

        let extracted: BTreeSet<ContentId> = builder
            .extract_related_ids(ContentId::new(1), RELATED_SLOT)
            .unwrap()
            .into_iter()
            .collect();
        prop_assert_eq!(extracted, desired);
    }

    #[test]
    fn second_reconcile_writes_nothing(current in id_set(), desired in id_set()) {
        let platform = FakePlatform::new();
        let current: Vec<u32> = current.into_iter().collect();
        platform.seed_related(Side::Dependent, 1, &current, RELATED_SLOT);
        let builder = DependentRelationshipBuilder::new(&platform, &platform, &platform);
        let desired = to_ids(&desired);

        builder.reconcile(ContentId::new(1), &desired, RELATED_SLOT, SNIPPET).unwrap();
        platform.reset_calls();
        let report = builder.reconcile(ContentId::new(1), &desired, RELATED_SLOT, SNIPPET).unwrap();

        prop_assert!(report.plan.is_noop());
        prop_assert_eq!(platform.save_calls(), 0);
        prop_assert_eq!(platform.delete_calls(), 0);
    }

    #[test]
    fn plan_add_and_remove_are_disjoint(current in id_set(), desired in id_set()) {
        let plan = ReconcilePlan::compute(&to_ids(&current), &to_ids(&desired));

        prop_assert!(plan.to_add.is_disjoint(&plan.to_remove));
        prop_assert!(plan.to_add.is_disjoint(&plan.unchanged));
        prop_assert!(plan.to_remove.is_disjoint(&plan.unchanged));
    }

    #[test]
    fn store_batches_stay_within_one_save_and_one_delete(current in id_set(), desired in id_set()) {
        let platform = FakePlatform::new();
        let current: Vec<u32> = current.into_iter().collect();
        platform.seed_related(Side::Owner, 1, &current, RELATED_SLOT);
        let builder = OwnerRelationshipBuilder::new(&platform, &platform, &platform);

        let report = builder
            .reconcile(ContentId::new(1), &to_ids(&desired), RELATED_SLOT, SNIPPET)
            .unwrap();

        prop_assert!(platform.save_calls() <= 1);
        prop_assert!(platform.delete_calls() <= 1);
        prop_assert_eq!(platform.save_calls() == 1, !report.plan.to_add.is_empty());
        prop_assert_eq!(platform.delete_calls() == 1, !report.plan.to_remove.is_empty());
    }
}
