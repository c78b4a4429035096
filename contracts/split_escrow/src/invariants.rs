#![allow(dead_code)]

extern crate std;

use crate::types::{PayoutPlan, Project, ProjectStatus};
use crate::TOTAL_SHARES;

/// Sum of all registered shares, saturating.
pub fn share_total(project: &Project) -> u32 {
    let mut total = 0u32;
    for c in project.contributors.iter() {
        total = total.saturating_add(c.share_percentage);
    }
    total
}

/// INV-1: A locked project's shares sum to exactly 100.
pub fn assert_locked_shares_sum(project: &Project) {
    if project.is_locked {
        let total = share_total(project);
        assert_eq!(
            total, TOTAL_SHARES,
            "INV-1 violated: locked project has share total {}",
            total
        );
    }
}

/// INV-2: Every contributor share is within 1..=100.
pub fn assert_shares_in_range(project: &Project) {
    for (i, c) in project.contributors.iter().enumerate() {
        assert!(
            c.share_percentage >= 1 && c.share_percentage <= TOTAL_SHARES,
            "INV-2 violated: contributor {} has share {}",
            i,
            c.share_percentage
        );
    }
}

/// INV-3: `total_funded` never decreases.
pub fn assert_total_funded_monotonic(before: i128, after: i128) {
    assert!(
        after >= before,
        "INV-3 violated: total_funded decreased from {} to {}",
        before,
        after
    );
}

/// INV-4: Nobody is marked paid before completion, and everybody is after.
pub fn assert_paid_flags_match_completion(project: &Project) {
    for (i, c) in project.contributors.iter().enumerate() {
        assert_eq!(
            c.paid, project.is_completed,
            "INV-4 violated: contributor {} paid={} but is_completed={}",
            i, c.paid, project.is_completed
        );
    }
}

/// INV-5: Completion implies the list was locked and funded.
pub fn assert_completed_was_locked_and_funded(project: &Project) {
    if project.is_completed {
        assert!(project.is_locked, "INV-5 violated: completed but not locked");
        assert!(
            project.total_funded > 0,
            "INV-5 violated: completed with zero funding"
        );
    }
}

/// INV-6: Payouts never exceed the pool and the remainder is below one unit
/// per contributor.
pub fn assert_payout_conserves_funds(plan: &PayoutPlan, total_funded: i128) {
    let mut sum = 0i128;
    for p in plan.payouts.iter() {
        assert!(p.amount >= 0, "INV-6 violated: negative payout {}", p.amount);
        sum += p.amount;
    }
    assert_eq!(sum, plan.total_paid, "INV-6 violated: total_paid mismatch");
    assert_eq!(
        plan.total_paid + plan.dust,
        total_funded,
        "INV-6 violated: {} + {} != {}",
        plan.total_paid,
        plan.dust,
        total_funded
    );
    assert!(
        plan.dust >= 0 && plan.dust < i128::from(plan.payouts.len().max(1)),
        "INV-6 violated: dust {} for {} payouts",
        plan.dust,
        plan.payouts.len()
    );
}

/// INV-7: Status transitions only move forward (or stay put).
pub fn assert_valid_status_transition(from: ProjectStatus, to: ProjectStatus) {
    let rank = |s: ProjectStatus| match s {
        ProjectStatus::Configuring => 0,
        ProjectStatus::AwaitingFunds => 1,
        ProjectStatus::AwaitingCompletion => 2,
        ProjectStatus::Completed => 3,
    };
    assert!(
        rank(to) >= rank(from),
        "INV-7 violated: invalid status transition from {:?} to {:?}",
        from,
        to
    );
}

/// INV-8: Parties and the custody token never change after setup.
pub fn assert_parties_immutable(original: &Project, current: &Project) {
    assert_eq!(
        original.manager, current.manager,
        "INV-8 violated: manager changed"
    );
    assert_eq!(
        original.client, current.client,
        "INV-8 violated: client changed"
    );
    assert_eq!(
        original.token, current.token,
        "INV-8 violated: token changed"
    );
}

/// INV-9: Once locked, addresses and shares are frozen; only `paid` may flip.
pub fn assert_contributors_frozen(locked: &Project, current: &Project) {
    assert_eq!(
        locked.contributors.len(),
        current.contributors.len(),
        "INV-9 violated: contributor count changed after lock"
    );
    for i in 0..locked.contributors.len() {
        let a = locked.contributors.get_unchecked(i);
        let b = current.contributors.get_unchecked(i);
        assert_eq!(a.address, b.address, "INV-9 violated: address {} changed", i);
        assert_eq!(
            a.share_percentage, b.share_percentage,
            "INV-9 violated: share {} changed",
            i
        );
    }
}

/// Run all stateless project invariants.
pub fn assert_all_project_invariants(project: &Project) {
    assert_locked_shares_sum(project);
    assert_shares_in_range(project);
    assert_paid_flags_match_completion(project);
    assert_completed_was_locked_and_funded(project);
}
