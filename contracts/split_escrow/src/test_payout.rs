extern crate std;

use soroban_sdk::{testutils::Address as _, token, Address, Env};

use crate::invariants::{assert_all_project_invariants, assert_payout_conserves_funds};
use crate::{Deposit, Error, SplitEscrow, SplitEscrowClient};

struct Funded {
    escrow: SplitEscrowClient<'static>,
    token: token::Client<'static>,
    manager: Address,
    contributors: std::vec::Vec<Address>,
}

/// Set up, register `shares`, lock and fund with a single deposit of `total`.
fn funded_project(shares: &[u32], total: i128) -> Funded {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(SplitEscrow, ());
    let escrow = SplitEscrowClient::new(&env, &contract_id);

    let manager = Address::generate(&env);
    let payer = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token = token::Client::new(&env, &sac.address());
    token::StellarAssetClient::new(&env, &token.address).mint(&payer, &total);

    escrow.setup(&manager, &payer, &token.address);
    let mut contributors = std::vec::Vec::new();
    for share in shares {
        let a = Address::generate(&env);
        escrow.register_contributor(&manager, &a, share);
        contributors.push(a);
    }
    escrow.lock(&manager);
    escrow.fund(
        &payer,
        &Deposit {
            destination: escrow.address.clone(),
            amount: total,
        },
    );

    Funded {
        escrow,
        token,
        manager,
        contributors,
    }
}

fn balances(f: &Funded) -> std::vec::Vec<i128> {
    f.contributors.iter().map(|a| f.token.balance(a)).collect()
}

#[test]
fn test_even_million_has_no_dust() {
    let f = funded_project(&[33, 33, 34], 1_000_000);

    let plan = f.escrow.complete_and_payout(&f.manager);

    assert_eq!(balances(&f), std::vec![330_000, 330_000, 340_000]);
    assert_eq!(plan.dust, 0);
    assert_eq!(f.escrow.custody_balance(), 0);
    assert_payout_conserves_funds(&plan, 1_000_000);
}

#[test]
fn test_odd_total_strands_one_unit_of_dust() {
    let f = funded_project(&[33, 33, 34], 1_000_001);

    let plan = f.escrow.complete_and_payout(&f.manager);

    assert_eq!(balances(&f), std::vec![330_000, 330_000, 340_000]);
    assert_eq!(plan.total_paid, 1_000_000);
    assert_eq!(plan.dust, 1);
    // Dust stays in custody; total_funded is a historical record.
    assert_eq!(f.escrow.custody_balance(), 1);
    assert_eq!(f.escrow.get_project().unwrap().total_funded, 1_000_001);
}

#[test]
fn test_preview_matches_executed_payout() {
    let f = funded_project(&[10, 20, 30, 40], 7_777_777);

    let preview = f.escrow.preview_payouts();
    let plan = f.escrow.complete_and_payout(&f.manager);

    assert_eq!(preview, plan);
    for (i, a) in f.contributors.iter().enumerate() {
        let payout = plan.payouts.get(i as u32).unwrap();
        assert_eq!(payout.index, i as u32);
        assert_eq!(&payout.address, a);
        assert_eq!(f.token.balance(a), payout.amount);
    }
}

#[test]
fn test_preview_after_completion_fails() {
    let f = funded_project(&[50, 50], 2_000_000);
    f.escrow.complete_and_payout(&f.manager);

    assert_eq!(
        f.escrow.try_preview_payouts(),
        Err(Ok(Error::AlreadyCompleted))
    );
}

#[test]
fn test_dust_is_deterministic() {
    let shares = [7u32, 13, 19, 23, 38];
    let total = 3_141_592;

    let first = funded_project(&shares, total);
    let second = funded_project(&shares, total);

    let a = first.escrow.complete_and_payout(&first.manager);
    let b = second.escrow.complete_and_payout(&second.manager);

    assert_eq!(a.dust, b.dust);
    assert_eq!(a.total_paid, b.total_paid);
    assert_eq!(balances(&first), balances(&second));
    assert_payout_conserves_funds(&a, total);
}

/// Sweep a range of totals and share splits; the invariants must hold for
/// every combination.
#[test]
fn test_payout_invariants_over_many_splits() {
    let splits: [&[u32]; 5] = [
        &[100],
        &[1, 99],
        &[33, 33, 34],
        &[1, 1, 1, 97],
        &[20, 20, 20, 20, 20],
    ];

    for shares in splits {
        for total in [1_000_000i128, 1_000_001, 1_000_099, 12_345_678] {
            let f = funded_project(shares, total);
            let plan = f.escrow.complete_and_payout(&f.manager);

            assert_payout_conserves_funds(&plan, total);
            assert_eq!(f.escrow.custody_balance(), plan.dust);
            for (i, share) in shares.iter().enumerate() {
                let expected = total * i128::from(*share) / 100;
                assert_eq!(f.token.balance(&f.contributors[i]), expected);
            }
            assert_all_project_invariants(&f.escrow.get_project().unwrap());
        }
    }
}
