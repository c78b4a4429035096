extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, Symbol, TryIntoVal, Val, Vec,
};

use crate::events::{
    ContributorAdded, ContributorPaid, ContributorsLocked, ProjectCompleted, ProjectFunded,
    ProjectSetup,
};
use crate::{Deposit, SplitEscrow, SplitEscrowClient};

fn setup() -> (Env, SplitEscrowClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(SplitEscrow, ());
    let client = SplitEscrowClient::new(&env, &contract_id);
    (env, client)
}

fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

/// Events published by the escrow itself (token contract events filtered out).
fn escrow_events(env: &Env, escrow: &Address) -> std::vec::Vec<(Vec<Val>, Val)> {
    env.events()
        .all()
        .iter()
        .filter(|(contract, _, _)| contract == escrow)
        .map(|(_, topics, data)| (topics, data))
        .collect()
}

fn first_topic(env: &Env, topics: &Vec<Val>) -> Symbol {
    topics.get(0).unwrap().try_into_val(env).unwrap()
}

#[test]
fn test_setup_event() {
    let (env, client) = setup();
    let manager = Address::generate(&env);
    let payer = Address::generate(&env);
    let token = Address::generate(&env);

    client.setup(&manager, &payer, &token);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("setup").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProjectSetup = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProjectSetup {
            manager,
            client: payer,
            token,
        }
    );
}

#[test]
fn test_contributor_added_event() {
    let (env, client) = setup();
    let manager = Address::generate(&env);
    client.setup(&manager, &Address::generate(&env), &Address::generate(&env));
    client.register_contributor(&manager, &Address::generate(&env), &25);

    let contributor = Address::generate(&env);
    let index = client.register_contributor(&manager, &contributor, &75);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("contrib"), index)
    let expected_topics = vec![
        &env,
        symbol_short!("contrib").into_val(&env),
        1u32.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ContributorAdded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ContributorAdded {
            index,
            address: contributor,
            share_percentage: 75,
        }
    );
}

#[test]
fn test_locked_event() {
    let (env, client) = setup();
    let manager = Address::generate(&env);
    client.setup(&manager, &Address::generate(&env), &Address::generate(&env));
    client.register_contributor(&manager, &Address::generate(&env), &50);
    client.register_contributor(&manager, &Address::generate(&env), &50);

    client.lock(&manager);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    assert_eq!(
        last_event.1,
        vec![&env, symbol_short!("locked").into_val(&env)]
    );
    let event_data: ContributorsLocked = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ContributorsLocked {
            manager,
            contributor_count: 2,
        }
    );
}

#[test]
fn test_funded_and_payout_events() {
    let (env, client) = setup();
    let manager = Address::generate(&env);
    let payer = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    let a = Address::generate(&env);
    let b = Address::generate(&env);

    token::StellarAssetClient::new(&env, &token.address).mint(&payer, &5_000_000);
    client.setup(&manager, &payer, &token.address);
    client.register_contributor(&manager, &a, &33);
    client.register_contributor(&manager, &b, &67);
    client.lock(&manager);

    let deposit = Deposit {
        destination: client.address.clone(),
        amount: 1_000_001,
    };
    client.fund(&payer, &deposit);

    let events = escrow_events(&env, &client.address);
    let (topics, data) = events.last().expect("No events found");
    assert_eq!(first_topic(&env, topics), symbol_short!("funded"));
    let funded: ProjectFunded = data.try_into_val(&env).unwrap();
    assert_eq!(
        funded,
        ProjectFunded {
            client: payer.clone(),
            amount: 1_000_001,
            total_funded: 1_000_001,
        }
    );

    client.complete_and_payout(&payer);

    let events = escrow_events(&env, &client.address);
    let paid: std::vec::Vec<ContributorPaid> = events
        .iter()
        .filter(|(topics, _)| first_topic(&env, topics) == symbol_short!("paid"))
        .map(|(_, data)| data.try_into_val(&env).unwrap())
        .collect();

    // One event per transfer, in registration order.
    assert_eq!(
        paid,
        std::vec![
            ContributorPaid {
                index: 0,
                address: a,
                amount: 330_000,
            },
            ContributorPaid {
                index: 1,
                address: b,
                amount: 670_000,
            },
        ]
    );

    let (topics, data) = events.last().expect("No events found");
    assert_eq!(first_topic(&env, topics), symbol_short!("completed"));
    let completed: ProjectCompleted = data.try_into_val(&env).unwrap();
    assert_eq!(
        completed,
        ProjectCompleted {
            caller: payer,
            total_funded: 1_000_001,
            total_paid: 1_000_000,
            dust: 1,
        }
    );
}

#[test]
fn test_failed_call_emits_nothing() {
    let (env, client) = setup();
    let manager = Address::generate(&env);
    client.setup(&manager, &Address::generate(&env), &Address::generate(&env));

    let outsider = Address::generate(&env);
    assert!(client
        .try_register_contributor(&outsider, &outsider, &10)
        .is_err());

    let added = escrow_events(&env, &client.address)
        .iter()
        .filter(|(topics, _)| first_topic(&env, topics) == symbol_short!("contrib"))
        .count();
    assert_eq!(added, 0);
}
