//! Registry behaviour under concurrent registration and lookup

mod util;

use std::sync::Barrier;
use std::thread;

use common::prelude::*;

const SENDERS: usize = 100;
const THREADS: usize = 8;

#[test]
fn test_concurrent_registration_matches_sequential() {
    let (registry, pair) = util::setup_registry();
    let senders: Vec<KeyPair> = (0..SENDERS)
        .map(|_| generate_key_pair().unwrap())
        .collect();

    let barrier = Barrier::new(THREADS);
    thread::scope(|s| {
        for t in 0..THREADS {
            let registry = registry.clone();
            let senders = &senders;
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for (i, sender) in senders.iter().enumerate().skip(t).step_by(THREADS) {
                    registry.register(format!("sender-{}", i), &sender.public);
                }
            });
        }
    });

    assert_eq!(registry.len(), SENDERS);
    for (i, sender) in senders.iter().enumerate() {
        let cached = registry.shared_secret(&format!("sender-{}", i)).unwrap();
        assert_eq!(cached, derive_shared_secret(&pair.secret, &sender.public));
    }
}

#[test]
fn test_concurrent_same_identifier_last_writer_wins() {
    let (registry, pair) = util::setup_registry();
    let candidates: Vec<KeyPair> = (0..THREADS)
        .map(|_| generate_key_pair().unwrap())
        .collect();

    thread::scope(|s| {
        for candidate in &candidates {
            let registry = registry.clone();
            s.spawn(move || {
                for _ in 0..50 {
                    registry.register("contended", &candidate.public);
                }
            });
        }
    });

    // Whichever write landed last, the entry is one of the valid secrets
    assert_eq!(registry.len(), 1);
    let cached = registry.shared_secret("contended").unwrap();
    assert!(candidates
        .iter()
        .any(|c| derive_shared_secret(&pair.secret, &c.public) == cached));
}

#[test]
fn test_lookups_during_registration_see_complete_entries() {
    let (registry, pair) = util::setup_registry();
    let senders: Vec<KeyPair> = (0..SENDERS)
        .map(|_| generate_key_pair().unwrap())
        .collect();
    let expected: Vec<SharedSecret> = senders
        .iter()
        .map(|s| derive_shared_secret(&pair.secret, &s.public))
        .collect();

    thread::scope(|s| {
        let writer = registry.clone();
        let senders = &senders;
        s.spawn(move || {
            for (i, sender) in senders.iter().enumerate() {
                writer.register(format!("sender-{}", i), &sender.public);
            }
        });

        for _ in 0..4 {
            let reader = registry.clone();
            let expected = &expected;
            s.spawn(move || {
                for _ in 0..20 {
                    for (i, secret) in expected.iter().enumerate() {
                        if let Some(found) = reader.shared_secret(&format!("sender-{}", i)) {
                            assert_eq!(&found, secret);
                        }
                    }
                }
            });
        }
    });

    assert_eq!(registry.len(), SENDERS);
}

#[test]
fn test_agents_seal_in_parallel() {
    let (registry, _) = util::setup_registry();

    thread::scope(|s| {
        for t in 0..THREADS {
            let registry = registry.clone();
            s.spawn(move || {
                let agent = Agent::new(&registry.public_key()).unwrap();
                let id = format!("worker-{}", t);
                registry.register(id.clone(), &agent.public_key());

                for n in 0..25u32 {
                    let envelope = agent.seal(&(id.as_str(), n)).unwrap();
                    let (from, seq): (String, u32) = registry.open_from(&id, &envelope).unwrap();
                    assert_eq!(from, id);
                    assert_eq!(seq, n);
                }
            });
        }
    });

    assert_eq!(registry.len(), THREADS);
}
