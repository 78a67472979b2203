use std::sync::Arc;
use std::thread;

use marquee_catalog::{ShowingDirectory, ShowingInventory};
use marquee_domain::SeatGrid;

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn disjoint_concurrent_bookings_all_succeed() {
    let inventory = Arc::new(ShowingInventory::new("cicaplex", SeatGrid::default()));
    let rows = ["a", "b", "c", "d"];

    let handles: Vec<_> = rows
        .iter()
        .map(|row| {
            let inventory = Arc::clone(&inventory);
            let request: Vec<String> = (1..=5).map(|col| format!("{row}{col}")).collect();
            thread::spawn(move || inventory.book(&request))
        })
        .collect();

    for handle in handles {
        let outcome = handle.join().unwrap();
        assert!(outcome.is_confirmed());
        assert_eq!(outcome.success.len(), 5);
    }
    assert_eq!(inventory.free_capacity(), 0);
    assert!(inventory.free_seats().is_empty());
}

#[test]
fn contested_seat_goes_to_exactly_one_booker() {
    let inventory = Arc::new(ShowingInventory::new("cicaplex", SeatGrid::default()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let inventory = Arc::clone(&inventory);
            thread::spawn(move || inventory.book(&tokens(&["b3"])))
        })
        .collect();

    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = outcomes.iter().filter(|o| o.is_confirmed()).count();
    let losers = outcomes
        .iter()
        .filter(|o| o.taken == tokens(&["b3"]))
        .count();

    assert_eq!(winners, 1);
    assert_eq!(losers, 7);
    assert_eq!(inventory.free_capacity(), 19);
}

#[test]
fn overlapping_requests_never_double_book() {
    let inventory = Arc::new(ShowingInventory::new("cicaplex", SeatGrid::default()));

    // Both requests contain c3; at most one can confirm, and a rejected
    // request must not reserve anything at all.
    let first = tokens(&["c1", "c2", "c3"]);
    let second = tokens(&["c3", "c4", "c5"]);

    let t1 = {
        let inventory = Arc::clone(&inventory);
        let request = first.clone();
        thread::spawn(move || inventory.book(&request))
    };
    let t2 = {
        let inventory = Arc::clone(&inventory);
        let request = second.clone();
        thread::spawn(move || inventory.book(&request))
    };

    let o1 = t1.join().unwrap();
    let o2 = t2.join().unwrap();

    // The check-and-flip is serialized: whichever request runs second
    // finds c3 occupied and reserves nothing.
    let confirmed = [&o1, &o2].iter().filter(|o| o.is_confirmed()).count();
    assert_eq!(confirmed, 1);
    assert_eq!(inventory.free_capacity(), 17);
}

#[test]
fn directory_mutation_does_not_block_unrelated_booking() {
    let directory = Arc::new(ShowingDirectory::new());
    directory.register_showing("cicaplex", "cica");
    let handle = directory.showings_for_movie("cica").remove(0);

    let registrar = {
        let directory = Arc::clone(&directory);
        thread::spawn(move || {
            for i in 0..50 {
                directory.register_showing(&format!("theater-{i}"), &format!("movie-{i}"));
            }
        })
    };
    let booker = {
        let inventory = Arc::clone(&handle.inventory);
        thread::spawn(move || inventory.book(&tokens(&["a1", "a2", "a3"])))
    };

    registrar.join().unwrap();
    let outcome = booker.join().unwrap();

    assert!(outcome.is_confirmed());
    assert_eq!(handle.inventory.free_capacity(), 17);
    // 50 new movies plus cica.
    assert_eq!(directory.list_movies().len(), 51);
}

#[test]
fn concurrent_registrations_allocate_unique_ids() {
    let directory = Arc::new(ShowingDirectory::new());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let directory = Arc::clone(&directory);
            thread::spawn(move || directory.register_showing("cicaplex", &format!("movie-{i}")))
        })
        .collect();

    let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), 10);
    assert_eq!(directory.list_movies().len(), 10);
}
