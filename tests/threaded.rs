use std::sync::Arc;
use std::thread;

use ugen::{Grammar, GrammarBuilder, rule_ref, strings};

fn flights() -> Grammar {
    GrammarBuilder::new()
        .entity("CITY", strings(["Prague", "Brno", "Ostrava"]))
        .rule("verb", strings(["fly", "travel"]))
        .intent("BookFlight", rule_ref("verb").then(strings(["to"])).then(rule_ref("CITY")))
        .intent("Cancel", strings(["cancel my flight to"]).then(rule_ref("CITY")))
        .build()
}

#[test]
fn generate_across_threads() {
    let grammar = Arc::new(flights());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let grammar = Arc::clone(&grammar);
            thread::spawn(move || grammar.generate(()).unwrap())
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for expansion in &results[1..] {
        assert_eq!(expansion.expansion_order(), results[0].expansion_order());
        assert_eq!(
            expansion.texts_of("BookFlight"),
            results[0].texts_of("BookFlight")
        );
    }
}

#[test]
fn share_expansion_across_threads() {
    let expansion = Arc::new(flights().generate(()).unwrap());

    let mut handles = vec![];

    let ex = Arc::clone(&expansion);
    handles.push(thread::spawn(move || {
        ex.get("BookFlight").unwrap().utterances().len()
    }));

    let ex = Arc::clone(&expansion);
    handles.push(thread::spawn(move || {
        ex.get("Cancel").unwrap().utterances().len()
    }));

    let ex = Arc::clone(&expansion);
    handles.push(thread::spawn(move || {
        ex.iter()
            .flat_map(|rule| rule.utterances())
            .map(|u| u.entities.len())
            .sum::<usize>()
    }));

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    // CITY 3 + BookFlight 6 + Cancel 3 entity spans
    assert_eq!(counts, vec![6, 3, 12]);
}

#[test]
fn expansion_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ugen::Expansion>();
    assert_send_sync::<Grammar>();
}
