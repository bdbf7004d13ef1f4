//! Behaviour every `DocumentStore` adapter must share.

use serde_json::json;

use crate::domain::{AppError, Collection, ObjectId, UserId};
use crate::ports::DocumentStore;

fn user(raw: &str) -> UserId {
    UserId::parse(raw).unwrap()
}

pub fn insert_then_find_by_id(store: &impl DocumentStore) {
    let owner = user("678fe640180fa929cc64f786");
    let stored = store.insert(Collection::Roadmaps, &owner, json!({"roadmap": {"title": "T"}})).unwrap();

    let found = store.find_by_id(Collection::Roadmaps, &stored.id).unwrap().unwrap();
    assert_eq!(found, stored);
    assert_eq!(found.body["roadmap"]["title"], "T");

    let missing = ObjectId::parse("000000000000000000000000").unwrap();
    assert!(store.find_by_id(Collection::Roadmaps, &missing).unwrap().is_none());
}

pub fn find_by_user_is_newest_first_and_limited(store: &impl DocumentStore) {
    let owner = user("678fe640180fa929cc64f786");
    let other = user("678fe640180fa929cc64f787");

    let ids: Vec<ObjectId> = (0..4)
        .map(|n| store.insert(Collection::Roadmaps, &owner, json!({"n": n})).unwrap().id)
        .collect();
    store.insert(Collection::Roadmaps, &other, json!({"n": 99})).unwrap();

    let all = store.find_by_user(Collection::Roadmaps, &owner, None).unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].id, ids[3]);
    assert_eq!(all[3].id, ids[0]);

    let recent = store.find_by_user(Collection::Roadmaps, &owner, Some(3)).unwrap();
    assert_eq!(recent.iter().map(|d| d.body["n"].as_i64().unwrap()).collect::<Vec<_>>(), vec![3, 2, 1]);
}

pub fn collections_are_isolated(store: &impl DocumentStore) {
    let owner = user("678fe640180fa929cc64f786");
    let form = store.insert(Collection::RoadmapForms, &owner, json!({})).unwrap();

    assert!(store.find_by_id(Collection::Roadmaps, &form.id).unwrap().is_none());
    assert!(store.find_by_user(Collection::Roadmaps, &owner, None).unwrap().is_empty());
    assert_eq!(store.find_by_user(Collection::RoadmapForms, &owner, None).unwrap().len(), 1);
}

pub fn replace_requires_existing_document(store: &impl DocumentStore) {
    let owner = user("678fe640180fa929cc64f786");
    let mut stored = store.insert(Collection::Roadmaps, &owner, json!({"v": 1})).unwrap();

    stored.body = json!({"v": 2});
    store.replace(Collection::Roadmaps, &stored).unwrap();
    let reread = store.find_by_id(Collection::Roadmaps, &stored.id).unwrap().unwrap();
    assert_eq!(reread.body, json!({"v": 2}));
    assert_eq!(reread.created_at, stored.created_at);

    let mut ghost = stored.clone();
    ghost.id = ObjectId::parse("000000000000000000000000").unwrap();
    assert!(matches!(store.replace(Collection::Roadmaps, &ghost), Err(AppError::NotFound(_))));
}
