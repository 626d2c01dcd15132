// Integration tests for SkillMatch: editor, stores and matcher together

use std::sync::Arc;

use skillmatch::core::Matcher;
use skillmatch::models::{AuthenticatedUser, PercentageBasis, Profile};
use skillmatch::services::{
    demo_catalog, CatalogCache, JobCatalog, MemoryStore, ProfileStore, SkillStore, Stores,
};
use skillmatch::session::{navigation, AccountArea, SessionContext, SessionState, SkillEdit, SkillEditor};

fn test_user(id: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        id: id.to_string(),
        email: Some(format!("{}@example.com", id)),
        role: Some("authenticated".to_string()),
    }
}

fn editor_for(store: &Arc<MemoryStore>) -> SkillEditor {
    SkillEditor::new(store.clone(), 1_000)
}

#[tokio::test]
async fn test_add_existing_skill_with_other_casing() {
    let store = Arc::new(MemoryStore::with_demo_catalog());
    let editor = editor_for(&store);
    let mut session = SessionContext::new(test_user("u1"));

    for name in ["Java", "SQL", "React"] {
        editor.add_skill(&mut session, name).await.unwrap();
    }
    let entities_before = store.skill_entity_count().await;

    let edit = editor.add_skill(&mut session, "java").await.unwrap();

    assert_eq!(edit, SkillEdit::Unchanged);
    assert_eq!(store.skill_entity_count().await, entities_before);
    assert_eq!(session.skills.names().collect::<Vec<_>>(), vec!["Java", "SQL", "React"]);
}

#[tokio::test]
async fn test_edit_then_match_against_demo_catalog() {
    let store = Arc::new(MemoryStore::with_demo_catalog());
    let editor = editor_for(&store);
    let mut session = SessionContext::new(test_user("u1"));

    for name in ["Java", "SQL", "React"] {
        editor.add_skill(&mut session, name).await.unwrap();
    }

    let jobs = store.list_active_jobs().await.unwrap();
    let report = Matcher::default().find_matches(session.skills.names(), &jobs);

    // Every demo posting needs at least one of the three skills
    assert_eq!(report.matches.len(), 6);
    assert_eq!(report.total_postings, 6);

    let counts: Vec<usize> = report.matches.iter().map(|m| m.match_count()).collect();
    assert_eq!(counts, vec![2, 2, 2, 1, 1, 1]);

    let leading: Vec<&str> = report.matches[..3].iter().map(|m| m.job.id.as_str()).collect();
    assert_eq!(leading, vec!["2", "3", "6"]);

    let java_dev = &report.matches[1];
    assert_eq!(java_dev.job.title, "Java Developer");
    assert_eq!(java_dev.matched_skills, vec!["Java", "SQL"]);
    assert_eq!(java_dev.match_percentage, 50);
}

#[tokio::test]
async fn test_remove_skill_changes_matches() {
    let store = Arc::new(MemoryStore::with_demo_catalog());
    let editor = editor_for(&store);
    let mut session = SessionContext::new(test_user("u1"));

    editor.add_skill(&mut session, "Docker").await.unwrap();
    editor.add_skill(&mut session, "Maven").await.unwrap();

    let jobs = store.list_active_jobs().await.unwrap();
    let before = Matcher::default().find_matches(session.skills.names(), &jobs);
    assert_eq!(before.matches.len(), 2);

    let edit = editor.remove_skill(&mut session, "docker").await.unwrap();
    assert_eq!(edit.label(), "removed");

    let after = Matcher::default().find_matches(session.skills.names(), &jobs);
    let ids: Vec<&str> = after.matches.iter().map(|m| m.job.id.as_str()).collect();
    assert_eq!(ids, vec!["3"]);
}

#[tokio::test]
async fn test_session_reload_sees_edits_from_another_session() {
    let store = Arc::new(MemoryStore::new());
    let editor = editor_for(&store);

    let mut first = SessionContext::new(test_user("u1"));
    editor.add_skill(&mut first, "Python").await.unwrap();

    let second = SessionContext::load(test_user("u1"), store.as_ref()).await.unwrap();
    assert!(second.skills.contains("PYTHON"));
}

#[tokio::test]
async fn test_fixed_denominator_over_demo_catalog() {
    let matcher = Matcher::new(PercentageBasis::Fixed(4));
    let report = matcher.find_matches(["React"], &demo_catalog());

    assert_eq!(report.matches.len(), 3);
    assert!(report.matches.iter().all(|m| m.match_percentage == 25));
}

#[tokio::test]
async fn test_catalog_cache_serves_store_postings() {
    let store = Arc::new(MemoryStore::with_demo_catalog());
    let stores = Stores::from_backend(store);
    let cache = CatalogCache::new(stores.catalog.clone(), 60);

    let first = cache.active_jobs().await.unwrap();
    let second = cache.active_jobs().await.unwrap();

    assert_eq!(first.len(), 6);
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_navigation_uses_stored_profile_name() {
    let store = MemoryStore::new();
    store
        .put_profile(Profile {
            id: "u1".to_string(),
            full_name: "Ada Lovelace".to_string(),
            job_title: Some("Engineer".to_string()),
            created_at: None,
            updated_at: None,
        })
        .await;

    let user = test_user("u1");
    let profile = store.get_profile(&user.id).await.unwrap();
    let state = SessionState::authenticated(&user, profile.as_ref());
    let nav = navigation(&state, "/skills");

    match nav.account {
        AccountArea::Member { display_name, .. } => assert_eq!(display_name, "Ada Lovelace"),
        AccountArea::Guest { .. } => panic!("member expected"),
    }
    assert!(nav.links.iter().any(|l| l.path == "/skills" && l.active));
}

#[test]
fn test_editor_runs_outside_multi_thread_runtime() {
    let store = Arc::new(MemoryStore::new());
    let editor = editor_for(&store);

    tokio_test::block_on(async {
        let mut session = SessionContext::new(test_user("u1"));
        let edit = tokio_test::assert_ok!(editor.add_skill(&mut session, "Vue").await);

        assert_eq!(edit.skill().and_then(|s| s.category.as_deref()), Some("web"));
        assert_eq!(store.list_skills("u1").await.unwrap().len(), 1);
    });
}
