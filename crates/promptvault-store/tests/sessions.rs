use promptvault_core::{Asset, AssetDraft, AssetKind, CatalogQuery};
use promptvault_store::{
    export_to_path, AuthService, ScopeKey, SqliteStore, Workspace, DEFAULT_EXPORT_FILE,
};

fn open_store(dir: &tempfile::TempDir) -> SqliteStore {
    SqliteStore::open(&dir.path().join("vault.db")).unwrap()
}

#[test]
fn guest_sees_samples_and_users_start_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);

    let guest = Workspace::open(&store, ScopeKey::Guest);
    let titles: Vec<_> = guest.assets().iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        ["English Translator Professional", "React Component Generator"]
    );

    let auth = AuthService::new(&store);
    let user = auth.register("ada", "pw").unwrap();
    let mine = Workspace::open(&store, user.scope());
    assert!(mine.assets().is_empty());
}

#[test]
fn user_data_survives_logout_and_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let user_id = {
        let store = open_store(&dir);
        let auth = AuthService::new(&store);
        let user = auth.register("ada", "pw").unwrap();

        let mut ws = Workspace::open(&store, user.scope());
        ws.create(AssetDraft::new(AssetKind::Prompt, "Summarizer", "Summarize:"))
            .unwrap();
        ws.edit(
            "P-001",
            AssetDraft::new(AssetKind::Prompt, "Summarizer", "Summarize briefly:"),
            "tighter wording",
        )
        .unwrap();
        ws.close();
        auth.logout().unwrap();
        user.id
    };

    let store = open_store(&dir);
    let auth = AuthService::new(&store);
    assert!(auth.current_user().is_none());

    let user = auth.login("ada", "pw").unwrap();
    assert_eq!(user.id, user_id);

    let ws = Workspace::open(&store, user.scope());
    let asset = ws.require("P-001").unwrap();
    let labels: Vec<_> = asset
        .list_versions()
        .map(|v| v.version.to_string())
        .collect();
    assert_eq!(labels, ["v1.1", "v1.0"]);
    assert_eq!(asset.content(), "Summarize briefly:");
}

#[test]
fn scopes_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);

    let mut a = Workspace::open(&store, ScopeKey::user("u-a"));
    a.create(AssetDraft::new(AssetKind::Idea, "Only mine", "x"))
        .unwrap();

    let b = Workspace::open(&store, ScopeKey::user("u-b"));
    assert!(b.assets().is_empty());
    assert!(b.query(&CatalogQuery::default()).is_empty());

    let guest = Workspace::open(&store, ScopeKey::Guest);
    assert!(guest.get("I-002").is_none());
}

#[test]
fn export_writes_the_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let ws = Workspace::open(&store, ScopeKey::Guest);

    let path = dir.path().join(DEFAULT_EXPORT_FILE);
    export_to_path(ws.assets(), &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let decoded: Vec<Asset> = serde_json::from_str(&written).unwrap();
    assert_eq!(decoded, ws.assets());
}
