use chrono::{DateTime, Duration, TimeZone, Utc};
use promptvault_core::{
    compare, Asset, AssetKind, CompareSession, CompareState, SegmentKind, INITIAL_CHANGELOG,
};

fn t0() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

fn new_prompt(content: &str) -> Asset {
    Asset::create("P-001", AssetKind::Prompt, content, INITIAL_CHANGELOG, t0())
}

fn append_n(asset: &mut Asset, n: usize) {
    for i in 0..n {
        let at = t0() + Duration::seconds(i64::try_from(i).unwrap() + 1);
        asset.append_version(format!("content {i}"), format!("edit {i}"), at);
    }
}

#[test]
fn n_appends_grow_history_by_n() {
    for n in [0, 1, 5, 23] {
        let mut asset = new_prompt("seed");
        append_n(&mut asset, n);

        assert_eq!(asset.versions().len(), n + 1);
        let last = asset.versions().last().unwrap();
        assert_eq!(asset.current_version(), last.version);
        asset.check_invariants().unwrap();
    }
}

#[test]
fn label_progression_from_v1_0() {
    let label_after = |n| {
        let mut asset = new_prompt("seed");
        append_n(&mut asset, n);
        asset.current_version().to_string()
    };

    assert_eq!(label_after(1), "v1.1");
    assert_eq!(label_after(9), "v1.9");
    assert_eq!(label_after(10), "v2.0");
    assert_eq!(label_after(20), "v3.0");
    assert_eq!(label_after(90), "v10.0");
}

#[test]
fn label_progression_is_deterministic() {
    let run = || {
        let mut asset = new_prompt("seed");
        append_n(&mut asset, 15);
        asset
            .versions()
            .iter()
            .map(|v| v.version.to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn selecting_without_label_matches_cached_content() {
    let mut asset = new_prompt("seed");
    for n in 0..4 {
        assert_eq!(asset.select_version(None).unwrap().content, asset.content());
        append_n(&mut asset, n);
    }
}

#[test]
fn views_reconstruct_arbitrary_pairs() {
    let pairs = [
        ("", ""),
        ("same text", "same text"),
        ("alpha beta", "gamma delta"),
        ("one two three", "one three"),
        ("line one\nline two\n", "line one\nline 2\n\nline three"),
        ("  leading and trailing  ", "leading and trailing"),
        ("Ünïcode wörds ✓", "Ünïcode words ✓ ok"),
    ];

    for (old, new) in pairs {
        let mut asset = new_prompt(old);
        asset.append_version(new, "edit", t0() + Duration::seconds(1));

        let cmp = compare(&asset.versions()[0], &asset.versions()[1]);
        assert_eq!(cmp.older_text(), old, "older view for {old:?} -> {new:?}");
        assert_eq!(cmp.newer_text(), new, "newer view for {old:?} -> {new:?}");
    }
}

#[test]
fn equal_strings_are_all_unchanged() {
    let mut asset = new_prompt("keep every word");
    asset.append_version("keep every word", "no-op edit", t0() + Duration::seconds(1));

    let cmp = compare(&asset.versions()[0], &asset.versions()[1]);
    assert!(cmp
        .segments
        .iter()
        .all(|s| s.kind == SegmentKind::Unchanged));
}

#[test]
fn disjoint_strings_are_all_added_or_removed() {
    let mut asset = new_prompt("alpha");
    asset.append_version("omega", "rewrite", t0() + Duration::seconds(1));

    let cmp = compare(&asset.versions()[0], &asset.versions()[1]);
    assert!(cmp.older_view().all(|s| s.kind == SegmentKind::Removed));
    assert!(cmp.newer_view().all(|s| s.kind == SegmentKind::Added));
}

#[test]
fn comparing_a_version_with_itself_has_no_changes() {
    let mut asset = new_prompt("some content here");
    append_n(&mut asset, 2);

    for version in asset.versions() {
        let stats = compare(version, version).stats();
        assert_eq!(stats.added, 0);
        assert_eq!(stats.removed, 0);
    }
}

#[test]
fn picking_primary_keeps_selecting_target() {
    let mut asset = new_prompt("A");
    asset.append_version("B", "edit", t0() + Duration::seconds(1));

    let mut session = CompareSession::new(&asset);
    let CompareState::SelectingTarget { primary } = session.enter_compare() else {
        panic!("expected SelectingTarget");
    };

    assert_eq!(
        session.pick(primary),
        CompareState::SelectingTarget { primary }
    );
    assert!(session.pair().is_none());
}

#[test]
fn create_append_compare_end_to_end() {
    let mut asset = new_prompt("A");
    assert_eq!(asset.versions().len(), 1);
    assert_eq!(asset.versions()[0].version.to_string(), "v1.0");
    assert_eq!(asset.versions()[0].content, "A");

    asset.append_version("B", "edit", t0() + Duration::seconds(30));
    assert_eq!(asset.current_version().to_string(), "v1.1");
    assert_eq!(asset.content(), "B");
    let history: Vec<_> = asset
        .versions()
        .iter()
        .map(|v| (v.version.to_string(), v.content.as_str()))
        .collect();
    assert_eq!(
        history,
        [("v1.0".to_string(), "A"), ("v1.1".to_string(), "B")]
    );

    let old = asset.select_version_str(Some("v1.0")).unwrap();
    let new = asset.select_version_str(Some("v1.1")).unwrap();
    let cmp = compare(new, old);

    assert_eq!(cmp.older.content, "A");
    let older: Vec<_> = cmp.older_view().map(|s| (s.kind, s.text.as_str())).collect();
    assert_eq!(older, [(SegmentKind::Removed, "A")]);
    let newer: Vec<_> = cmp.newer_view().map(|s| (s.kind, s.text.as_str())).collect();
    assert_eq!(newer, [(SegmentKind::Added, "B")]);
}
