use column_sync::{
    BindOutcome, Document, ElementId, GroupBinding, GroupKey, Host, InitialState, ShowOptional,
    SkipReason, SyncConfig, bind_all, initialize, test_support::run_local_test,
};

const SHOW: &str = "data-show-optional";
const INPUT: &str = "input";

fn flag(doc: &Document, t: ElementId) -> Option<String> {
    doc.attribute(&t, SHOW)
}

fn flags(doc: &Document, tables: &[ElementId]) -> Vec<Option<String>> {
    tables.iter().map(|t| flag(doc, *t)).collect()
}

#[test]
fn apply_is_idempotent() {
    let doc = Document::new();
    let c = doc.add_control(Some("g"), true);
    let tables = [
        doc.add_table(Some("g"), ShowOptional::Unset),
        doc.add_table(Some("g"), ShowOptional::Hidden),
    ];
    let cfg = SyncConfig::default();
    let binding = GroupBinding::new(&doc, &c, GroupKey::new("g"), tables.to_vec(), &cfg);

    binding.apply();
    let once = flags(&doc, &tables);
    binding.apply();
    assert_eq!(flags(&doc, &tables), once);
    assert_eq!(once, vec![Some("1".to_string()), Some("1".to_string())]);
}

#[test]
fn toggling_one_group_leaves_others_alone() {
    let doc = Document::new();
    let a = doc.add_control(Some("A"), false);
    let _b = doc.add_control(Some("B"), true);
    let ta = doc.add_table(Some("A"), ShowOptional::Unset);
    let tb = doc.add_table(Some("B"), ShowOptional::Unset);
    bind_all(&doc, &SyncConfig::default());
    assert_eq!(flag(&doc, tb).as_deref(), Some("1"));

    for selected in [true, false, true] {
        doc.toggle(a, selected, INPUT).unwrap();
        assert_eq!(flag(&doc, tb).as_deref(), Some("1"));
    }
    assert_eq!(flag(&doc, ta).as_deref(), Some("1"));
}

#[test]
fn explicit_table_state_takes_precedence() {
    let doc = Document::new();
    let c = doc.add_control(Some("g"), false);
    let t1 = doc.add_table(Some("g"), ShowOptional::Shown);
    let t2 = doc.add_table(Some("g"), ShowOptional::Unset);

    let report = bind_all(&doc, &SyncConfig::default());
    assert_eq!(
        report.outcomes,
        vec![BindOutcome::Bound {
            group: GroupKey::new("g"),
            tables: 2,
            source: InitialState::Tables {
                index: 0,
                shown: true
            },
        }]
    );
    assert!(doc.selected(&c));
    assert_eq!(flags(&doc, &[t1, t2]), vec![Some("1".to_string()); 2]);
}

#[test]
fn control_state_is_the_default() {
    let doc = Document::new();
    let c = doc.add_control(Some("g"), true);
    let tables: Vec<_> = (0..3)
        .map(|_| doc.add_table(Some("g"), ShowOptional::Unset))
        .collect();

    let report = bind_all(&doc, &SyncConfig::default());
    assert!(matches!(
        report.outcomes[0],
        BindOutcome::Bound {
            source: InitialState::Control { selected: true },
            ..
        }
    ));
    assert!(doc.selected(&c));
    assert_eq!(flags(&doc, &tables), vec![Some("1".to_string()); 3]);
}

#[test]
fn every_table_in_the_group_matches_after_apply() {
    let doc = Document::new();
    let c = doc.add_control(Some("g"), false);
    let initial = [
        ShowOptional::Unset,
        ShowOptional::Hidden,
        ShowOptional::Shown,
        ShowOptional::Unset,
        ShowOptional::Shown,
    ];
    let tables: Vec<_> = initial
        .iter()
        .map(|s| doc.add_table(Some("g"), *s))
        .collect();
    bind_all(&doc, &SyncConfig::default());
    assert_eq!(flags(&doc, &tables), vec![Some("0".to_string()); 5]);

    for selected in [true, false, true] {
        doc.toggle(c, selected, INPUT).unwrap();
        let want = ShowOptional::from_selected(selected).as_attr().map(String::from);
        assert_eq!(flags(&doc, &tables), vec![want; 5]);
    }
}

#[test]
fn control_without_group_changes_nothing() {
    let doc = Document::new();
    let c = doc.add_control(None, true);
    let t1 = doc.add_table(Some("g"), ShowOptional::Hidden);
    let t2 = doc.add_table(None, ShowOptional::Unset);
    let before = doc.snapshot();

    let report = bind_all(&doc, &SyncConfig::default());
    assert!(report.outcomes.is_empty());
    assert_eq!(doc.snapshot(), before);

    let outcome = column_sync::bind_control(&doc, &c, &SyncConfig::default());
    assert_eq!(
        outcome,
        BindOutcome::Skipped {
            reason: SkipReason::NoGroup
        }
    );
    assert_eq!(doc.snapshot(), before);
    assert_eq!(flag(&doc, t1).as_deref(), Some("0"));
    assert_eq!(flag(&doc, t2), None);
}

#[test]
fn empty_group_matches_only_empty_group() {
    let doc = Document::new();
    let c = doc.add_control(Some(""), true);
    let empty = doc.add_table(Some(""), ShowOptional::Unset);
    let named = doc.add_table(Some("g"), ShowOptional::Unset);
    let bare = doc.add_table(None, ShowOptional::Unset);

    let report = bind_all(&doc, &SyncConfig::default());
    assert_eq!(report.bound(), 1);
    assert!(doc.selected(&c));
    assert_eq!(flag(&doc, empty).as_deref(), Some("1"));
    assert_eq!(flag(&doc, named), None);
    assert_eq!(flag(&doc, bare), None);
}

#[test]
fn shared_group_last_change_wins() {
    let doc = Document::new();
    let first = doc.add_control(Some("g"), true);
    let second = doc.add_control(Some("g"), false);
    let t = doc.add_table(Some("g"), ShowOptional::Unset);

    let report = bind_all(&doc, &SyncConfig::default());
    assert_eq!(report.bound(), 2);
    // The second control adopts the flag the first one broadcast.
    assert!(doc.selected(&second));
    assert_eq!(flag(&doc, t).as_deref(), Some("1"));

    doc.toggle(second, false, INPUT).unwrap();
    assert_eq!(flag(&doc, t).as_deref(), Some("0"));
    doc.toggle(first, true, INPUT).unwrap();
    assert_eq!(flag(&doc, t).as_deref(), Some("1"));
}

#[test]
fn initialize_twice_binds_twice() {
    run_local_test(async {
        let doc = Document::new();
        let c = doc.add_control(Some("g"), false);
        doc.add_table(Some("g"), ShowOptional::Unset);
        let cfg = SyncConfig::default();

        initialize(&doc, &cfg).await;
        initialize(&doc, &cfg).await;
        assert_eq!(doc.listener_count(c, INPUT), 2);
        assert_eq!(doc.toggle(c, true, INPUT).unwrap(), 2);
    });
}
