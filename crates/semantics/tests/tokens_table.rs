//! The semantics token table: fixed values, closed enumeration.

use stagegraph_semantics::SEMANTICS_TOKENS;

#[test]
fn accessors_return_table_values() {
    assert_eq!(SEMANTICS_TOKENS.semantics_labels.as_str(), "semanticsLabels");
    assert_eq!(
        SEMANTICS_TOKENS
            .semantics_labels_multiple_apply_template
            .as_str(),
        "semanticsLabels:__INSTANCE_NAME__"
    );
    assert_eq!(
        SEMANTICS_TOKENS.semantics_labels_api.as_str(),
        "SemanticsLabelsAPI"
    );
}

#[test]
fn reads_are_idempotent() {
    let first = SEMANTICS_TOKENS.semantics_labels;
    let second = SEMANTICS_TOKENS.semantics_labels;
    assert_eq!(first, second);
    assert_eq!(first.as_str(), second.as_str());
}

#[test]
fn enumeration_is_closed() {
    let all = SEMANTICS_TOKENS.all();
    assert_eq!(all.len(), 3);

    let names: Vec<_> = all.iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        [
            "semanticsLabels",
            "semanticsLabels_MultipleApplyTemplate_",
            "SemanticsLabelsAPI",
        ]
    );
    for (name, token) in all {
        assert_eq!(SEMANTICS_TOKENS.get(name), Some(token));
    }
    assert_eq!(SEMANTICS_TOKENS.get("notAToken"), None);
    assert_eq!(SEMANTICS_TOKENS.get(""), None);
}

#[test]
fn lookup_matches_field_access() {
    assert_eq!(
        SEMANTICS_TOKENS.get("semanticsLabels"),
        Some(SEMANTICS_TOKENS.semantics_labels)
    );
    assert_eq!(
        SEMANTICS_TOKENS.get("SemanticsLabelsAPI"),
        Some(SEMANTICS_TOKENS.semantics_labels_api)
    );
}
