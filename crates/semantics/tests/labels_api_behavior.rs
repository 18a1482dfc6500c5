//! LabelsAPI behavior: application, taxonomy discovery, interval unions.

use stagegraph_core::{Interval, Prim, PrimPath, Stage, Token, TokenArray};
use stagegraph_semantics::{LabelsAPI, SemanticsError};

fn tokens(names: &[&str]) -> TokenArray {
    names.iter().map(|n| Token::new(n)).collect()
}

fn taxonomy_names(taxonomies: &[Token]) -> Vec<&'static str> {
    taxonomies.iter().map(Token::as_str).collect()
}

fn define(stage: &Stage, path: &str) -> Prim {
    stage.define_prim(PrimPath::parse(path).unwrap()).unwrap()
}

mod pseudo_root {
    use super::*;

    #[test]
    fn compute_over_interval_errors() {
        let stage = Stage::in_memory();
        let schema = LabelsAPI::new(stage.pseudo_root(), Token::new("category"));
        assert!(matches!(
            schema.compute_over_interval(&Interval::closed(0.0, 100.0)),
            Err(SemanticsError::UnappliedSchema { .. })
        ));
    }

    #[test]
    fn has_no_taxonomies() {
        let stage = Stage::in_memory();
        let root = stage.pseudo_root();
        assert!(LabelsAPI::direct_taxonomies(&root).is_empty());
        assert!(LabelsAPI::inherited_taxonomies(&root).is_empty());
    }

    #[test]
    fn apply_is_rejected() {
        let stage = Stage::in_memory();
        assert!(matches!(
            LabelsAPI::apply(&stage.pseudo_root(), Token::new("style")),
            Err(SemanticsError::PseudoRoot)
        ));
    }
}

mod unapplied {
    use super::*;

    #[test]
    fn compute_over_interval_errors() {
        let stage = Stage::in_memory();
        let prim = define(&stage, "/Bookcase");
        let schema = LabelsAPI::new(prim, Token::new("style"));
        assert!(!schema.is_applied());
        assert!(matches!(
            schema.compute_over_interval(&Interval::closed(0.0, 100.0)),
            Err(SemanticsError::UnappliedSchema { .. })
        ));
    }

    #[test]
    fn has_no_taxonomies() {
        let stage = Stage::in_memory();
        let prim = define(&stage, "/Bookcase");
        assert!(LabelsAPI::direct_taxonomies(&prim).is_empty());
        assert!(LabelsAPI::inherited_taxonomies(&prim).is_empty());
    }
}

mod apply_validation {
    use super::*;

    #[test]
    fn rejects_bad_instance_names() {
        let stage = Stage::in_memory();
        let prim = define(&stage, "/Bookcase");
        assert!(matches!(
            LabelsAPI::apply(&prim, Token::empty()),
            Err(SemanticsError::EmptyTaxonomy)
        ));
        assert!(matches!(
            LabelsAPI::apply(&prim, Token::new("not a name")),
            Err(SemanticsError::InvalidTaxonomy(_))
        ));
    }

    #[test]
    fn apply_records_the_schema_instance() {
        let stage = Stage::in_memory();
        let prim = define(&stage, "/Bookcase");
        let schema = LabelsAPI::apply(&prim, Token::new("style")).unwrap();
        assert!(schema.is_applied());
        assert!(prim.has_api_schema(
            Token::new("SemanticsLabelsAPI"),
            Token::new("style")
        ));
        // Re-applying is a no-op.
        LabelsAPI::apply(&prim, Token::new("style")).unwrap();
        assert_eq!(taxonomy_names(&LabelsAPI::direct_taxonomies(&prim)), ["style"]);
    }
}

mod directly_applied {
    use super::*;

    fn setup() -> (Stage, Prim, LabelsAPI) {
        let stage = Stage::in_memory();
        let prim = define(&stage, "/Bookcase");
        let schema = LabelsAPI::apply(&prim, Token::new("style")).unwrap();
        schema
            .create_labels_attr(tokens(&["mid_century", "walnut"]))
            .unwrap();
        assert!(!schema.labels_attr().value_might_be_time_varying());
        (stage, prim, schema)
    }

    #[test]
    fn taxonomies_report_the_application() {
        let (_stage, prim, _schema) = setup();
        assert_eq!(taxonomy_names(&LabelsAPI::direct_taxonomies(&prim)), ["style"]);
        assert_eq!(
            taxonomy_names(&LabelsAPI::inherited_taxonomies(&prim)),
            ["style"]
        );
        assert!(LabelsAPI::ancestor_taxonomies(&prim).is_empty());
    }

    #[test]
    fn interval_union_falls_back_to_the_default() {
        let (_stage, _prim, schema) = setup();
        assert_eq!(
            schema
                .compute_over_interval(&Interval::closed(0.0, 100.0))
                .unwrap(),
            tokens(&["mid_century", "walnut"])
        );
    }

    #[test]
    fn empty_interval_errors() {
        let (_stage, _prim, schema) = setup();
        assert!(matches!(
            schema.compute_over_interval(&Interval::empty()),
            Err(SemanticsError::EmptyInterval(_))
        ));
    }
}

mod time_sampled {
    use super::*;

    // Samples at 0, 100, and 150; held interpolation between them.
    fn setup() -> (Stage, LabelsAPI) {
        let stage = Stage::in_memory();
        let prim = define(&stage, "/Lamp");
        let schema = LabelsAPI::apply(&prim, Token::new("category")).unwrap();
        let attr = schema.labels_attr();
        attr.set_at_time(tokens(&["table_lamp"]), 0.0).unwrap();
        attr.set_at_time(tokens(&["desk_lamp"]), 100.0).unwrap();
        attr.set_at_time(tokens(&["floor_lamp", "sconce"]), 150.0)
            .unwrap();
        (stage, schema)
    }

    #[test]
    fn before_the_first_sample_the_first_sample_holds() {
        let (_stage, schema) = setup();
        let interval = Interval::closed(-100.0, -50.0);
        assert!(
            schema
                .labels_attr()
                .time_samples_in_interval(&interval)
                .is_empty()
        );
        assert_eq!(
            schema.compute_over_interval(&interval).unwrap(),
            tokens(&["table_lamp"])
        );
    }

    #[test]
    fn after_the_last_sample_the_last_sample_holds() {
        let (_stage, schema) = setup();
        let interval = Interval::closed(200.0, 250.0);
        assert!(
            schema
                .labels_attr()
                .time_samples_in_interval(&interval)
                .is_empty()
        );
        assert_eq!(
            schema.compute_over_interval(&interval).unwrap(),
            tokens(&["floor_lamp", "sconce"])
        );
    }

    #[test]
    fn spanning_the_last_sample_unions_both_values() {
        let (_stage, schema) = setup();
        let interval = Interval::closed(125.0, 300.0);
        assert_eq!(
            schema.labels_attr().time_samples_in_interval(&interval),
            vec![150.0]
        );
        assert_eq!(
            schema.compute_over_interval(&interval).unwrap(),
            tokens(&["desk_lamp", "floor_lamp", "sconce"])
        );
    }

    #[test]
    fn finite_open_minimum_matches_the_closed_minimum() {
        let (_stage, schema) = setup();
        // Held interpolation: there is no value "just after" 0.0 distinct
        // from the value at 0.0, so open and closed minimums agree.
        let open_min = Interval::new(0.0, 50.0, false, true);
        let closed_min = Interval::closed(0.0, 50.0);
        let from_open = schema.compute_over_interval(&open_min).unwrap();
        let from_closed = schema.compute_over_interval(&closed_min).unwrap();
        assert_eq!(from_open, from_closed);
        assert_eq!(from_open, tokens(&["table_lamp"]));
    }

    #[test]
    fn unbounded_minimum_resolves_the_first_sample() {
        let (_stage, schema) = setup();
        let interval = Interval::new(f64::NEG_INFINITY, -50.0, false, true);
        assert!(!interval.is_min_finite());
        assert_eq!(
            schema.compute_over_interval(&interval).unwrap(),
            tokens(&["table_lamp"])
        );
    }

    #[test]
    fn spanning_all_samples_unions_everything() {
        let (_stage, schema) = setup();
        let interval = Interval::closed(-300.0, 300.0);
        assert_eq!(
            schema.labels_attr().time_samples_in_interval(&interval),
            vec![0.0, 100.0, 150.0]
        );
        assert_eq!(
            schema.compute_over_interval(&interval).unwrap(),
            tokens(&["desk_lamp", "floor_lamp", "sconce", "table_lamp"])
        );
    }
}

mod hierarchy {
    use super::*;

    // The grandparent has one taxonomy, the parent another, and the child
    // repeats the grandparent's.
    fn setup() -> (Stage, Prim, Prim, Prim) {
        let stage = Stage::in_memory();
        let grandparent = define(&stage, "/Grandparent");
        let parent = define(&stage, "/Grandparent/Parent");
        let child = define(&stage, "/Grandparent/Parent/Child");
        LabelsAPI::apply(&grandparent, Token::new("style")).unwrap();
        LabelsAPI::apply(&parent, Token::new("category")).unwrap();
        LabelsAPI::apply(&child, Token::new("style")).unwrap();
        (stage, grandparent, parent, child)
    }

    #[test]
    fn direct_taxonomies() {
        let (_stage, grandparent, parent, child) = setup();
        assert_eq!(
            taxonomy_names(&LabelsAPI::direct_taxonomies(&grandparent)),
            ["style"]
        );
        assert_eq!(
            taxonomy_names(&LabelsAPI::direct_taxonomies(&parent)),
            ["category"]
        );
        assert_eq!(
            taxonomy_names(&LabelsAPI::direct_taxonomies(&child)),
            ["style"]
        );
    }

    #[test]
    fn inherited_taxonomies() {
        let (_stage, grandparent, parent, child) = setup();
        assert_eq!(
            taxonomy_names(&LabelsAPI::inherited_taxonomies(&grandparent)),
            ["style"]
        );
        assert_eq!(
            taxonomy_names(&LabelsAPI::inherited_taxonomies(&parent)),
            ["category", "style"]
        );
        assert_eq!(
            taxonomy_names(&LabelsAPI::inherited_taxonomies(&child)),
            ["category", "style"]
        );
    }

    #[test]
    fn ancestor_taxonomies_exclude_the_prim_itself() {
        let (_stage, grandparent, _parent, child) = setup();
        assert!(LabelsAPI::ancestor_taxonomies(&grandparent).is_empty());
        assert_eq!(
            taxonomy_names(&LabelsAPI::ancestor_taxonomies(&child)),
            ["category", "style"]
        );
    }
}
