//! Integration tests for mixture tables

use ndiff_xs::{CrossSectionSet, Error, Mixture, Mixtures, Transfer};
use rstest::{fixture, rstest};

#[fixture]
fn fuel() -> CrossSectionSet {
    CrossSectionSet {
        sigt: vec![0.25, 0.8],
        sigp: vec![0.008, 0.15],
        chi: vec![1.0, 0.0],
        sigs: vec![Transfer::new(0, 0, 0.2), Transfer::new(0, 1, 0.03)],
        sign2n: vec![],
    }
}

#[rstest]
fn parse_json_table() {
    let text = r#"[
        {
            "id": "fuel",
            "sigt": [0.25, 0.8],
            "sigp": [0.008, 0.15],
            "chi": [1.0, 0.0],
            "sigs": [[[0, 0], 0.2], [[0, 1], 0.03]]
        },
        {
            "id": "reflector",
            "sigt": [0.3, 1.2],
            "sigp": [0.0, 0.0],
            "chi": [1.0, 0.0],
            "sigs": [[[0, 1], 0.05]],
            "sign2n": [[[0, 1], 0.001]]
        }
    ]"#;

    let mixtures: Mixtures = serde_json::from_str(text).unwrap();
    assert_eq!(mixtures.len(), 2);
    assert!(!mixtures.is_empty());
    assert_eq!(mixtures.index_of("reflector"), Some(1));
    assert_eq!(mixtures.id(0), Some("fuel"));
    assert_eq!(mixtures.xs(1).sign2n, vec![Transfer::new(0, 1, 0.001)]);
    assert!(mixtures.xs(0).sign2n.is_empty());
}

#[rstest]
fn reject_duplicate_ids(fuel: CrossSectionSet) {
    let result = Mixtures::new(vec![
        Mixture::new("fuel", fuel.clone()),
        Mixture::new("fuel", fuel),
    ]);
    assert!(matches!(result, Err(Error::DuplicateMixture(id)) if id == "fuel"));
}

#[rstest]
fn reject_empty_table() {
    assert!(matches!(Mixtures::new(vec![]), Err(Error::NoMixtures)));
}

#[rstest]
fn reject_mixed_group_structures(fuel: CrossSectionSet) {
    let one_group = CrossSectionSet {
        sigt: vec![1.0],
        sigp: vec![0.0],
        chi: vec![1.0],
        ..Default::default()
    };
    let result = Mixtures::new(vec![
        Mixture::new("fuel", fuel),
        Mixture::new("void", one_group),
    ]);
    match result {
        Err(Error::InvalidMixture { id, source }) => {
            assert_eq!(id, "void");
            assert!(matches!(*source, Error::GroupMismatch { expected: 2, found: 1, .. }));
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[rstest]
#[case(vec![0.25])] // sigp and chi no longer match
#[case(vec![0.25, -0.8])]
#[case(vec![0.25, f64::NAN])]
fn reject_invalid_totals(fuel: CrossSectionSet, #[case] sigt: Vec<f64>) {
    let xs = CrossSectionSet { sigt, ..fuel };
    let result = Mixtures::new(vec![Mixture::new("fuel", xs)]);
    assert!(matches!(result, Err(Error::InvalidMixture { .. })));
}

#[rstest]
fn replace_keeps_index(fuel: CrossSectionSet) {
    let mut mixtures = Mixtures::new(vec![
        Mixture::new("a", fuel.clone()),
        Mixture::new("b", fuel.clone()),
    ])
    .unwrap();

    let hotter = CrossSectionSet {
        sigp: vec![0.007, 0.14],
        ..fuel.clone()
    };
    assert_eq!(mixtures.replace("b", hotter).unwrap(), 1);
    assert_eq!(mixtures.xs(1).sigp, vec![0.007, 0.14]);
    assert_eq!(mixtures.xs(0).sigp, fuel.sigp);

    assert!(matches!(
        mixtures.replace("c", fuel),
        Err(Error::MixtureNotFound(_))
    ));
}
