//! Integration tests for building meshes from core descriptions

use ndiff_mesh::{
    BoundaryCondition, CoreGeometry, Direction, Error, Lattice, MapEntry, MeshMap, Node,
    NodeIndex, Pipe, PipeNode, Stack,
};
use ndiff_xs::{CrossSectionSet, Mixture, Mixtures};
use rstest::{fixture, rstest};

const VACUUM: BoundaryCondition = BoundaryCondition::Vacuum;
const REFLECTIVE: BoundaryCondition = BoundaryCondition::Reflective;

fn xs() -> CrossSectionSet {
    CrossSectionSet {
        sigt: vec![0.3],
        sigp: vec![0.05],
        chi: vec![1.0],
        sigs: vec![],
        sign2n: vec![],
    }
}

fn stack(id: &str, mixtures: &[&str], pipes: &[&str], pipe_nodes: &[usize]) -> Stack {
    Stack {
        id: id.to_string(),
        mixtures: mixtures.iter().map(|m| m.to_string()).collect(),
        pipes: pipes.iter().map(|p| p.to_string()).collect(),
        pipe_nodes: pipe_nodes.to_vec(),
    }
}

fn pipe(id: &str, length: f64, nodes: usize) -> Pipe {
    Pipe {
        id: id.to_string(),
        length,
        nodes,
    }
}

#[fixture]
fn mixtures() -> Mixtures {
    Mixtures::new(vec![Mixture::new("fuel", xs()), Mixture::new("water", xs())]).unwrap()
}

/// Two-layer square core with a reflective corner
#[fixture]
fn square() -> CoreGeometry {
    CoreGeometry {
        lattice: Lattice::Square,
        pitch: 0.2,
        bottom: VACUUM,
        top: REFLECTIVE,
        core_map: vec![
            vec!["fa".into(), "fb".into()],
            vec!["fa".into(), REFLECTIVE.into()],
        ],
        stacks: vec![
            stack("fa", &["water", "fuel"], &["p1", "p1"], &[1, 2]),
            stack("fb", &["fuel", "fuel"], &["p1", "p1"], &[1, 2]),
        ],
        pipes: vec![pipe("p1", 0.5, 2)],
    }
}

/// Single-layer 3x3 hexagonal core made of one stack
#[fixture]
fn hex() -> CoreGeometry {
    CoreGeometry {
        lattice: Lattice::Hex,
        pitch: 0.2,
        bottom: REFLECTIVE,
        top: REFLECTIVE,
        core_map: vec![vec!["fa".into(); 3]; 3],
        stacks: vec![stack("fa", &["fuel"], &["p1"], &[1])],
        pipes: vec![pipe("p1", 1.0, 1)],
    }
}

#[rstest]
fn square_layout(square: CoreGeometry, mixtures: Mixtures) {
    let mesh = MeshMap::build(&square, &mixtures).unwrap();
    assert_eq!((mesh.nz, mesh.ny, mesh.nx), (4, 2, 2));
    assert_eq!(mesh.n_nodes(), 16);
    assert_eq!(mesh.pitch, 20.0);

    // boundary layers everywhere, including under boundary positions
    assert!((0..2)
        .flat_map(|iy| (0..2).map(move |ix| (iy, ix)))
        .all(|(iy, ix)| mesh.node(NodeIndex::new(0, iy, ix)) == Node::Vacuum
            && mesh.node(NodeIndex::new(3, iy, ix)) == Node::Reflective));

    assert_eq!(mesh.node(NodeIndex::new(1, 0, 0)), Node::Mixture(1));
    assert_eq!(mesh.node(NodeIndex::new(2, 0, 0)), Node::Mixture(0));
    assert_eq!(mesh.node(NodeIndex::new(1, 0, 1)), Node::Mixture(0));
    assert_eq!(mesh.node(NodeIndex::new(1, 1, 1)), Node::Reflective);
    assert_eq!(mesh.node(NodeIndex::new(2, 1, 1)), Node::Reflective);

    assert_eq!(
        mesh.pipe_node(NodeIndex::new(2, 1, 0)),
        Some(PipeNode { pipe: 0, node: 2 })
    );
    assert_eq!(mesh.pipe_node(NodeIndex::new(0, 1, 0)), None);
    assert_eq!(mesh.material_nodes().count(), 6);
}

#[rstest]
fn codes_follow_flat_order(square: CoreGeometry, mixtures: Mixtures) {
    let mesh = MeshMap::build(&square, &mixtures).unwrap();
    let codes = mesh.codes();
    assert_eq!(&codes[0..4], &[-1, -1, -1, -1]);
    assert_eq!(&codes[4..8], &[1, 0, 1, -2]);
    assert_eq!(&codes[8..12], &[0, 0, 0, -2]);
    assert_eq!(&codes[12..16], &[-2, -2, -2, -2]);
}

#[rstest]
fn layer_thickness_from_pipes(square: CoreGeometry, mixtures: Mixtures) {
    let mesh = MeshMap::build(&square, &mixtures).unwrap();
    assert_eq!(mesh.layer_thicknesses(), &[0.25, 0.25]);
    assert_eq!(mesh.layer_thickness_cm(1), 25.0);
    assert_eq!(mesh.side_area_over_volume(), 0.05);
}

#[rstest]
fn unused_stacks_are_not_resolved(mut square: CoreGeometry, mixtures: Mixtures) {
    square
        .stacks
        .push(stack("spare", &["unknown", "fuel"], &["p1", "p1"], &[1, 2]));
    assert!(MeshMap::build(&square, &mixtures).is_ok());
}

#[rstest]
fn square_neighbours(square: CoreGeometry, mixtures: Mixtures) {
    let mesh = MeshMap::build(&square, &mixtures).unwrap();
    let neighbours = mesh.neighbours(NodeIndex::new(1, 0, 1));

    let directions: Vec<Direction> = neighbours.iter().map(|n| n.direction).collect();
    assert_eq!(
        directions,
        vec![
            Direction::Bottom,
            Direction::Top,
            Direction::West,
            Direction::East,
            Direction::North,
            Direction::South,
        ]
    );

    assert_eq!(neighbours[0].node, Node::Vacuum);
    assert_eq!(neighbours[1].node, Node::Mixture(0));
    assert_eq!(neighbours[2].index, Some(NodeIndex::new(1, 0, 0)));
    assert_eq!(neighbours[3].index, None);
    assert_eq!(neighbours[3].node, Node::Reflective);
    assert_eq!(neighbours[4].index, None);
    assert_eq!(neighbours[5].node, Node::Reflective);
    assert_eq!(neighbours[5].index, Some(NodeIndex::new(1, 1, 1)));
}

#[rstest]
#[case(1, vec![(1, 0), (1, 2), (0, 0), (0, 1), (2, 0), (2, 1)])] // odd row
#[case(2, vec![(2, 0), (2, 2), (1, 1), (1, 2), (3, 1), (3, 2)])] // even row
fn hex_neighbours(
    mut hex: CoreGeometry,
    mixtures: Mixtures,
    #[case] iy: usize,
    #[case] expected: Vec<(usize, usize)>,
) {
    hex.core_map = vec![vec!["fa".into(); 3]; 4];
    let mesh = MeshMap::build(&hex, &mixtures).unwrap();

    let found: Vec<(usize, usize)> = mesh
        .neighbours(NodeIndex::new(1, iy, 1))
        .iter()
        .skip(2)
        .map(|n| n.index.map(|i| (i.iy, i.ix)).unwrap())
        .collect();

    assert_eq!(found, expected);
}

#[rstest]
fn hex_centre_neighbours(hex: CoreGeometry, mixtures: Mixtures) {
    let mesh = MeshMap::build(&hex, &mixtures).unwrap();
    let neighbours = mesh.neighbours(NodeIndex::new(1, 1, 1));
    assert_eq!(neighbours.len(), 8);

    let lateral: Vec<(Direction, usize, usize)> = neighbours
        .iter()
        .skip(2)
        .filter_map(|n| n.index.map(|i| (n.direction, i.iy, i.ix)))
        .collect();
    assert_eq!(
        lateral,
        vec![
            (Direction::West, 1, 0),
            (Direction::East, 1, 2),
            (Direction::NorthWest, 0, 0),
            (Direction::NorthEast, 0, 1),
            (Direction::SouthWest, 2, 0),
            (Direction::SouthEast, 2, 1),
        ]
    );
    assert!(neighbours.iter().skip(2).all(|n| n.node == Node::Mixture(0)));
}

#[rstest]
fn hex_corner_neighbours(hex: CoreGeometry, mixtures: Mixtures) {
    let mesh = MeshMap::build(&hex, &mixtures).unwrap();
    let neighbours = mesh.neighbours(NodeIndex::new(1, 0, 0));
    assert_eq!(neighbours.len(), 8);

    // only east, south-west and south-east exist from the top-left corner
    let inside: Vec<Direction> = neighbours
        .iter()
        .filter(|n| n.index.is_some() && !n.direction.is_axial())
        .map(|n| n.direction)
        .collect();
    assert_eq!(
        inside,
        vec![Direction::East, Direction::SouthWest, Direction::SouthEast]
    );
}

#[rstest]
fn parse_legacy_card_names(mixtures: Mixtures) {
    let text = r#"{
        "geom": "hex",
        "pitch": 0.2,
        "botBC": 0,
        "topBC": 1,
        "coremap": [[1, "fa"], ["fa", 0]],
        "stack": [{"stackid": "fa", "mixid": ["fuel"], "pipeid": ["p1"], "pipenode": [1]}],
        "pipe": [{"id": "p1", "len": 0.1, "nnodes": 1}]
    }"#;

    let geometry: CoreGeometry = serde_json::from_str(text).unwrap();
    assert_eq!(geometry.lattice, Lattice::Hex);
    assert_eq!(geometry.bottom, VACUUM);
    assert_eq!(geometry.core_map[0][0], MapEntry::Boundary(REFLECTIVE));
    assert_eq!(geometry.pipes[0].node_length(), 0.1);

    let mesh = MeshMap::build(&geometry, &mixtures).unwrap();
    assert_eq!(mesh.codes(), vec![-1, -1, -1, -1, -2, 0, 0, -1, -2, -2, -2, -2]);
}

#[rstest]
fn reject_unknown_selector() {
    let result: Result<MapEntry, _> = serde_json::from_str("2");
    assert!(result.is_err());
}

#[rstest]
fn reject_no_stacks(mut square: CoreGeometry, mixtures: Mixtures) {
    square.stacks.clear();
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(result, Err(Error::NoStacks)));
}

#[rstest]
fn reject_empty_stack(mut square: CoreGeometry, mixtures: Mixtures) {
    square.stacks = vec![stack("fa", &[], &[], &[])];
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(result, Err(Error::NoAxialLayers(id)) if id == "fa"));
}

#[rstest]
fn reject_uneven_stacks(mut square: CoreGeometry, mixtures: Mixtures) {
    square.stacks[1] = stack("fb", &["fuel"], &["p1"], &[1]);
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(
        result,
        Err(Error::InconsistentStackHeight { expected: 2, found: 1, .. })
    ));
}

#[rstest]
fn reject_ragged_stack_lists(mut square: CoreGeometry, mixtures: Mixtures) {
    square.stacks[0].pipe_nodes.pop();
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(result, Err(Error::InconsistentStackLists(id)) if id == "fa"));
}

#[rstest]
fn reject_duplicate_stacks(mut square: CoreGeometry, mixtures: Mixtures) {
    square.stacks[1].id = "fa".to_string();
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(result, Err(Error::DuplicateStack(id)) if id == "fa"));
}

#[rstest]
#[case(0.0, 2)] // case 1
#[case(-1.0, 2)] // case 2
#[case(0.5, 0)] // case 3
fn reject_invalid_pipes(
    mut square: CoreGeometry,
    mixtures: Mixtures,
    #[case] length: f64,
    #[case] nodes: usize,
) {
    square.pipes = vec![pipe("p1", length, nodes)];
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(result, Err(Error::InvalidPipe(id)) if id == "p1"));
}

#[rstest]
fn reject_empty_core_map(mut square: CoreGeometry, mixtures: Mixtures) {
    square.core_map.clear();
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(result, Err(Error::EmptyCoreMap)));
}

#[rstest]
fn reject_ragged_core_map(mut square: CoreGeometry, mixtures: Mixtures) {
    square.core_map[1].push(VACUUM.into());
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(
        result,
        Err(Error::NonSquareCoreMap { row: 1, expected: 2, found: 3 })
    ));
}

#[rstest]
#[case(0.0)] // case 1
#[case(-0.2)] // case 2
#[case(f64::NAN)] // case 3
fn reject_invalid_pitch(mut square: CoreGeometry, mixtures: Mixtures, #[case] pitch: f64) {
    square.pitch = pitch;
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(result, Err(Error::InvalidPitch(_))));
}

#[rstest]
fn reject_boundary_only_core_map(mut square: CoreGeometry, mixtures: Mixtures) {
    square.core_map = vec![vec![VACUUM.into(), REFLECTIVE.into()]];
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(result, Err(Error::NoStacksInCoreMap)));
}

#[rstest]
fn reject_unknown_stack(mut square: CoreGeometry, mixtures: Mixtures) {
    square.core_map[1][1] = "fc".into();
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(result, Err(Error::UnknownStack(id)) if id == "fc"));
}

#[rstest]
fn reject_unknown_mixture(mut square: CoreGeometry, mixtures: Mixtures) {
    square.stacks[1].mixtures[1] = "steel".to_string();
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(
        result,
        Err(Error::UnknownMixture { stack, mixture }) if stack == "fb" && mixture == "steel"
    ));
}

#[rstest]
fn reject_unknown_pipe(mut square: CoreGeometry, mixtures: Mixtures) {
    square.stacks[0].pipes[0] = "p2".to_string();
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(result, Err(Error::UnknownPipe { pipe, .. }) if pipe == "p2"));
}

#[rstest]
#[case(0)] // case 1
#[case(3)] // case 2
fn reject_pipe_node_out_of_range(
    mut square: CoreGeometry,
    mixtures: Mixtures,
    #[case] node: usize,
) {
    square.stacks[0].pipe_nodes[0] = node;
    let result = MeshMap::build(&square, &mixtures);
    assert!(matches!(
        result,
        Err(Error::PipeNodeOutOfRange { nodes: 2, .. })
    ));
}
