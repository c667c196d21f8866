use rand::{rngs::StdRng, Rng, SeedableRng};

use super::super::*;
use test_log::test;

#[test]
fn test_serialize_format() {
    assert_eq!(serialize(&[]), "[]");
    assert_eq!(serialize(&[0., 0.5, -3., 1e-3]), "[0.0,0.5,-3.0,0.001]");
}

#[test]
fn test_deserialize_integers() {
    assert_eq!(deserialize("[0, 0, 10, 0, 10, 10]").unwrap(), vec![0., 0., 10., 0., 10., 10.]);
    assert_eq!(deserialize(" [ ] ").unwrap(), Vec::<f64>::new());
}

#[test]
fn test_deserialize_errors() {
    for text in [
        "",
        "[1, 2",
        "{\"x\": 1}",
        "3",
        "null",
        "[1, \"2\"]",
        "[1, null]",
        "[[1, 2]]",
        "[1, 2, 3]",
    ] {
        match deserialize(text) {
            Err(EditError::Parse(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected parse error for {:?}, got {:?}", text, other),
        }
    }
}

#[test]
fn test_restore_failure_leaves_polygon() {
    let mut p = Polygon::try_from(vec![1., 2., 3., 4.]).unwrap();
    assert!(p.restore("[5, 6, 7]").is_err());
    assert!(p.restore("not json").is_err());
    assert_eq!(p.points(), &[1., 2., 3., 4.]);

    p.restore("[5, 6]").unwrap();
    assert_eq!(p.points(), &[5., 6.]);
}

#[test]
fn test_move_then_serialize() {
    let mut p = Polygon::try_from(vec![0., 0., 10., 0., 10., 10., 0., 10.]).unwrap();
    p.move_vertex(0, 1., 1.).unwrap();
    let text = p.serialize();
    let mut q = Polygon::new();
    q.restore(&text).unwrap();
    assert_eq!(q.vertex(0).unwrap(), R2::new(1., 1.));
    assert_eq!(&q.points()[2..], &[10., 0., 10., 10., 0., 10.]);
}

#[test]
fn test_round_trip_random() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let n = rng.gen_range(0..20) * 2;
        let points: Vec<f64> = (0..n).map(|_| rng.gen_range(-1e4..1e4)).collect();
        assert_eq!(deserialize(&serialize(&points)).unwrap(), points);
    }
}

#[test]
fn test_serde_polygon() {
    let p = Polygon::try_from(vec![1., 2., 3., 4.]).unwrap();
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "[1.0,2.0,3.0,4.0]");
    let q: Polygon = serde_json::from_str(&json).unwrap();
    assert_eq!(p, q);
    assert!(serde_json::from_str::<Polygon>("[1, 2, 3]").is_err());
}
