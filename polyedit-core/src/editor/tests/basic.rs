use super::super::*;
use test_log::test;

fn square() -> Polygon {
    Polygon::try_from(vec![0., 0., 10., 0., 10., 10., 0., 10.]).unwrap()
}

#[test]
fn test_accessors() {
    let s = square();
    assert_eq!(s.len(), 8);
    assert_eq!(s.num_vertices(), 4);
    assert!(!s.is_empty());
    assert_eq!(s.vertex(4).unwrap(), R2::new(10., 10.));
    assert_eq!(s.offsets().collect::<Vec<_>>(), vec![0, 2, 4, 6]);
    assert_eq!(
        s.vertices().collect::<Vec<_>>(),
        vec![R2::new(0., 0.), R2::new(10., 0.), R2::new(10., 10.), R2::new(0., 10.)],
    );
}

#[test]
fn test_edges_wrap() {
    let s = square();
    let edges: Vec<_> = s.edges().collect();
    assert_eq!(edges.len(), 4);
    assert_eq!(edges[3], (6, R2::new(0., 10.), R2::new(0., 0.)));

    // A lone vertex closes on itself
    let p = Polygon::try_from(vec![3., 4.]).unwrap();
    assert_eq!(p.edges().collect::<Vec<_>>(), vec![(0, R2::new(3., 4.), R2::new(3., 4.))]);

    assert_eq!(Polygon::new().edges().count(), 0);
}

#[test]
fn test_remove_restores_square() {
    let mut p = Polygon::try_from(vec![0., 0., 5., 0., 10., 0., 10., 10., 0., 10.]).unwrap();
    p.remove_vertex(2).unwrap();
    assert_eq!(p, square());
}

#[test]
fn test_remove_last_vertices() {
    let mut p = square();
    p.remove_vertex(6).unwrap();
    p.remove_vertex(0).unwrap();
    assert_eq!(p.points(), &[10., 0., 10., 10.]);
    p.remove_vertex(0).unwrap();
    p.remove_vertex(0).unwrap();
    assert!(p.is_empty());
}

#[test]
fn test_invalid_index() {
    let mut p = square();
    for index in [1, 3, 8, 10, 100] {
        assert_eq!(
            p.remove_vertex(index),
            Err(EditError::InvalidIndex { index, len: 8 }),
        );
        assert_eq!(
            p.move_vertex(index, 1., 1.),
            Err(EditError::InvalidIndex { index, len: 8 }),
        );
        assert!(p.vertex(index).is_err());
    }
    // Untouched by the rejected operations
    assert_eq!(p, square());

    let mut empty = Polygon::new();
    assert_eq!(
        empty.remove_vertex(0),
        Err(EditError::InvalidIndex { index: 0, len: 0 }),
    );
}

#[test]
fn test_move_vertex() {
    let mut p = square();
    p.move_vertex(4, 12., 11.).unwrap();
    assert_eq!(p.points(), &[0., 0., 10., 0., 12., 11., 0., 10.]);
}

#[test]
fn test_points_mut() {
    let mut p = square();
    p.points_mut()[1] = -1.;
    assert_eq!(p.vertex(0).unwrap(), R2::new(0., -1.));
    assert_eq!(p.len(), 8);
}

#[test]
fn test_clear() {
    let mut p = square();
    p.clear();
    assert!(p.is_empty());
    assert_eq!(p.num_vertices(), 0);
}

#[test]
fn test_odd_length_rejected() {
    assert!(matches!(
        Polygon::try_from(vec![0., 0., 1.]),
        Err(EditError::Parse(_)),
    ));
}

#[test]
fn test_free_functions_on_vec() {
    let mut points = vec![0., 0., 10., 0., 10., 10.];
    assert_eq!(insert_vertex(&mut points, 5., -1.), 2);
    move_vertex(&mut points, 2, 5., 0.).unwrap();
    assert_eq!(points, vec![0., 0., 5., 0., 10., 0., 10., 10.]);
    remove_vertex(&mut points, 0).unwrap();
    assert_eq!(points, vec![5., 0., 10., 0., 10., 10.]);
    clear(&mut points);
    assert!(points.is_empty());
}

#[test]
fn test_from_vertices() {
    let p: Polygon = [R2::new(1., 2.), R2::new(3., 4.)].into_iter().collect();
    assert_eq!(p.points(), &[1., 2., 3., 4.]);
}

#[test]
fn test_display() {
    let p = Polygon::try_from(vec![0., 0., 1.5, 2.]).unwrap();
    assert_eq!(format!("{}", p), "Polygon[(0.000, 0.000), (1.500, 2.000)]");
}
