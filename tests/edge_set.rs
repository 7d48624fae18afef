use decremental_conn::EdgeSet;

#[test]
fn test_orientation_is_ignored() {
    let mut s = EdgeSet::new();
    assert!(s.is_empty());
    s.add(3, 1);
    assert!(s.contains(1, 3));
    assert!(s.contains(3, 1));
    s.add(1, 3);
    assert_eq!(s.len(), 1);
    assert!(s.remove(1, 3));
    assert!(!s.contains(3, 1));
    assert!(!s.remove(3, 1));
    assert!(s.is_empty());
}

#[test]
fn test_other_end() {
    let s: EdgeSet = [(5, 2), (2, 7), (9, 2)].into_iter().collect();
    for e in &s {
        assert!(e.0 < e.1);
        let w = EdgeSet::other_end(e, 2);
        assert!([5, 7, 9].contains(&w));
        assert_eq!(EdgeSet::other_end(e, w), 2);
    }
    let mut ns: Vec<_> = s.neighbors(2).collect();
    ns.sort();
    assert_eq!(ns, [5, 7, 9]);
}

#[test]
fn test_move_from() {
    let mut a: EdgeSet = [(0, 1)].into_iter().collect();
    let mut b: EdgeSet = [(1, 2), (1, 3)].into_iter().collect();
    let old = a.move_from(&mut b);
    assert!(b.is_empty());
    assert_eq!(a.len(), 2);
    assert!(a.contains(2, 1) && a.contains(3, 1));
    assert!(!a.contains(0, 1));
    assert!(old.contains(1, 0));
    // Moving an empty set out leaves both empty.
    let old = b.move_from(&mut EdgeSet::new());
    assert!(old.is_empty() && b.is_empty());
}

#[test]
fn test_clear() {
    let mut s: EdgeSet = (1..10).map(|i| (0, i)).collect();
    assert_eq!(s.len(), 9);
    s.clear();
    assert!(s.is_empty());
    assert_eq!(s.iter().count(), 0);
}
