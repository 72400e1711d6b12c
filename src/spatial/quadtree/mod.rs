pub mod prelude;
pub mod region_quadtree;

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::spatial::quadtree::prelude::*;
    use crate::spatial::quadtree::region_quadtree::*;

    fn window(rng: &mut StdRng) -> Boundary {
        Boundary::new(
            rng.random_range(-50.0..850.0),
            rng.random_range(-50.0..850.0),
            rng.random_range(1.0..300.0),
            rng.random_range(1.0..300.0),
        )
    }

    #[test]
    fn test_moving_window_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(27);
        let params = BoundaryParams { x: 400.0, y: 400.0, h: 800.0, w: 800.0 };
        let mut tree = RegionQuadtree::create(params, 4).unwrap();

        let mut inserted = vec![];
        for _ in 0..2000 {
            let p = Point::new(rng.random_range(-100.0..900.0), rng.random_range(-100.0..900.0));
            let accepted = tree.insert(p);
            assert_eq!(accepted, tree.boundary().contains(&p));
            if accepted {
                inserted.push(p);
            }
        }
        assert_eq!(tree.len(), inserted.len());

        for _ in 0..200 {
            let search = window(&mut rng);

            let mut found = tree.query(&search);
            let mut expected: Vec<_> = inserted
                .iter()
                .copied()
                .filter(|p| search.contains(p))
                .collect();

            let key = |p: &Point| (p.x, p.y);
            found.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap());
            expected.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap());
            assert_eq!(found, expected);
        }
    }

    #[test]
    fn test_every_point_found_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tree = RegionQuadtree::new(Boundary::new(0.0, 0.0, 10.0, 10.0), 2).unwrap();

        let points: Vec<_> = (0..300)
            .map(|_| Point::new(rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0)))
            .collect();
        for p in &points {
            assert!(tree.insert(*p));
        }

        for p in &points {
            let search = Boundary::new(p.x, p.y, 0.0, 0.0);
            let hits = tree.query(&search).into_iter().filter(|q| q == p).count();
            let copies = points.iter().filter(|q| *q == p).count();
            assert_eq!(hits, copies);
        }
    }

    #[test]
    fn test_structure_invariants() {
        let mut rng = StdRng::seed_from_u64(11);
        let capacity = 3;
        let mut tree = RegionQuadtree::new(Boundary::new(0.0, 0.0, 64.0, 64.0), capacity).unwrap();

        for _ in 0..500 {
            tree.insert(Point::new(rng.random_range(-32.0..32.0), rng.random_range(-32.0..32.0)));
        }

        for node in tree.nodes() {
            assert!(node.points.len() <= capacity);
            assert!(node.points.iter().all(|p| node.boundary.contains(p)));

            let children = tree.children(node.id);
            if node.is_leaf {
                assert!(children.is_empty());
                continue;
            }

            // Only full nodes subdivide, and their children split them into equal quarters.
            assert_eq!(node.points.len(), capacity);
            assert_eq!(children.len(), 4);
            for (&child_id, quadrant) in children.iter().zip(Quadrant::ALL) {
                let child = tree.node(child_id).unwrap();
                assert_eq!(*child.boundary, node.boundary.child(quadrant));
                assert_eq!(child.depth, node.depth + 1);
                assert_eq!(child.boundary.w(), node.boundary.w() / 2.0);
                assert_eq!(child.boundary.h(), node.boundary.h() / 2.0);
            }
        }

        let stored: usize = tree.nodes().map(|n| n.points.len()).sum();
        assert_eq!(stored, tree.len());
        assert_eq!(tree.nodes().count(), tree.node_count());
    }

    #[test]
    fn test_edge_placement_is_deterministic() {
        let build = || {
            let mut tree = RegionQuadtree::new(Boundary::new(0.0, 0.0, 8.0, 8.0), 1).unwrap();
            tree.insert(Point::new(3.0, 3.0));
            tree.insert(Point::new(0.0, 2.0));
            tree
        };

        // (0, 2) lies on the SW/SE edge; SW comes first.
        for _ in 0..3 {
            let tree = build();
            let sw = tree.children(tree.root())[2];
            assert_eq!(tree.node(sw).unwrap().points, &[Point::new(0.0, 2.0)]);
        }
    }

    #[test]
    fn test_degenerate_deep_tree() {
        let capacity = 2;
        let root = Boundary::new(0.0, 0.0, 100.0, 100.0);
        let mut tree = RegionQuadtree::new(root, capacity).unwrap();
        let stacked = Point::new(-10.0, 20.0);
        let lone = Point::new(30.0, -30.0);

        for _ in 0..8_000 {
            assert!(tree.insert(stacked));
        }
        assert!(tree.insert(lone));

        assert_eq!(tree.len(), 8_001);
        assert!(tree.depth() >= 3_000);
        assert_eq!(tree.nodes().count(), tree.node_count());

        let stored: usize = tree.nodes().map(|n| n.points.len()).sum();
        assert_eq!(stored, tree.len());

        let everything = tree.query(tree.boundary());
        assert_eq!(everything.len(), 8_001);

        let around_stack = tree.query(&Boundary::new(-10.0, 20.0, 1.0, 1.0));
        assert_eq!(around_stack.len(), 8_000);
        assert!(around_stack.iter().all(|p| *p == stacked));

        assert_eq!(tree.query(&Boundary::new(30.0, -30.0, 1.0, 1.0)), vec![lone]);
    }
}
