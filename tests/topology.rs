mod tests {
    use dodeca_light_engine::topology::{
        EDGES, PIXELS_PER_SOLID, SOLIDS, VERTICES, VertexId, adjacency, edge_info, edges_of,
        find_edge,
    };

    const ALL_VERTICES: [VertexId; VERTICES] = [
        VertexId::A,
        VertexId::B,
        VertexId::C,
        VertexId::D,
        VertexId::E,
        VertexId::F,
        VertexId::G,
        VertexId::H,
        VertexId::I,
        VertexId::J,
        VertexId::K,
        VertexId::L,
        VertexId::M,
        VertexId::N,
    ];

    // Declared degrees of the rhombic dodecahedron, in vertex order.
    const DEGREES: [u8; VERTICES] = [3, 4, 4, 4, 3, 3, 3, 3, 3, 3, 4, 4, 4, 3];

    #[test]
    fn test_adjacency_matches_degree() {
        for (vertex, expected) in ALL_VERTICES.iter().zip(DEGREES) {
            assert_eq!(adjacency(*vertex).len() as u8, expected);
            assert_eq!(vertex.degree(), expected);
        }
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        for vertex in ALL_VERTICES {
            for &neighbor in adjacency(vertex) {
                assert!(
                    adjacency(neighbor).contains(&vertex),
                    "{vertex:?} -> {neighbor:?} has no reverse entry"
                );
            }
        }
    }

    #[test]
    fn test_every_adjacency_entry_has_an_edge() {
        for solid in 0..SOLIDS as u8 {
            for vertex in ALL_VERTICES {
                for &neighbor in adjacency(vertex) {
                    let found = find_edge(solid, vertex, neighbor);
                    assert!(
                        found.is_some(),
                        "no edge between {vertex:?} and {neighbor:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_find_edge_direction_matches_endpoints() {
        use dodeca_light_engine::topology::Direction;

        let (index, direction) = find_edge(0, VertexId::A, VertexId::B).unwrap();
        assert_eq!(index, 0);
        assert_eq!(direction, Direction::AToB);

        let (index, direction) = find_edge(0, VertexId::B, VertexId::A).unwrap();
        assert_eq!(index, 0);
        assert_eq!(direction, Direction::BToA);

        // A and N sit on opposite poles; no edge connects them.
        assert!(find_edge(0, VertexId::A, VertexId::N).is_none());
    }

    #[test]
    fn test_pixel_ranges_tile_each_solid() {
        for solid in 0..SOLIDS as u8 {
            let base = usize::from(solid) * PIXELS_PER_SOLID;
            let mut owners: Vec<Vec<usize>> = vec![Vec::new(); PIXELS_PER_SOLID];

            for (index, edge) in edges_of(solid).iter().enumerate() {
                assert!(edge.pixel_a < edge.pixel_b);
                for pixel in edge.pixel_a..=edge.pixel_b {
                    owners[pixel as usize - base].push(index);
                }
            }

            for (offset, owners) in owners.iter().enumerate() {
                let pixel = (base + offset) as u16;
                match owners.len() {
                    // Full coverage, no gaps.
                    1 => {}
                    // A doubly-owned pixel must be the shared endpoint of
                    // both edges, at a common degree-4 vertex.
                    2 => {
                        let shared: Vec<_> = owners
                            .iter()
                            .map(|&index| {
                                let edge = edge_info(solid, index as u8);
                                if edge.pixel_a == pixel {
                                    edge.a
                                } else {
                                    assert_eq!(edge.pixel_b, pixel);
                                    edge.b
                                }
                            })
                            .collect();
                        assert_eq!(shared[0], shared[1]);
                        assert_eq!(shared[0].degree(), 4);
                    }
                    count => panic!("pixel {pixel} owned by {count} edges"),
                }
            }
        }
    }

    #[test]
    fn test_solids_occupy_disjoint_pixel_banks() {
        for index in 0..EDGES as u8 {
            let first = edge_info(0, index);
            let second = edge_info(1, index);
            assert_eq!(
                usize::from(first.pixel_a) + PIXELS_PER_SOLID,
                usize::from(second.pixel_a)
            );
            assert_eq!(
                usize::from(first.pixel_b) + PIXELS_PER_SOLID,
                usize::from(second.pixel_b)
            );
        }
    }
}
