//! Tests for partition tree construction, aggregation and traversal

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use quadart::math::{Color, ErrorMetric};
    use quadart::spatial::tree::{build_node, mean_color, region_error};
    use quadart::spatial::{PartitionNode, PartitionTree, Quadrant, Rectangle, Translated};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn noise_image(width: u32, height: u32, seed: u64) -> RgbaImage {
        let mut rng = StdRng::seed_from_u64(seed);
        RgbaImage::from_fn(width, height, |_, _| Rgba(rng.random::<[u8; 4]>()))
    }

    fn assert_tiles(node: &PartitionNode) {
        if node.is_leaf() {
            assert!(node.rect().is_leaf(), "non-leaf rectangle {}", node.rect());
            return;
        }
        let children = node.children();
        assert_eq!(children.len(), 4);
        let area: u64 = children.iter().map(|child| child.rect().area()).sum();
        assert_eq!(area, node.rect().area());
        assert_eq!(
            node.rect().quadrants().map(Vec::from),
            Some(children.iter().map(|child| *child.rect()).collect())
        );
        children.iter().for_each(assert_tiles);
    }

    // Tests child rectangles tile every internal node for many sizes
    // Verified by rounding the left half up instead of down
    #[test]
    fn test_tiling_completeness() {
        for width in 1..=7 {
            for height in 1..=7 {
                let img = noise_image(width, height, u64::from(width * 10 + height));
                let tree = PartitionTree::new(&img).unwrap();
                assert_eq!(tree.width(), width);
                assert_eq!(tree.height(), height);
                assert_tiles(tree.root());
            }
        }
    }

    // Tests 1x5 and 5x1 strips are single childless leaves
    // Verified by changing the leaf rule to width == 1 && height == 1
    #[test]
    fn test_strip_leaves() {
        for (width, height) in [(1, 5), (5, 1)] {
            let img = noise_image(width, height, 7);
            let tree = PartitionTree::new(&img).unwrap();

            assert!(tree.root().is_leaf());
            assert!(tree.root().children().is_empty());
            assert_eq!(tree.node_count(), 1);
            assert_eq!(tree.root().color(), mean_color(&img, tree.root().rect()));
        }
    }

    // Tests a uniform image yields zero error and the same color everywhere
    // Verified by computing internal errors against the first child's color
    #[test]
    fn test_uniform_image_zero_error() {
        let color = [37, 200, 90, 255];
        let img = RgbaImage::from_pixel(9, 6, Rgba(color));
        let tree = PartitionTree::new(&img).unwrap();

        for node in tree.pre_order() {
            assert!(node.error().abs() < f64::EPSILON, "{node}");
            assert_eq!(node.color(), Color::from_rgba8(color));
        }
    }

    // Tests rebuilding from the same source is bit-identical
    // Verified by seeding the builder with a per-run random offset
    #[test]
    fn test_deterministic_rebuild() {
        let img = noise_image(13, 11, 99);
        let first = PartitionTree::new(&img).unwrap();
        let second = PartitionTree::new(&img).unwrap();

        let pairs = first.pre_order().zip(second.pre_order());
        for (a, b) in pairs {
            assert_eq!(a.rect(), b.rect());
            assert_eq!(a.color(), b.color());
            assert_eq!(a.error().to_bits(), b.error().to_bits());
        }
        assert_eq!(first, second);
    }

    // Tests internal colors are the area-weighted mean of the children
    // Verified by averaging children without area weights
    #[test]
    fn test_area_weighted_color() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(2, 1, Rgba([255, 255, 255, 255]));
        let tree = PartitionTree::new(&img).unwrap();
        let root = tree.root();

        // Right-hand quadrants span one black and one white column
        let right = root.child(Quadrant::TopRight).unwrap();
        assert_eq!(*right.rect(), Rectangle::new(1, 0, 2, 1));
        assert_eq!(right.color(), Color::new(32768, 32768, 32768, 65535));

        let expected = (f64::from(u16::MAX) / 3.0).round() as u16;
        assert_eq!(root.color(), Color::new(expected, expected, expected, 65535));
    }

    // Tests node errors come from a full rescan of the node's pixels
    // Verified by using the mean of the children's errors instead
    #[test]
    fn test_error_is_rescanned() {
        let img = noise_image(8, 8, 5);
        let tree = PartitionTree::new(&img).unwrap();

        for node in tree.pre_order() {
            let expected = region_error(&img, node.rect(), node.color(), ErrorMetric::Squared);
            assert_eq!(node.error().to_bits(), expected.to_bits());
        }
    }

    // Tests the checkerboard root has a large error while its leaves are exact
    // Verified by assigning leaf errors from the parent
    #[test]
    fn test_checkerboard_errors() {
        let img = RgbaImage::from_fn(4, 4, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let tree = PartitionTree::new(&img).unwrap();

        assert!(tree.root().error() > 0.5);
        for node in tree.pre_order().filter(|node| node.is_leaf()) {
            assert!(node.error().abs() < f64::EPSILON);
        }
    }

    // Tests the absolute metric scores nodes differently from the squared one
    // Verified by ignoring the metric argument
    #[test]
    fn test_metric_selection() {
        let img = noise_image(4, 4, 3);
        let squared = PartitionTree::with_metric(&img, ErrorMetric::Squared).unwrap();
        let absolute = PartitionTree::with_metric(&img, ErrorMetric::Absolute).unwrap();

        assert_eq!(absolute.metric(), ErrorMetric::Absolute);
        assert_eq!(squared.root().color(), absolute.root().color());
        assert!(absolute.root().error() > squared.root().error());
    }

    // Tests node counts, leaf counts and depth for a 4x4 image
    // Verified by skipping the root in node_count
    #[test]
    fn test_tree_shape() {
        let img = noise_image(4, 4, 1);
        let tree = PartitionTree::new(&img).unwrap();

        assert_eq!(tree.node_count(), 21);
        assert_eq!(tree.leaf_count(), 16);
        assert_eq!(tree.depth(), 3);
    }

    // Tests pre-order and level-order traversal orders
    // Verified by pushing children in forward order onto the pre-order stack
    #[test]
    fn test_traversal_orders() {
        let img = noise_image(4, 4, 2);
        let tree = PartitionTree::new(&img).unwrap();

        let pre: Vec<_> = tree.pre_order().map(|node| *node.rect()).collect();
        assert_eq!(pre.first(), Some(&Rectangle::new(0, 0, 4, 4)));
        assert_eq!(pre.get(1), Some(&Rectangle::new(0, 0, 2, 2)));
        assert_eq!(pre.get(2), Some(&Rectangle::new(0, 0, 1, 1)));
        assert_eq!(pre.get(6), Some(&Rectangle::new(2, 0, 2, 2)));

        let level: Vec<_> = tree.level_order().map(|node| *node.rect()).collect();
        assert_eq!(level.get(1), Some(&Rectangle::new(0, 0, 2, 2)));
        assert_eq!(level.get(2), Some(&Rectangle::new(2, 0, 2, 2)));
        assert_eq!(level.get(5), Some(&Rectangle::new(0, 0, 1, 1)));
        assert_eq!(level.len(), pre.len());
    }

    // Tests a translated source keeps its absolute coordinates in the tree
    // Verified by rebasing the root rectangle to the origin
    #[test]
    fn test_non_zero_origin() {
        let img = noise_image(3, 3, 4);
        let source = Translated::new(img.clone(), [-7, 12]);
        let shifted = PartitionTree::new(&source).unwrap();
        let plain = PartitionTree::new(&img).unwrap();

        assert_eq!(shifted.bounds(), Rectangle::new(-7, 12, 3, 3));
        for (a, b) in shifted.pre_order().zip(plain.pre_order()) {
            assert_eq!(a.rect().x, b.rect().x - 7);
            assert_eq!(a.rect().y, b.rect().y + 12);
            assert_eq!(a.color(), b.color());
            assert_eq!(a.error().to_bits(), b.error().to_bits());
        }
    }

    // Tests an empty image is rejected
    // Verified by removing the empty bounds check
    #[test]
    fn test_empty_source_rejected() {
        let img = RgbaImage::new(0, 4);
        assert!(PartitionTree::new(&img).is_err());
    }

    // Tests building a single node directly over a sub-rectangle
    // Verified by building over the whole source instead of the given rectangle
    #[test]
    fn test_build_node_subregion() {
        let img = noise_image(6, 6, 8);
        let rect = Rectangle::new(2, 2, 3, 3);
        let node = build_node(&img, rect, ErrorMetric::Squared);

        assert_eq!(*node.rect(), rect);
        assert_eq!(node.children().len(), 4);
        assert!(node.to_string().contains("3x3"));
    }
}
