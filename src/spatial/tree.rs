//! Partition tree construction with bottom-up color and error aggregation
//!
//! Every node stores the flat color that best represents its rectangle and a
//! score describing how badly that color fits the underlying pixels. Leaves
//! average their pixels directly; internal nodes average their children by
//! area and then rescan their whole rectangle to score the result.

use crate::io::error::{ArtError, Result};
use crate::math::{ChannelSums, Color, ErrorMetric};
use crate::spatial::{PixelSource, Quadrant, Rectangle};
use std::collections::VecDeque;
use std::fmt;

/// Region of the image approximated by a single flat color
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionNode {
    rect: Rectangle,
    color: Color,
    error: f64,
    children: Option<Box<[Self; 4]>>,
}

impl PartitionNode {
    /// Covered rectangle
    pub const fn rect(&self) -> &Rectangle {
        &self.rect
    }

    /// Representative flat color
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Mean per-pixel deviation between the flat color and the source
    pub const fn error(&self) -> f64 {
        self.error
    }

    /// True when the node has no children
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Child in the given quadrant, `None` for leaves
    pub fn child(&self, quadrant: Quadrant) -> Option<&Self> {
        self.children
            .as_deref()
            .and_then(|children| children.get(quadrant.index()))
    }

    /// Children in slot order; empty for leaves
    pub fn children(&self) -> &[Self] {
        match &self.children {
            Some(children) => children.as_slice(),
            None => &[],
        }
    }
}

impl fmt::Display for PartitionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} color {} error {:.6}",
            self.rect, self.color, self.error
        )
    }
}

/// Build the node covering `rect`, recursing until the leaf rule holds
pub fn build_node<S: PixelSource + ?Sized>(
    source: &S,
    rect: Rectangle,
    metric: ErrorMetric,
) -> PartitionNode {
    let Some(quadrants) = rect.quadrants() else {
        let color = mean_color(source, &rect);
        return PartitionNode {
            rect,
            color,
            error: region_error(source, &rect, color, metric),
            children: None,
        };
    };

    let children = Box::new(quadrants.map(|quadrant| build_node(source, quadrant, metric)));

    let mut sums = ChannelSums::new();
    for child in children.iter() {
        sums.add(child.color, child.rect.area() as f64);
    }
    let color = sums.mean().unwrap_or_default();

    PartitionNode {
        rect,
        color,
        error: region_error(source, &rect, color, metric),
        children: Some(children),
    }
}

/// Per-channel arithmetic mean of every pixel in `rect`
pub fn mean_color<S: PixelSource + ?Sized>(source: &S, rect: &Rectangle) -> Color {
    let mut sums = ChannelSums::new();
    for (x, y) in rect.pixels() {
        sums.add(source.pixel(x, y), 1.0);
    }
    sums.mean().unwrap_or_default()
}

/// Deviation of every pixel in `rect` from `reference`, averaged by area
pub fn region_error<S: PixelSource + ?Sized>(
    source: &S,
    rect: &Rectangle,
    reference: Color,
    metric: ErrorMetric,
) -> f64 {
    let area = rect.area();
    if area == 0 {
        return 0.0;
    }
    let total: f64 = rect
        .pixels()
        .map(|(x, y)| metric.deviation(source.pixel(x, y), reference))
        .sum();
    total / area as f64
}

/// Quadrant partition of a whole image
///
/// Built once from a pixel source and read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionTree {
    root: PartitionNode,
    metric: ErrorMetric,
}

impl PartitionTree {
    /// Build the tree with the default squared-deviation metric
    ///
    /// # Errors
    ///
    /// Returns an error if the source has an empty bounding box
    pub fn new<S: PixelSource + ?Sized>(source: &S) -> Result<Self> {
        Self::with_metric(source, ErrorMetric::default())
    }

    /// Build the tree scoring nodes with `metric`
    ///
    /// # Errors
    ///
    /// Returns an error if the source has an empty bounding box
    pub fn with_metric<S: PixelSource + ?Sized>(source: &S, metric: ErrorMetric) -> Result<Self> {
        let bounds = source.bounds();
        if bounds.is_empty() {
            return Err(ArtError::InvalidSourceData {
                reason: format!(
                    "image has no pixels ({}x{})",
                    bounds.width, bounds.height
                ),
            });
        }

        Ok(Self {
            root: build_node(source, bounds, metric),
            metric,
        })
    }

    /// Node covering the whole image
    pub const fn root(&self) -> &PartitionNode {
        &self.root
    }

    /// Bounding box of the source image
    pub const fn bounds(&self) -> Rectangle {
        self.root.rect
    }

    /// Image width
    pub const fn width(&self) -> u32 {
        self.root.rect.width
    }

    /// Image height
    pub const fn height(&self) -> u32 {
        self.root.rect.height
    }

    /// Metric used to score nodes
    pub const fn metric(&self) -> ErrorMetric {
        self.metric
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        self.pre_order().count()
    }

    /// Number of leaf nodes
    pub fn leaf_count(&self) -> usize {
        self.pre_order().filter(|node| node.is_leaf()).count()
    }

    /// Number of levels, counting the root as one
    pub fn depth(&self) -> usize {
        fn depth_of(node: &PartitionNode) -> usize {
            1 + node.children().iter().map(depth_of).max().unwrap_or(0)
        }
        depth_of(&self.root)
    }

    /// Depth-first traversal visiting each node before its children
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            stack: vec![&self.root],
        }
    }

    /// Breadth-first traversal, one tree level at a time
    pub fn level_order(&self) -> LevelOrder<'_> {
        LevelOrder {
            queue: VecDeque::from([&self.root]),
        }
    }
}

/// Iterator returned by [`PartitionTree::pre_order`]
pub struct PreOrder<'a> {
    stack: Vec<&'a PartitionNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a PartitionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the top-left child is visited first
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Iterator returned by [`PartitionTree::level_order`]
pub struct LevelOrder<'a> {
    queue: VecDeque<&'a PartitionNode>,
}

impl<'a> Iterator for LevelOrder<'a> {
    type Item = &'a PartitionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children());
        Some(node)
    }
}
