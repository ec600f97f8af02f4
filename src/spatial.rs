//! Spatial index over a drawing's entities.
//!
//! A binary partition tree built over entity bounding boxes: interior
//! nodes split the item set at the median centroid along the widest axis,
//! leaves hold up to [`SpatialIndexConfig::leaf_capacity`] items. The
//! index is read-only once built; rebuild it after mutating the model.
//!
//! Entities without geometry (text labels, unknown types) are not indexed.

use crate::model::Model;
use crate::types::{BoundingBox3D, Vector3};
use rayon::join;

/// Identifies an entity by its position in [`Model::entities`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

/// Tuning knobs for index construction.
#[derive(Debug, Clone)]
pub struct SpatialIndexConfig {
    /// Maximum items per leaf before a split is attempted.
    pub leaf_capacity: usize,
    /// Hard recursion limit; degenerate inputs bottom out here.
    pub max_depth: usize,
    /// Build subtrees on the rayon pool when the item count warrants it.
    pub parallel: bool,
}

impl Default for SpatialIndexConfig {
    fn default() -> Self {
        Self {
            leaf_capacity: 8,
            max_depth: 24,
            parallel: true,
        }
    }
}

/// Below this many items a subtree is built sequentially.
const PARALLEL_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Item {
    id: EntityId,
    bounds: BoundingBox3D,
    centroid: Vector3,
}

#[derive(Debug)]
enum Node {
    Branch {
        bounds: BoundingBox3D,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        bounds: BoundingBox3D,
        items: Vec<Item>,
    },
}

impl Node {
    fn bounds(&self) -> &BoundingBox3D {
        match self {
            Node::Branch { bounds, .. } => bounds,
            Node::Leaf { bounds, .. } => bounds,
        }
    }
}

/// An immutable spatial index over one snapshot of a model.
#[derive(Debug)]
pub struct SpatialIndex {
    root: Option<Node>,
    size: usize,
}

impl SpatialIndex {
    /// Build an index over every entity of `model` that has bounds.
    pub fn build(model: &Model, config: &SpatialIndexConfig) -> SpatialIndex {
        let items: Vec<Item> = model
            .entities()
            .iter()
            .enumerate()
            .filter_map(|(i, entity)| {
                entity.bounding_box().map(|bounds| Item {
                    id: EntityId(i),
                    bounds,
                    centroid: bounds.center(),
                })
            })
            .collect();
        let size = items.len();
        let root = if items.is_empty() {
            None
        } else {
            Some(build_node(items, 0, config))
        };
        SpatialIndex { root, size }
    }

    /// Number of indexed entities.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Bounds of everything indexed.
    pub fn bounds(&self) -> Option<&BoundingBox3D> {
        self.root.as_ref().map(|n| n.bounds())
    }

    /// All entities whose bounds intersect `query`, in unspecified order.
    pub fn query(&self, query: &BoundingBox3D) -> Vec<EntityId> {
        let mut hits = Vec::new();
        if let Some(root) = &self.root {
            query_node(root, query, &mut hits);
        }
        hits
    }

    /// The entity whose bounds are closest to `point`, by box distance.
    /// Ties resolve to the earlier entity in traversal order.
    pub fn nearest(&self, point: Vector3) -> Option<EntityId> {
        let root = self.root.as_ref()?;
        let mut best: Option<(f64, EntityId)> = None;
        nearest_node(root, point, &mut best);
        best.map(|(_, id)| id)
    }
}

fn union_bounds(items: &[Item]) -> BoundingBox3D {
    let mut bounds = items[0].bounds;
    for item in &items[1..] {
        bounds = bounds.union(&item.bounds);
    }
    bounds
}

fn build_node(mut items: Vec<Item>, depth: usize, config: &SpatialIndexConfig) -> Node {
    let bounds = union_bounds(&items);
    if items.len() <= config.leaf_capacity.max(1) || depth >= config.max_depth {
        return Node::Leaf { bounds, items };
    }

    // Median split on the widest axis of the centroid cloud, so identical
    // boxes still divide evenly.
    let centroid_bounds = {
        let mut b = BoundingBox3D::from_point(items[0].centroid);
        for item in &items[1..] {
            b.expand_to_include(item.centroid);
        }
        b
    };
    let axis = centroid_bounds.longest_axis();
    let mid = items.len() / 2;
    items.select_nth_unstable_by(mid, |a, b| {
        a.centroid.axis(axis).total_cmp(&b.centroid.axis(axis))
    });
    let right_items = items.split_off(mid);
    let left_items = items;

    let (left, right) = if config.parallel && left_items.len() + right_items.len() >= PARALLEL_THRESHOLD
    {
        join(
            || build_node(left_items, depth + 1, config),
            || build_node(right_items, depth + 1, config),
        )
    } else {
        (
            build_node(left_items, depth + 1, config),
            build_node(right_items, depth + 1, config),
        )
    };

    Node::Branch {
        bounds,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn query_node(node: &Node, query: &BoundingBox3D, hits: &mut Vec<EntityId>) {
    if !node.bounds().intersects(query) {
        return;
    }
    match node {
        Node::Leaf { items, .. } => {
            for item in items {
                if item.bounds.intersects(query) {
                    hits.push(item.id);
                }
            }
        }
        Node::Branch { left, right, .. } => {
            query_node(left, query, hits);
            query_node(right, query, hits);
        }
    }
}

fn nearest_node(node: &Node, point: Vector3, best: &mut Option<(f64, EntityId)>) {
    if let Some((best_distance, _)) = best {
        if node.bounds().distance_squared_to(point) > *best_distance {
            return;
        }
    }
    match node {
        Node::Leaf { items, .. } => {
            for item in items {
                let distance = item.bounds.distance_squared_to(point);
                if best.map_or(true, |(d, _)| distance < d) {
                    *best = Some((distance, item.id));
                }
            }
        }
        Node::Branch { left, right, .. } => {
            // Descend into the closer child first for tighter pruning.
            let left_distance = left.bounds().distance_squared_to(point);
            let right_distance = right.bounds().distance_squared_to(point);
            if left_distance <= right_distance {
                nearest_node(left, point, best);
                nearest_node(right, point, best);
            } else {
                nearest_node(right, point, best);
                nearest_node(left, point, best);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Entity, Line, Text};

    fn grid_model(n: usize) -> Model {
        let mut model = Model::new();
        for i in 0..n {
            for j in 0..n {
                let origin = Vector3::new(i as f64 * 10.0, j as f64 * 10.0, 0.0);
                model.add_entity(Entity::Line(Line::new(
                    origin,
                    origin + Vector3::new(1.0, 1.0, 0.0),
                )));
            }
        }
        model
    }

    #[test]
    fn test_query_finds_grid_cell() {
        let model = grid_model(10);
        let index = SpatialIndex::build(&model, &SpatialIndexConfig::default());
        assert_eq!(index.len(), 100);

        let query = BoundingBox3D::new(
            Vector3::new(19.5, 19.5, -1.0),
            Vector3::new(21.5, 21.5, 1.0),
        );
        let hits = index.query(&query);
        assert_eq!(hits.len(), 1);
        // Entity (2, 2) in row-major order.
        assert_eq!(hits[0], EntityId(22));
    }

    #[test]
    fn test_query_respects_containment() {
        let model = grid_model(4);
        let index = SpatialIndex::build(&model, &SpatialIndexConfig::default());
        let everything = index.bounds().copied().unwrap();
        assert_eq!(index.query(&everything).len(), 16);
    }

    #[test]
    fn test_nearest() {
        let model = grid_model(5);
        let index = SpatialIndex::build(&model, &SpatialIndexConfig::default());
        let id = index.nearest(Vector3::new(30.2, 40.1, 0.0)).unwrap();
        // Closest cell is (3, 4).
        assert_eq!(id, EntityId(3 * 5 + 4));
    }

    #[test]
    fn test_geometry_free_entities_not_indexed() {
        let mut model = Model::new();
        model.add_entity(Entity::Line(Line::new(
            Vector3::ZERO,
            Vector3::new(1.0, 0.0, 0.0),
        )));
        // A text label has bounds but an unknown entity has none.
        model.add_entity(Entity::Text(Text::new(Vector3::ZERO, 1.0, "hi")));
        model.add_entity(Entity::Unknown(crate::entities::UnknownEntity::new(
            "XFUTURE",
        )));
        let index = SpatialIndex::build(&model, &SpatialIndexConfig::default());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_empty_model() {
        let model = Model::new();
        let index = SpatialIndex::build(&model, &SpatialIndexConfig::default());
        assert!(index.is_empty());
        assert!(index.nearest(Vector3::ZERO).is_none());
        assert!(index
            .query(&BoundingBox3D::from_point(Vector3::ZERO))
            .is_empty());
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let model = grid_model(8);
        let parallel = SpatialIndex::build(&model, &SpatialIndexConfig::default());
        let sequential = SpatialIndex::build(
            &model,
            &SpatialIndexConfig {
                parallel: false,
                ..Default::default()
            },
        );
        let query = BoundingBox3D::new(
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(25.0, 25.0, 1.0),
        );
        let mut a = parallel.query(&query);
        let mut b = sequential.query(&query);
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }
}
