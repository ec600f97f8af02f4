//! Spatial index behavior against a brute-force reference.

use dxfmodel::entities::{Circle, Entity, Line};
use dxfmodel::{BoundingBox3D, EntityId, Model, SpatialIndex, SpatialIndexConfig, Vector3};

/// A deterministic scatter of lines and circles.
fn scattered_model(count: usize) -> Model {
    let mut model = Model::new();
    let mut seed = 0x2545_f491u64;
    let mut next = || {
        // xorshift; reproducible without a rand dependency
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed % 1000) as f64 / 10.0
    };
    for i in 0..count {
        let origin = Vector3::new(next(), next(), 0.0);
        if i % 2 == 0 {
            model.add_entity(Entity::Line(Line::new(
                origin,
                origin + Vector3::new(next() / 20.0, next() / 20.0, 0.0),
            )));
        } else {
            model.add_entity(Entity::Circle(Circle::new(origin, 1.0 + next() / 50.0)));
        }
    }
    model
}

fn brute_force(model: &Model, query: &BoundingBox3D) -> Vec<EntityId> {
    model
        .entities()
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.bounding_box().map(|b| (i, b)))
        .filter(|(_, b)| b.intersects(query))
        .map(|(i, _)| EntityId(i))
        .collect()
}

#[test]
fn query_matches_brute_force() {
    let model = scattered_model(500);
    let index = SpatialIndex::build(&model, &SpatialIndexConfig::default());

    let queries = [
        BoundingBox3D::new(Vector3::new(10.0, 10.0, -1.0), Vector3::new(30.0, 30.0, 1.0)),
        BoundingBox3D::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(100.0, 100.0, 0.0)),
        BoundingBox3D::from_point(Vector3::new(50.0, 50.0, 0.0)),
        BoundingBox3D::new(
            Vector3::new(-500.0, -500.0, -1.0),
            Vector3::new(-400.0, -400.0, 1.0),
        ),
    ];
    for query in &queries {
        let mut expected = brute_force(&model, query);
        let mut actual = index.query(query);
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }
}

#[test]
fn every_entity_finds_itself() {
    let model = scattered_model(200);
    let index = SpatialIndex::build(&model, &SpatialIndexConfig::default());
    for (i, entity) in model.entities().iter().enumerate() {
        let bounds = entity.bounding_box().unwrap();
        assert!(
            index.query(&bounds).contains(&EntityId(i)),
            "entity {} missing from its own bounds query",
            i
        );
    }
}

#[test]
fn nearest_matches_brute_force() {
    let model = scattered_model(300);
    let index = SpatialIndex::build(&model, &SpatialIndexConfig::default());

    for probe in [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(50.0, 50.0, 0.0),
        Vector3::new(200.0, -30.0, 5.0),
    ] {
        let best = index.nearest(probe).unwrap();
        let best_distance = model.entities()[best.0]
            .bounding_box()
            .unwrap()
            .distance_squared_to(probe);
        let reference = model
            .entities()
            .iter()
            .filter_map(|e| e.bounding_box())
            .map(|b| b.distance_squared_to(probe))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(best_distance, reference);
    }
}

#[test]
fn rebuild_is_deterministic() {
    let model = scattered_model(100);
    let config = SpatialIndexConfig::default();
    let a = SpatialIndex::build(&model, &config);
    let b = SpatialIndex::build(&model, &config);

    let query = BoundingBox3D::new(Vector3::new(0.0, 0.0, -1.0), Vector3::new(50.0, 50.0, 1.0));
    let mut qa = a.query(&query);
    let mut qb = b.query(&query);
    qa.sort();
    qb.sort();
    assert_eq!(qa, qb);
    assert_eq!(a.bounds(), b.bounds());
}

#[test]
fn deep_degenerate_input_terminates() {
    // Identical geometry defeats the median split; max_depth bounds it.
    let mut model = Model::new();
    for _ in 0..200 {
        model.add_entity(Entity::Line(Line::new(
            Vector3::ZERO,
            Vector3::new(1.0, 1.0, 0.0),
        )));
    }
    let index = SpatialIndex::build(
        &model,
        &SpatialIndexConfig {
            leaf_capacity: 1,
            max_depth: 8,
            parallel: false,
        },
    );
    assert_eq!(index.len(), 200);
    let hits = index.query(&BoundingBox3D::from_point(Vector3::ZERO));
    assert_eq!(hits.len(), 200);
}
