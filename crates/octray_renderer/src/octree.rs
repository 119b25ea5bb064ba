//! Octree acceleration structure over plane-set bounding volumes.
//!
//! Objects are registered with an [`OctreeBuilder`]; [`OctreeBuilder::build`]
//! consumes it and returns an immutable [`Octree`]. Each object is bounded by
//! a seven-slab [`Extent`] and inserted by its centroid. Every node stores the
//! union extent of what it contains, computed bottom-up once the shape is
//! final.
//!
//! Queries walk the tree best-first: nodes are popped from a min-priority
//! queue keyed on the distance at which the ray enters their extent, and the
//! walk stops as soon as that distance exceeds the closest hit found so far.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{HitRecord, Hittable, Ray};
use octray_math::{Extent, Interval, RayProjection, Vec3};
use ordered_float::OrderedFloat;

/// Depth at which leaves stop splitting and accept any number of entries.
pub const MAX_DEPTH: usize = 16;

/// Collects objects before the octree is built.
#[derive(Debug)]
pub struct OctreeBuilder<T> {
    objects: Vec<T>,
}

impl<T> Default for OctreeBuilder<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
        }
    }
}

impl<T: Hittable> OctreeBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, object: T) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Compute every bounding volume, build the tree and freeze it.
    pub fn build(self) -> Octree<T> {
        let objects = self.objects;
        let extents: Vec<Extent> = objects.iter().map(Hittable::extent).collect();

        let bounds = extents
            .iter()
            .fold(Extent::EMPTY, |acc, e| Extent::surrounding(&acc, e));

        let root = if objects.is_empty() {
            None
        } else {
            let (min, max) = bounds.aabb();
            let region = Region { min, max };

            let mut root = BuildNode::Leaf(Vec::new());
            for (index, extent) in extents.iter().enumerate() {
                root.insert(index, extent.centroid(), region, 0, &extents);
            }
            Some(root)
        };

        let mut stats = OctreeStats {
            primitives: objects.len(),
            ..OctreeStats::default()
        };
        let root = root.map(|r| r.finish(&extents, 0, &mut stats));

        log::debug!(
            "Octree built: {} primitives, {} nodes, {} leaves, depth {}",
            stats.primitives,
            stats.nodes,
            stats.leaves,
            stats.max_depth
        );

        Octree {
            objects,
            root,
            stats,
        }
    }
}

impl<T: Hittable> FromIterator<T> for OctreeBuilder<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

/// Shape of a built octree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OctreeStats {
    pub primitives: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub max_depth: usize,
}

/// Immutable octree. Safe to share between render workers.
#[derive(Debug)]
pub struct Octree<T> {
    objects: Vec<T>,
    root: Option<Node>,
    stats: OctreeStats,
}

#[derive(Debug)]
enum Node {
    Leaf { extent: Extent, entries: Vec<usize> },
    Branch { extent: Extent, children: Vec<Node> },
}

impl Node {
    fn extent(&self) -> &Extent {
        match self {
            Node::Leaf { extent, .. } | Node::Branch { extent, .. } => extent,
        }
    }
}

/// Queue entry; ordered so that `BinaryHeap` pops the nearest node first.
struct Candidate<'a> {
    distance: OrderedFloat<f32>,
    node: &'a Node,
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl Eq for Candidate<'_> {}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.distance.cmp(&self.distance)
    }
}

/// Distance at which the ray enters a node, or `None` if the node is missed
/// or lies entirely outside `ray_t`.
///
/// A ray starting inside the node gets the start of its valid range, so the
/// estimate is never larger than the parameter of any hit inside the node.
#[inline]
fn entry_distance(extent: &Extent, ray: &RayProjection, ray_t: Interval) -> Option<f32> {
    let window = extent.hit(ray)?;
    if window.max < ray_t.min || window.min > ray_t.max {
        return None;
    }
    Some(window.min.max(ray_t.min))
}

impl<T: Hittable> Octree<T> {
    pub fn stats(&self) -> OctreeStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<T: Hittable> Hittable for Octree<T> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let root = self.root.as_ref()?;
        let projection = RayProjection::new(ray);
        let distance = entry_distance(root.extent(), &projection, ray_t)?;

        let mut closest: Option<HitRecord> = None;
        let mut closest_t = ray_t.max;

        let mut queue = BinaryHeap::new();
        queue.push(Candidate {
            distance: OrderedFloat(distance),
            node: root,
        });

        while let Some(Candidate { distance, node }) = queue.pop() {
            if distance.0 > closest_t {
                break;
            }

            match node {
                Node::Leaf { entries, .. } => {
                    for &index in entries {
                        let window = Interval::new(ray_t.min, closest_t);
                        if let Some(rec) = self.objects[index].hit(ray, window) {
                            closest_t = rec.t;
                            closest = Some(rec);
                        }
                    }
                }
                Node::Branch { children, .. } => {
                    let window = Interval::new(ray_t.min, closest_t);
                    for child in children {
                        if let Some(distance) = entry_distance(child.extent(), &projection, window)
                        {
                            queue.push(Candidate {
                                distance: OrderedFloat(distance),
                                node: child,
                            });
                        }
                    }
                }
            }
        }

        closest
    }

    fn project(&self, axis: Vec3) -> Interval {
        self.objects
            .iter()
            .fold(Interval::EMPTY, |acc, o| Interval::surrounding(&acc, &o.project(axis)))
    }

    fn extent(&self) -> Extent {
        self.root.as_ref().map_or(Extent::EMPTY, |r| *r.extent())
    }
}

// =============================================================================
// Construction
// =============================================================================

/// Axis-aligned cell of the subdivision.
#[derive(Debug, Clone, Copy)]
struct Region {
    min: Vec3,
    max: Vec3,
}

impl Region {
    fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Octant index of `p`: bit 0 for x, bit 1 for y, bit 2 for z.
    fn octant(&self, p: Vec3) -> usize {
        let c = self.center();
        (p.x >= c.x) as usize | ((p.y >= c.y) as usize) << 1 | ((p.z >= c.z) as usize) << 2
    }

    fn child(&self, octant: usize) -> Region {
        let c = self.center();
        let pick = |bit: usize, lo: f32, mid: f32, hi: f32| {
            if octant & bit != 0 {
                (mid, hi)
            } else {
                (lo, mid)
            }
        };
        let (x0, x1) = pick(1, self.min.x, c.x, self.max.x);
        let (y0, y1) = pick(2, self.min.y, c.y, self.max.y);
        let (z0, z1) = pick(4, self.min.z, c.z, self.max.z);

        Region {
            min: Vec3::new(x0, y0, z0),
            max: Vec3::new(x1, y1, z1),
        }
    }
}

/// Mutable node used only while inserting.
enum BuildNode {
    Leaf(Vec<usize>),
    Branch(Box<[Option<BuildNode>; 8]>),
}

impl BuildNode {
    fn insert(
        &mut self,
        index: usize,
        centroid: Vec3,
        region: Region,
        depth: usize,
        extents: &[Extent],
    ) {
        match self {
            BuildNode::Leaf(entries) if entries.is_empty() || depth >= MAX_DEPTH => {
                entries.push(index);
            }
            BuildNode::Leaf(entries) => {
                let existing = std::mem::take(entries);
                *self = BuildNode::Branch(Box::default());
                for other in existing {
                    self.insert(other, extents[other].centroid(), region, depth, extents);
                }
                self.insert(index, centroid, region, depth, extents);
            }
            BuildNode::Branch(children) => {
                let octant = region.octant(centroid);
                children[octant]
                    .get_or_insert_with(|| BuildNode::Leaf(Vec::new()))
                    .insert(index, centroid, region.child(octant), depth + 1, extents);
            }
        }
    }

    /// Freeze the node, computing extents bottom-up.
    fn finish(self, extents: &[Extent], depth: usize, stats: &mut OctreeStats) -> Node {
        stats.nodes += 1;
        stats.max_depth = stats.max_depth.max(depth);

        match self {
            BuildNode::Leaf(entries) => {
                stats.leaves += 1;
                let extent = entries
                    .iter()
                    .fold(Extent::EMPTY, |acc, &i| Extent::surrounding(&acc, &extents[i]));
                Node::Leaf { extent, entries }
            }
            BuildNode::Branch(children) => {
                let children: [Option<BuildNode>; 8] = *children;
                let children: Vec<Node> = children
                    .into_iter()
                    .flatten()
                    .map(|child| child.finish(extents, depth + 1, stats))
                    .collect();
                let extent = children
                    .iter()
                    .fold(Extent::EMPTY, |acc, c| Extent::surrounding(&acc, c.extent()));
                Node::Branch { extent, children }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MaterialId, Sphere, Triangle};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_point(rng: &mut StdRng, scale: f32) -> Vec3 {
        Vec3::new(
            rng.gen_range(-scale..scale),
            rng.gen_range(-scale..scale),
            rng.gen_range(-scale..scale),
        )
    }

    fn random_spheres(count: usize, seed: u64) -> Vec<Sphere> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|i| {
                Sphere::new(
                    random_point(&mut rng, 10.0),
                    rng.gen_range(0.1..1.0),
                    MaterialId::new(i as u32),
                )
            })
            .collect()
    }

    fn brute_force<T: Hittable>(objects: &[T], ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest = None;
        let mut closest_t = ray_t.max;
        for object in objects {
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, closest_t)) {
                closest_t = rec.t;
                closest = Some(rec);
            }
        }
        closest
    }

    #[test]
    fn test_empty_octree() {
        let octree = OctreeBuilder::<Sphere>::new().build();

        assert!(octree.is_empty());
        assert_eq!(octree.stats(), OctreeStats::default());
        assert!(octree.extent().is_empty());

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(octree.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_single_sphere() {
        let mut builder = OctreeBuilder::new();
        builder.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialId::new(0)));
        let octree = builder.build();

        assert_eq!(octree.stats().leaves, 1);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = octree.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_matches_brute_force() {
        let spheres = random_spheres(300, 42);
        let octree: Octree<Sphere> = spheres.iter().copied().collect::<OctreeBuilder<_>>().build();
        let stats = octree.stats();
        assert_eq!(stats.primitives, 300);
        assert!(stats.nodes > stats.leaves);

        let mut rng = StdRng::seed_from_u64(7);
        let ray_t = Interval::new(0.001, f32::INFINITY);
        let mut hits = 0;

        for _ in 0..2000 {
            // Origins both inside and outside the cloud
            let ray = Ray::new(random_point(&mut rng, 15.0), random_point(&mut rng, 1.0));

            let expected = brute_force(&spheres, &ray, ray_t);
            let actual = octree.hit(&ray, ray_t);
            hits += expected.is_some() as usize;

            assert_eq!(
                actual.map(|r| (r.t, r.p, r.material)),
                expected.map(|r| (r.t, r.p, r.material)),
                "mismatch for {ray:?}"
            );
        }

        assert!(hits > 100, "only {hits} rays hit anything");
    }

    #[test]
    fn test_matches_brute_force_triangles_with_bounded_interval() {
        let mut rng = StdRng::seed_from_u64(99);
        let triangles: Vec<Triangle> = (0..200)
            .map(|i| {
                let base = random_point(&mut rng, 5.0);
                Triangle::new(
                    base,
                    base + random_point(&mut rng, 1.0),
                    base + random_point(&mut rng, 1.0),
                    MaterialId::new(i),
                )
            })
            .collect();
        let octree = triangles.iter().copied().collect::<OctreeBuilder<_>>().build();

        for _ in 0..1000 {
            let ray = Ray::new(random_point(&mut rng, 8.0), random_point(&mut rng, 1.0));
            let ray_t = Interval::new(0.001, rng.gen_range(1.0..20.0));

            assert_eq!(
                octree.hit(&ray, ray_t).map(|r| (r.t, r.material)),
                brute_force(&triangles, &ray, ray_t).map(|r| (r.t, r.material)),
            );
        }
    }

    #[test]
    fn test_query_is_idempotent() {
        let octree = random_spheres(100, 3)
            .into_iter()
            .collect::<OctreeBuilder<_>>()
            .build();
        let ray = Ray::new(Vec3::new(-15.0, 0.3, 0.2), Vec3::X);
        let ray_t = Interval::new(0.001, f32::INFINITY);

        let first = octree.hit(&ray, ray_t);
        for _ in 0..10 {
            assert_eq!(octree.hit(&ray, ray_t), first);
        }
    }

    #[test]
    fn test_depth_limit_with_identical_centroids() {
        let mut builder = OctreeBuilder::with_capacity(40);
        for i in 0..40 {
            builder.add(Sphere::new(
                Vec3::new(1.0, 2.0, 3.0),
                0.1 + i as f32 * 0.01,
                MaterialId::new(i),
            ));
        }
        let octree = builder.build();
        let stats = octree.stats();

        assert_eq!(stats.max_depth, MAX_DEPTH);
        assert_eq!(stats.leaves, 1);

        // The largest sphere is hit first
        let ray = Ray::new(Vec3::new(1.0, 2.0, 10.0), Vec3::NEG_Z);
        let rec = octree.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert_eq!(rec.material, MaterialId::new(39));
    }

    #[test]
    fn test_extent_encloses_objects() {
        let spheres = random_spheres(50, 11);
        let octree = spheres.iter().copied().collect::<OctreeBuilder<_>>().build();
        let bounds = octree.extent();

        for sphere in &spheres {
            let extent = sphere.extent();
            for (outer, inner) in bounds.slabs.iter().zip(extent.slabs) {
                assert!(outer.min <= inner.min && inner.max <= outer.max);
            }
        }
    }

    #[test]
    fn test_ray_behind_scene_misses() {
        let octree = random_spheres(20, 5)
            .into_iter()
            .collect::<OctreeBuilder<_>>()
            .build();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::Z);
        assert!(octree.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }
}
