//! R*-tree over document positions, used to prune polygon queries before the
//! exact containment test.

use geo::Rect;
use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};

/// A document position tagged with the document's slot in its collection.
type IndexedPosition = GeomWithData<[f64; 2], usize>;

#[derive(Default)]
pub(crate) struct GeoIndex {
    tree: RTree<IndexedPosition>,
}

impl GeoIndex {
    pub fn insert(&mut self, lon: f64, lat: f64, slot: usize) {
        self.tree.insert(GeomWithData::new([lon, lat], slot));
    }

    /// Slots of every position inside or on `rect`, in ascending order.
    pub fn candidates(&self, rect: &Rect<f64>) -> Vec<usize> {
        let envelope = AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);
        let mut slots: Vec<usize> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|position| position.data)
            .collect();
        slots.sort_unstable();
        slots
    }
}
