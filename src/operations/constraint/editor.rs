use slotmap::SlotMap;
use tracing::debug;

use super::validate_element_placement;
use crate::error::ConstraintViolation;
use crate::geometry::FootprintPolygon;
use crate::math::polygon_2d::constrain_point_to_polygon;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for an accepted footprint in the editor.
    pub struct FootprintId;
}

/// Accepted sub-feature footprints of one pool, edited interactively.
///
/// Dragging only snaps a vertex into the pool; committing validates a
/// candidate copy and swaps it in only when every check passes, so the
/// accepted state never holds a rejected geometry.
#[derive(Debug, Clone)]
pub struct FootprintEditor {
    pool: Vec<Point2>,
    footprints: SlotMap<FootprintId, FootprintPolygon>,
}

impl FootprintEditor {
    /// Creates an editor for the given pool outline.
    #[must_use]
    pub fn new(pool: Vec<Point2>) -> Self {
        Self {
            pool,
            footprints: SlotMap::with_key(),
        }
    }

    /// The pool outline footprints are validated against.
    #[must_use]
    pub fn pool(&self) -> &[Point2] {
        &self.pool
    }

    /// Validates and inserts a new footprint.
    ///
    /// # Errors
    ///
    /// Returns the first violation; nothing is inserted in that case.
    pub fn insert(&mut self, footprint: FootprintPolygon) -> Result<FootprintId, ConstraintViolation> {
        self.check(None, &footprint)?;
        Ok(self.footprints.insert(footprint))
    }

    /// Returns the accepted footprint, if any.
    #[must_use]
    pub fn get(&self, id: FootprintId) -> Option<&FootprintPolygon> {
        self.footprints.get(id)
    }

    /// Removes a footprint.
    pub fn remove(&mut self, id: FootprintId) -> Option<FootprintPolygon> {
        self.footprints.remove(id)
    }

    /// Iterates all accepted footprints.
    pub fn iter(&self) -> impl Iterator<Item = (FootprintId, &FootprintPolygon)> {
        self.footprints.iter()
    }

    /// Position to display while a vertex is being dragged to `target`.
    ///
    /// The point is snapped inside the pool; nothing is committed.
    #[must_use]
    pub fn drag_vertex(&self, target: &Point2) -> Point2 {
        constrain_point_to_polygon(target, &self.pool)
    }

    /// Moves one vertex of an accepted footprint.
    ///
    /// # Errors
    ///
    /// Returns a violation if the edited footprint would leave the pool or
    /// overlap another footprint; the accepted footprint is left untouched.
    pub fn commit_vertex(
        &mut self,
        id: FootprintId,
        vertex: usize,
        position: Point2,
    ) -> Result<(), ConstraintViolation> {
        let current = self
            .footprints
            .get(id)
            .ok_or(ConstraintViolation::UnknownFootprint)?;
        if vertex >= current.vertices.len() {
            return Err(ConstraintViolation::NoSuchVertex {
                feature: current.feature,
                vertex,
            });
        }
        let mut candidate = current.clone();
        candidate.vertices[vertex] = position;
        self.commit_footprint(id, candidate)
    }

    /// Replaces an accepted footprint wholesale.
    ///
    /// # Errors
    ///
    /// Returns a violation if the candidate fails validation; the accepted
    /// footprint is left untouched.
    pub fn commit_footprint(
        &mut self,
        id: FootprintId,
        candidate: FootprintPolygon,
    ) -> Result<(), ConstraintViolation> {
        if !self.footprints.contains_key(id) {
            return Err(ConstraintViolation::UnknownFootprint);
        }
        self.check(Some(id), &candidate)?;
        debug!(feature = %candidate.feature, "footprint edit committed");
        if let Some(slot) = self.footprints.get_mut(id) {
            *slot = candidate;
        }
        Ok(())
    }

    fn check(
        &self,
        skip: Option<FootprintId>,
        candidate: &FootprintPolygon,
    ) -> Result<(), ConstraintViolation> {
        let mut others = self
            .footprints
            .iter()
            .filter(|(id, fp)| Some(*id) != skip && fp.feature != candidate.feature)
            .map(|(_, fp)| fp)
            .peekable();
        if others.peek().is_none() {
            return validate_element_placement(candidate, &self.pool, None);
        }
        for other in others {
            validate_element_placement(candidate, &self.pool, Some(other))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::SubFeature;
    use crate::math::polygon_2d::point_inside_or_on_polygon;
    use crate::math::pt;

    fn editor() -> FootprintEditor {
        FootprintEditor::new(vec![pt(0.0, 0.0), pt(8.0, 0.0), pt(8.0, 4.0), pt(0.0, 4.0)])
    }

    fn rect(feature: SubFeature, x0: f64, y0: f64, x1: f64, y1: f64) -> FootprintPolygon {
        FootprintPolygon::new(
            feature,
            vec![pt(x0, y0), pt(x1, y0), pt(x1, y1), pt(x0, y1)],
        )
    }

    #[test]
    fn drag_snaps_inside_without_committing() {
        let mut ed = editor();
        let id = ed
            .insert(rect(SubFeature::Stairs, 6.0, 0.0, 8.0, 1.2))
            .unwrap();
        let shown = ed.drag_vertex(&pt(9.5, 0.6));
        assert!(point_inside_or_on_polygon(&shown, ed.pool()));
        assert_eq!(ed.get(id).unwrap().vertices[1], pt(8.0, 0.0));
    }

    #[test]
    fn valid_commit_applies() {
        let mut ed = editor();
        let id = ed
            .insert(rect(SubFeature::Stairs, 6.0, 0.0, 8.0, 1.2))
            .unwrap();
        ed.commit_vertex(id, 2, pt(8.0, 1.5)).unwrap();
        assert_eq!(ed.get(id).unwrap().vertices[2], pt(8.0, 1.5));
    }

    #[test]
    fn rejected_commit_leaves_accepted_state() {
        let mut ed = editor();
        let id = ed
            .insert(rect(SubFeature::Stairs, 6.0, 0.0, 8.0, 1.2))
            .unwrap();
        let before = ed.get(id).unwrap().clone();

        let err = ed.commit_vertex(id, 2, pt(9.0, 1.5)).unwrap_err();
        assert!(matches!(err, ConstraintViolation::OutsidePool { vertex: 2, .. }));
        assert_eq!(ed.get(id).unwrap(), &before);
    }

    #[test]
    fn commit_into_the_splash_pool_is_rejected() {
        let mut ed = editor();
        ed.insert(rect(SubFeature::SplashPool, 0.0, 0.0, 2.0, 4.0))
            .unwrap();
        let stairs = ed
            .insert(rect(SubFeature::Stairs, 2.0, 0.0, 3.2, 1.2))
            .unwrap();

        assert_eq!(
            ed.commit_vertex(stairs, 0, pt(1.5, 0.0)),
            Err(ConstraintViolation::Overlap)
        );
        assert_eq!(ed.get(stairs).unwrap().vertices[0], pt(2.0, 0.0));
    }

    #[test]
    fn overlapping_insert_is_refused() {
        let mut ed = editor();
        ed.insert(rect(SubFeature::SplashPool, 0.0, 0.0, 2.0, 4.0))
            .unwrap();
        assert_eq!(
            ed.insert(rect(SubFeature::Stairs, 1.0, 1.0, 3.0, 2.0)),
            Err(ConstraintViolation::Overlap)
        );
        assert_eq!(ed.iter().count(), 1);
    }

    #[test]
    fn unknown_ids_and_vertices() {
        let mut ed = editor();
        let id = ed
            .insert(rect(SubFeature::Stairs, 6.0, 0.0, 8.0, 1.2))
            .unwrap();
        assert!(matches!(
            ed.commit_vertex(id, 9, pt(7.0, 1.0)),
            Err(ConstraintViolation::NoSuchVertex { vertex: 9, .. })
        ));
        ed.remove(id);
        assert_eq!(
            ed.commit_vertex(id, 0, pt(7.0, 1.0)),
            Err(ConstraintViolation::UnknownFootprint)
        );
    }
}
