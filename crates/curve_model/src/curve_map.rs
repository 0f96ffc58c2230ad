//! Insertion-ordered, name-keyed collection of curves.

use std::collections::HashMap;
use std::ops::Index;

use num_traits::Float;

use crate::curve::Curve;
use crate::error::CurveError;

/// An insertion-ordered map from curve id to [`Curve`].
///
/// The curves' combined degrees of freedom form the solver's parameter
/// vector, partitioned by a caller-supplied "curves for stage" subset.
#[derive(Debug, Clone, Default)]
pub struct CurveMap<T: Float> {
    order: Vec<String>,
    curves: HashMap<String, Curve<T>>,
}

impl<T: Float> CurveMap<T> {
    /// An empty map.
    pub fn new() -> Self {
        Self { order: Vec::new(), curves: HashMap::new() }
    }

    /// Insert or replace a curve, keyed by its own id.
    ///
    /// Replacing an existing id keeps its original insertion position.
    pub fn add_curve(&mut self, curve: Curve<T>) {
        let id = curve.id().to_string();
        if !self.curves.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.curves.insert(id, curve);
    }

    /// Look up a curve by id.
    pub fn get(&self, id: &str) -> Option<&Curve<T>> {
        self.curves.get(id)
    }

    /// Look up a curve by id, mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Curve<T>> {
        self.curves.get_mut(id)
    }

    /// Number of curves in the map.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the map holds no curves.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Curve ids in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Concatenated degrees of freedom of every curve whose id appears in
    /// `curves_for_stage`, visited in the map's insertion order.
    pub fn get_all_dofs(&self, curves_for_stage: &[String]) -> Vec<T> {
        let mut out = Vec::new();
        for id in &self.order {
            if curves_for_stage.iter().any(|s| s == id) {
                out.extend_from_slice(self.curves[id].get_all_dofs());
            }
        }
        out
    }

    /// Distribute a flat dof vector back into the curves named in
    /// `curves_for_stage`, in insertion order, slicing contiguous ranges
    /// sized by each curve's own dof count.
    pub fn set_all_dofs(&mut self, curves_for_stage: &[String], dofs: &[T]) -> Result<(), CurveError> {
        let mut i = 0;
        for id in self.order.clone() {
            if curves_for_stage.iter().any(|s| s == &id) {
                let curve = self.curves.get_mut(&id).expect("id came from self.order");
                let j = i + curve.get_dofs_count();
                curve.set_all_dofs(&dofs[i..j])?;
                i = j;
            }
        }
        Ok(())
    }
}

impl<T: Float> Index<&str> for CurveMap<T> {
    type Output = Curve<T>;

    /// Panics if `id` is not present, mirroring a dictionary-style lookup.
    fn index(&self, id: &str) -> &Curve<T> {
        self.curves.get(id).unwrap_or_else(|| panic!("no curve named {id} in CurveMap"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::InterpolationMode;

    fn curve(id: &str) -> Curve<f64> {
        Curve::new(id, 0.0, vec![1.0, 2.0], vec![0.98, 0.96], InterpolationMode::LinearLogDf).unwrap()
    }

    #[test]
    fn add_curve_preserves_insertion_order() {
        let mut map = CurveMap::new();
        map.add_curve(curve("B"));
        map.add_curve(curve("A"));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["B", "A"]);
    }

    #[test]
    fn replacing_a_curve_keeps_its_original_position() {
        let mut map = CurveMap::new();
        map.add_curve(curve("A"));
        map.add_curve(curve("B"));
        map.add_curve(curve("A"));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn index_returns_named_curve() {
        let mut map = CurveMap::new();
        map.add_curve(curve("A"));
        assert_eq!(map["A"].id(), "A");
    }

    #[test]
    #[should_panic(expected = "no curve named Z")]
    fn index_panics_on_missing_curve() {
        let map: CurveMap<f64> = CurveMap::new();
        let _ = &map["Z"];
    }

    #[test]
    fn get_all_dofs_scoped_to_stage_subset() {
        let mut map = CurveMap::new();
        map.add_curve(curve("A"));
        map.add_curve(curve("B"));
        let stage = vec!["A".to_string()];
        assert_eq!(map.get_all_dofs(&stage), vec![0.98, 0.96]);
    }

    #[test]
    fn set_all_dofs_scoped_to_stage_subset() {
        let mut map = CurveMap::new();
        map.add_curve(curve("A"));
        map.add_curve(curve("B"));
        let stage = vec!["A".to_string()];
        map.set_all_dofs(&stage, &[0.981, 0.961]).unwrap();
        assert_eq!(map["A"].get_all_dofs(), &[0.981, 0.961]);
        assert_eq!(map["B"].get_all_dofs(), &[0.98, 0.96]);
    }
}
