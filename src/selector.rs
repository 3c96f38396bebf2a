use crate::geom::Point2D;

/// Pick the hidden candidate farthest from `from` and take it out of `hidden`.
///
/// Ties go to the earliest candidate. An empty slice yields `None`, in which
/// case the caller keeps its previous destination.
pub fn select_destination(hidden: &mut Vec<Point2D>, from: Point2D) -> Option<Point2D> {
    let mut best: Option<(usize, f32)> = None;
    for (index, point) in hidden.iter().enumerate() {
        let d = point.distance_squared(from);
        if best.map_or(true, |(_, best_d)| d > best_d) {
            best = Some((index, d));
        }
    }
    best.map(|(index, _)| hidden.remove(index))
}
