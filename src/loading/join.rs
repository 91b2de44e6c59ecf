use super::*;
use crate::Coordinate;
use crate::Dataset;
use crate::Point;
use std::cmp::Ordering;

/// Inner join of two tables on their key column.
///
/// Rows come out in ascending key order. Each point is the left row's
/// features followed by the right row's; keys are dropped. Keys present in
/// only one table are skipped.
pub fn join(left: &Table, right: &Table) -> anyhow::Result<Dataset> {
    let ref l = left.sorted()?;
    let ref r = right.sorted()?;
    let mut points = Vec::with_capacity(l.len().min(r.len()));
    let (mut i, mut j) = (0, 0);
    while i < l.len() && j < r.len() {
        match l[i].key.total_cmp(&r[j].key) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                let coords = l[i]
                    .features
                    .iter()
                    .chain(r[j].features.iter())
                    .copied()
                    .collect::<Vec<Coordinate>>();
                points.push(Point::from(coords));
                i += 1;
                j += 1;
            }
        }
    }
    log::info!(
        "{:<32}{:<32}",
        "joined tables",
        format!("{} x {} -> {}", left.len(), right.len(), points.len())
    );
    if points.is_empty() {
        return Err(anyhow::anyhow!("tables share no keys"));
    }
    Ok(Dataset::try_from(points)?)
}
