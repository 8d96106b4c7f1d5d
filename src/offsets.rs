use crate::map::PixelOffset;

/// Offsets defining the local patch shape, nearest first.
///
/// The candidate window is the smallest centered square holding at least
/// `neighbors` offsets; the excess is dropped after sorting by squared
/// radius, ties broken by row then column so the order is deterministic.
/// `(0, 0)` always sorts first: a patch contains its own center.
pub fn sorted_offsets(neighbors: usize) -> Vec<PixelOffset> {
    let mut radius: i64 = 0;
    while (2 * radius + 1) * (2 * radius + 1) < neighbors as i64 {
        radius += 1;
    }
    let r = radius as i32;

    let mut offsets = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
    for dy in -r..=r {
        for dx in -r..=r {
            offsets.push(PixelOffset { dx, dy });
        }
    }
    offsets.sort_by_key(|o| (o.radius_sq(), o.dy, o.dx));
    offsets.truncate(neighbors);
    offsets
}
