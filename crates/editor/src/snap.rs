use engine::{Entity, EntityId, Vec2};

/// Horizontal or vertical alignment line through the nearest corner. `to`
/// is the position a draw commits to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisGuide {
    pub from: Vec2,
    pub to: Vec2,
}

/// Nearest corner of any entity to `position`. The first corner seen wins
/// ties; with no corners the position is returned unchanged.
pub fn snap_to_corner<'a, I>(position: Vec2, entities: I, excluding: Option<EntityId>) -> Vec2
where
    I: IntoIterator<Item = &'a Entity>,
{
    let mut closest: Option<(Vec2, f32)> = None;
    for entity in entities {
        if Some(entity.id()) == excluding {
            continue;
        }
        for corner in entity.corners() {
            let distance = corner.distance(position);
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((corner, distance));
            }
        }
    }
    closest.map_or(position, |(corner, _)| corner)
}

/// Aligns `position` with the nearest corner along whichever axis it is
/// already closer on, keeping the cursor coordinate on the other axis.
pub fn snap_to_plane<'a, I>(position: Vec2, entities: I, excluding: Option<EntityId>) -> AxisGuide
where
    I: IntoIterator<Item = &'a Entity>,
{
    let corner = snap_to_corner(position, entities, excluding);
    let dx = (corner.x - position.x).abs();
    let dy = (corner.y - position.y).abs();
    let to = if dx > dy {
        Vec2::new(position.x, corner.y)
    } else {
        Vec2::new(corner.x, position.y)
    };
    AxisGuide { from: corner, to }
}
