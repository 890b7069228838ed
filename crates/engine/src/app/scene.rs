use super::attributes::{AttributeSet, EntityType, ATTR_PARALLAX};
use super::geometry::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Placeholder carried by entities that have not been inserted into a
    /// [`Scene`] yet (for example the shape still being drawn).
    pub const DETACHED: EntityId = EntityId(u64::MAX);
}

#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Draw-order bucket. Background is drawn first, foreground last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Background,
    Main,
    Foreground,
}

impl Layer {
    pub const DRAW_ORDER: [Layer; 3] = [Layer::Background, Layer::Main, Layer::Foreground];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Main => "main",
            Self::Foreground => "foreground",
        }
    }
}

/// Position state owned by simulated bodies, kept in step with the bounds
/// whenever the editor moves them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DynamicState {
    pub position: Vec2,
    pub spawn: Vec2,
}

impl DynamicState {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            spawn: position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Static,
    Dynamic(DynamicState),
    Scenery,
    Player(DynamicState),
}

impl EntityKind {
    pub fn new(entity_type: EntityType, anchor: Vec2) -> Self {
        match entity_type {
            EntityType::Static => Self::Static,
            EntityType::Dynamic => Self::Dynamic(DynamicState::at(anchor)),
            EntityType::Scenery => Self::Scenery,
            EntityType::Player => Self::Player(DynamicState::at(anchor)),
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::Static => EntityType::Static,
            Self::Dynamic(_) => EntityType::Dynamic,
            Self::Scenery => EntityType::Scenery,
            Self::Player(_) => EntityType::Player,
        }
    }

    pub fn dynamic_state(&self) -> Option<&DynamicState> {
        match self {
            Self::Dynamic(state) | Self::Player(state) => Some(state),
            Self::Static | Self::Scenery => None,
        }
    }

    fn dynamic_state_mut(&mut self) -> Option<&mut DynamicState> {
        match self {
            Self::Dynamic(state) | Self::Player(state) => Some(state),
            Self::Static | Self::Scenery => None,
        }
    }
}

/// A polygonal level object. `offsets` are polygon vertices relative to the
/// top-left corner of `bounds`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    pub kind: EntityKind,
    pub bounds: Rect,
    pub offsets: Vec<Vec2>,
    pub attributes: AttributeSet,
}

impl Entity {
    pub fn new(
        entity_type: EntityType,
        bounds: Rect,
        offsets: Vec<Vec2>,
        attributes: AttributeSet,
    ) -> Self {
        Self {
            id: EntityId::DETACHED,
            kind: EntityKind::new(entity_type, bounds.origin()),
            bounds,
            offsets,
            attributes,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn entity_type(&self) -> EntityType {
        self.kind.entity_type()
    }

    pub fn anchor(&self) -> Vec2 {
        self.bounds.origin()
    }

    pub fn parallax(&self) -> f32 {
        match self.kind {
            EntityKind::Scenery => self.attributes.get(ATTR_PARALLAX).unwrap_or(1.0),
            _ => 1.0,
        }
    }

    pub fn layer(&self) -> Layer {
        match self.kind {
            EntityKind::Scenery if self.parallax() > 1.0 => Layer::Foreground,
            EntityKind::Scenery => Layer::Background,
            _ => Layer::Main,
        }
    }

    /// Polygon vertices in world space.
    pub fn corners(&self) -> impl Iterator<Item = Vec2> + '_ {
        let anchor = self.anchor();
        self.offsets.iter().map(move |offset| anchor + *offset)
    }

    /// Moves the entity so its top-left corner lands on `position`, keeping
    /// any simulation position state in sync.
    pub fn set_position(&mut self, position: Vec2) {
        self.bounds.set_origin(position);
        self.sync_simulation_state();
    }

    pub fn sync_simulation_state(&mut self) {
        let anchor = self.anchor();
        if let Some(state) = self.kind.dynamic_state_mut() {
            *state = DynamicState::at(anchor);
        }
    }

    /// Puts a simulated body back at its spawn point.
    pub fn reset_to_spawn(&mut self) {
        let spawn = match self.kind.dynamic_state() {
            Some(state) => state.spawn,
            None => return,
        };
        self.bounds.set_origin(spawn);
        if let Some(state) = self.kind.dynamic_state_mut() {
            state.position = spawn;
        }
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    allocator: EntityIdAllocator,
    background: Vec<Entity>,
    main: Vec<Entity>,
    foreground: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entity` to the layer derived from its variant and parallax.
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let layer = entity.layer();
        self.insert_into(layer, entity)
    }

    /// Appends `entity` to an explicit layer, preserving the caller's order.
    pub fn insert_into(&mut self, layer: Layer, mut entity: Entity) -> EntityId {
        let id = self.allocator.allocate();
        entity.id = id;
        self.layer_vec_mut(layer).push(entity);
        id
    }

    pub fn layer(&self, layer: Layer) -> &[Entity] {
        match layer {
            Layer::Background => &self.background,
            Layer::Main => &self.main,
            Layer::Foreground => &self.foreground,
        }
    }

    fn layer_vec_mut(&mut self, layer: Layer) -> &mut Vec<Entity> {
        match layer {
            Layer::Background => &mut self.background,
            Layer::Main => &mut self.main,
            Layer::Foreground => &mut self.foreground,
        }
    }

    /// Every entity, back to front.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.background
            .iter()
            .chain(self.main.iter())
            .chain(self.foreground.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.background
            .iter_mut()
            .chain(self.main.iter_mut())
            .chain(self.foreground.iter_mut())
    }

    pub fn entity_count(&self) -> usize {
        self.background.len() + self.main.len() + self.foreground.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    pub fn find(&self, id: EntityId) -> Option<&Entity> {
        self.iter().find(|entity| entity.id == id)
    }

    pub fn find_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.iter_mut().find(|entity| entity.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.find(id).is_some()
    }

    pub fn player(&self) -> Option<&Entity> {
        self.main
            .iter()
            .find(|entity| matches!(entity.kind, EntityKind::Player(_)))
    }

    /// Removes every entity whose bounds contain `point`, from all layers.
    /// Each layer is walked from the back so removal never skips an entry.
    pub fn remove_at_point(&mut self, point: Vec2) -> Vec<EntityId> {
        let mut removed = Vec::new();
        for layer in Layer::DRAW_ORDER {
            let entities = self.layer_vec_mut(layer);
            for index in (0..entities.len()).rev() {
                if entities[index].bounds.contains_point(point) {
                    removed.push(entities.remove(index).id);
                }
            }
        }
        removed
    }

    /// Ids of entities whose bounds overlap `rect`, in draw order.
    pub fn ids_intersecting(&self, rect: &Rect) -> Vec<EntityId> {
        self.iter()
            .filter(|entity| entity.bounds.intersects(rect))
            .map(Entity::id)
            .collect()
    }

    pub fn reset_dynamics(&mut self) -> usize {
        let mut count = 0;
        for entity in self.main.iter_mut() {
            if entity.kind.dynamic_state().is_some() {
                entity.reset_to_spawn();
                count += 1;
            }
        }
        count
    }
}
