use std::collections::HashMap;

use super::rendering::Surface;
use super::scene::Scene;
use super::sprite::{Sprite, SpriteId};

#[derive(Debug)]
pub struct SpriteIdAllocator {
    next: u64,
}

impl Default for SpriteIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl SpriteIdAllocator {
    pub fn allocate(&mut self) -> SpriteId {
        let id = SpriteId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Ordered active sprites of one scene.
///
/// Spawns and removals requested during a tick are queued and applied
/// together by [`SpriteWorld::apply_pending`], so the sprite order seen by
/// the erase, draw and execute passes never changes mid-tick.
#[derive(Debug, Default)]
pub struct SpriteWorld {
    allocator: SpriteIdAllocator,
    sprites: Vec<Sprite>,
    lent: Option<SpriteId>,
    pending_spawns: Vec<Sprite>,
    pending_removals: Vec<SpriteId>,
}

impl SpriteWorld {
    pub fn spawn(&mut self, mut sprite: Sprite) -> SpriteId {
        let id = self.allocator.allocate();
        sprite.assign_id(id);
        self.pending_spawns.push(sprite);
        id
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn pending_spawn_count(&self) -> usize {
        self.pending_spawns.len()
    }

    pub fn ids(&self) -> Vec<SpriteId> {
        self.sprites.iter().map(Sprite::id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.iter().find(|sprite| sprite.id() == id)
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|sprite| sprite.id() == id)
    }

    /// Active means in the list, or lent out to run its actions.
    pub fn contains(&self, id: SpriteId) -> bool {
        self.lent == Some(id) || self.sprites.iter().any(|sprite| sprite.id() == id)
    }

    pub fn is_removal_pending(&self, id: SpriteId) -> bool {
        self.pending_removals.contains(&id)
    }

    /// Queues an active sprite for removal. `false` if it is not active or
    /// is already queued.
    pub fn request_removal(&mut self, id: SpriteId) -> bool {
        if !self.contains(id) || self.is_removal_pending(id) {
            return false;
        }
        self.pending_removals.push(id);
        true
    }

    /// Takes an active sprite out of the list right away.
    pub fn remove_now(&mut self, id: SpriteId) -> Option<Sprite> {
        let index = self.sprites.iter().position(|sprite| sprite.id() == id)?;
        self.pending_removals.retain(|pending| *pending != id);
        Some(self.sprites.remove(index))
    }

    pub(crate) fn lend(&mut self, id: SpriteId) -> Option<(usize, Sprite)> {
        let index = self.sprites.iter().position(|sprite| sprite.id() == id)?;
        self.lent = Some(id);
        Some((index, self.sprites.remove(index)))
    }

    pub(crate) fn restore(&mut self, index: usize, sprite: Sprite) {
        self.lent = None;
        let index = index.min(self.sprites.len());
        self.sprites.insert(index, sprite);
    }

    /// Retires queued removals, then appends queued spawns in request order.
    pub fn apply_pending(&mut self, scene: &mut dyn Scene, surface: &mut dyn Surface) {
        for id in std::mem::take(&mut self.pending_removals) {
            if let Some(sprite) = self.remove_now(id) {
                retire(scene, surface, sprite);
            }
        }
        for sprite in std::mem::take(&mut self.pending_spawns) {
            scene.track(&sprite);
            self.sprites.push(sprite);
        }
    }

    /// Empties the world, queued spawns included.
    pub fn drain(&mut self) -> Vec<Sprite> {
        self.pending_removals.clear();
        let mut drained = std::mem::take(&mut self.sprites);
        drained.append(&mut self.pending_spawns);
        drained
    }
}

/// Final step of every removal: leave the scene's indices, erase the last
/// footprint, release resources.
pub(crate) fn retire(scene: &mut dyn Scene, surface: &mut dyn Surface, sprite: Sprite) {
    scene.forget(&sprite);
    sprite.erase(surface);
    sprite.dispose();
}

/// Tag-keyed membership lists a scene keeps beside its active list, e.g. the
/// sprites currently classified as enemies.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    members: HashMap<&'static str, Vec<SpriteId>>,
}

impl CategoryIndex {
    pub fn new(categories: &[&'static str]) -> Self {
        Self {
            members: categories
                .iter()
                .map(|category| (*category, Vec::new()))
                .collect(),
        }
    }

    /// Adds the sprite when its tag is one of the indexed categories.
    pub fn track(&mut self, sprite: &Sprite) {
        if let Some(list) = self.members.get_mut(sprite.tag()) {
            if !list.contains(&sprite.id()) {
                list.push(sprite.id());
            }
        }
    }

    pub fn forget(&mut self, sprite: &Sprite) {
        if let Some(list) = self.members.get_mut(sprite.tag()) {
            list.retain(|id| *id != sprite.id());
        }
    }

    pub fn members(&self, category: &str) -> &[SpriteId] {
        self.members
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        for list in self.members.values_mut() {
            list.clear();
        }
    }
}
