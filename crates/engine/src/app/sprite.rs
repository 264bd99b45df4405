use std::fmt;
use std::rc::Rc;

use super::action::Action;
use super::context::{FrameContext, TickContext};
use super::costume::Costume;
use super::geometry::{BoundingBox, Extent, Position};
use super::rendering::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteStatus {
    #[default]
    Alive,
    Dying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub life: i32,
    pub attack: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyOutcome {
    /// Terminal costumes and action installed; the sprite removes itself later.
    Animating,
    /// No terminal animation; the caller must remove the sprite.
    RemoveNow,
    AlreadyDying,
}

/// Costumes and action a sprite switches to when destroyed.
pub struct TerminalAnimation {
    pub costumes: Vec<Costume>,
    pub action: Rc<dyn Action>,
}

impl TerminalAnimation {
    pub fn new(costumes: Vec<Costume>, action: Rc<dyn Action>) -> Self {
        Self { costumes, action }
    }
}

pub struct Sprite {
    id: SpriteId,
    tag: &'static str,
    status: SpriteStatus,
    pub position: Position,
    pub extent: Extent,
    previous: BoundingBox,
    actions: Vec<Rc<dyn Action>>,
    costumes: Vec<Costume>,
    current: Option<usize>,
    pub elapsed_frames: u32,
    pub stats: Stats,
    terminal: Option<Rc<TerminalAnimation>>,
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("status", &self.status)
            .field("position", &self.position)
            .field("extent", &self.extent)
            .field("actions", &self.actions.len())
            .field("costumes", &self.costumes.len())
            .field("current", &self.current)
            .finish()
    }
}

impl Sprite {
    pub fn new(tag: &'static str) -> Self {
        Self {
            id: SpriteId(0),
            tag,
            status: SpriteStatus::Alive,
            position: Position::ORIGIN,
            extent: Extent::ZERO,
            previous: BoundingBox::EMPTY,
            actions: Vec::new(),
            costumes: Vec::new(),
            current: None,
            elapsed_frames: 0,
            stats: Stats::default(),
            terminal: None,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_terminal(mut self, terminal: Rc<TerminalAnimation>) -> Self {
        self.terminal = Some(terminal);
        self
    }

    pub fn id(&self) -> SpriteId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: SpriteId) {
        self.id = id;
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn status(&self) -> SpriteStatus {
        self.status
    }

    pub fn previous(&self) -> BoundingBox {
        self.previous
    }

    pub fn set_previous(&mut self, previous: BoundingBox) {
        self.previous = previous;
    }

    /// Records the current box as the region to erase before the next draw.
    pub fn remember_footprint(&mut self) {
        self.previous = BoundingBox::new(self.position, self.extent);
    }

    /// Adds an action owned by this sprite alone.
    pub fn add_action(&mut self, action: impl Action + 'static) {
        self.actions.push(Rc::new(action));
    }

    /// Adds an action instance that other sprites may hold too.
    pub fn add_shared_action(&mut self, action: Rc<dyn Action>) {
        self.actions.push(action);
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn has_action(&self, action: &Rc<dyn Action>) -> bool {
        self.actions.iter().any(|held| Rc::ptr_eq(held, action))
    }

    /// The first costume becomes current and, when it has a natural size,
    /// seeds the sprite's extent.
    pub fn add_costume(&mut self, costume: Costume) {
        if self.costumes.is_empty() {
            self.current = Some(0);
            if let Some(extent) = costume.natural_extent() {
                self.extent = extent;
            }
        }
        self.costumes.push(costume);
    }

    pub fn costumes(&self) -> &[Costume] {
        &self.costumes
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_costume(&self) -> Option<&Costume> {
        self.costumes.get(self.current?)
    }

    /// Advances to the next costume, wrapping after the last.
    pub fn next_costume(&mut self) {
        if let Some(index) = self.current {
            self.current = Some((index + 1) % self.costumes.len());
        }
    }

    pub fn is_on_last_costume(&self) -> bool {
        match self.current {
            Some(index) => index + 1 == self.costumes.len(),
            None => false,
        }
    }

    /// Runs every action in registration order. Stops early once the sprite's
    /// status changes or its removal has been requested.
    pub fn execute(&mut self, ctx: &mut TickContext<'_, '_>) {
        let actions = self.actions.clone();
        let status = self.status;
        for action in &actions {
            action.execute(self, ctx);
            if self.status != status || ctx.is_removal_pending(self.id) {
                break;
            }
        }
    }

    pub fn draw(&self, frame: &mut FrameContext<'_>) {
        if let Some(costume) = self.current_costume() {
            costume.draw(self, frame);
        }
    }

    /// Clears the previous footprint; a sprite that never recorded one is left alone.
    pub fn erase(&self, surface: &mut dyn Surface) {
        if let Some((location, extent)) = self.previous.rect() {
            surface.clear_rect(location, extent);
        }
    }

    /// Begins two-phase destruction.
    ///
    /// With a terminal animation the alive actions and costumes are disposed
    /// and replaced by the terminal set; the terminal action removes the
    /// sprite later. Without one the caller removes it right away.
    pub fn destroy(&mut self) -> DestroyOutcome {
        if self.status == SpriteStatus::Dying {
            return DestroyOutcome::AlreadyDying;
        }
        self.status = SpriteStatus::Dying;

        let Some(terminal) = self.terminal.clone() else {
            return DestroyOutcome::RemoveNow;
        };
        for action in self.actions.drain(..) {
            action.dispose();
        }
        for costume in self.costumes.drain(..) {
            costume.dispose();
        }
        self.current = None;
        self.elapsed_frames = 0;
        for costume in &terminal.costumes {
            self.add_costume(costume.clone());
        }
        self.actions.push(Rc::clone(&terminal.action));
        DestroyOutcome::Animating
    }

    /// Releases everything the actions and costumes hold. Called once, on removal.
    pub fn dispose(&self) {
        for action in &self.actions {
            action.dispose();
        }
        for costume in &self.costumes {
            costume.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::app::action::CycleCostumeOnce;

    fn text(label: &str) -> Costume {
        Costume::text(label)
    }

    struct CountingDispose(Rc<Cell<u32>>);

    impl Action for CountingDispose {
        fn execute(&self, _sprite: &mut Sprite, _ctx: &mut TickContext<'_, '_>) {}

        fn dispose(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn costume_cycle_wraps_to_first() {
        let mut sprite = Sprite::new("ball");
        for label in ["a", "b", "c"] {
            sprite.add_costume(text(label));
        }
        assert_eq!(sprite.current_index(), Some(0));

        sprite.next_costume();
        sprite.next_costume();
        assert!(sprite.is_on_last_costume());
        sprite.next_costume();

        assert_eq!(sprite.current_index(), Some(0));
        assert_eq!(sprite.current_costume().and_then(Costume::text_content), Some("a"));
    }

    #[test]
    fn next_costume_without_costumes_is_a_no_op() {
        let mut sprite = Sprite::new("empty");
        sprite.next_costume();
        assert_eq!(sprite.current_index(), None);
        assert!(!sprite.is_on_last_costume());
    }

    #[test]
    fn first_sized_costume_seeds_extent() {
        let mut sprite = Sprite::new("ball");
        sprite.add_costume(Costume::ball(5.0));
        sprite.add_costume(Costume::ball(50.0));

        assert_eq!(sprite.extent, Extent::new(10.0, 10.0));
    }

    #[test]
    fn destroy_replaces_lists_with_terminal_set() {
        let disposed = Rc::new(Cell::new(0));
        let terminal_action: Rc<dyn Action> = Rc::new(CycleCostumeOnce::new(0.2));
        let terminal = Rc::new(TerminalAnimation::new(
            vec![text("boom1"), text("boom2")],
            Rc::clone(&terminal_action),
        ));
        let mut sprite = Sprite::new("enemy").with_terminal(terminal);
        sprite.add_costume(text("alive1"));
        sprite.add_costume(text("alive2"));
        sprite.add_costume(text("alive3"));
        sprite.next_costume();
        sprite.elapsed_frames = 3;
        sprite.add_action(CountingDispose(Rc::clone(&disposed)));
        sprite.add_action(CountingDispose(Rc::clone(&disposed)));

        assert_eq!(sprite.destroy(), DestroyOutcome::Animating);

        assert_eq!(sprite.status(), SpriteStatus::Dying);
        assert_eq!(disposed.get(), 2);
        assert_eq!(sprite.action_count(), 1);
        assert!(sprite.has_action(&terminal_action));
        let labels: Vec<_> = sprite
            .costumes()
            .iter()
            .filter_map(Costume::text_content)
            .collect();
        assert_eq!(labels, vec!["boom1", "boom2"]);
        assert_eq!(sprite.current_index(), Some(0));
        assert_eq!(sprite.elapsed_frames, 0);

        assert_eq!(sprite.destroy(), DestroyOutcome::AlreadyDying);
        assert_eq!(sprite.costumes().len(), 2);
    }

    #[test]
    fn destroy_without_terminal_asks_for_removal() {
        let mut sprite = Sprite::new("bullet");
        sprite.add_costume(text("|"));

        assert_eq!(sprite.destroy(), DestroyOutcome::RemoveNow);
        assert_eq!(sprite.destroy(), DestroyOutcome::AlreadyDying);
        assert_eq!(sprite.costumes().len(), 1);
    }

    #[test]
    fn footprint_tracks_box_before_move() {
        let mut sprite = Sprite::new("ball")
            .at(Position::new(1.0, 2.0))
            .with_extent(Extent::new(3.0, 4.0));
        assert!(!sprite.previous().is_set());

        sprite.remember_footprint();
        sprite.position = sprite.position.offset(0.0, 3.0);

        assert_eq!(
            sprite.previous(),
            BoundingBox::new(Position::new(1.0, 2.0), Extent::new(3.0, 4.0))
        );
    }
}
