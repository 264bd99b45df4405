/// One appearance in a kind's costume list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CostumeDef {
    Image(String),
    Ball(f32),
    Text(String),
}

impl CostumeDef {
    fn build(&self, frame: &FrameContext<'_>) -> Costume {
        match self {
            Self::Image(name) => Costume::image(name, frame.image(name)),
            Self::Ball(radius) => Costume::ball(*radius),
            Self::Text(text) => Costume::text(text),
        }
    }
}

/// Data for one entity kind. `spawn_every_frames: None` never spawns it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct KindDef {
    #[serde(default)]
    pub(crate) name: String,
    pub(crate) life: i32,
    pub(crate) attack: i32,
    /// Vertical pixels per tick; negative moves up.
    #[serde(default)]
    pub(crate) speed: f32,
    pub(crate) costumes: Vec<CostumeDef>,
    #[serde(default)]
    pub(crate) terminal_costumes: Vec<CostumeDef>,
    #[serde(default)]
    pub(crate) cycle_seconds: Option<f32>,
    /// Used when the first costume has no natural size, e.g. a missing image.
    #[serde(default)]
    pub(crate) extent: Option<[f32; 2]>,
    #[serde(default)]
    pub(crate) spawn_every_frames: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BackdropDef {
    pub(crate) image: String,
    #[serde(default = "default_scroll_step")]
    pub(crate) scroll_step: f32,
    #[serde(default)]
    pub(crate) music: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlaneConfig {
    pub(crate) assets: AssetManifest,
    pub(crate) welcome_image: String,
    #[serde(default = "default_game_over_text")]
    pub(crate) game_over_text: String,
    /// Seconds per costume of every terminal animation.
    #[serde(default = "default_animation_seconds")]
    pub(crate) animation_seconds: f32,
    pub(crate) backdrop: BackdropDef,
    pub(crate) hero: KindDef,
    #[serde(default = "default_hero_bottom_offset")]
    pub(crate) hero_bottom_offset: f32,
    pub(crate) bullet: KindDef,
    pub(crate) enemies: Vec<KindDef>,
}

fn default_scroll_step() -> f32 {
    2.0
}

fn default_game_over_text() -> String {
    "GAME OVER!".to_string()
}

fn default_animation_seconds() -> f32 {
    0.2
}

fn default_hero_bottom_offset() -> f32 {
    150.0
}

/// A kind resolved against the loaded images, ready to stamp out sprites.
struct KindTemplate {
    tag: &'static str,
    name: String,
    stats: Stats,
    costumes: Vec<Costume>,
    fallback_extent: Extent,
    terminal: Option<Rc<TerminalAnimation>>,
    actions: Vec<Rc<dyn Action>>,
    spawn_every_frames: Option<u32>,
}

impl KindTemplate {
    fn resolve(
        def: &KindDef,
        tag: &'static str,
        frame: &FrameContext<'_>,
        terminal_action: Rc<dyn Action>,
    ) -> Self {
        let terminal = (!def.terminal_costumes.is_empty()).then(|| {
            let costumes = def
                .terminal_costumes
                .iter()
                .map(|costume| costume.build(frame))
                .collect();
            Rc::new(TerminalAnimation::new(costumes, terminal_action))
        });
        let fallback_extent = def
            .extent
            .map(|[width, height]| Extent::new(width, height))
            .unwrap_or(Extent::ZERO);

        Self {
            tag,
            name: if def.name.is_empty() {
                tag.to_string()
            } else {
                def.name.clone()
            },
            stats: Stats {
                life: def.life,
                attack: def.attack,
            },
            costumes: def
                .costumes
                .iter()
                .map(|costume| costume.build(frame))
                .collect(),
            fallback_extent,
            terminal,
            actions: Vec::new(),
            spawn_every_frames: def.spawn_every_frames,
        }
    }

    /// Alive actions every instance shares.
    fn with_actions(mut self, actions: impl IntoIterator<Item = Rc<dyn Action>>) -> Self {
        self.actions.extend(actions);
        self
    }

    fn instantiate(&self) -> Sprite {
        let mut sprite = Sprite::new(self.tag)
            .with_stats(self.stats)
            .with_extent(self.fallback_extent);
        for costume in &self.costumes {
            sprite.add_costume(costume.clone());
        }
        if let Some(terminal) = &self.terminal {
            sprite = sprite.with_terminal(Rc::clone(terminal));
        }
        for action in &self.actions {
            sprite.add_shared_action(Rc::clone(action));
        }
        sprite
    }

    fn is_due(&self, frame: u32) -> bool {
        matches!(self.spawn_every_frames, Some(every) if every > 0 && frame % every == 0)
    }
}

/// Movement, cleanup and optional idle animation shared by every falling or
/// rising kind.
fn motion_actions(def: &KindDef) -> Vec<Rc<dyn Action>> {
    let mut actions = Vec::new();
    if let Some(seconds) = def.cycle_seconds {
        actions.push(shared(CycleCostume::new(seconds)));
    }
    actions.push(shared(Move::new(def.speed)));
    actions.push(shared(RemoveWhenOutOfRange));
    actions
}
