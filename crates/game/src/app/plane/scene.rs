/// The battle itself: a scrolling backdrop and the hero, which carries the
/// enemy and bullet spawners. Enemies and bullets are indexed by tag so the
/// collision actions only scan their opponents.
pub(crate) struct PlaneScene {
    config: PlaneConfig,
    index: CategoryIndex,
}

impl PlaneScene {
    pub(crate) fn new(config: PlaneConfig) -> Self {
        Self {
            config,
            index: CategoryIndex::new(&[ENEMY, BULLET]),
        }
    }

    fn backdrop(&self, frame: &FrameContext<'_>) -> Sprite {
        let def = &self.config.backdrop;
        let mut backdrop = Sprite::new(BACKDROP);
        backdrop.add_costume(Costume::backdrop(frame.image(&def.image)));
        backdrop.add_action(ScrollBackdrop::new(def.scroll_step));
        if let Some(music) = &def.music {
            backdrop.add_action(LoopAudio::new(music));
        }
        backdrop
    }

    fn hero(&self, frame: &FrameContext<'_>) -> Sprite {
        let config = &self.config;
        let dying = shared(CycleCostumeOnce::new(config.animation_seconds));

        let enemies = config
            .enemies
            .iter()
            .map(|def| {
                let template = KindTemplate::resolve(def, ENEMY, frame, Rc::clone(&dying))
                    .with_actions(motion_actions(def));
                Rc::new(template)
            })
            .collect();
        let mut bullet_actions = motion_actions(&config.bullet);
        bullet_actions.push(shared(BulletHit));
        let bullet = KindTemplate::resolve(&config.bullet, BULLET, frame, dying)
            .with_actions(bullet_actions);

        let game_over = shared(GameOverAction {
            seconds: config.animation_seconds,
        });
        let mut hero = KindTemplate::resolve(&config.hero, HERO, frame, game_over).instantiate();
        hero.position = Position::new(
            frame.bounds.size.width / 2.0,
            frame.bounds.size.height - config.hero_bottom_offset,
        );
        hero.add_action(FollowPointer);
        hero.add_action(SpawnBullets::new(Rc::new(bullet)));
        hero.add_action(SpawnEnemies::new(enemies));
        if let Some(seconds) = config.hero.cycle_seconds {
            hero.add_action(CycleCostume::new(seconds));
        }
        hero.add_action(HeroHit);
        hero
    }
}

impl Scene for PlaneScene {
    fn name(&self) -> &str {
        "plane"
    }

    fn start(&mut self, world: &mut SpriteWorld, frame: &mut FrameContext<'_>) {
        world.spawn(self.backdrop(frame));

        let hero = self.hero(frame);
        // Park the pointer on the hero so it holds still until the mouse moves.
        frame.input.set_pointer(Position::new(
            hero.position.x + hero.extent.width / 2.0,
            hero.position.y + hero.extent.height / 2.0,
        ));
        let position = hero.position;
        world.spawn(hero);

        info!(
            x = position.x,
            y = position.y,
            enemy_kinds = self.config.enemies.len(),
            "plane_started"
        );
    }

    fn destroy(&mut self, world: &mut SpriteWorld, frame: &mut FrameContext<'_>) {
        teardown_world(self, world, frame);
        self.index.clear();
    }

    fn track(&mut self, sprite: &Sprite) {
        self.index.track(sprite);
    }

    fn forget(&mut self, sprite: &Sprite) {
        self.index.forget(sprite);
    }

    fn members(&self, category: &str) -> &[SpriteId] {
        self.index.members(category)
    }
}

/// Loading gauge, welcome screen, battle, game over; then around again.
pub(crate) fn plane_scenes(config: &PlaneConfig) -> Vec<Box<dyn Scene>> {
    vec![
        Box::new(LoadingScene),
        Box::new(WelcomeScene::new(&config.welcome_image)),
        Box::new(PlaneScene::new(config.clone())),
        Box::new(GameOverScene::new(&config.game_over_text)),
    ]
}
