/// Drops one enemy of every kind whose cadence divides the owner's frame
/// count, at a random x just above the top edge. Keeps its own counter, so
/// each spawner sprite needs its own instance.
struct SpawnEnemies {
    kinds: Vec<Rc<KindTemplate>>,
    frames: Cell<u32>,
}

impl SpawnEnemies {
    fn new(kinds: Vec<Rc<KindTemplate>>) -> Self {
        Self {
            kinds,
            frames: Cell::new(0),
        }
    }
}

impl Action for SpawnEnemies {
    fn execute(&self, _sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        let frame = self.frames.get().wrapping_add(1);
        self.frames.set(frame);

        for kind in &self.kinds {
            if !kind.is_due(frame) {
                continue;
            }
            let mut enemy = kind.instantiate();
            let x = ctx.frame.random_x(0.0, enemy.extent.width);
            enemy.position = Position::new(x, -enemy.extent.height);
            let id = ctx.spawn(enemy);
            debug!(kind = %kind.name, id = id.0, x, "enemy_spawned");
        }
    }
}

/// Fires a bullet from the owner's top centre on the bullet's cadence.
struct SpawnBullets {
    bullet: Rc<KindTemplate>,
    frames: Cell<u32>,
}

impl SpawnBullets {
    fn new(bullet: Rc<KindTemplate>) -> Self {
        Self {
            bullet,
            frames: Cell::new(0),
        }
    }
}

impl Action for SpawnBullets {
    fn execute(&self, shooter: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        let frame = self.frames.get().wrapping_add(1);
        self.frames.set(frame);
        if !self.bullet.is_due(frame) {
            return;
        }

        let mut bullet = self.bullet.instantiate();
        bullet.position = Position::new(
            shooter.position.x + (shooter.extent.width - bullet.extent.width) / 2.0,
            shooter.position.y - bullet.extent.height,
        );
        ctx.spawn(bullet);
    }
}

/// Bullet side of a collision: the bullet goes, the enemy loses the bullet's
/// attack in life and goes too once it runs out.
struct BulletHit;

impl Action for BulletHit {
    fn execute(&self, bullet: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        for enemy_id in ctx.members(ENEMY) {
            let struck = match ctx.sprite(enemy_id) {
                Some(enemy) => hit(bullet, enemy),
                None => false,
            };
            if !struck {
                continue;
            }

            ctx.destroy(bullet);
            let defeated = match ctx.sprite_mut(enemy_id) {
                Some(enemy) => {
                    enemy.stats.life -= bullet.stats.attack;
                    enemy.stats.life <= 0
                }
                None => false,
            };
            if defeated {
                debug!(id = enemy_id.0, "enemy_defeated");
                ctx.destroy_by_id(enemy_id);
            }
        }
    }
}

/// Hero side of a collision: both trade attack for life. Stops at the hero's
/// own destruction.
struct HeroHit;

impl Action for HeroHit {
    fn execute(&self, hero: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        for enemy_id in ctx.members(ENEMY) {
            let Some(enemy) = ctx.sprite_mut(enemy_id) else {
                continue;
            };
            if !hit(hero, enemy) {
                continue;
            }

            enemy.stats.life -= hero.stats.attack;
            let enemy_attack = enemy.stats.attack;
            if enemy.stats.life <= 0 {
                ctx.destroy_by_id(enemy_id);
            }

            hero.stats.life -= enemy_attack;
            if hero.stats.life <= 0 {
                info!(life = hero.stats.life, "hero_destroyed");
                ctx.destroy(hero);
                return;
            }
        }
    }
}

/// Terminal action of the hero: plays the blow-up, then moves the stage on.
struct GameOverAction {
    seconds: f32,
}

impl Action for GameOverAction {
    fn execute(&self, sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        if !animation_step_due(sprite, self.seconds, ctx.tick_interval()) {
            return;
        }
        if sprite.costumes().is_empty() || sprite.is_on_last_costume() {
            ctx.next_scene();
        } else {
            sprite.elapsed_frames = 0;
            sprite.next_costume();
        }
    }
}
