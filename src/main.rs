//! Brickfall entry point
//!
//! Runs the attract-mode demo on a fixed-timestep loop. Window, font and mixer
//! integration live in the platform layer; here frames go to a recording canvas
//! and queued voices are discarded.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use brickfall::Settings;
    use brickfall::audio::AudioManager;
    use brickfall::consts::*;
    use brickfall::render::{DrawList, draw_frame};
    use brickfall::sim::{GameEvent, GameSession, LevelSet, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        audio: AudioManager,
        canvas: DrawList,
        accumulator: f32,
        input: TickInput,
        ticks: u64,
        voices: u64,
    }

    impl Game {
        fn new(settings: &Settings) -> Self {
            let seed = settings.seed.unwrap_or_else(time_seed);
            let levels = LevelSet::load_or_default(settings.levels_file.as_deref());

            let mut session = GameSession::with_levels(seed, levels);
            session.max_particles = settings.max_particles();

            let mut audio = AudioManager::load(&settings.asset_dir);
            audio.set_master_volume(settings.master_volume);
            if settings.start_muted {
                session.toggle_mute();
                audio.handle_events(&session.events);
                session.events.clear();
            }

            log::info!("Session seed {} ({} levels)", seed, session.levels().len());
            Self {
                session,
                audio,
                canvas: DrawList::new(),
                accumulator: 0.0,
                input: TickInput {
                    idle_mode: true,
                    ..TickInput::default()
                },
                ticks: 0,
                voices: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.session, &self.input);
                self.accumulator -= SIM_DT;
                substeps += 1;
                self.ticks += 1;

                self.audio.handle_events(&self.session.events);
                self.voices += self.audio.drain_voices().len() as u64;
                for event in &self.session.events {
                    match event {
                        GameEvent::LevelStarted(level) => log::info!("Level {} started", level),
                        GameEvent::GameOver => log::info!("Game over, score {}", self.session.score),
                        GameEvent::Won => log::info!("All levels cleared, score {}", self.session.score),
                        _ => {}
                    }
                }

                // Clear one-shot inputs after processing
                self.input.start = false;
                self.input.fire = false;
                self.input.click = None;
                self.input.skip_level = false;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.canvas.reset();
            draw_frame(&mut self.canvas, &self.session);
        }
    }

    fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run() {
        let settings = Settings::load_from_env();
        let mut game = Game::new(&settings);

        let frame = Duration::from_secs_f32(SIM_DT);
        let started = Instant::now();
        let run_for = Duration::from_secs(settings.demo_seconds);
        let mut last = started;

        while !game.input.quit {
            let now = Instant::now();
            game.update((now - last).as_secs_f32());
            game.render();
            last = now;

            if now - started >= run_for {
                game.input.quit = true;
            }
            if let Some(remaining) = frame.checked_sub(now.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        log::info!(
            "Demo finished after {} ticks: phase {:?}, score {}, {} draw calls last frame, {} voices",
            game.ticks,
            game.session.phase,
            game.session.score,
            game.canvas.len(),
            game.voices
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brickfall (native) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser build drives `tick` and `draw_frame` from its own frame callback
}
