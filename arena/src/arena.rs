//! Match loop: plays bot-vs-bot games on the demo board.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pursuit_ai::{
    create_evader_policy, create_seeker_policy, policy_rng, AiConfig, Controller,
    EvaderPolicyKind, SeekerPolicyKind, Session,
};
use pursuit_core::{demo_board, BeliefTracker, GameRules, GameSetup, GameState, TransportGraph};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::stats::{ArenaStats, ArenaStatsSnapshot};

pub struct Arena {
    config: Config,
    evader_kind: EvaderPolicyKind,
    seeker_kind: SeekerPolicyKind,
    graph: Arc<TransportGraph>,
    rules: GameRules,
    ai: AiConfig,
    belief_alpha: f64,
    rng: ChaCha20Rng,
}

impl Arena {
    pub fn new(config: Config, rules: GameRules, ai: AiConfig, belief_alpha: f64) -> Result<Self> {
        let evader_kind = config.evader_kind()?;
        let seeker_kind = config.seeker_kind()?;
        let rules = rules.with_max_turns(config.max_turns);
        rules.validate().context("invalid game rules")?;
        let rng = policy_rng(config.seed);

        Ok(Self {
            config,
            evader_kind,
            seeker_kind,
            graph: Arc::new(demo_board()),
            rules,
            ai,
            belief_alpha,
            rng,
        })
    }

    /// Upper bound on controller decisions in one game.
    fn step_limit(&self) -> usize {
        (self.rules.max_turns as usize + 1) * (self.config.seekers + 1) + 16
    }

    fn play_game(&mut self, index: u32) -> Result<(pursuit_core::Outcome, usize)> {
        let setup = GameSetup::random(&self.graph, self.config.seekers, &mut self.rng)?;
        let state = GameState::new(Arc::clone(&self.graph), self.rules.clone(), &setup)?
            .with_belief(BeliefTracker::new(self.belief_alpha));

        // Nonzero so every policy stays reproducible under a fixed master seed
        let mut next_seed = || self.rng.gen_range(1..u64::MAX);
        let evader = Controller::Bot(create_evader_policy(
            self.evader_kind,
            &self.ai,
            next_seed(),
        ));
        let seekers = (0..self.config.seekers)
            .map(|_| Controller::Bot(create_seeker_policy(self.seeker_kind, &self.ai, next_seed())))
            .collect();

        debug!(
            game = index,
            evader_start = %setup.evader_start,
            seekers = ?setup.seeker_starts,
            "Starting game"
        );
        let mut session = Session::new(state, evader, seekers)?;
        let outcome = session.run_to_end(self.step_limit())?;
        Ok((outcome, session.steps()))
    }

    /// Play every configured game and return the final statistics.
    pub fn run(&mut self) -> ArenaStatsSnapshot {
        let games = self.config.games;
        let mut stats = ArenaStats::new(&self.config.evader_policy, &self.config.seeker_policy);

        info!(
            games,
            evader = %self.config.evader_policy,
            seeker = %self.config.seeker_policy,
            seekers = self.config.seekers,
            max_turns = self.rules.max_turns,
            "Arena starting"
        );

        let progress = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            let pb = ProgressBar::new(games as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} games ({eta})")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for index in 1..=games {
            let game_start = Instant::now();
            match self.play_game(index) {
                Ok((outcome, steps)) => {
                    debug!(
                        game = index,
                        outcome = %outcome,
                        steps,
                        duration = game_start.elapsed().as_secs_f64(),
                        "Game completed"
                    );
                    stats.record_game(&outcome, steps);
                }
                Err(e) => {
                    warn!(game = index, "Game aborted: {:#}", e);
                    stats.record_abort();
                }
            }

            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            if self.config.log_interval > 0 && index % self.config.log_interval == 0 {
                let snapshot = stats.snapshot();
                let log = || {
                    info!(
                        "Completed {} games ({} captures, {} escapes, capture rate {:.2})",
                        index, snapshot.captures, snapshot.escapes, snapshot.capture_rate
                    )
                };
                match progress {
                    Some(ref pb) => pb.suspend(log),
                    None => log(),
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        let snapshot = stats.snapshot();
        info!(
            games = stats.games(),
            captures = snapshot.captures,
            escapes = snapshot.escapes,
            aborted = snapshot.aborted,
            runtime = format!("{:.2}s", snapshot.runtime_seconds),
            "Arena finished"
        );
        snapshot
    }
}
