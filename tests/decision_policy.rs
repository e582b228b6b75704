//! Behavior of the decision policies and the bot facade

mod common;

use common::{EPS, assert_uniform, beliefs_after, count_moves, moves};
use rand::{SeedableRng, rngs::StdRng};
use rps_entropy::{
    BotConfig, DecisionPolicy, DecisionReason, EntropyBot, Move, PolicyKind,
    beliefs::window::{recent_window_len, warmup_rounds},
    policy::{EntropySoftmaxPolicy, ExplorationSchedule, FrequencyPolicy, RoundContext},
    utils::{max_entropy_bits, softmax},
};

#[test]
fn no_observations_means_uniform_beliefs() {
    let policy = EntropySoftmaxPolicy::new(0.7, 5.0);
    let beliefs = beliefs_after(15, &[]);
    let estimate = policy.estimate(&beliefs, RoundContext::new(0, 15));
    assert_eq!(estimate.probs, [1.0 / 3.0; 3]);
    assert!((estimate.entropy - max_entropy_bits(3)).abs() < EPS);
    assert!(estimate.beta.unwrap().abs() < EPS);
}

#[test]
fn warmup_rounds_are_uniform_regardless_of_beliefs() {
    // A wildly skewed history would make exploitation pick Paper almost always
    let history = moves(&"R".repeat(200));
    let total_rounds = 1000;
    let beliefs = beliefs_after(total_rounds, &history);
    let k = recent_window_len(total_rounds, None);
    let warmup = warmup_rounds(k);
    assert!(warmup > 0);

    let policy = EntropySoftmaxPolicy::new(0.7, 5.0);
    let mut rng = StdRng::seed_from_u64(2024);
    let mut chosen = Vec::with_capacity(6000);
    for trial in 0..6000 {
        let round = RoundContext::new(trial % warmup, total_rounds as usize);
        let decision = policy.decide(&beliefs, round, &mut rng);
        assert_eq!(decision.reason, DecisionReason::Warmup);
        chosen.push(decision.chosen);
    }
    assert_uniform(&count_moves(chosen));
}

#[test]
fn exploitation_favors_the_counter_move() {
    let beliefs = beliefs_after(100, &moves(&"S".repeat(60)));
    let policy = EntropySoftmaxPolicy::new(0.7, 5.0).with_exploration(ExplorationSchedule::constant(0.0));
    let mut rng = StdRng::seed_from_u64(8);

    let chosen: Vec<Move> = (0..2000)
        .map(|_| policy.decide(&beliefs, RoundContext::new(90, 100), &mut rng).chosen)
        .collect();
    let counts = count_moves(chosen);
    // Rock beats Scissors
    assert!(counts[Move::Rock.index()] > counts[Move::Paper.index()]);
    assert!(counts[Move::Rock.index()] > counts[Move::Scissors.index()]);
}

#[test]
fn exploration_fires_at_its_rate_after_the_warmup() {
    let beliefs = beliefs_after(100, &moves(&"S".repeat(60)));
    let warmup = warmup_rounds(beliefs.window_len());
    let policy = EntropySoftmaxPolicy::new(0.7, 5.0)
        .with_exploration(ExplorationSchedule::constant(0.3));
    let mut rng = StdRng::seed_from_u64(31);

    // The warm-up gate comes first, so no exploration roll is reported there
    for round in 0..warmup {
        let decision = policy.decide(&beliefs, RoundContext::new(round, 100), &mut rng);
        assert_eq!(decision.reason, DecisionReason::Warmup);
    }

    let trials = 6000;
    let mut explored = Vec::new();
    for _ in 0..trials {
        let decision = policy.decide(&beliefs, RoundContext::new(50, 100), &mut rng);
        assert_ne!(decision.reason, DecisionReason::Warmup);
        if decision.reason == DecisionReason::Explore {
            explored.push(decision.chosen);
        }
    }

    let share = explored.len() as f64 / trials as f64;
    assert!((share - 0.3).abs() < 0.03, "explore share {share}");
    // Exploration ignores the skewed beliefs
    assert_uniform(&count_moves(explored));
}

#[test]
fn choosing_a_move_does_not_touch_beliefs() {
    let mut bot = EntropyBot::new(30, BotConfig::default().with_seed(5)).unwrap();
    for mv in moves("RPRRSPRR") {
        bot.choose_move(0);
        bot.record_opponent_move(mv);
    }

    let before = bot.beliefs().clone();
    for round in 8..20 {
        bot.choose_move(round);
    }
    assert_eq!(bot.beliefs(), &before);
}

#[test]
fn same_state_and_seed_give_the_same_move() {
    let beliefs = beliefs_after(40, &moves("PPSPRPPSPP"));
    let policy = EntropySoftmaxPolicy::new(0.7, 5.0);
    for round in 0..40 {
        let ctx = RoundContext::new(round, 40);
        let mut first = StdRng::seed_from_u64(round as u64);
        let mut second = StdRng::seed_from_u64(round as u64);
        assert_eq!(
            policy.decide(&beliefs, ctx, &mut first),
            policy.decide(&beliefs, ctx, &mut second)
        );
    }
}

#[test]
fn seeded_bots_replay_identical_sessions() {
    let opponent = moves("RRPSPSRRPPSRPSRS");
    let play = || {
        let mut bot = EntropyBot::new(opponent.len(), BotConfig::default().with_seed(77)).unwrap();
        opponent
            .iter()
            .enumerate()
            .map(|(round, mv)| {
                let ours = bot.choose_move(round);
                bot.record_opponent_move(*mv);
                ours
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(play(), play());
}

#[test]
fn softmax_is_a_distribution_for_any_finite_utilities() {
    let cases = [
        [0.0, 0.0, 0.0],
        [1.0, -1.0, 0.0],
        [0.3, 0.3, -0.6],
        [-2.0, 2.0, 0.0],
    ];
    for eu in cases {
        for step in 0..=10 {
            let beta = 5.0 * step as f64 / 10.0;
            let (probs, fell_back) = softmax(&eu, beta);
            assert!(!fell_back);
            assert!(probs.iter().all(|&p| p >= 0.0));
            assert!((probs.iter().sum::<f64>() - 1.0).abs() < EPS);
        }
    }
}

#[test]
fn non_finite_utilities_fall_back_to_uniform() {
    let (probs, fell_back) = softmax(&[f64::NAN, 0.0, 1.0], 2.0);
    assert!(fell_back);
    assert_eq!(probs, vec![1.0 / 3.0; 3]);
}

#[test]
fn exploration_rate_declines_over_the_session() {
    let bot = EntropyBot::new(20, BotConfig::default()).unwrap();
    let early = bot.diagnostics().exploration;
    assert!((early - 0.25).abs() < EPS);

    let mut bot = bot;
    for _ in 0..18 {
        bot.record_opponent_move(Move::Rock);
    }
    assert!((bot.diagnostics().exploration - 0.1).abs() < EPS);
}

#[test]
fn frequency_bot_counters_the_favorite() {
    let beliefs = beliefs_after(50, &moves("PPPPRS"));
    let policy = FrequencyPolicy::new(0.0);
    let mut rng = StdRng::seed_from_u64(1);
    let decision = policy.decide(&beliefs, RoundContext::new(6, 50), &mut rng);
    assert_eq!(decision.chosen, Move::Scissors);
    assert_eq!(policy.kind(), PolicyKind::Frequency);
}
