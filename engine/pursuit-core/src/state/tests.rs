use super::*;
use crate::transport::TransportType::*;

fn s(id: u32) -> StationId {
    StationId(id)
}

fn mv(dest: u32, transport: TransportType) -> Move {
    Move::new(StationId(dest), transport)
}

/// Stations 1..=n on a line joined by taxi.
fn line(n: u32) -> Arc<TransportGraph> {
    let stations: Vec<_> = (1..=n).map(|i| (i, i as f64, 0.0)).collect();
    let edges: Vec<_> = (1..n).map(|i| (i, i + 1, Taxi)).collect();
    Arc::new(TransportGraph::from_records(&stations, &edges).unwrap())
}

fn quiet_rules(max_turns: u32) -> GameRules {
    GameRules::standard()
        .with_max_turns(max_turns)
        .with_reveal_turns(vec![])
}

fn game(graph: Arc<TransportGraph>, rules: GameRules, evader: u32, seekers: &[u32]) -> GameState {
    let setup = GameSetup::new(s(evader), seekers.iter().map(|&i| s(i)).collect());
    GameState::new(graph, rules, &setup).unwrap()
}

#[test]
fn test_initial_state() {
    let g = game(line(5), GameRules::standard(), 1, &[5]);
    assert_eq!(g.turn(), 1);
    assert_eq!(g.phase(), Phase::EvaderTurn);
    assert_eq!(g.outcome(), Outcome::Running);
    assert_eq!(g.awaiting(), Some(AgentId::EVADER));
    assert_eq!(g.seekers().len(), 1);
    assert_eq!(g.seekers()[0].id, AgentId(1));
    assert!(!g.is_revealed());
    assert_eq!(g.visible_evader_position(), None);
}

#[test]
fn test_scenario_c_legal_moves_follow_tickets() {
    let graph = Arc::new(
        TransportGraph::from_records(
            &[(5, 0.0, 0.0), (6, 1.0, 0.0), (7, 0.0, 1.0), (8, -1.0, 0.0), (9, 9.0, 9.0)],
            &[(5, 6, Taxi), (5, 7, Bus), (5, 8, Underground), (8, 9, Taxi)],
        )
        .unwrap(),
    );
    let evader = Agent::evader(s(5), TicketInventory::new(1, 1, 0, 0));
    let seeker = Agent::seeker(1, s(9), TicketInventory::new(11, 8, 4, 0));
    let g = GameState::from_agents(graph, GameRules::standard(), evader, vec![seeker]).unwrap();

    let moves = g.legal_moves(AgentId::EVADER).unwrap();
    assert_eq!(moves, vec![mv(6, Taxi), mv(7, Bus)]);
    assert!(moves.iter().all(|m| m.transport != Underground));
}

#[test]
fn test_scenario_d_escape_exactly_after_turn_cap() {
    let mut g = game(line(8), quiet_rules(3), 1, &[8]);
    for round in 1..=3 {
        assert_eq!(g.turn(), round);
        let (evader_to, seeker_to) = if round % 2 == 1 { (2, 7) } else { (1, 8) };
        g.apply_move(AgentId::EVADER, mv(evader_to, Taxi)).unwrap();
        assert_eq!(g.outcome(), Outcome::Running);
        g.apply_move(AgentId(1), mv(seeker_to, Taxi)).unwrap();
        if round < 3 {
            assert_eq!(g.outcome(), Outcome::Running);
            assert_eq!(g.phase(), Phase::EvaderTurn);
        }
    }
    assert_eq!(g.outcome(), Outcome::Escaped { rounds: 3 });
    assert_eq!(g.outcome().reason(), "evader escaped");
    assert_eq!(g.awaiting(), None);
    assert_eq!(
        g.apply_move(AgentId::EVADER, mv(1, Taxi)),
        Err(GameError::GameOver)
    );
}

#[test]
fn test_turn_advances_once_per_full_round() {
    let mut g = game(line(9), quiet_rules(24), 5, &[1, 9]);
    g.apply_move(AgentId::EVADER, mv(4, Taxi)).unwrap();
    assert_eq!(g.turn(), 1);
    assert_eq!(g.phase(), Phase::SeekerTurn);
    assert_eq!(g.pending_seekers(), vec![AgentId(1), AgentId(2)]);

    g.apply_move(AgentId(2), mv(8, Taxi)).unwrap();
    assert_eq!(g.turn(), 1);
    assert_eq!(g.awaiting(), Some(AgentId(1)));
    assert_eq!(
        g.apply_move(AgentId(2), mv(7, Taxi)),
        Err(GameError::NotYourTurn { agent: AgentId(2) })
    );

    g.apply_move(AgentId(1), mv(2, Taxi)).unwrap();
    assert_eq!(g.turn(), 2);
    assert_eq!(g.phase(), Phase::EvaderTurn);
    assert!(g.agents().iter().all(|a| !a.moved_this_turn));
}

#[test]
fn test_capture_when_seeker_lands_on_evader() {
    let mut g = game(line(4), quiet_rules(24), 1, &[3]);
    g.apply_move(AgentId::EVADER, mv(2, Taxi)).unwrap();
    assert_eq!(g.outcome(), Outcome::Running);
    g.apply_move(AgentId(1), mv(2, Taxi)).unwrap();
    assert_eq!(
        g.outcome(),
        Outcome::Captured { by: AgentId(1), station: s(2), turn: 1 }
    );
    assert_eq!(g.turn(), 1);
}

#[test]
fn test_capture_when_evader_walks_into_seeker() {
    let mut g = game(line(4), quiet_rules(24), 1, &[2, 4]);
    g.apply_move(AgentId::EVADER, mv(2, Taxi)).unwrap();
    assert_eq!(
        g.outcome(),
        Outcome::Captured { by: AgentId(1), station: s(2), turn: 1 }
    );
    assert!(g.is_over());
}

#[test]
fn test_no_capture_while_positions_differ() {
    let mut g = game(line(6), quiet_rules(24), 1, &[6]);
    g.apply_move(AgentId::EVADER, mv(2, Taxi)).unwrap();
    g.apply_move(AgentId(1), mv(5, Taxi)).unwrap();
    g.apply_move(AgentId::EVADER, mv(3, Taxi)).unwrap();
    g.apply_move(AgentId(1), mv(4, Taxi)).unwrap();
    assert_eq!(g.outcome(), Outcome::Running);
    assert_eq!(g.turn(), 3);
}

#[test]
fn test_illegal_moves_leave_state_untouched() {
    let graph = Arc::new(
        TransportGraph::from_records(
            &[(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 2.0, 0.0), (4, 3.0, 0.0)],
            &[(1, 2, Taxi), (2, 3, Taxi), (3, 4, Taxi), (3, 4, Underground)],
        )
        .unwrap(),
    );
    let rules = quiet_rules(24).with_seeker_tickets(TicketInventory::new(5, 0, 0, 0));
    let mut g = game(graph, rules, 1, &[4]);

    assert_eq!(
        g.apply_move(AgentId(1), mv(3, Taxi)),
        Err(GameError::NotYourTurn { agent: AgentId(1) })
    );
    assert_eq!(
        g.apply_move(AgentId::EVADER, mv(3, Taxi)),
        Err(GameError::InvalidMove { agent: AgentId::EVADER, destination: s(3), transport: Taxi })
    );
    assert_eq!(
        g.apply_move(AgentId::EVADER, mv(42, Taxi)),
        Err(GameError::UnknownStation(s(42)))
    );
    assert_eq!(
        g.apply_move(AgentId(7), mv(2, Taxi)),
        Err(GameError::UnknownAgent(AgentId(7)))
    );
    assert_eq!(g.evader().station, s(1));
    assert_eq!(g.phase(), Phase::EvaderTurn);

    g.apply_move(AgentId::EVADER, mv(2, Taxi)).unwrap();
    assert_eq!(
        g.apply_move(AgentId(1), mv(3, Underground)),
        Err(GameError::InsufficientTickets { transport: Underground })
    );
    assert_eq!(g.seekers()[0].station, s(4));
    assert_eq!(g.seekers()[0].tickets.remaining(Taxi), Some(5));
}

#[test]
fn test_seeker_tickets_decrease_and_stop_at_zero() {
    let rules = quiet_rules(24).with_seeker_tickets(TicketInventory::new(2, 0, 0, 0));
    let mut g = game(line(10), rules, 1, &[10]);
    let mut previous = 2;
    for (evader_to, seeker_to) in [(2, 9), (1, 8)] {
        g.apply_move(AgentId::EVADER, mv(evader_to, Taxi)).unwrap();
        g.apply_move(AgentId(1), mv(seeker_to, Taxi)).unwrap();
        let left = g.seekers()[0].tickets.remaining(Taxi).unwrap();
        assert_eq!(left, previous - 1);
        previous = left;
    }
    assert!(g.legal_moves(AgentId(1)).unwrap().is_empty());

    // a stuck seeker is skipped and the round still completes
    g.apply_move(AgentId::EVADER, mv(2, Taxi)).unwrap();
    assert_eq!(g.turn(), 4);
    assert_eq!(g.phase(), Phase::EvaderTurn);
    assert_eq!(g.seekers()[0].tickets.remaining(Taxi), Some(0));
}

#[test]
fn test_evader_unlimited_tickets_never_drop() {
    let mut g = game(line(6), quiet_rules(24), 1, &[6]);
    g.apply_move(AgentId::EVADER, mv(2, Taxi)).unwrap();
    assert_eq!(g.evader().tickets.remaining(Taxi), None);
}

#[test]
fn test_stuck_evader_passes() {
    let evader = Agent::evader(s(1), TicketInventory::empty());
    let seeker = Agent::seeker(1, s(4), TicketInventory::new(5, 0, 0, 0));
    let mut g =
        GameState::from_agents(line(4), quiet_rules(24), evader, vec![seeker]).unwrap();
    assert!(g.legal_moves(AgentId::EVADER).unwrap().is_empty());
    g.pass(AgentId::EVADER).unwrap();
    assert_eq!(g.phase(), Phase::SeekerTurn);
    assert!(g.history().is_empty());

    assert_eq!(
        g.pass(AgentId(1)),
        Err(GameError::CannotPass { agent: AgentId(1) })
    );
}

#[test]
fn test_stuck_evader_is_still_revealed() {
    let evader = Agent::evader(s(2), TicketInventory::empty());
    let seeker = Agent::seeker(1, s(4), TicketInventory::new(5, 0, 0, 0));
    let rules = GameRules::standard().with_reveal_turns(vec![1]);
    let mut g = GameState::from_agents(line(4), rules, evader, vec![seeker]).unwrap();
    g.pass(AgentId::EVADER).unwrap();
    assert!(g.is_revealed());
    assert_eq!(g.visible_evader_position(), Some(s(2)));
}

#[test]
fn test_uncontrolled_seekers_do_not_hold_up_the_round() {
    let mut g = game(line(9), quiet_rules(24), 5, &[1, 9]);
    g.set_controlled(AgentId(2), false).unwrap();
    g.apply_move(AgentId::EVADER, mv(4, Taxi)).unwrap();
    assert_eq!(g.pending_seekers(), vec![AgentId(1)]);
    assert_eq!(
        g.apply_move(AgentId(2), mv(8, Taxi)),
        Err(GameError::NotYourTurn { agent: AgentId(2) })
    );
    g.apply_move(AgentId(1), mv(2, Taxi)).unwrap();
    assert_eq!(g.turn(), 2);

    // dropping the last pending seeker mid-phase completes the round
    g.set_controlled(AgentId(2), true).unwrap();
    g.apply_move(AgentId::EVADER, mv(5, Taxi)).unwrap();
    g.apply_move(AgentId(1), mv(3, Taxi)).unwrap();
    assert_eq!(g.turn(), 2);
    g.set_controlled(AgentId(2), false).unwrap();
    assert_eq!(g.turn(), 3);
    assert_eq!(g.phase(), Phase::EvaderTurn);
}

#[test]
fn test_reveal_turns_update_belief_and_history() {
    let rules = GameRules::standard().with_reveal_turns(vec![2]);
    let mut g = game(line(9), rules, 5, &[1]);

    g.apply_move(AgentId::EVADER, mv(6, Taxi)).unwrap();
    assert_eq!(g.history()[0], MoveRecord { turn: 1, transport: Taxi, revealed: None });
    assert!(!g.belief().has_disclosure());
    g.apply_move(AgentId(1), mv(2, Taxi)).unwrap();

    g.apply_move(AgentId::EVADER, mv(7, Taxi)).unwrap();
    assert_eq!(g.history()[1].revealed, Some(s(7)));
    assert!(g.is_revealed());
    assert_eq!(g.belief_map(), BTreeMap::from([(s(7), 1.0)]));
    g.apply_move(AgentId(1), mv(3, Taxi)).unwrap();

    g.apply_move(AgentId::EVADER, mv(8, Taxi)).unwrap();
    assert!(!g.is_revealed());
    assert_eq!(g.visible_evader_position(), Some(s(7)));
    let candidates: Vec<_> = g.belief().reachable().iter().copied().collect();
    assert_eq!(candidates, vec![s(6), s(8)]);
    assert_eq!(g.transport_history(), vec![Taxi, Taxi, Taxi]);
}

#[test]
fn test_public_view_hides_evader_until_revealed() {
    let mut g = game(line(6), quiet_rules(24), 1, &[6]);
    g.apply_move(AgentId::EVADER, mv(2, Taxi)).unwrap();
    let view = g.public_view();
    assert_eq!(view.evader_position, None);
    assert_eq!(view.awaiting, Some(AgentId(1)));
    assert_eq!(view.legal_destinations, vec![s(5)]);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["phase"], "seeker_turn");
    assert_eq!(json["outcome"]["kind"], "running");
    assert_eq!(json["history"][0]["transport"], "taxi");
    assert!(json.to_string().find("\"station\":2").is_none());
}

#[test]
fn test_rejects_invalid_setups() {
    let dup = GameSetup::new(s(1), vec![s(1)]);
    assert_eq!(
        GameState::new(line(3), GameRules::standard(), &dup).unwrap_err(),
        RulesError::DuplicateStart(s(1))
    );
    let evader = Agent::evader(s(1), TicketInventory::evader(5));
    assert_eq!(
        GameState::from_agents(line(3), GameRules::standard(), evader, vec![]).unwrap_err(),
        RulesError::NoSeekers
    );
}

#[test]
fn test_from_agents_rejects_wrong_roles() {
    let evader = Agent::evader(s(1), TicketInventory::evader(5));
    let second_evader = Agent::evader(s(4), TicketInventory::evader(5));
    assert_eq!(
        GameState::from_agents(line(6), GameRules::standard(), evader, vec![second_evader])
            .unwrap_err(),
        RulesError::RoleMismatch {
            agent: AgentId(1),
            expected: Role::Seeker
        }
    );

    let seeker_as_evader = Agent::seeker(1, s(1), TicketInventory::new(11, 8, 4, 0));
    let seeker = Agent::seeker(1, s(4), TicketInventory::new(11, 8, 4, 0));
    assert_eq!(
        GameState::from_agents(line(6), GameRules::standard(), seeker_as_evader, vec![seeker])
            .unwrap_err(),
        RulesError::RoleMismatch {
            agent: AgentId::EVADER,
            expected: Role::Evader
        }
    );
}
