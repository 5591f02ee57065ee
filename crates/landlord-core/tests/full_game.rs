use landlord_core::game::engine::Game;
use landlord_core::model::card::Card;
use landlord_core::model::pattern::{PatternKind, Play};
use landlord_core::model::rank::Rank;
use landlord_core::model::round::{BidOutcome, GameError, Phase, PlayOutcome};
use landlord_core::model::seat::Seat;
use landlord_core::model::suit::Suit;
use std::collections::HashSet;

fn assert_conserved(game: &Game) {
    let round = game.round().expect("dealt");
    assert_eq!(round.cards_in_play(), 54);

    let mut seen = HashSet::new();
    for seat in Seat::LOOP {
        for card in round.hand(seat).iter() {
            assert!(seen.insert(*card), "{card} duplicated");
        }
    }
    for card in round.discards() {
        assert!(seen.insert(*card), "{card} duplicated");
    }
    if round.landlord().is_none() {
        for card in round.reserve() {
            assert!(seen.insert(*card), "{card} duplicated");
        }
    }
    assert_eq!(seen.len(), 54);
}

#[test]
fn deals_partition_the_deck_for_many_seeds() {
    for seed in 0..50 {
        let mut game = Game::with_seed(seed);
        game.deal().unwrap();
        assert_conserved(&game);
        let state = game.state();
        assert_eq!(state.hand_counts, [17, 17, 17]);
        assert_eq!(state.reserve.len(), 3);
    }
}

#[test]
fn bidding_scenario_resolves_after_full_round() {
    let mut game = Game::with_seed(2024);
    game.deal().unwrap();

    assert!(game.call_landlord(Seat::First, 1).is_ok());
    assert!(game.call_landlord(Seat::Second, 2).is_ok());
    assert_eq!(
        game.call_landlord(Seat::Third, 0),
        Err(GameError::InvalidBid(0))
    );
    assert_eq!(game.phase(), Phase::Calling);
    assert_eq!(
        game.call_landlord(Seat::Third, 3),
        Ok(BidOutcome::LandlordElected {
            landlord: Seat::Third,
            bid: 3
        })
    );

    let state = game.state();
    assert_eq!(state.bids, [1, 2, 3]);
    assert_eq!(state.landlord, Some(Seat::Third));
    assert_eq!(state.hand_counts, [17, 17, 20]);
    assert_conserved(&game);
}

#[test]
fn landlord_sheds_singles_while_others_pass() {
    let mut game = Game::with_seed(31337);
    game.deal().unwrap();
    for seat in Seat::LOOP {
        game.call_landlord(seat, 1).unwrap();
    }
    let landlord = game.landlord().unwrap();
    assert_eq!(landlord, Seat::First);

    let mut finished = None;
    for _ in 0..200 {
        let state = game.state();
        if state.phase == Phase::Finished {
            break;
        }
        let seat = state.current_player;
        if state.last_play.is_some() {
            let passed = game.pass(seat).unwrap();
            assert_eq!(passed.next, seat.next());
        } else {
            let hand = game.hand(seat).unwrap();
            let lowest = *hand.cards().last().unwrap();
            let before = hand.len();
            match game.play_cards(seat, &[lowest]).unwrap() {
                PlayOutcome::GameOver { winner } => finished = Some(winner),
                PlayOutcome::Played { next } => assert_eq!(next, seat.next()),
            }
            assert_eq!(game.hand(seat).unwrap().len(), before - 1);
        }
        assert_conserved(&game);
    }

    assert_eq!(finished, Some(landlord));
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.winner(), Some(landlord));
    assert_eq!(game.round().unwrap().landlord_won(), Some(true));
    assert_eq!(game.state().hand_counts[landlord.index()], 0);

    game.deal().unwrap();
    assert_eq!(game.phase(), Phase::Calling);
    assert_eq!(game.state().winner, None);
}

#[test]
fn rocket_beats_a_bomb_shape() {
    let rocket = Play::classify(&[Card::BIG_JOKER, Card::SMALL_JOKER]).unwrap();
    assert_eq!(rocket.kind, PatternKind::Rocket);
    assert_eq!(rocket.weight, 999);

    let bomb = Play::classify(&Suit::ALL.map(|suit| Card::new(Rank::King, suit))).unwrap();
    assert_eq!(bomb.kind, PatternKind::Bomb);
    assert!(rocket.beats(&bomb));
    assert!(!bomb.beats(&rocket));
}
