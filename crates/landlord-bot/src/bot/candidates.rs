use landlord_core::model::card::Card;
use landlord_core::model::hand::Hand;
use landlord_core::model::pattern::Play;
use std::collections::BTreeMap;

const MIN_STRAIGHT: usize = 5;
const MIN_PAIR_RUN: usize = 3;
const MIN_TRIPLE_RUN: usize = 2;

/// Every distinct shape that can be formed from `hand`, one representative
/// card choice per shape and weight.
pub fn candidates(hand: &Hand) -> Vec<Play> {
    let groups = group_by_weight(hand);
    let mut out = Vec::new();

    for cards in groups.values() {
        for width in 1..=cards.len().min(4) {
            push(&mut out, &cards[..width]);
        }
    }

    let jokers: Vec<Card> = hand.iter().copied().filter(|c| c.is_joker()).collect();
    if jokers.len() == 2 {
        push(&mut out, &jokers);
    }

    runs(&groups, 1, MIN_STRAIGHT, &mut out);
    runs(&groups, 2, MIN_PAIR_RUN, &mut out);
    runs(&groups, 3, MIN_TRIPLE_RUN, &mut out);
    out
}

fn group_by_weight(hand: &Hand) -> BTreeMap<u16, Vec<Card>> {
    let mut groups: BTreeMap<u16, Vec<Card>> = BTreeMap::new();
    for card in hand.iter() {
        groups.entry(card.weight()).or_default().push(*card);
    }
    groups
}

/// Runs of `width` cards per weight over consecutive weights, at least
/// `min_groups` long.
fn runs(groups: &BTreeMap<u16, Vec<Card>>, width: usize, min_groups: usize, out: &mut Vec<Play>) {
    let eligible: Vec<u16> = groups
        .iter()
        .filter(|(_, cards)| cards.len() >= width)
        .map(|(weight, _)| *weight)
        .collect();

    for start in 0..eligible.len() {
        let mut end = start;
        while end + 1 < eligible.len() && eligible[end + 1] == eligible[end] + 1 {
            end += 1;
            let span = end - start + 1;
            if span >= min_groups {
                let cards: Vec<Card> = eligible[start..=end]
                    .iter()
                    .flat_map(|w| groups[w][..width].iter().copied())
                    .collect();
                push(out, &cards);
            }
        }
    }
}

fn push(out: &mut Vec<Play>, cards: &[Card]) {
    if let Some(play) = Play::classify(cards) {
        out.push(play);
    }
}
