//! The janken round: a linear phase machine driving the dealt cards.

use bevy::prelude::*;

use super::card::{Card, Hand, Side, Slot, CARD_SIZE};
use super::fade::FadeOverlay;
use crate::pointer::Pointer;
use crate::scroll::ScrollLayer;
use crate::view::{VIEW_H, VIEW_SIZE};

pub const WAIT_TIME: f32 = 1.0;
pub const DUEL_HOLD: f32 = 1.0;
pub const ROW_SPACING: f32 = 150.0;
pub const ENEMY_ROW_Y: f32 = -60.0;
pub const PLAYER_ROW_Y: f32 = 480.0;
pub const LAYER_SPEEDS: [f32; 2] = [1.5, 2.5];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Phase {
    #[default]
    FadeIn,
    Waiting,
    Drawing,
    Selecting,
    Dueling,
    FadeOut,
    Loading,
}

impl Phase {
    pub fn next(self) -> Phase {
        match self {
            Phase::FadeIn => Phase::Waiting,
            Phase::Waiting => Phase::Drawing,
            Phase::Drawing => Phase::Selecting,
            Phase::Selecting => Phase::Dueling,
            Phase::Dueling => Phase::FadeOut,
            Phase::FadeOut => Phase::Loading,
            Phase::Loading => Phase::Loading,
        }
    }

    /// Phases during which the fade overlay covers the table.
    pub fn shows_overlay(self) -> bool {
        matches!(self, Phase::FadeIn | Phase::FadeOut | Phase::Loading)
    }
}

/// Top-left corner of the centred deck, where every card is spawned.
pub fn deck_pos() -> Vec2 {
    (VIEW_SIZE - CARD_SIZE) / 2.0
}

/// Resting spot of `slot` in `side`'s row.
pub fn row_spot(side: Side, slot: Slot) -> Vec2 {
    let y = match side {
        Side::Enemy => ENEMY_ROW_Y,
        Side::Player => PLAYER_ROW_Y,
    };
    Vec2::new(deck_pos().x + slot.column() * ROW_SPACING, y)
}

/// Owns all per-round state. Lives as a resource only while the janken
/// screen is active.
#[derive(Resource, Debug)]
pub struct Janken {
    phase: Phase,
    fade: FadeOverlay,
    wait: f32,
    enemy: Vec<Card>,
    player: Vec<Card>,
    layers: [ScrollLayer; 2],
}

impl Default for Janken {
    fn default() -> Self {
        Self::new()
    }
}

impl Janken {
    pub fn new() -> Self {
        let mut fade = FadeOverlay::default();
        fade.fade_in();
        Self {
            phase: Phase::FadeIn,
            fade,
            wait: 0.0,
            enemy: Vec::new(),
            player: Vec::new(),
            layers: LAYER_SPEEDS.map(|speed| ScrollLayer::new(speed, VIEW_H)),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn fade(&self) -> &FadeOverlay {
        &self.fade
    }

    pub fn layers(&self) -> &[ScrollLayer; 2] {
        &self.layers
    }

    pub fn cards(&self, side: Side) -> &[Card] {
        match side {
            Side::Enemy => &self.enemy,
            Side::Player => &self.player,
        }
    }

    pub fn card(&self, side: Side, slot: Slot) -> Option<&Card> {
        self.cards(side).get(slot.index())
    }

    pub fn selected(&self) -> Option<&Card> {
        self.player.iter().find(|c| c.is_selected())
    }

    /// Result of the duel once both sides have committed a hand. The enemy
    /// never commits one yet, so there is nothing to compare.
    pub fn duel_outcome(&self) -> Option<(Hand, Hand)> {
        None
    }

    /// One fixed tick. Runs the handler of the current phase only, so at most
    /// one transition happens per call.
    pub fn update(&mut self, pointer: &Pointer, dt: f32) {
        for layer in self.layers.iter_mut() {
            layer.advance();
        }

        match self.phase {
            Phase::FadeIn => {
                if self.fade.step() {
                    self.wait = WAIT_TIME;
                    self.advance();
                }
            }
            Phase::Waiting => {
                self.wait -= dt;
                if self.wait <= 0.0 {
                    self.deal();
                    self.advance();
                }
            }
            Phase::Drawing => self.update_drawing(),
            Phase::Selecting => self.update_selecting(pointer),
            Phase::Dueling => self.update_dueling(dt),
            Phase::FadeOut => {
                if self.fade.step() {
                    self.advance();
                }
            }
            Phase::Loading => {}
        }
    }

    fn advance(&mut self) {
        self.phase = self.phase.next();
    }

    fn deal(&mut self) {
        let at = deck_pos();
        self.enemy = Slot::ALL.map(|slot| Card::new(at, Side::Enemy, slot)).to_vec();
        self.player = Slot::ALL.map(|slot| Card::new(at, Side::Player, slot)).to_vec();
    }

    fn at_row(&self, side: Side, slot: Slot) -> bool {
        self.card(side, slot)
            .is_some_and(|card| card.rests_at(row_spot(side, slot)))
    }

    /// Whether `slot` of `side` may leave the deck: its predecessor in the
    /// row must already be resting in place. The player's first card waits
    /// for the whole enemy row.
    fn may_deal(&self, side: Side, slot: Slot) -> bool {
        match (side, slot.prev()) {
            (_, Some(prev)) => self.at_row(side, prev),
            (Side::Enemy, None) => true,
            (Side::Player, None) => self.at_row(Side::Enemy, Slot::Right),
        }
    }

    fn update_drawing(&mut self) {
        // Gates are read from the state at the start of the tick; a card that
        // lands this tick releases its successor on the next one.
        for side in [Side::Enemy, Side::Player] {
            let ready: Vec<Slot> = Slot::ALL
                .into_iter()
                .filter(|&slot| !self.at_row(side, slot) && self.may_deal(side, slot))
                .collect();
            let cards = match side {
                Side::Enemy => &mut self.enemy,
                Side::Player => &mut self.player,
            };
            for slot in ready {
                cards[slot.index()].set_target(row_spot(side, slot));
            }
        }

        for card in self.player.iter_mut().chain(self.enemy.iter_mut()) {
            card.update();
        }

        if self.at_row(Side::Player, Slot::Right) {
            self.advance();
        }
    }

    fn update_selecting(&mut self, pointer: &Pointer) {
        for card in self.player.iter_mut() {
            card.set_selecting(true);
            match pointer.pos {
                Some(pos) => {
                    card.check_hover(pos);
                }
                None => card.clear_hover(),
            }
        }

        if pointer.pressed {
            if let Some(card) = self
                .player
                .iter_mut()
                .find(|c| c.is_selecting() && c.is_hovered())
            {
                card.select();
                self.start_duel();
                return;
            }
        }

        for card in self.player.iter_mut() {
            card.update();
        }
    }

    fn start_duel(&mut self) {
        for card in self.player.iter_mut() {
            card.set_selecting(false);
        }
        self.wait = DUEL_HOLD;
        self.advance();
    }

    fn update_dueling(&mut self, dt: f32) {
        let Some(middle) = self.player.get(Slot::Middle.index()) else {
            return;
        };
        let duel_spot = Vec2::new(middle.pos().x, PLAYER_ROW_Y);

        for card in self.player.iter_mut() {
            card.set_target(duel_spot);
            card.update();
        }
        for card in self.enemy.iter_mut() {
            card.update();
        }

        if self.player.iter().all(|c| c.rests_at(duel_spot)) {
            self.wait -= dt;
            if self.wait <= 0.0 {
                match self.duel_outcome() {
                    Some((player, enemy)) => info!("Duel {:?} against {:?}", player, enemy),
                    None => info!("Duel ends without a result"),
                }
                self.fade.fade_out();
                self.advance();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn idle() -> Pointer {
        Pointer::default()
    }

    fn run_until(janken: &mut Janken, phase: Phase, pointer: &Pointer) -> usize {
        for tick in 1..=10_000 {
            janken.update(pointer, DT);
            if janken.phase() == phase {
                return tick;
            }
        }
        panic!("never reached {:?}, stuck in {:?}", phase, janken.phase());
    }

    fn centre_of(card: &Card) -> Vec2 {
        card.draw_pos() + CARD_SIZE / 2.0
    }

    #[test]
    fn row_spots_match_the_deal_layout() {
        assert_eq!(deck_pos(), Vec2::new(340.0, 210.0));
        assert_eq!(row_spot(Side::Enemy, Slot::Left), Vec2::new(190.0, -60.0));
        assert_eq!(row_spot(Side::Enemy, Slot::Right), Vec2::new(490.0, -60.0));
        assert_eq!(row_spot(Side::Player, Slot::Middle), Vec2::new(340.0, 480.0));
    }

    #[test]
    fn phases_run_in_order_without_skipping() {
        let mut janken = Janken::new();
        let mut seen = vec![janken.phase()];

        for _ in 0..10_000 {
            let pointer = match janken.card(Side::Player, Slot::Left) {
                Some(card) if janken.phase() == Phase::Selecting => {
                    Pointer::at(centre_of(card), true)
                }
                _ => idle(),
            };
            janken.update(&pointer, DT);
            if *seen.last().unwrap() != janken.phase() {
                seen.push(janken.phase());
            }
            if janken.phase() == Phase::Loading {
                break;
            }
        }

        assert_eq!(
            seen,
            vec![
                Phase::FadeIn,
                Phase::Waiting,
                Phase::Drawing,
                Phase::Selecting,
                Phase::Dueling,
                Phase::FadeOut,
                Phase::Loading,
            ]
        );

        janken.update(&idle(), DT);
        assert_eq!(janken.phase(), Phase::Loading);
    }

    #[test]
    fn fade_in_advances_once_then_waits_about_a_second() {
        let mut janken = Janken::new();
        assert_eq!(run_until(&mut janken, Phase::Waiting, &idle()), 51);
        assert_eq!(janken.fade().alpha(), 0);
        assert!(janken.cards(Side::Player).is_empty());

        let ticks = run_until(&mut janken, Phase::Drawing, &idle());
        assert!((59..=61).contains(&ticks), "waited {ticks} ticks");
        assert_eq!(janken.cards(Side::Enemy).len(), 3);
        assert_eq!(janken.cards(Side::Player).len(), 3);
    }

    #[test]
    fn cards_are_dealt_strictly_in_slot_order() {
        let mut janken = Janken::new();
        run_until(&mut janken, Phase::Drawing, &idle());

        let order = [
            (Side::Enemy, Slot::Left),
            (Side::Enemy, Slot::Middle),
            (Side::Enemy, Slot::Right),
            (Side::Player, Slot::Left),
            (Side::Player, Slot::Middle),
            (Side::Player, Slot::Right),
        ];

        while janken.phase() == Phase::Drawing {
            let before: Vec<bool> = order
                .iter()
                .map(|&(side, slot)| janken.at_row(side, slot))
                .collect();
            janken.update(&idle(), DT);

            for (i, &(side, slot)) in order.iter().enumerate().skip(1) {
                let card = janken.card(side, slot).unwrap();
                let moved = card.pos() != deck_pos();
                if moved {
                    assert!(before[i - 1], "{:?} {:?} left before its predecessor landed", side, slot);
                }
            }
        }
        assert_eq!(janken.phase(), Phase::Selecting);
        for (side, slot) in order {
            assert!(janken.at_row(side, slot));
        }
    }

    #[test]
    fn player_deal_starts_the_frame_after_enemy_row_lands() {
        let mut janken = Janken::new();
        run_until(&mut janken, Phase::Drawing, &idle());

        let last_enemy = |j: &Janken| j.card(Side::Enemy, Slot::Right).unwrap().pos().y;
        while last_enemy(&janken) != ENEMY_ROW_Y {
            janken.update(&idle(), DT);
            assert_eq!(
                janken.card(Side::Player, Slot::Left).unwrap().target(),
                deck_pos()
            );
        }

        janken.update(&idle(), DT);
        let first = janken.card(Side::Player, Slot::Left).unwrap();
        assert_eq!(first.target(), Vec2::new(deck_pos().x - 150.0, 480.0));
        assert!(!first.is_hidden());
    }

    #[test]
    fn pressing_a_hovered_card_starts_the_duel_in_the_same_update() {
        let mut janken = Janken::new();
        run_until(&mut janken, Phase::Selecting, &idle());

        let target = janken.card(Side::Player, Slot::Right).unwrap();
        let press = Pointer::at(centre_of(target), true);
        janken.update(&press, DT);

        assert_eq!(janken.phase(), Phase::Dueling);
        let picked = janken.selected().unwrap();
        assert_eq!(picked.slot(), Slot::Right);
        assert_eq!(picked.hand(), Some(Hand::Scissors));
        assert!(janken.cards(Side::Player).iter().all(|c| !c.is_selecting()));
        assert_eq!(janken.duel_outcome(), None);
    }

    #[test]
    fn hovering_without_pressing_only_lifts() {
        let mut janken = Janken::new();
        run_until(&mut janken, Phase::Selecting, &idle());

        let card = janken.card(Side::Player, Slot::Middle).unwrap();
        let hover = Pointer::at(centre_of(card), false);
        for _ in 0..30 {
            janken.update(&hover, DT);
        }
        assert_eq!(janken.phase(), Phase::Selecting);
        let card = janken.card(Side::Player, Slot::Middle).unwrap();
        assert!(card.is_hovered());
        assert_eq!(card.draw_pos(), row_spot(Side::Player, Slot::Middle) - Vec2::new(0.0, 20.0));
        assert!(janken.selected().is_none());
    }

    #[test]
    fn pressing_empty_table_does_nothing() {
        let mut janken = Janken::new();
        run_until(&mut janken, Phase::Selecting, &idle());

        let miss = Pointer::at(Vec2::new(5.0, 300.0), true);
        for _ in 0..10 {
            janken.update(&miss, DT);
        }
        assert_eq!(janken.phase(), Phase::Selecting);

        let gone = Pointer {
            pos: None,
            pressed: true,
        };
        janken.update(&gone, DT);
        assert_eq!(janken.phase(), Phase::Selecting);
    }

    #[test]
    fn duel_gathers_player_cards_then_fades_out() {
        let mut janken = Janken::new();
        run_until(&mut janken, Phase::Selecting, &idle());
        let card = janken.card(Side::Player, Slot::Left).unwrap();
        janken.update(&Pointer::at(centre_of(card), true), DT);
        assert_eq!(janken.phase(), Phase::Dueling);

        run_until(&mut janken, Phase::FadeOut, &idle());
        assert_eq!(janken.selected().map(Card::slot), Some(Slot::Left));
        assert_eq!(janken.duel_outcome(), None);
        let duel_spot = row_spot(Side::Player, Slot::Middle);
        for card in janken.cards(Side::Player) {
            assert_eq!(card.pos(), duel_spot);
        }
        for slot in Slot::ALL {
            assert!(janken.at_row(Side::Enemy, slot));
        }

        let ticks = run_until(&mut janken, Phase::Loading, &idle());
        assert_eq!(ticks, 51);
        assert_eq!(janken.fade().alpha(), 255);
    }

    #[test]
    fn background_scrolls_in_every_phase() {
        let mut janken = Janken::new();
        for _ in 0..4 {
            janken.update(&idle(), DT);
        }
        let offsets: Vec<f32> = janken.layers().iter().map(|l| l.offset()).collect();
        assert_eq!(offsets, vec![6.0, 10.0]);
    }
}
