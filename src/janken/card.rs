use bevy::prelude::*;

pub const CARD_W: f32 = 120.0;
pub const CARD_H: f32 = 180.0;
pub const CARD_SIZE: Vec2 = Vec2::new(CARD_W, CARD_H);
pub const CARD_SPEED: f32 = 10.0;
pub const HOVER_LIFT: f32 = 20.0;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Player,
    Enemy,
}

/// Fixed row position. Deal order follows the declaration order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Slot {
    Left,
    Middle,
    Right,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Left, Slot::Middle, Slot::Right];

    pub fn index(self) -> usize {
        match self {
            Slot::Left => 0,
            Slot::Middle => 1,
            Slot::Right => 2,
        }
    }

    /// Horizontal step from the row centre, in card spacings.
    pub fn column(self) -> f32 {
        self.index() as f32 - 1.0
    }

    pub fn prev(self) -> Option<Slot> {
        match self {
            Slot::Left => None,
            Slot::Middle => Some(Slot::Left),
            Slot::Right => Some(Slot::Middle),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Hand {
    /// Face dealt to the player's card in `slot`.
    pub fn for_slot(slot: Slot) -> Hand {
        match slot {
            Slot::Left => Hand::Rock,
            Slot::Middle => Hand::Paper,
            Slot::Right => Hand::Scissors,
        }
    }
}

/// A single card on the janken table. Positions are top-left corners in
/// screen space.
#[derive(Clone, Debug)]
pub struct Card {
    side: Side,
    slot: Slot,
    spawn: Vec2,
    pos: Vec2,
    target: Vec2,
    speed: f32,
    lift: f32,
    arrived: bool,
    hidden: bool,
    selecting: bool,
    selected: bool,
    hovered: bool,
}

impl Card {
    pub fn new(spawn: Vec2, side: Side, slot: Slot) -> Self {
        Self {
            side,
            slot,
            spawn,
            pos: spawn,
            target: spawn,
            speed: CARD_SPEED,
            lift: 0.0,
            arrived: true,
            hidden: true,
            selecting: false,
            selected: false,
            hovered: false,
        }
    }

    #[cfg(test)]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Resting position, without the hover lift.
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Where the card is drawn this frame.
    pub fn draw_pos(&self) -> Vec2 {
        self.pos - Vec2::new(0.0, self.lift)
    }

    #[cfg(test)]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    #[cfg(test)]
    pub fn is_arrived(&self) -> bool {
        self.arrived
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// True once the card has come to rest on `spot`.
    pub fn rests_at(&self, spot: Vec2) -> bool {
        self.arrived && self.pos == spot
    }

    /// Enemy cards are dealt upside down.
    pub fn rotation(&self) -> f32 {
        match self.side {
            Side::Enemy => std::f32::consts::PI,
            Side::Player => 0.0,
        }
    }

    pub fn hand(&self) -> Option<Hand> {
        match self.side {
            Side::Player => Some(Hand::for_slot(self.slot)),
            Side::Enemy => None,
        }
    }

    /// Starts a move toward `to`. Ignored while a previous move is still in
    /// flight; returns whether the target was taken.
    pub fn set_target(&mut self, to: Vec2) -> bool {
        if !self.arrived {
            return false;
        }
        self.target = to;
        self.arrived = false;
        self.hidden = false;
        true
    }

    pub fn set_selecting(&mut self, selecting: bool) {
        self.selecting = selecting;
        if !selecting {
            self.lift = 0.0;
        }
    }

    pub fn select(&mut self) {
        self.selected = true;
    }

    pub fn update(&mut self) {
        if !self.hidden && (!self.arrived || self.selecting) {
            let delta = self.target - self.pos;
            let distance = delta.length();
            if distance > self.speed {
                self.pos += delta / distance * self.speed;
            } else {
                self.pos = self.target;
                self.arrived = true;
            }
        }

        if self.side == Side::Player && self.selecting {
            self.lift = if self.hovered { HOVER_LIFT } else { 0.0 };
        }
    }

    pub fn check_hover(&mut self, pointer: Vec2) -> bool {
        let at = self.draw_pos();
        self.hovered = pointer.x >= at.x
            && pointer.x <= at.x + CARD_W
            && pointer.y >= at.y
            && pointer.y <= at.y + CARD_H;
        self.hovered
    }

    pub fn clear_hover(&mut self) {
        self.hovered = false;
    }

    /// Back to the face-down spawn state.
    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.target = self.spawn;
        self.arrived = true;
        self.hidden = true;
        self.lift = 0.0;
        self.selecting = false;
        self.selected = false;
        self.hovered = false;
    }
}
